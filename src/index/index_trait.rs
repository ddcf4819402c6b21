/// Dense category identifier in `[0, n_categories)`.
pub type CategoryId = usize;
/// Dense document identifier in `[0, n_documents)`.
pub type DocumentId = usize;
/// Dense feature identifier in `[0, n_features)`.
pub type FeatureId = usize;


/// A trait that defines the sparse `document × feature × category` store
/// the boosting engine reads from.
///
/// Feature weights are expected to lie in `[0, 1]`.
/// A document "has" a feature iff its weight for the feature is non-zero.
pub trait TextIndex: Sync {
    /// Returns the number of documents.
    fn n_documents(&self) -> usize;


    /// Returns the number of features.
    fn n_features(&self) -> usize;


    /// Returns the number of categories.
    fn n_categories(&self) -> usize;


    /// Returns the documents that belong to `category`.
    fn category_documents(&self, category: CategoryId) -> &[DocumentId];


    /// Returns the documents that contain `feature`,
    /// in ascending order.
    fn feature_documents(&self, feature: FeatureId) -> &[DocumentId];


    /// Returns the weight of `feature` in `document`,
    /// `0.0` if the document does not contain it.
    fn weight(&self, document: DocumentId, feature: FeatureId) -> f64;


    /// Returns `true` if `document` contains `feature`.
    fn has_feature(&self, document: DocumentId, feature: FeatureId) -> bool;


    /// Returns `true` if `document` belongs to `category`.
    fn belongs_to(&self, document: DocumentId, category: CategoryId) -> bool;


    /// Returns the pair `(n_documents, n_features)`.
    fn shape(&self) -> (usize, usize) {
        (self.n_documents(), self.n_features())
    }
}
