use fixedbitset::FixedBitSet;

use super::index_trait::*;


/// An in-memory [`TextIndex`].
///
/// Each document is stored as a row of `(feature, weight)` pairs
/// sorted by feature id.
/// The inverted lists `feature -> documents` and
/// `category -> documents` are built once by [`SparseIndexBuilder::build`].
///
/// # Example
/// ```
/// use textboost::{SparseIndexBuilder, TextIndex};
///
/// let mut builder = SparseIndexBuilder::new(3, 2);
/// builder.push_document(&[(0, 0.5), (2, 1.0)], &[0]);
/// builder.push_document(&[(1, 0.25)], &[1]);
/// let index = builder.build();
///
/// assert_eq!(index.feature_documents(2), &[0]);
/// assert!(index.belongs_to(1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct SparseIndex {
    n_features: usize,
    n_categories: usize,
    documents: Vec<Vec<(FeatureId, f64)>>,
    feature_documents: Vec<Vec<DocumentId>>,
    category_documents: Vec<Vec<DocumentId>>,
    // `membership[c]` has the bit `d` set iff document `d` is in `c`.
    membership: Vec<FixedBitSet>,
}


impl SparseIndex {
    /// Returns the `(feature, weight)` pairs of `document`,
    /// sorted by feature id.
    pub fn document_features(&self, document: DocumentId)
        -> &[(FeatureId, f64)]
    {
        &self.documents[document][..]
    }


    /// Returns the categories `document` belongs to.
    pub fn document_categories(&self, document: DocumentId)
        -> Vec<CategoryId>
    {
        (0..self.n_categories)
            .filter(|&cat| self.membership[cat].contains(document))
            .collect()
    }
}


impl TextIndex for SparseIndex {
    fn n_documents(&self) -> usize {
        self.documents.len()
    }


    fn n_features(&self) -> usize {
        self.n_features
    }


    fn n_categories(&self) -> usize {
        self.n_categories
    }


    fn category_documents(&self, category: CategoryId) -> &[DocumentId] {
        &self.category_documents[category][..]
    }


    fn feature_documents(&self, feature: FeatureId) -> &[DocumentId] {
        &self.feature_documents[feature][..]
    }


    #[inline]
    fn weight(&self, document: DocumentId, feature: FeatureId) -> f64 {
        let row = &self.documents[document];
        row.binary_search_by_key(&feature, |&(f, _)| f)
            .map(|pos| row[pos].1)
            .unwrap_or(0f64)
    }


    #[inline]
    fn has_feature(&self, document: DocumentId, feature: FeatureId) -> bool {
        self.documents[document]
            .binary_search_by_key(&feature, |&(f, _)| f)
            .is_ok()
    }


    #[inline]
    fn belongs_to(&self, document: DocumentId, category: CategoryId) -> bool {
        self.membership[category].contains(document)
    }
}


/// A struct that builds [`SparseIndex`].
/// The numbers of features and categories are fixed up front,
/// documents are appended one by one.
#[derive(Debug, Clone)]
pub struct SparseIndexBuilder {
    n_features: usize,
    n_categories: usize,
    documents: Vec<Vec<(FeatureId, f64)>>,
    labels: Vec<Vec<CategoryId>>,
}


impl SparseIndexBuilder {
    /// Construct a new instance of [`SparseIndexBuilder`].
    pub fn new(n_features: usize, n_categories: usize) -> Self {
        Self {
            n_features,
            n_categories,
            documents: Vec::new(),
            labels: Vec::new(),
        }
    }


    /// Append a document and returns its id.
    /// Zero weights are dropped; if a feature is given twice,
    /// the first occurrence is kept.
    ///
    /// # Panics
    /// Panics if a feature or category id is out of range.
    pub fn push_document(
        &mut self,
        features: &[(FeatureId, f64)],
        categories: &[CategoryId],
    ) -> DocumentId
    {
        let mut row = features.iter()
            .copied()
            .filter(|&(_, w)| w != 0f64)
            .collect::<Vec<_>>();
        for &(feature, _) in &row {
            assert!(
                feature < self.n_features,
                "feature {feature} is out of range (n_features = {})",
                self.n_features,
            );
        }
        row.sort_by_key(|&(f, _)| f);
        row.dedup_by_key(|(f, _)| *f);

        for &cat in categories {
            assert!(
                cat < self.n_categories,
                "category {cat} is out of range (n_categories = {})",
                self.n_categories,
            );
        }

        let id = self.documents.len();
        self.documents.push(row);
        self.labels.push(categories.to_vec());
        id
    }


    /// Append a document.
    /// This is the consuming version of
    /// [`SparseIndexBuilder::push_document`].
    pub fn document(
        mut self,
        features: &[(FeatureId, f64)],
        categories: &[CategoryId],
    ) -> Self
    {
        self.push_document(features, categories);
        self
    }


    /// Build a [`SparseIndex`].
    /// This method consumes `self`.
    pub fn build(self) -> SparseIndex {
        let n_documents = self.documents.len();

        let mut feature_documents = vec![Vec::new(); self.n_features];
        for (doc, row) in self.documents.iter().enumerate() {
            for &(feature, _) in row {
                feature_documents[feature].push(doc);
            }
        }

        let mut category_documents = vec![Vec::new(); self.n_categories];
        let mut membership = vec![
            FixedBitSet::with_capacity(n_documents); self.n_categories
        ];
        for (doc, cats) in self.labels.iter().enumerate() {
            for &cat in cats {
                if !membership[cat].put(doc) {
                    category_documents[cat].push(doc);
                }
            }
        }

        SparseIndex {
            n_features: self.n_features,
            n_categories: self.n_categories,
            documents: self.documents,
            feature_documents,
            category_documents,
            membership,
        }
    }
}
