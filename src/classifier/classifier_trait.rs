use rayon::prelude::*;

use crate::{
    common::constants::DECISION_BORDER,
    TextIndex,
    CategoryId,
    DocumentId,
};


/// A trait that defines the behavor of a multi-label classifier.
/// You only need to implement `n_categories` and `score` methods.
pub trait Classifier: Sync {
    /// Returns the number of categories.
    fn n_categories(&self) -> usize;


    /// Computes the score of `document` for `category`.
    /// The score is unbounded in both directions.
    fn score<I>(
        &self,
        index: &I,
        document: DocumentId,
        category: CategoryId,
    ) -> f64
        where I: TextIndex;


    /// Builds whatever cache `score` relies on,
    /// so that concurrent callers only read.
    fn prepare(&self) {}


    /// Computes the score of `document` for every category.
    fn scores<I>(&self, index: &I, document: DocumentId) -> Vec<f64>
        where I: TextIndex,
    {
        (0..self.n_categories())
            .map(|cat| self.score(index, document, cat))
            .collect()
    }


    /// Returns the categories assigned to `document`,
    /// i.e., those with a non-negative score.
    fn classify<I>(&self, index: &I, document: DocumentId) -> Vec<CategoryId>
        where I: TextIndex,
    {
        (0..self.n_categories())
            .filter(|&cat| self.score(index, document, cat) >= DECISION_BORDER)
            .collect()
    }


    /// Classifies every document of `index`, in parallel.
    fn classify_all<I>(&self, index: &I) -> Vec<Vec<CategoryId>>
        where I: TextIndex,
    {
        self.prepare();
        (0..index.n_documents()).into_par_iter()
            .map(|doc| self.classify(index, doc))
            .collect()
    }
}
