//! Defines the `category × document` distribution of boosting.
use rayon::prelude::*;

use crate::{
    common::checker,
    TextIndex,
    Discretization,
    HypothesisData,
    CategoryId,
    DocumentId,
    TextBoostError,
    Result,
};


/// The example weights of boosting,
/// one non-negative weight per `(category, document)` pair.
/// The weights sum to `1` over all pairs.
///
/// Weights are stored row-major: the row of a category is contiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionMatrix {
    n_categories: usize,
    n_documents: usize,
    weights: Vec<f64>,
}


impl DistributionMatrix {
    /// Construct the uniform distribution
    /// `1 / (n_categories * n_documents)`.
    pub fn uniform(n_categories: usize, n_documents: usize) -> Self {
        let n_pairs = n_categories * n_documents;
        let uni = if n_pairs > 0 { 1f64 / n_pairs as f64 } else { 0f64 };
        Self {
            n_categories,
            n_documents,
            weights: vec![uni; n_pairs],
        }
    }


    /// Construct a distribution from row-major weights.
    /// The weights are used as given, without normalization.
    pub fn from_weights(
        n_categories: usize,
        n_documents: usize,
        weights: Vec<f64>,
    ) -> Result<Self>
    {
        let expected = n_categories * n_documents;
        if weights.len() != expected {
            return Err(TextBoostError::DimensionMismatch {
                what: "distribution size",
                expected,
                got: weights.len(),
            });
        }
        Ok(Self { n_categories, n_documents, weights })
    }


    /// Returns the number of categories.
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.n_categories
    }


    /// Returns the number of documents.
    #[inline]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }


    /// Returns the weight of the pair `(category, document)`.
    #[inline(always)]
    pub fn weight(&self, category: CategoryId, document: DocumentId) -> f64 {
        self.weights[category * self.n_documents + document]
    }


    /// Returns the weights of `category` over all documents.
    #[inline]
    pub fn row(&self, category: CategoryId) -> &[f64] {
        let start = category * self.n_documents;
        &self.weights[start..start + self.n_documents]
    }


    /// Returns all weights, row-major.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Returns the total mass of `category`.
    pub fn total_mass(&self, category: CategoryId) -> f64 {
        self.row(category).iter().sum::<f64>()
    }


    /// Returns the total mass over all pairs.
    pub fn total(&self) -> f64 {
        self.weights.iter().sum::<f64>()
    }


    /// Multiply every weight by `exp(-y h)`,
    /// where `y = +1` if the document belongs to the category, `-1` otherwise,
    /// and `h` is the vote of `hypotheses[category]` on the document.
    /// Then normalize the weights to sum to `1`.
    ///
    /// Returns the normalization factor.
    pub fn reweight<I>(
        &mut self,
        index: &I,
        discretization: &Discretization,
        hypotheses: &[HypothesisData],
    ) -> Result<f64>
        where I: TextIndex,
    {
        checker::dimensions(index, self, discretization)?;
        if hypotheses.len() != self.n_categories {
            return Err(TextBoostError::DimensionMismatch {
                what: "hypothesis count",
                expected: self.n_categories,
                got: hypotheses.len(),
            });
        }

        let n_documents = self.n_documents;
        self.weights.par_chunks_mut(n_documents)
            .zip(hypotheses)
            .enumerate()
            .for_each(|(cat, (row, h))| {
                row.iter_mut()
                    .enumerate()
                    .for_each(|(doc, d)| {
                        let y = if index.belongs_to(doc, cat) {
                            1f64
                        } else {
                            -1f64
                        };
                        let vote = h.confidence(index, doc, discretization);
                        *d *= (-y * vote).exp();
                    });
            });

        let normalizer = self.total();
        if normalizer > 0f64 && normalizer.is_finite() {
            self.weights.par_iter_mut()
                .for_each(|d| *d /= normalizer);
        }
        checker::normalized(self);

        Ok(normalizer)
    }
}
