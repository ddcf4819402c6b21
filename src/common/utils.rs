//! This file provides some common functions
//! such as the Hamming loss of a classifier.
use rayon::prelude::*;
use crate::{TextIndex, Classifier};
use super::constants::DECISION_BORDER;


/// Returns the Hamming loss of `classifier` over `index`,
/// i.e., the fraction of `(category, document)` pairs
/// whose assignment disagrees with the true membership.
pub fn hamming_loss<C, I>(classifier: &C, index: &I) -> f64
    where C: Classifier,
          I: TextIndex,
{
    let n_documents = index.n_documents();
    let n_categories = index.n_categories();
    if n_documents == 0 || n_categories == 0 {
        return 0f64;
    }

    classifier.prepare();
    let errors = (0..n_documents).into_par_iter()
        .map(|doc| {
            classifier.scores(index, doc)
                .into_iter()
                .enumerate()
                .filter(|&(cat, score)| {
                    let predicted = score >= DECISION_BORDER;
                    predicted != index.belongs_to(doc, cat)
                })
                .count()
        })
        .sum::<usize>();

    errors as f64 / (n_documents * n_categories) as f64
}


/// Returns the population mean and variance of `values`.
/// An empty slice yields `(0, 0)`.
#[inline]
pub(crate) fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0f64, 0f64);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, variance)
}
