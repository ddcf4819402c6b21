#![allow(dead_code)]
use textboost::prelude::*;


/// 3 categories, 5 documents, 4 features.
/// Feature `2` occurs exactly in the documents of category `1`.
pub fn three_category_index() -> SparseIndex {
    SparseIndexBuilder::new(4, 3)
        .document(&[(0, 0.5), (1, 0.3)],           &[0])
        .document(&[(0, 0.5), (3, 0.8)],           &[0])
        .document(&[(0, 0.5), (1, 0.7), (2, 0.9)], &[1])
        .document(&[(0, 0.5), (2, 0.4), (3, 0.2)], &[1])
        .document(&[(0, 0.5), (1, 0.6)],           &[2])
        .build()
}


/// Two bins `(0, 0.5], (0.5, 1]` for each of `n_features` features.
pub fn two_bins(n_features: usize) -> Discretization {
    let bins = Bins::from_boundaries(&[0.0, 0.5, 1.0]);
    Discretization::new(vec![bins; n_features]).unwrap()
}


/// 2 categories, 8 documents, 3 features.
/// Documents of category `0` carry feature `0`,
/// documents of category `1` carry feature `1`,
/// and feature `2` is noise.
pub fn separable_index() -> SparseIndex {
    let mut builder = SparseIndexBuilder::new(3, 2);
    for doc in 0..8 {
        let noise = (doc % 3) as f64 * 0.3 + 0.1;
        if doc % 2 == 0 {
            builder.push_document(&[(0, 0.9), (2, noise)], &[0]);
        } else {
            builder.push_document(&[(1, 0.8), (2, noise)], &[1]);
        }
    }
    builder.build()
}


/// A classifier with two rounds over two features and two categories.
pub fn small_classifier() -> BoostingClassifier {
    let rounds = vec![
        vec![
            HypothesisData::new(Some(0), -0.5, vec![0.25, 1.0]),
            HypothesisData::new(Some(1), -1.0, vec![2.0, 0.5]),
        ],
        vec![
            HypothesisData::new(Some(0), 0.125, vec![-0.5, 0.75]),
            HypothesisData::new(None, 0.0, vec![0.0, 0.0]),
        ],
    ];
    BoostingClassifier::from_rounds(2, two_bins(2), rounds)
}
