mod common;

use rand::prelude::*;
use rand::rngs::StdRng;

use textboost::prelude::*;

use common::*;


const TOLERANCE: f64 = 1e-9;


#[test]
fn empty_document_uses_c0_alone() {
    let f = small_classifier();
    let index = SparseIndexBuilder::new(2, 2)
        .document(&[], &[])
        .build();

    // Sum of the stored `c0`; a round without pivot votes nothing.
    let expect = [-0.5 + 0.125, 0.0 - 1.0];
    let result = f.scores(&index, 0);
    for (e, r) in expect.iter().zip(&result) {
        assert!((e - r).abs() < TOLERANCE, "expected {e}, got {r}.");
    }
    assert!(f.classify(&index, 0).is_empty());
}


#[test]
fn present_feature_uses_bin_vote() {
    let f = small_classifier();
    let index = SparseIndexBuilder::new(2, 2)
        .document(&[(0, 0.3), (1, 0.7)], &[1])
        .build();

    let expect = [0.25 - 0.5, 0.5];
    let result = f.scores(&index, 0);
    for (e, r) in expect.iter().zip(&result) {
        assert!((e - r).abs() < TOLERANCE, "expected {e}, got {r}.");
    }
    assert_eq!(f.classify(&index, 0), vec![1]);
}


#[test]
fn active_iterations_select_a_prefix() {
    let mut f = small_classifier();
    let index = SparseIndexBuilder::new(2, 2)
        .document(&[(0, 0.9)], &[0])
        .build();

    let full = f.score(&index, 0, 0);
    assert!((full - 1.75).abs() < TOLERANCE, "expected 1.75, got {full}.");

    f.set_max_iterations(1);
    let prefix = f.score(&index, 0, 0);
    assert!((prefix - 1.0).abs() < TOLERANCE, "expected 1, got {prefix}.");

    // More than stored means every round.
    f.set_max_iterations(10);
    assert_eq!(f.active_iterations(), 2);
}


fn random_setup(seed: u64) -> (BoostingClassifier, SparseIndex) {
    let n_features = 6;
    let n_categories = 3;
    let mut rng = StdRng::seed_from_u64(seed);

    let bins = Bins::from_boundaries(&[0.0, 0.25, 0.5, 1.0]);
    let disc = Discretization::new(vec![bins; n_features]).unwrap();

    let rounds = (0..25)
        .map(|_| {
            (0..n_categories)
                .map(|_| {
                    // A few rounds abstain.
                    let pivot = if rng.gen_bool(0.1) {
                        None
                    } else {
                        Some(rng.gen_range(0..n_features))
                    };
                    let c0 = rng.gen_range(-1.0..1.0);
                    let c1 = (0..3).map(|_| rng.gen_range(-2.0..2.0)).collect();
                    HypothesisData::new(pivot, c0, c1)
                })
                .collect()
        })
        .collect();
    let f = BoostingClassifier::from_rounds(n_categories, disc, rounds);

    let mut builder = SparseIndexBuilder::new(n_features, n_categories);
    for _ in 0..30 {
        let features = (0..n_features)
            .filter_map(|feat| {
                if rng.gen_bool(0.4) {
                    Some((feat, rng.gen_range(0.01..1.0)))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        let categories = (0..n_categories)
            .filter(|_| rng.gen_bool(0.5))
            .collect::<Vec<_>>();
        builder.push_document(&features, &categories);
    }
    (f, builder.build())
}


#[test]
fn grouped_scores_equal_ungrouped_scores() {
    for seed in [7, 1234, 99_999] {
        let (mut f, index) = random_setup(seed);

        for active in [25, 10, 1] {
            f.set_customizer(ClassifierCustomizer::new().max_iterations(active));
            let ungrouped = (0..index.n_documents())
                .map(|doc| f.scores(&index, doc))
                .collect::<Vec<_>>();

            f.set_customizer(
                ClassifierCustomizer::new().max_iterations(active).grouped(true)
            );
            f.prepare();
            for (doc, expect) in ungrouped.iter().enumerate() {
                let result = f.scores(&index, doc);
                for (e, r) in expect.iter().zip(&result) {
                    assert!(
                        (e - r).abs() < TOLERANCE,
                        "expected {e}, got {r}."
                    );
                }
            }
        }
    }
}


#[test]
fn grouped_variance_is_population_variance() {
    let (mut f, index) = random_setup(42);
    f.set_customizer(ClassifierCustomizer::new().grouped(true));

    for doc in 0..index.n_documents() {
        let votes = f.contributions(&index, doc, 0);
        let n = votes.len() as f64;
        let mean = votes.iter().sum::<f64>() / n;
        let expect = votes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let result = f.compute_variance(&index, doc, 0);
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");
    }
}
