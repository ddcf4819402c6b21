//! Defines the ensemble produced by boosting.
use std::sync::OnceLock;

use crate::{
    common::utils,
    TextIndex,
    Discretization,
    HypothesisData,
    CategoryId,
    DocumentId,
};
use super::{
    classifier_trait::Classifier,
    customizer::ClassifierCustomizer,
    grouped::GroupedHypotheses,
};


/// The ensemble of a boosting run.
///
/// Each round holds one [`HypothesisData`] per category.
/// The score of a document for a category is the sum of the votes
/// of the first `active_iterations()` rounds;
/// a category is assigned iff its score is non-negative.
///
/// When the customizer turns grouping on, the active rounds are collapsed
/// by pivot on first use, and scoring costs one lookup per distinct pivot
/// instead of one per round.
/// The grouped cache is dropped whenever the rounds or the customizer
/// change, so it always reflects the current active iteration count.
#[derive(Debug, Clone)]
pub struct BoostingClassifier {
    n_categories: usize,
    discretization: Discretization,
    rounds: Vec<Vec<HypothesisData>>,
    customizer: ClassifierCustomizer,
    grouped: OnceLock<GroupedHypotheses>,
}


impl BoostingClassifier {
    /// Construct an untrained classifier with no round.
    pub fn new(n_categories: usize, discretization: Discretization) -> Self {
        Self {
            n_categories,
            discretization,
            rounds: Vec::new(),
            customizer: ClassifierCustomizer::default(),
            grouped: OnceLock::new(),
        }
    }


    /// Construct a classifier from stored rounds.
    ///
    /// # Panics
    /// Panics if a round is rejected by [`BoostingClassifier::push_round`].
    pub fn from_rounds(
        n_categories: usize,
        discretization: Discretization,
        rounds: Vec<Vec<HypothesisData>>,
    ) -> Self
    {
        let mut classifier = Self::new(n_categories, discretization);
        rounds.into_iter()
            .for_each(|round| classifier.push_round(round));
        classifier
    }


    /// Append a round.
    ///
    /// # Panics
    /// Panics if `round` does not hold one hypothesis per category,
    /// or if a pivot has no bins in the discretization.
    pub fn push_round(&mut self, mut round: Vec<HypothesisData>) {
        assert_eq!(
            round.len(), self.n_categories,
            "a round must hold one hypothesis per category"
        );
        let n_features = self.discretization.n_features();
        for h in &round {
            if let Some(pivot) = h.pivot() {
                assert!(
                    pivot < n_features,
                    "pivot {pivot} is out of range for {n_features} features"
                );
            }
        }
        let max_bins = self.discretization.max_bins();
        round.iter_mut()
            .for_each(|h| h.pad_votes(max_bins));
        self.rounds.push(round);
        self.grouped = OnceLock::new();
    }


    /// Returns the number of stored rounds.
    #[inline]
    pub fn n_rounds(&self) -> usize {
        self.rounds.len()
    }


    /// Returns the number of rounds used for scoring,
    /// `min(n_rounds, max_iterations)`.
    #[inline]
    pub fn active_iterations(&self) -> usize {
        self.customizer.active_iterations(self.rounds.len())
    }


    /// Returns the discretization of the features.
    #[inline]
    pub fn discretization(&self) -> &Discretization {
        &self.discretization
    }


    /// Returns the hypotheses of round `round`, indexed by category.
    #[inline]
    pub fn round(&self, round: usize) -> &[HypothesisData] {
        &self.rounds[round][..]
    }


    /// Returns all stored rounds.
    #[inline]
    pub fn rounds(&self) -> &[Vec<HypothesisData>] {
        &self.rounds[..]
    }


    /// Returns the hypotheses of `category` over every stored round.
    pub fn hypotheses(&self, category: CategoryId)
        -> impl Iterator<Item = &HypothesisData> + '_
    {
        self.rounds.iter().map(move |round| &round[category])
    }


    /// Returns the runtime settings.
    #[inline]
    pub fn customizer(&self) -> &ClassifierCustomizer {
        &self.customizer
    }


    /// Replace the runtime settings.
    /// This drops the grouped cache.
    pub fn set_customizer(&mut self, customizer: ClassifierCustomizer) {
        self.customizer = customizer;
        self.grouped = OnceLock::new();
    }


    /// Use at most `it` rounds for scoring.
    /// This drops the grouped cache.
    pub fn set_max_iterations(&mut self, it: usize) {
        let customizer = self.customizer.max_iterations(it);
        self.set_customizer(customizer);
    }


    /// Returns the grouped hypotheses, building them on first use.
    fn grouped_hypotheses(&self) -> &GroupedHypotheses {
        self.grouped.get_or_init(|| {
            let iterations = self.active_iterations();
            tracing::debug!(iterations, "grouping hypotheses by pivot");
            GroupedHypotheses::build(&self.rounds, self.n_categories, iterations)
        })
    }


    /// Returns the vote of every active round
    /// (every pivot group in grouped mode) on `document`.
    /// Rounds without pivot contribute nothing.
    pub fn contributions<I>(
        &self,
        index: &I,
        document: DocumentId,
        category: CategoryId,
    ) -> Vec<f64>
        where I: TextIndex,
    {
        let disc = &self.discretization;
        if self.customizer.is_grouped() {
            let grouped = self.grouped_hypotheses();
            debug_assert_eq!(grouped.iterations(), self.active_iterations());
            grouped.of(category)
                .iter()
                .map(|h| h.confidence(index, document, disc))
                .collect()
        } else {
            self.rounds[..self.active_iterations()]
                .iter()
                .map(|round| &round[category])
                .filter(|h| !h.is_absent())
                .map(|h| h.confidence(index, document, disc))
                .collect()
        }
    }


    /// Returns the variance of the votes summed by
    /// [`Classifier::score`] around their mean.
    /// This is a confidence diagnostic; it does not affect classification.
    pub fn compute_variance<I>(
        &self,
        index: &I,
        document: DocumentId,
        category: CategoryId,
    ) -> f64
        where I: TextIndex,
    {
        let contributions = self.contributions(index, document, category);
        utils::mean_and_variance(&contributions).1
    }
}


impl Classifier for BoostingClassifier {
    fn n_categories(&self) -> usize {
        self.n_categories
    }


    fn score<I>(
        &self,
        index: &I,
        document: DocumentId,
        category: CategoryId,
    ) -> f64
        where I: TextIndex,
    {
        let disc = &self.discretization;
        if self.customizer.is_grouped() {
            self.grouped_hypotheses()
                .of(category)
                .iter()
                .map(|h| h.confidence(index, document, disc))
                .sum::<f64>()
        } else {
            self.rounds[..self.active_iterations()]
                .iter()
                .map(|round| round[category].confidence(index, document, disc))
                .sum::<f64>()
        }
    }


    fn prepare(&self) {
        if self.customizer.is_grouped() {
            self.grouped_hypotheses();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bins, SparseIndexBuilder, SparseIndex};

    const TOLERANCE: f64 = 1e-12;

    fn fixture() -> (SparseIndex, BoostingClassifier) {
        let index = SparseIndexBuilder::new(2, 1)
            .document(&[(0, 0.2)], &[0])
            .document(&[(0, 0.8), (1, 0.5)], &[])
            .build();
        let disc = Discretization::new(vec![
            Bins::from_boundaries(&[0.0, 0.5, 1.0]),
            Bins::from_boundaries(&[0.0, 1.0]),
        ]).unwrap();
        let rounds = vec![
            vec![HypothesisData::new(Some(0), -1.0, vec![0.5, -0.5])],
            vec![HypothesisData::new(Some(1), 0.25, vec![-2.0])],
            vec![HypothesisData::absent(2)],
            vec![HypothesisData::new(Some(0), 0.5, vec![0.125, 1.0])],
        ];
        let classifier = BoostingClassifier::from_rounds(1, disc, rounds);
        (index, classifier)
    }

    #[test]
    fn test_score() {
        let (index, classifier) = fixture();

        let result = classifier.score(&index, 0, 0);
        let expect = 0.5 + 0.25 + 0.125;
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");

        let result = classifier.score(&index, 1, 0);
        let expect = -0.5 - 2.0 + 1.0;
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");
    }

    #[test]
    fn test_classify_by_sign() {
        let (index, classifier) = fixture();
        assert_eq!(classifier.classify(&index, 0), vec![0]);
        assert!(classifier.classify(&index, 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "pivot 2 is out of range")]
    fn test_out_of_range_pivot_is_rejected() {
        let (_, mut classifier) = fixture();
        classifier.push_round(vec![HypothesisData::new(Some(2), 0.0, vec![1.0])]);
    }

    #[test]
    fn test_votes_padded_to_max_bins() {
        let (_, classifier) = fixture();
        assert_eq!(classifier.round(1)[0].c1().len(), 2);
    }

    #[test]
    fn test_active_iterations_prefix() {
        let (index, mut classifier) = fixture();
        classifier.set_max_iterations(1);
        assert_eq!(classifier.active_iterations(), 1);

        let result = classifier.score(&index, 1, 0);
        let expect = -0.5;
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");
    }

    #[test]
    fn test_grouped_equals_ungrouped() {
        let (index, mut classifier) = fixture();
        for it in [4, 2, 1, 0] {
            classifier.set_customizer(ClassifierCustomizer::new().max_iterations(it));
            let plain = [0, 1].map(|doc| classifier.score(&index, doc, 0));

            classifier.set_customizer(
                ClassifierCustomizer::new().max_iterations(it).grouped(true)
            );
            let grouped = [0, 1].map(|doc| classifier.score(&index, doc, 0));

            for (p, g) in plain.iter().zip(&grouped) {
                assert!((p - g).abs() < TOLERANCE, "iterations {it}: {p} != {g}.");
            }
        }
    }

    #[test]
    fn test_grouped_cache_follows_iteration_count() {
        let (index, mut classifier) = fixture();
        classifier.set_customizer(ClassifierCustomizer::new().grouped(true));
        let full = classifier.score(&index, 1, 0);

        classifier.set_max_iterations(1);
        let prefix = classifier.score(&index, 1, 0);
        assert!((full - (-1.5)).abs() < TOLERANCE);
        assert!((prefix - (-0.5)).abs() < TOLERANCE, "expected -0.5, got {prefix}.");
    }

    #[test]
    fn test_variance() {
        let (index, classifier) = fixture();

        // Contributions on document 0: 0.5, 0.25, 0.125.
        let mean = 0.875 / 3.0;
        let expect = [0.5f64, 0.25, 0.125].iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>() / 3.0;
        let result = classifier.compute_variance(&index, 0, 0);
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");
    }

    #[test]
    fn test_variance_grouped() {
        let (index, mut classifier) = fixture();
        classifier.set_customizer(ClassifierCustomizer::new().grouped(true));

        // Groups on document 0: pivot 0 -> 0.5 + 0.125, pivot 1 -> 0.25.
        let mean = 0.875 / 2.0;
        let expect = [0.625f64, 0.25].iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>() / 2.0;
        let result = classifier.compute_variance(&index, 0, 0);
        assert!((expect - result).abs() < TOLERANCE, "expected {expect}, got {result}.");
    }
}
