//! Provides [`AdaBoostMH`] by Schapire & Singer, 2000.
use crate::{
    common::{checker, constants::DEFAULT_ROUNDS},
    research::CurrentHypothesis,
    Booster,
    WeakLearner,
    TextIndex,
    Discretization,
    DistributionMatrix,
    BoostingClassifier,
    ClassifierCustomizer,
    smoothing_epsilon,
    Result,
};

use std::ops::ControlFlow;


/// Defines `AdaBoost.MH` over discretized text features.
/// This struct is based on the paper:
/// [BoosTexter: A Boosting-based System for Text Categorization](https://doi.org/10.1023/A:1007649029923)
/// by Robert E. Schapire and Yoram Singer.
///
/// Each round asks the weak learner for one hypothesis per category,
/// appends them to the ensemble and reweights the
/// `category × document` distribution by `exp(-y h)`.
/// With [`PivotSearch`](crate::PivotSearch) as weak learner
/// this is MP-Boost; with [`SharedPivotSearch`](crate::SharedPivotSearch)
/// it is the original AdaBoost.MH.
///
/// # Example
/// ```no_run
/// use textboost::prelude::*;
///
/// let index: SparseIndex = read_my_corpus();
/// let disc = EqualWidth::new(8).discretize(&index).unwrap();
///
/// let mut booster = AdaBoostMH::init(&index, disc)
///     .rounds(200);
/// let f = booster.run(&PivotSearch::new()).unwrap();
///
/// let categories = f.classify(&index, 0);
/// println!("document 0 is in {categories:?}");
/// # fn read_my_corpus() -> SparseIndex { unimplemented!() }
/// ```
pub struct AdaBoostMH<'a, I> {
    index: &'a I,

    // Distribution on `(category, document)` pairs.
    dist: DistributionMatrix,

    // Smoothing constant of the votes.
    epsilon: f64,

    // The ensemble under construction.
    classifier: BoostingClassifier,

    // Runtime settings handed to the output classifier.
    customizer: ClassifierCustomizer,

    max_iter: usize,

    // Terminated iteration.
    terminated: usize,
}


impl<'a, I> AdaBoostMH<'a, I>
    where I: TextIndex,
{
    /// Initialize the `AdaBoostMH`.
    /// This method sets some parameters `AdaBoostMH` holds.
    pub fn init(index: &'a I, discretization: Discretization) -> Self {
        let n_categories = index.n_categories();
        let n_documents = index.n_documents();

        Self {
            index,
            dist: DistributionMatrix::uniform(n_categories, n_documents),
            epsilon: smoothing_epsilon(n_categories, n_documents),
            classifier: BoostingClassifier::new(n_categories, discretization),
            customizer: ClassifierCustomizer::default(),
            max_iter: DEFAULT_ROUNDS,
            terminated: usize::MAX,
        }
    }


    /// Set the number of boosting rounds.
    /// Default is `100`.
    pub fn rounds(mut self, rounds: usize) -> Self {
        assert!(rounds > 0, "the number of rounds must be positive");
        self.max_iter = rounds;
        self
    }


    /// Set the runtime settings of the output classifier.
    pub fn customizer(mut self, customizer: ClassifierCustomizer) -> Self {
        self.customizer = customizer;
        self
    }


    /// Returns the current distribution.
    pub fn distribution(&self) -> &DistributionMatrix {
        &self.dist
    }


    /// Returns the iteration the last run terminated at.
    pub fn terminated(&self) -> usize {
        self.terminated
    }
}


impl<I> Booster for AdaBoostMH<'_, I>
    where I: TextIndex,
{
    type Output = BoostingClassifier;


    fn name(&self) -> &str {
        "AdaBoost.MH"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_documents, n_features) = self.index.shape();
        let info = Vec::from([
            ("# of documents", format!("{n_documents}")),
            ("# of features", format!("{n_features}")),
            ("# of categories", format!("{}", self.index.n_categories())),
            ("# of bins (max)", format!("{}", self.classifier.discretization().max_bins())),
            ("Max iteration", format!("{}", self.max_iter)),
            ("Smoothing", format!("{:.3e}", self.epsilon)),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) {
        let n_categories = self.index.n_categories();
        let n_documents = self.index.n_documents();

        self.dist = DistributionMatrix::uniform(n_categories, n_documents);
        self.epsilon = smoothing_epsilon(n_categories, n_documents);

        let discretization = self.classifier.discretization().clone();
        self.classifier = BoostingClassifier::new(n_categories, discretization);
        self.terminated = usize::MAX;
    }


    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> Result<ControlFlow<usize>>
        where W: WeakLearner,
    {
        if self.max_iter < iteration {
            self.terminated = self.max_iter;
            return Ok(ControlFlow::Break(self.max_iter));
        }
        checker::index(self.index)?;

        let disc = self.classifier.discretization();
        let hypotheses = weak_learner.produce(
            self.index, &self.dist, disc, self.epsilon
        )?;

        let normalizer = self.dist.reweight(self.index, disc, &hypotheses)?;
        tracing::debug!(
            iteration,
            normalizer,
            pivots = ?hypotheses.iter().map(|h| h.pivot()).collect::<Vec<_>>(),
            "boosting round"
        );

        self.classifier.push_round(hypotheses);
        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Self::Output {
        let mut classifier = self.classifier.clone();
        classifier.set_customizer(self.customizer);
        classifier
    }
}


impl<I> CurrentHypothesis for AdaBoostMH<'_, I>
    where I: TextIndex,
{
    type Output = BoostingClassifier;

    fn current_hypothesis(&self) -> Self::Output {
        self.classifier.clone()
    }
}
