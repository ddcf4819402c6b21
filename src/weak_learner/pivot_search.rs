//! Provides [`PivotSearch`], the weak learner of MP-Boost.
use rayon::prelude::*;

use crate::{
    common::checker,
    TextIndex,
    Discretization,
    DistributionMatrix,
    HypothesisData,
    WeakLearner,
    FeatureId,
    Result,
};
use super::accumulator::{CategoryMasses, FeatureMasses};


/// The per-category pivot search.
///
/// For every category independently, [`PivotSearch`] scans every feature
/// that occurs in some document and keeps the one with the smallest
/// pseudo-loss
/// ```text
/// Z = 2 ( sqrt(W+_0 W-_0) + sum_b sqrt(W+_b W-_b) ),
/// ```
/// where `W+_b` (resp. `W-_b`) is the mass of the positive (resp. negative)
/// documents whose weight for the feature falls into bin `b`,
/// and `W+_0`, `W-_0` are the masses of the documents without the feature.
/// The first feature reaching the minimum wins.
///
/// The votes of the selected feature are the smoothed log-ratios
/// `0.5 ln((W+ + eps) / (W- + eps))`.
///
/// Features are scanned in parallel; the result equals
/// the one of a sequential scan in feature order.
///
/// # Example
/// ```no_run
/// use textboost::prelude::*;
///
/// let index: SparseIndex = read_my_corpus();
/// let disc = EqualWidth::new(8).discretize(&index).unwrap();
/// let dist = DistributionMatrix::uniform(
///     index.n_categories(), index.n_documents()
/// );
/// let eps = smoothing_epsilon(index.n_categories(), index.n_documents());
///
/// let hypotheses = PivotSearch::new()
///     .produce(&index, &dist, &disc, eps)
///     .unwrap();
/// assert_eq!(hypotheses.len(), index.n_categories());
/// # fn read_my_corpus() -> SparseIndex { unimplemented!() }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotSearch;


impl PivotSearch {
    /// Construct a new instance of [`PivotSearch`].
    pub fn new() -> Self {
        Self
    }
}


#[derive(Debug, Clone)]
struct Candidate {
    z: f64,
    feature: FeatureId,
    hypothesis: HypothesisData,
}


impl Candidate {
    /// `true` if `self` beats `other`:
    /// smaller `Z`, or the same `Z` on an earlier feature.
    #[inline]
    fn beats(&self, other: &Self) -> bool {
        self.z < other.z || (self.z == other.z && self.feature < other.feature)
    }
}


fn merge_best(
    mut left: Vec<Option<Candidate>>,
    right: Vec<Option<Candidate>>,
) -> Vec<Option<Candidate>>
{
    left.iter_mut()
        .zip(right)
        .for_each(|(l, r)| {
            let Some(r) = r else { return; };
            let replace = match l {
                Some(l) => r.beats(l),
                None => true,
            };
            if replace { *l = Some(r); }
        });
    left
}


impl WeakLearner for PivotSearch {
    fn name(&self) -> &str {
        "Pivot search (per category)"
    }


    fn produce<I>(
        &self,
        index: &I,
        dist: &DistributionMatrix,
        params: &Discretization,
        epsilon: f64,
    ) -> Result<Vec<HypothesisData>>
        where I: TextIndex,
    {
        checker::dimensions(index, dist, params)?;

        let n_categories = index.n_categories();
        let max_bins = params.max_bins();
        let totals = CategoryMasses::compute(index, dist);

        let best = (0..index.n_features()).into_par_iter()
            .filter(|&feature| !index.feature_documents(feature).is_empty())
            .fold(
                || {
                    let masses = FeatureMasses::new(n_categories, max_bins);
                    (masses, vec![None; n_categories])
                },
                |(mut masses, mut best): (FeatureMasses, Vec<Option<Candidate>>), feature| {
                    masses.scan(index, dist, feature, params.bins(feature));
                    for (cat, slot) in best.iter_mut().enumerate() {
                        let split = masses.split(cat, &totals);
                        let z = split.z();
                        // Strict comparison: the earlier feature wins ties.
                        let improves = slot.as_ref()
                            .map_or(true, |c: &Candidate| z < c.z);
                        if improves {
                            let hypothesis = split.hypothesis(feature, epsilon);
                            *slot = Some(Candidate { z, feature, hypothesis });
                        }
                    }
                    (masses, best)
                },
            )
            .map(|(_, best)| best)
            .reduce(|| vec![None; n_categories], merge_best);

        let hypotheses = best.into_iter()
            .map(|candidate| {
                candidate.map_or_else(
                    || HypothesisData::absent(max_bins),
                    |c| c.hypothesis,
                )
            })
            .collect();
        Ok(hypotheses)
    }
}


/// Returns the pseudo-loss `Z` of `feature` for every category.
/// Returns `Err` if `feature` is not covered by `params`.
pub fn pseudo_loss<I>(
    index: &I,
    dist: &DistributionMatrix,
    params: &Discretization,
    feature: FeatureId,
) -> Result<Vec<f64>>
    where I: TextIndex,
{
    checker::dimensions(index, dist, params)?;
    checker::feature(params, feature)?;

    let n_categories = index.n_categories();
    let totals = CategoryMasses::compute(index, dist);
    let mut masses = FeatureMasses::new(n_categories, params.max_bins());
    masses.scan(index, dist, feature, params.bins(feature));

    let z = (0..n_categories)
        .map(|cat| masses.split(cat, &totals).z())
        .collect();
    Ok(z)
}
