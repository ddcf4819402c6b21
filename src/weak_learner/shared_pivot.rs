//! Provides [`SharedPivotSearch`], the weak learner of AdaBoost.MH.
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


/// The shared pivot search.
///
/// Unlike [`PivotSearch`](super::PivotSearch),
/// [`SharedPivotSearch`] selects a single feature for all categories,
/// the one minimizing the sum of the per-category pseudo-losses.
/// The votes are still computed per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedPivotSearch;


impl SharedPivotSearch {
    /// Construct a new instance of [`SharedPivotSearch`].
    pub fn new() -> Self {
        Self
    }
}


#[derive(Debug, Clone)]
struct Candidate {
    z: f64,
    feature: FeatureId,
    hypotheses: Vec<HypothesisData>,
}


fn merge_best(left: Option<Candidate>, right: Option<Candidate>)
    -> Option<Candidate>
{
    match (left, right) {
        (Some(l), Some(r)) => {
            if r.z < l.z || (r.z == l.z && r.feature < l.feature) {
                Some(r)
            } else {
                Some(l)
            }
        },
        (l, r) => l.or(r),
    }
}


impl WeakLearner for SharedPivotSearch {
    fn name(&self) -> &str {
        "Pivot search (shared)"
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
                || (FeatureMasses::new(n_categories, max_bins), None),
                |(mut masses, best): (FeatureMasses, Option<Candidate>), feature| {
                    masses.scan(index, dist, feature, params.bins(feature));
                    let z = (0..n_categories)
                        .map(|cat| masses.split(cat, &totals).z())
                        .sum::<f64>();

                    let improves = best.as_ref()
                        .map_or(true, |c: &Candidate| z < c.z);
                    if !improves {
                        return (masses, best);
                    }

                    let hypotheses = (0..n_categories)
                        .map(|cat| {
                            masses.split(cat, &totals)
                                .hypothesis(feature, epsilon)
                        })
                        .collect();
                    let best = Some(Candidate { z, feature, hypotheses });
                    (masses, best)
                },
            )
            .map(|(_, best)| best)
            .reduce(|| None, merge_best);

        let hypotheses = match best {
            Some(candidate) => candidate.hypotheses,
            None => vec![HypothesisData::absent(max_bins); n_categories],
        };
        Ok(hypotheses)
    }
}
