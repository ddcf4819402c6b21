use rayon::prelude::*;

use crate::{
    common::constants::{
        DEFAULT_N_BINS,
        DEFAULT_WEIGHT_RANGE,
    },
    TextIndex,
    FeatureId,
    Result,
};
use super::bin::{Bins, Discretization};


/// A trait that computes the bins of every feature of an index.
pub trait Discretizer {
    /// Returns the name of the discretizer.
    fn name(&self) -> &str;


    /// Compute the bins of every feature of `index`.
    /// Every feature gets at least one bin.
    fn discretize<I>(&self, index: &I) -> Result<Discretization>
        where I: TextIndex;
}


/// Cuts the observed weight range `[min, max]` of each feature
/// into bins of the same width.
#[derive(Debug, Clone, Copy)]
pub struct EqualWidth {
    n_bins: usize,
}


impl EqualWidth {
    /// Construct a new instance of [`EqualWidth`].
    ///
    /// # Panics
    /// Panics if `n_bins == 0`.
    pub fn new(n_bins: usize) -> Self {
        assert!(n_bins > 0, "the number of bins must be positive");
        Self { n_bins }
    }
}


impl Default for EqualWidth {
    fn default() -> Self {
        Self::new(DEFAULT_N_BINS)
    }
}


impl Discretizer for EqualWidth {
    fn name(&self) -> &str {
        "Equal width"
    }


    fn discretize<I>(&self, index: &I) -> Result<Discretization>
        where I: TextIndex,
    {
        let bins = (0..index.n_features()).into_par_iter()
            .map(|feature| {
                let values = feature_values(index, feature);
                cut(&values, self.n_bins)
            })
            .collect::<Vec<_>>();
        Discretization::new(bins)
    }
}


/// Cuts the observed weights of each feature into bins
/// holding roughly the same number of documents.
#[derive(Debug, Clone, Copy)]
pub struct EqualFrequency {
    n_bins: usize,
}


impl EqualFrequency {
    /// Construct a new instance of [`EqualFrequency`].
    ///
    /// # Panics
    /// Panics if `n_bins == 0`.
    pub fn new(n_bins: usize) -> Self {
        assert!(n_bins > 0, "the number of bins must be positive");
        Self { n_bins }
    }
}


impl Default for EqualFrequency {
    fn default() -> Self {
        Self::new(DEFAULT_N_BINS)
    }
}


impl Discretizer for EqualFrequency {
    fn name(&self) -> &str {
        "Equal frequency"
    }


    fn discretize<I>(&self, index: &I) -> Result<Discretization>
        where I: TextIndex,
    {
        let bins = (0..index.n_features()).into_par_iter()
            .map(|feature| {
                let values = feature_values(index, feature);
                qcut(values, self.n_bins)
            })
            .collect::<Vec<_>>();
        Discretization::new(bins)
    }
}


fn feature_values<I>(index: &I, feature: FeatureId) -> Vec<f64>
    where I: TextIndex,
{
    index.feature_documents(feature)
        .iter()
        .map(|&doc| index.weight(doc, feature))
        .collect()
}


fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    values.iter()
        .copied()
        .for_each(|val| {
            min = min.min(val);
            max = max.max(val);
        });
    Some((min, max))
}


/// Cut `values` into `n_bins` bins of the same width.
/// A feature with no values, or a single distinct value,
/// gets a single bin.
fn cut(values: &[f64], n_bins: usize) -> Bins {
    let (min, max) = match min_max(values) {
        Some(pair) => pair,
        None => DEFAULT_WEIGHT_RANGE,
    };
    if min == max || n_bins == 1 {
        return Bins::from_boundaries(&[min, max]);
    }

    let width = (max - min) / n_bins as f64;
    let boundaries = (0..=n_bins)
        .map(|i| if i == n_bins { max } else { min + width * i as f64 })
        .collect::<Vec<_>>();

    Bins::from_boundaries(&boundaries)
}


/// Cut `values` into at most `n_bins` bins of roughly the same size.
/// Bin ends are taken from the observed values,
/// so repeated values never straddle two bins.
fn qcut(mut values: Vec<f64>, n_bins: usize) -> Bins {
    let (min, max) = match min_max(&values) {
        Some(pair) => pair,
        None => DEFAULT_WEIGHT_RANGE,
    };
    if min == max {
        return Bins::from_boundaries(&[min, max]);
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let n_values = values.len();

    let mut boundaries = vec![min];
    for k in 1..n_bins {
        let pos = k * n_values / n_bins;
        if pos == 0 { continue; }
        let end = values[pos - 1];
        let last = boundaries[boundaries.len() - 1];
        // The first bin may be degenerate (`[min, min]`).
        if end > last || (boundaries.len() == 1 && end == min) {
            boundaries.push(end);
        }
    }
    if boundaries[boundaries.len() - 1] < max {
        boundaries.push(max);
    }

    Bins::from_boundaries(&boundaries)
}
