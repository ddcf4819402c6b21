use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{
    common::constants::PRINT_WIDTH_BINNING,
    FeatureId,
    TextBoostError,
    Result,
};


/// A bin of a feature's weight range.
/// A bin covers `(start, end]`; the first bin of a feature
/// also covers everything up to its `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscretizationBin {
    start: f64,
    end: f64,
}


impl DiscretizationBin {
    /// Create a new instance of `DiscretizationBin`.
    ///
    /// # Panics
    /// Panics if `start > end` or either bound is NaN.
    #[inline(always)]
    pub fn new(start: f64, end: f64) -> Self {
        assert!(start <= end, "bin start {start} is greater than end {end}");
        Self { start, end }
    }


    /// Returns the start value.
    #[inline(always)]
    pub fn start(&self) -> f64 { self.start }


    /// Returns the end value.
    #[inline(always)]
    pub fn end(&self) -> f64 { self.end }


    /// Check whether the given `value` is in `(start, end]`.
    #[inline(always)]
    pub fn contains(&self, value: f64) -> bool {
        self.start < value && value <= self.end
    }
}


/// The ordered, non-overlapping bins of one feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bins(Vec<DiscretizationBin>);


impl Bins {
    /// Construct `Bins` from an ordered list of bins.
    /// Returns `Err` if two consecutive bins overlap.
    pub fn new(bins: Vec<DiscretizationBin>) -> Result<Self> {
        let overlap = bins.windows(2)
            .position(|pair| pair[0].end > pair[1].start);
        if let Some(i) = overlap {
            let reason = format!(
                "bin {i} {} overlaps bin {} {}", bins[i], i + 1, bins[i + 1]
            );
            return Err(TextBoostError::InvalidBins(reason));
        }
        Ok(Self(bins))
    }


    /// Construct contiguous bins from the boundaries `b_0 <= ... <= b_n`,
    /// i.e., `(b_0, b_1], (b_1, b_2], ..., (b_{n-1}, b_n]`.
    ///
    /// # Panics
    /// Panics if fewer than two boundaries are given
    /// or the boundaries are not sorted.
    pub fn from_boundaries(boundaries: &[f64]) -> Self {
        assert!(
            boundaries.len() >= 2,
            "at least two boundaries are required, got {}",
            boundaries.len()
        );
        let bins = boundaries.windows(2)
            .map(|pair| DiscretizationBin::new(pair[0], pair[1]))
            .collect();
        Self(bins)
    }


    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if there is no bin.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns an iterator over the bins.
    pub fn iter(&self) -> std::slice::Iter<'_, DiscretizationBin> {
        self.0.iter()
    }


    /// Returns the bin index of `value`.
    ///
    /// A value below the start of the first bin goes to bin `0`.
    /// Otherwise the bins are scanned in order and
    /// the first bin whose end is `>= value` is returned;
    /// a value beyond every end goes to the last bin.
    /// The scan is linear on purpose: the placement of values that lie
    /// exactly on a boundary must not depend on a search strategy.
    ///
    /// `self` must not be empty.
    #[inline]
    pub fn bin_index(&self, value: f64) -> usize {
        let bins = &self.0[..];
        debug_assert!(!bins.is_empty(), "bin search on an empty bin set");

        if value < bins[0].start {
            return 0;
        }
        bins.iter()
            .position(|bin| bin.end >= value)
            .unwrap_or(bins.len().saturating_sub(1))
    }
}


impl<'a> IntoIterator for &'a Bins {
    type Item = &'a DiscretizationBin;
    type IntoIter = std::slice::Iter<'a, DiscretizationBin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}


/// The bins of every feature, plus the maximal bin count over features.
/// The maximal bin count sizes the vote vectors of every hypothesis.
///
/// This is the parameter set the weak learners receive every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discretization {
    bins: Vec<Bins>,
    max_bins: usize,
}


impl Discretization {
    /// Construct a new `Discretization` from the bins of every feature.
    /// Returns `Err` if some feature has no bin.
    pub fn new(bins: Vec<Bins>) -> Result<Self> {
        if let Some(feature) = bins.iter().position(Bins::is_empty) {
            return Err(TextBoostError::EmptyBins { feature });
        }
        let max_bins = bins.iter()
            .map(Bins::len)
            .max()
            .unwrap_or(0);
        Ok(Self { bins, max_bins })
    }


    /// Returns the number of features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.bins.len()
    }


    /// Returns the maximal number of bins over all features.
    #[inline]
    pub fn max_bins(&self) -> usize {
        self.max_bins
    }


    /// Returns the bins of `feature`.
    #[inline]
    pub fn bins(&self, feature: FeatureId) -> &Bins {
        &self.bins[feature]
    }


    /// Returns the bin index of `value` for `feature`.
    #[inline]
    pub fn bin_index(&self, feature: FeatureId, value: f64) -> usize {
        self.bins[feature].bin_index(value)
    }


    /// Returns an iterator over the bins of each feature.
    pub fn iter(&self) -> std::slice::Iter<'_, Bins> {
        self.bins.iter()
    }
}


impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bins = &self.0;
        let n_bins = bins.len();
        if n_bins > PRINT_WIDTH_BINNING {
            let head = bins[..2].iter()
                .map(|bin| format!("{bin}"))
                .collect::<Vec<_>>()
                .join(", ");
            let tail = &bins[n_bins - 1];
            write!(f, "{head}, ..., {tail}")
        } else {
            let line = bins.iter()
                .map(|bin| format!("{bin}"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{line}")
        }
    }
}


impl fmt::Display for DiscretizationBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", signed(self.start), signed(self.end))
    }
}


fn signed(value: f64) -> String {
    let sgn = if value > 0.0 {
        '+'
    } else if value < 0.0 {
        '-'
    } else {
        ' '
    };
    let value = value.abs();
    format!("{sgn}{value:.2}")
}
