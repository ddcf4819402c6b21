use serde::{Serialize, Deserialize};

use crate::{
    TextIndex,
    Discretization,
    DocumentId,
    FeatureId,
};


/// The hypothesis of one category in one round.
///
/// - `pivot` is the feature the hypothesis looks at
///   (`None` if the hypothesis abstains),
/// - `c0` is the vote when the pivot is absent from the document,
/// - `c1[b]` is the vote when the pivot is present with a weight in bin `b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisData {
    pivot: Option<FeatureId>,
    c0: f64,
    c1: Vec<f64>,
}


impl HypothesisData {
    /// Construct a new instance of `HypothesisData`.
    #[inline]
    pub fn new(pivot: Option<FeatureId>, c0: f64, c1: Vec<f64>) -> Self {
        Self { pivot, c0, c1 }
    }


    /// An abstaining hypothesis with `n_bins` zero votes.
    #[inline]
    pub fn absent(n_bins: usize) -> Self {
        Self { pivot: None, c0: 0f64, c1: vec![0f64; n_bins] }
    }


    /// Returns the pivot feature.
    #[inline]
    pub fn pivot(&self) -> Option<FeatureId> {
        self.pivot
    }


    /// Returns the vote for "pivot absent".
    #[inline]
    pub fn c0(&self) -> f64 {
        self.c0
    }


    /// Returns the votes for "pivot present", one per bin.
    #[inline]
    pub fn c1(&self) -> &[f64] {
        &self.c1[..]
    }


    /// Returns `true` if this hypothesis has no pivot.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.pivot.is_none()
    }


    /// Returns the vote of this hypothesis on `document`.
    /// An abstaining hypothesis votes `0`.
    #[inline]
    pub fn confidence<I>(
        &self,
        index: &I,
        document: DocumentId,
        discretization: &Discretization,
    ) -> f64
        where I: TextIndex + ?Sized,
    {
        let Some(pivot) = self.pivot else {
            return 0f64;
        };

        if index.has_feature(document, pivot) {
            let value = index.weight(document, pivot);
            let bin = discretization.bin_index(pivot, value);
            self.c1.get(bin).copied().unwrap_or(0f64)
        } else {
            self.c0
        }
    }


    /// Add the votes of `other` to `self`.
    /// Both hypotheses are expected to share the same pivot.
    pub(crate) fn accumulate(&mut self, other: &Self) {
        debug_assert_eq!(self.pivot, other.pivot);
        self.c0 += other.c0;
        if self.c1.len() < other.c1.len() {
            self.c1.resize(other.c1.len(), 0f64);
        }
        self.c1.iter_mut()
            .zip(&other.c1)
            .for_each(|(a, b)| *a += b);
    }


    /// Pad the vote vector with zeros up to `n_bins`.
    pub(crate) fn pad_votes(&mut self, n_bins: usize) {
        if self.c1.len() < n_bins {
            self.c1.resize(n_bins, 0f64);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bins, SparseIndexBuilder};

    #[test]
    fn test_confidence() {
        let index = SparseIndexBuilder::new(2, 1)
            .document(&[(0, 0.2)], &[0])
            .document(&[(0, 0.9)], &[])
            .document(&[(1, 0.9)], &[])
            .build();
        let disc = Discretization::new(vec![
            Bins::from_boundaries(&[0.0, 0.5, 1.0]),
            Bins::from_boundaries(&[0.0, 1.0]),
        ]).unwrap();
        let h = HypothesisData::new(Some(0), -0.5, vec![1.0, 2.0]);

        let result = [0, 1, 2].map(|doc| h.confidence(&index, doc, &disc));
        let expect = [1.0, 2.0, -0.5];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let absent = HypothesisData::absent(2);
        assert_eq!(absent.confidence(&index, 0, &disc), 0.0);
    }

    #[test]
    fn test_accumulate() {
        let mut h = HypothesisData::new(Some(1), 0.5, vec![1.0]);
        h.accumulate(&HypothesisData::new(Some(1), -0.25, vec![1.0, 3.0]));

        let expect = HypothesisData::new(Some(1), 0.25, vec![2.0, 3.0]);
        assert_eq!(expect, h, "expected {expect:?}, got {h:?}.");
    }
}
