//! Per-category mass accumulators of the pivot searches.
//!
//! Every search worker owns one [`FeatureMasses`] and resets it
//! before scanning a feature, so workers never share a buffer.

use crate::{
    TextIndex,
    Bins,
    DistributionMatrix,
    HypothesisData,
    CategoryId,
    FeatureId,
};


/// Positive and negative mass of every category,
/// computed once per round.
#[derive(Debug, Clone)]
pub(crate) struct CategoryMasses {
    pos: Vec<f64>,
    neg: Vec<f64>,
}


impl CategoryMasses {
    /// `pos[c]` is the mass of the documents in `c`,
    /// `neg[c]` is the rest of the row mass of `c`.
    pub(crate) fn compute<I>(index: &I, dist: &DistributionMatrix) -> Self
        where I: TextIndex,
    {
        let n_categories = index.n_categories();
        let mut pos = Vec::with_capacity(n_categories);
        let mut neg = Vec::with_capacity(n_categories);
        for cat in 0..n_categories {
            let p = index.category_documents(cat)
                .iter()
                .map(|&doc| dist.weight(cat, doc))
                .sum::<f64>();
            pos.push(p);
            neg.push(dist.total_mass(cat) - p);
        }
        Self { pos, neg }
    }


    #[inline]
    pub(crate) fn pos(&self, category: CategoryId) -> f64 {
        self.pos[category]
    }


    #[inline]
    pub(crate) fn neg(&self, category: CategoryId) -> f64 {
        self.neg[category]
    }
}


/// Per-category, per-bin masses of the documents containing one feature.
#[derive(Debug, Clone)]
pub(crate) struct FeatureMasses {
    n_categories: usize,
    n_bins: usize,
    pos: Vec<f64>,
    neg: Vec<f64>,
}


impl FeatureMasses {
    pub(crate) fn new(n_categories: usize, n_bins: usize) -> Self {
        Self {
            n_categories,
            n_bins,
            pos: vec![0f64; n_categories * n_bins],
            neg: vec![0f64; n_categories * n_bins],
        }
    }


    /// Clear the buffers and accumulate the masses of `feature`.
    pub(crate) fn scan<I>(
        &mut self,
        index: &I,
        dist: &DistributionMatrix,
        feature: FeatureId,
        bins: &Bins,
    )
        where I: TextIndex,
    {
        self.pos.iter_mut().for_each(|m| *m = 0f64);
        self.neg.iter_mut().for_each(|m| *m = 0f64);

        for &doc in index.feature_documents(feature) {
            let bin = bins.bin_index(index.weight(doc, feature));
            for cat in 0..self.n_categories {
                let w = dist.weight(cat, doc);
                let slot = cat * self.n_bins + bin;
                if index.belongs_to(doc, cat) {
                    self.pos[slot] += w;
                } else {
                    self.neg[slot] += w;
                }
            }
        }
    }


    /// Returns the split of `category` for the last scanned feature.
    pub(crate) fn split(
        &self,
        category: CategoryId,
        totals: &CategoryMasses,
    ) -> Split<'_>
    {
        let range = category * self.n_bins..(category + 1) * self.n_bins;
        let pos_bins = &self.pos[range.clone()];
        let neg_bins = &self.neg[range];

        // Clamp the subtraction error to zero.
        let pos_absent = (totals.pos(category) - pos_bins.iter().sum::<f64>())
            .max(0f64);
        let neg_absent = (totals.neg(category) - neg_bins.iter().sum::<f64>())
            .max(0f64);

        Split { pos_bins, neg_bins, pos_absent, neg_absent }
    }
}


/// The masses of one category split by "feature absent" and
/// by the bins of "feature present".
#[derive(Debug, Clone, Copy)]
pub(crate) struct Split<'a> {
    pub(crate) pos_bins: &'a [f64],
    pub(crate) neg_bins: &'a [f64],
    pub(crate) pos_absent: f64,
    pub(crate) neg_absent: f64,
}


impl Split<'_> {
    /// Returns the pseudo-loss
    /// `Z = 2 (sqrt(W+_0 W-_0) + sum_b sqrt(W+_b W-_b))`.
    #[inline]
    pub(crate) fn z(&self) -> f64 {
        let present = self.pos_bins.iter()
            .zip(self.neg_bins)
            .map(|(p, n)| (p * n).sqrt())
            .sum::<f64>();
        2f64 * ((self.pos_absent * self.neg_absent).sqrt() + present)
    }


    /// Returns the hypothesis voting the smoothed log-ratios of this split.
    pub(crate) fn hypothesis(&self, pivot: FeatureId, epsilon: f64)
        -> HypothesisData
    {
        let c0 = vote(self.pos_absent, self.neg_absent, epsilon);
        let c1 = self.pos_bins.iter()
            .zip(self.neg_bins)
            .map(|(&p, &n)| vote(p, n, epsilon))
            .collect();
        HypothesisData::new(Some(pivot), c0, c1)
    }
}


#[inline(always)]
fn vote(pos: f64, neg: f64, epsilon: f64) -> f64 {
    0.5 * ((pos + epsilon) / (neg + epsilon)).ln()
}
