use std::collections::HashMap;

use crate::{
    HypothesisData,
    CategoryId,
    FeatureId,
};


/// The rounds of every category collapsed by pivot:
/// one [`HypothesisData`] per distinct pivot whose votes are the sums
/// over the rounds sharing that pivot.
/// Groups are ordered by the first round their pivot appears in.
#[derive(Debug, Clone)]
pub(crate) struct GroupedHypotheses {
    groups: Vec<Vec<HypothesisData>>,
    iterations: usize,
}


impl GroupedHypotheses {
    /// Group the first `iterations` rounds.
    pub(crate) fn build(
        rounds: &[Vec<HypothesisData>],
        n_categories: usize,
        iterations: usize,
    ) -> Self
    {
        let rounds = &rounds[..iterations.min(rounds.len())];
        let groups = (0..n_categories)
            .map(|cat| {
                let mut position: HashMap<FeatureId, usize> = HashMap::new();
                let mut merged: Vec<HypothesisData> = Vec::new();
                for round in rounds {
                    let h = &round[cat];
                    let Some(pivot) = h.pivot() else { continue; };
                    match position.get(&pivot) {
                        Some(&pos) => merged[pos].accumulate(h),
                        None => {
                            position.insert(pivot, merged.len());
                            merged.push(h.clone());
                        },
                    }
                }
                merged
            })
            .collect();

        Self { groups, iterations }
    }


    /// Returns the merged hypotheses of `category`.
    #[inline]
    pub(crate) fn of(&self, category: CategoryId) -> &[HypothesisData] {
        &self.groups[category][..]
    }


    /// Returns the number of rounds that were grouped.
    #[inline]
    pub(crate) fn iterations(&self) -> usize {
        self.iterations
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_pivot() {
        let rounds = vec![
            vec![HypothesisData::new(Some(2), 1.0, vec![0.5, 0.5])],
            vec![HypothesisData::new(Some(0), -1.0, vec![1.0, 0.0])],
            vec![HypothesisData::absent(2)],
            vec![HypothesisData::new(Some(2), 0.5, vec![0.25, -0.5])],
        ];

        let grouped = GroupedHypotheses::build(&rounds, 1, 4);
        let expect = vec![
            HypothesisData::new(Some(2), 1.5, vec![0.75, 0.0]),
            HypothesisData::new(Some(0), -1.0, vec![1.0, 0.0]),
        ];
        assert_eq!(expect, grouped.of(0), "expected {expect:?}, got {:?}.", grouped.of(0));
    }

    #[test]
    fn test_group_respects_iterations() {
        let rounds = vec![
            vec![HypothesisData::new(Some(1), 1.0, vec![1.0])],
            vec![HypothesisData::new(Some(1), 1.0, vec![1.0])],
        ];

        let grouped = GroupedHypotheses::build(&rounds, 1, 1);
        let expect = vec![HypothesisData::new(Some(1), 1.0, vec![1.0])];
        assert_eq!(expect, grouped.of(0));
        assert_eq!(grouped.iterations(), 1);
    }
}
