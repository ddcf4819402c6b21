use crate::{
    TextIndex,
    Discretization,
    DistributionMatrix,
    HypothesisData,
    Result,
};


/// An interface that returns the hypotheses of one boosting round.
///
/// Given the index, the current distribution and the discretization,
/// a weak learner returns one [`HypothesisData`] per category,
/// indexed by the category id.
pub trait WeakLearner {
    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the information of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Returns the hypotheses of this round.
    ///
    /// `epsilon` is the smoothing constant added to both masses
    /// before taking the log-ratio of a vote;
    /// see [`smoothing_epsilon`] for the standard value.
    ///
    /// Returns `Err` if the components disagree on their shapes.
    fn produce<I>(
        &self,
        index: &I,
        dist: &DistributionMatrix,
        params: &Discretization,
        epsilon: f64,
    ) -> Result<Vec<HypothesisData>>
        where I: TextIndex;
}


/// Returns the smoothing constant `1 / (n_categories * n_documents)`.
#[inline]
pub fn smoothing_epsilon(n_categories: usize, n_documents: usize) -> f64 {
    1f64 / (n_categories * n_documents) as f64
}
