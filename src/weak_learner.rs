//! The files in `weak_learner/` directory defines
//! `WeakLearner` trait and weak learners.

/// Provides WeakLearner trait.
pub mod core;

/// Defines the per-round, per-category hypothesis.
pub mod hypothesis_data;

/// Mass accumulators shared by the searches.
mod accumulator;

/// Defines the per-category pivot search.
pub mod pivot_search;

/// Defines the shared pivot search.
pub mod shared_pivot;


pub use self::core::{
    WeakLearner,
    smoothing_epsilon,
};

pub use self::hypothesis_data::HypothesisData;
pub use self::pivot_search::{PivotSearch, pseudo_loss};
pub use self::shared_pivot::SharedPivotSearch;
