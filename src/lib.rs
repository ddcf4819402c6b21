#![warn(missing_docs)]

//!
//! A crate that provides the boosting engine of a text categorization toolkit.
//!
//! Documents are sparse vectors of feature weights in `[0, 1]`.
//! Each feature's weight range is cut into bins by a [`Discretizer`],
//! and the boosting algorithm learns, for every category and every round,
//! a **pivot** feature together with a vote for "feature absent" and
//! one vote per bin for "feature present".
//!
//! This crate includes the following components.
//!
//! - Weak learners
//!     [`PivotSearch`] selects a pivot per category (MP-Boost style),
//!     [`SharedPivotSearch`] selects one pivot for all categories
//!     (AdaBoost.MH style).
//!     Both minimize the pseudo-loss `Z` of the discretized split.
//!
//! - Booster
//!     [`AdaBoostMH`] drives the rounds and reweights the
//!     `category × document` [`DistributionMatrix`].
//!
//! - Classifier
//!     [`BoostingClassifier`] sums the votes of the active rounds
//!     and assigns a category iff the score is non-negative.
//!
//! - Model store
//!     [`ModelStore`] writes/reads a classifier to/from
//!     named resources of a [`StorageManager`].

pub mod error;
pub mod common;
pub mod index;
pub mod discretization;
pub mod distribution;
pub mod weak_learner;
pub mod classifier;
pub mod booster;
pub mod model_store;
pub mod research;
pub mod prelude;


pub use error::{TextBoostError, Result};

pub use index::{
    TextIndex,
    SparseIndex,
    SparseIndexBuilder,
    CategoryId,
    DocumentId,
    FeatureId,
};

pub use discretization::{
    DiscretizationBin,
    Bins,
    Discretization,
    Discretizer,
    EqualWidth,
    EqualFrequency,
};

pub use distribution::DistributionMatrix;

pub use weak_learner::{
    WeakLearner,
    HypothesisData,
    PivotSearch,
    SharedPivotSearch,
    smoothing_epsilon,
};

pub use classifier::{
    Classifier,
    BoostingClassifier,
    ClassifierCustomizer,
};

pub use booster::{
    Booster,
    AdaBoostMH,
};

pub use model_store::{
    ModelStore,
    StorageManager,
    FileStorage,
    MemoryStorage,
};
