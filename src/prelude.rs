//! Exports the standard boosting components and traits.
//!
pub use crate::index::{
    // Index trait
    TextIndex,

    SparseIndex,
    SparseIndexBuilder,
};


pub use crate::discretization::{
    // Discretizer trait
    Discretizer,

    EqualWidth,
    EqualFrequency,

    Discretization,
    Bins,
    DiscretizationBin,
};


pub use crate::distribution::DistributionMatrix;


pub use crate::weak_learner::{
    // Weak learner trait
    WeakLearner,

    // Per-category pivots
    PivotSearch,
    // One pivot for all categories
    SharedPivotSearch,

    HypothesisData,
    smoothing_epsilon,
};


pub use crate::classifier::{
    Classifier,
    BoostingClassifier,
    ClassifierCustomizer,
};


pub use crate::booster::{
    // Booster trait
    Booster,

    AdaBoostMH,
};


pub use crate::model_store::{
    ModelStore,
    StorageManager,
    MemoryStorage,
    FileStorage,
};
