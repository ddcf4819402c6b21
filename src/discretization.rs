//! Defines the discretization of feature weights.
//!
//! Every feature has an ordered list of bins.
//! The same bins are used at training and at classification time,
//! and are persisted with the model.

/// Defines the bins and the per-feature discretization.
pub mod bin;

/// Defines the discretizers that compute the bins from an index.
pub mod discretizer;


pub use bin::{
    DiscretizationBin,
    Bins,
    Discretization,
};

pub use discretizer::{
    Discretizer,
    EqualWidth,
    EqualFrequency,
};
