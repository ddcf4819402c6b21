//! This directory provides some features for research
//! Measure the followings of boosting algorithm per iteration
//! - Running time
//! - Training loss
//! - Test loss

/// Provides a struct that runs a boosting algorithm with logging.
pub mod logger;

pub use logger::{
    Logger,
    CurrentHypothesis,
};
