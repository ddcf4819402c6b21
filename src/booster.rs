//! Provides the boosting algorithm.

mod core;
mod adaboost_mh;


/// Booster trait
pub use self::core::Booster;

pub use self::adaboost_mh::AdaBoostMH;
