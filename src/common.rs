//! Defines some common functions and constants used in this library.

/// Defines the constants.
pub mod constants;

/// Defines some useful functions such as the Hamming loss.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;
