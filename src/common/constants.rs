/// A category is assigned iff its score is at least this value.
pub const DECISION_BORDER: f64 = 0.0;

/// Tolerance used when comparing accumulated masses.
pub const NUMERIC_TOLERANCE: f64 = 1e-9;

/// Weight range assumed for a feature that occurs in no document.
pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (0.0, 1.0);

/// Default number of bins per feature.
pub const DEFAULT_N_BINS: usize = 8;

/// Default number of boosting rounds.
pub const DEFAULT_ROUNDS: usize = 100;

/// Magic bytes at the head of a persisted model.
pub const MODEL_MAGIC: &[u8; 4] = b"TXBM";

/// Current version of the persisted model layout.
pub const MODEL_VERSION: u8 = 1;

/// On-disk value of a pivot that is not set.
pub const ABSENT_PIVOT: i32 = -1;

/// Number of bins printed before eliding.
pub const PRINT_WIDTH_BINNING: usize = 3;
