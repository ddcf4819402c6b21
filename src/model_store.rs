//! Persistence of [`BoostingClassifier`](crate::BoostingClassifier).
//!
//! A model named `name` is stored as a set of named resources:
//!
//! ```text
//! <name>.header          magic, version, # of categories, # of features
//! <name>.discretization  the bins of every feature, then # of rounds
//! <name>.category.<c>    the hypotheses of category `c`, in round order
//! <name>.customizer      (optional) the runtime settings as JSON
//! ```
//!
//! All numbers are little endian.

mod storage;
mod codec;


pub use storage::{
    StorageManager,
    FileStorage,
    MemoryStorage,
};

pub use codec::ModelStore;
