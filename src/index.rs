//! The index abstraction over documents, features, and categories.
//!
//! [`TextIndex`] is the contract the boosting engine consumes.
//! [`SparseIndex`] is an in-memory implementation of it.

mod index_trait;
mod sparse_index;


pub use index_trait::{
    TextIndex,
    CategoryId,
    DocumentId,
    FeatureId,
};

pub use sparse_index::{
    SparseIndex,
    SparseIndexBuilder,
};
