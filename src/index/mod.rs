//! Index structures.
//!
//! - [`btree`] - In-memory B-tree keyed by any `Ord` type

pub mod btree;

pub use btree::{BTree, Node, SearchResult, SharedBTree};
