//! B-tree index implementation.
//!
//! # Components
//! - [`BTree`] - Owns the nodes; insert and point lookup
//! - [`Node`] - Sorted keys plus child handles
//! - [`SharedBTree`] - Single-writer, many-reader handle over a tree
//! - [`TreeStats`] - Operation counters

mod node;
mod shared;
mod stats;
mod tree;

pub use node::Node;
pub use shared::SharedBTree;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::{BTree, SearchResult};
