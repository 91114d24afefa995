//! rowindex - an in-memory B-tree index over tabular row keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            rowindex                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Table Layer (table/)                      │   │
//! │  │      Table (header + rows)  →  RowIndex (key → rows)     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Index Layer (index/)                      │   │
//! │  │   BTree: insert with pre-emptive split, point search     │   │
//! │  │   SharedBTree: single writer / many readers              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Common (common/)                          │   │
//! │  │      Degree, NodeId, BTreeConfig, Error                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Degree, NodeId, Error, config)
//! - [`index`] - Index structures (B-tree)
//! - [`table`] - Tabular sources and row indexes
//!
//! # Quick Start
//! ```
//! use rowindex::{BTree, SearchResult};
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key);
//! }
//!
//! match tree.search(&6) {
//!     SearchResult::Found { node, index } => assert_eq!(tree.node(node).keys()[index], 6),
//!     SearchResult::NotFound => unreachable!(),
//! }
//! assert_eq!(tree.search(&99), SearchResult::NotFound);
//! ```

pub mod common;
pub mod index;
pub mod table;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_DEGREE, MIN_DEGREE};
pub use common::{BTreeConfig, Degree, Error, NodeId, Result};

pub use index::btree::{BTree, Node, SearchResult, SharedBTree, StatsSnapshot, TreeStats};
pub use table::{Row, RowIndex, Table};
