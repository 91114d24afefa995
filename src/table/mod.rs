//! Tabular sources and row indexes built on top of the B-tree.
//!
//! # Components
//! - [`Table`] - Header plus rows of string cells read from delimited text
//! - [`RowIndex`] - Groups rows by one column's value and indexes the keys

mod row_index;
mod source;

pub use row_index::RowIndex;
pub use source::{Row, Table};
