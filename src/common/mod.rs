//! Common types and utilities shared across rowindex.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (NodeId) and the validated minimum degree

pub mod config;
pub mod error;
mod degree;
mod node_id;

pub use config::BTreeConfig;
pub use degree::Degree;
pub use error::{Error, Result};
pub use node_id::NodeId;
