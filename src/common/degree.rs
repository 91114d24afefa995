//! Minimum degree of a B-tree.

use std::fmt;

use crate::common::config::{DEFAULT_DEGREE, MIN_DEGREE};
use crate::common::{Error, Result};

/// The minimum degree `t` of a B-tree, validated at construction.
///
/// Every node except the root holds between `t - 1` and `2t - 1` keys.
/// A node holding `2t - 1` keys is *full*.
///
/// # Example
/// ```
/// use rowindex::Degree;
///
/// let t = Degree::new(3).unwrap();
/// assert_eq!(t.min_keys(), 2);
/// assert_eq!(t.max_keys(), 5);
/// assert!(Degree::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Degree(usize);

impl Degree {
    /// Create a new Degree.
    ///
    /// # Errors
    /// `Error::InvalidDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        if t < MIN_DEGREE {
            return Err(Error::InvalidDegree(t));
        }
        Ok(Degree(t))
    }

    /// The raw value of `t`.
    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Fewest keys a non-root node may hold.
    #[inline]
    pub fn min_keys(self) -> usize {
        self.0 - 1
    }

    /// Most keys any node may hold.
    #[inline]
    pub fn max_keys(self) -> usize {
        2 * self.0 - 1
    }

    /// Most children an internal node may hold.
    #[inline]
    pub fn max_children(self) -> usize {
        2 * self.0
    }

    /// Zero-based position of the median key in a full node.
    #[inline]
    pub(crate) fn median(self) -> usize {
        self.0 - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Degree(DEFAULT_DEGREE)
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
