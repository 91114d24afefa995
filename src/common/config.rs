//! Configuration constants for rowindex.

/// Smallest legal minimum degree `t`.
///
/// With `t = 2` every non-root node holds 1 to 3 keys (a 2-3-4 tree).
/// Anything smaller cannot be split around a median.
pub const MIN_DEGREE: usize = 2;

/// Minimum degree used when none is configured.
pub const DEFAULT_DEGREE: usize = 2;

/// Tree-wide configuration.
///
/// # Example
/// ```
/// use rowindex::BTreeConfig;
///
/// let config = BTreeConfig::default().with_degree(4);
/// assert_eq!(config.degree, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    /// Minimum degree `t`. Validated when the tree is built.
    pub degree: usize,
}

impl BTreeConfig {
    /// Set the minimum degree.
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }
}
