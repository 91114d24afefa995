//! B-tree operation statistics.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters tracked by a [`BTree`](crate::BTree).
///
/// Fields are atomic so that `search(&self)` can count lookups without
/// needing `&mut` access to the tree.
///
/// # Memory Ordering
/// All operations use `Ordering::Relaxed`: counters are independent and
/// only need to be atomic, not ordered against each other.
///
/// # Example
/// ```
/// use rowindex::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.searches.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.searches.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Number of keys inserted (duplicates included).
    pub inserts: AtomicU64,

    /// Number of splits that created a new root.
    pub root_splits: AtomicU64,

    /// Number of splits of any node, root splits included.
    pub node_splits: AtomicU64,

    /// Number of lookups.
    pub searches: AtomicU64,

    /// Number of lookups that found the key.
    pub hits: AtomicU64,

    /// Number of lookups that did not.
    pub misses: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            inserts: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            node_splits: AtomicU64::new(0),
            searches: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_split(&self, is_root: bool) {
        self.node_splits.fetch_add(1, Ordering::Relaxed);
        if is_root {
            self.root_splits.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_search(&self, hit: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            node_splits: self.node_splits.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.root_splits.store(0, Ordering::Relaxed);
        self.node_splits.store(0, Ordering::Relaxed);
        self.searches.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub inserts: u64,
    pub root_splits: u64,
    pub node_splits: u64,
    pub searches: u64,
    pub hits: u64,
    pub misses: u64,
}

impl StatsSnapshot {
    /// Fraction of lookups that found their key (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.hits as f64 / self.searches as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, splits: {} ({} root), searches: {}, hit_rate: {:.2}% }}",
            self.inserts,
            self.node_splits,
            self.root_splits,
            self.searches,
            self.hit_rate() * 100.0
        )
    }
}
