//! Shared access to a [`BTree`] across threads.
//!
//! [`BTree`] itself assumes a single owner. [`SharedBTree`] wraps one in a
//! reader-writer lock: inserts take the write lock, lookups the read lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::common::{BTreeConfig, Result};
use crate::index::btree::stats::StatsSnapshot;
use crate::index::btree::tree::{BTree, SearchResult};

/// A cloneable, thread-safe handle to one B-tree.
///
/// # Thread Safety
/// - `insert`: exclusive (`RwLock` write)
/// - `search`, `contains`, `len`, ...: shared (`RwLock` read)
///
/// A [`SearchResult`] handle stays valid after the lock is released,
/// because nodes are never removed.
///
/// # Example
/// ```
/// use rowindex::SharedBTree;
/// use std::thread;
///
/// let tree = SharedBTree::new(2).unwrap();
/// let writer = tree.clone();
/// thread::spawn(move || writer.insert(5)).join().unwrap();
///
/// assert!(tree.contains(&5));
/// ```
pub struct SharedBTree<K> {
    inner: Arc<RwLock<BTree<K>>>,
}

impl<K> SharedBTree<K> {
    /// Create an empty shared tree with minimum degree `t`.
    ///
    /// # Errors
    /// `Error::InvalidDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(t)?))
    }

    /// Create an empty shared tree from a [`BTreeConfig`].
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        Ok(Self::from_tree(BTree::with_config(config)?))
    }

    /// Share an existing tree.
    pub fn from_tree(tree: BTree<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Hold the read lock for several operations at once.
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K>> {
        self.inner.read()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats()
    }
}

impl<K: Ord> SharedBTree<K> {
    pub fn insert(&self, key: K) {
        self.inner.write().insert(key);
    }

    pub fn search(&self, key: &K) -> SearchResult {
        self.inner.read().search(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// See [`BTree::validate`].
    pub fn validate(&self) -> Result<()> {
        self.inner.read().validate()
    }
}

impl<K> Clone for SharedBTree<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedBTree<K> {
    fn default() -> Self {
        Self::from_tree(BTree::default())
    }
}
