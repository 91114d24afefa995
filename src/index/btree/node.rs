//! B-tree node - the unit of storage.
//!
//! A [`Node`] owns an ordered run of keys and, when internal, one more child
//! handle than it has keys:
//!
//! ```text
//!            keys:      [ k0 | k1 | k2 ]
//!            children: c0   c1   c2   c3
//!
//!   every key in c0 <= k0 <= every key in c1 <= k1 <= ... <= every key in c3
//! ```
//!
//! Nodes only know about themselves. Operations that touch a parent and a
//! child together (splitting, descending) live on the tree, which owns the
//! node storage and resolves [`NodeId`]s. The methods here are the local
//! halves of those operations.

use crate::common::{Degree, NodeId};

/// A single B-tree node.
///
/// # Invariants
/// - `keys` is sorted (equal neighbours only when duplicates were inserted)
/// - leaf: `children` is empty
/// - internal: `children.len() == keys.len() + 1`
/// - `keys.len() <= 2t - 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K> {
    keys: Vec<K>,
    children: Vec<NodeId>,
    is_leaf: bool,
}

impl<K> Node<K> {
    /// A leaf holding exactly one key.
    pub(crate) fn leaf_with(key: K) -> Self {
        Self {
            keys: vec![key],
            children: Vec::new(),
            is_leaf: true,
        }
    }

    /// An internal node with no keys and a single child.
    ///
    /// Only valid as the transient state of a new root, right before
    /// its child is split.
    pub(crate) fn internal_with_child(child: NodeId) -> Self {
        Self {
            keys: Vec::new(),
            children: vec![child],
            is_leaf: false,
        }
    }

    /// Keys in sorted order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Child handles, empty for a leaf.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A full node holds `2t - 1` keys and must be split before a key
    /// can descend through it.
    #[inline]
    pub fn is_full(&self, degree: Degree) -> bool {
        self.keys.len() >= degree.max_keys()
    }

    /// Split a full node around its median.
    ///
    /// `self` keeps the `t - 1` keys before the median (and, if internal,
    /// the first `t` children). The returned sibling takes the `t - 1` keys
    /// after the median (and the last `t` children). The median itself is
    /// returned for the parent to adopt.
    pub(crate) fn split_upper(&mut self, degree: Degree) -> (K, Node<K>) {
        assert_eq!(
            self.keys.len(),
            degree.max_keys(),
            "split_upper called on a node that is not full"
        );

        let mid = degree.median();
        let upper_keys = self.keys.split_off(mid + 1);
        let median = self
            .keys
            .pop()
            .expect("full node has a median key");

        let upper_children = if self.is_leaf {
            Vec::new()
        } else {
            self.children.split_off(mid + 1)
        };

        let sibling = Node {
            keys: upper_keys,
            children: upper_children,
            is_leaf: self.is_leaf,
        };
        (median, sibling)
    }

    /// Take a promoted median at `index` and the new sibling right after
    /// the child it was split from.
    pub(crate) fn adopt(&mut self, index: usize, median: K, sibling: NodeId) {
        debug_assert!(!self.is_leaf, "leaves have no children to split");
        self.keys.insert(index, median);
        self.children.insert(index + 1, sibling);
    }
}

impl<K: Ord> Node<K> {
    /// Insert into a leaf that has room, shifting larger keys right.
    ///
    /// The scan runs from the end, so an equal key lands after the
    /// existing ones.
    pub(crate) fn insert_into_leaf(&mut self, key: K) {
        debug_assert!(self.is_leaf, "insert_into_leaf on an internal node");

        let mut i = self.keys.len();
        while i > 0 && key < self.keys[i - 1] {
            i -= 1;
        }
        self.keys.insert(i, key);
    }

    /// Index of the child whose subtree must receive `key`.
    ///
    /// That is the first index whose key is greater than `key`, or the
    /// last child if there is none. Keys equal to a separator go right.
    pub(crate) fn child_index(&self, key: &K) -> usize {
        let mut i = self.keys.len();
        while i > 0 && *key < self.keys[i - 1] {
            i -= 1;
        }
        i
    }

    /// First index whose key is `>= key`, or `len()` if none.
    pub(crate) fn lower_bound(&self, key: &K) -> usize {
        self.keys
            .iter()
            .position(|k| k >= key)
            .unwrap_or(self.keys.len())
    }
}
