//! B-tree - ordered insertion with pre-emptive splitting, and point lookup.
//!
//! The [`BTree`] owns every node in a single arena and refers to them by
//! [`NodeId`]. Inserts split full nodes on the way down, so the node an
//! insert finally lands in always has room:
//!
//! ```text
//!   insert(k)
//!     ├─ empty tree ──────────────▶ new leaf root [k]
//!     ├─ root full ───────────────▶ new root, split old root, descend
//!     └─ otherwise ───────────────▶ descend
//!
//!   descend(node, k)
//!     ├─ leaf ────────────────────▶ shift larger keys right, place k
//!     └─ internal ─▶ pick child ─▶ split it first if full ─▶ descend(child)
//! ```
//!
//! Only a root split increases the height, and it does so by exactly one.

use std::fmt;

use tracing::{debug, trace};

use crate::common::{BTreeConfig, Degree, Error, NodeId, Result};
use crate::index::btree::node::Node;
use crate::index::btree::stats::{StatsSnapshot, TreeStats};

/// Outcome of a [`BTree::search`].
///
/// A hit carries the location of the key, not a value: the tree indexes
/// keys only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchResult {
    /// The key sits at `keys()[index]` of `node`.
    Found { node: NodeId, index: usize },
    /// No node holds the key.
    NotFound,
}

impl SearchResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }

    /// Handle of the node holding the key, if found.
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            SearchResult::Found { node, .. } => Some(node),
            SearchResult::NotFound => None,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResult::Found { node, index } => write!(f, "Found({}, key {})", node, index),
            SearchResult::NotFound => write!(f, "NotFound"),
        }
    }
}

/// An in-memory B-tree of minimum degree `t`.
///
/// # Structure
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                        BTree                         │
/// │  root: Option<NodeId> ──┐                            │
/// │                         ▼                            │
/// │  nodes: Vec<Node<K>>  [Node0] [Node1] [Node2] ...    │
/// │  degree: t            (children refer by NodeId)     │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// The tree exclusively owns all of its nodes, and each node is referenced
/// by exactly one parent. Nothing is ever removed, so a [`NodeId`] returned
/// by [`search`](Self::search) stays valid.
///
/// Duplicate keys are accepted and stored; each insert adds one key.
///
/// # Example
/// ```
/// use rowindex::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
///
/// assert!(tree.search(&6).is_found());
/// assert!(!tree.search(&99).is_found());
/// ```
#[derive(Debug)]
pub struct BTree<K> {
    /// Arena of all nodes. `NodeId(i)` is `nodes[i]`.
    nodes: Vec<Node<K>>,

    /// `None` while the tree is empty.
    root: Option<NodeId>,

    degree: Degree,

    /// Number of keys inserted.
    len: usize,

    /// Number of levels; 0 when empty.
    height: usize,

    stats: TreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree with minimum degree `t`.
    ///
    /// # Errors
    /// `Error::InvalidDegree` if `t < 2`.
    pub fn new(t: usize) -> Result<Self> {
        Ok(Self::with_degree(Degree::new(t)?))
    }

    /// Create an empty tree from a [`BTreeConfig`].
    ///
    /// # Errors
    /// `Error::InvalidDegree` if the configured degree is below 2.
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        Self::new(config.degree)
    }

    /// Create an empty tree with an already validated degree.
    pub fn with_degree(degree: Degree) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            degree,
            len: 0,
            height: 0,
            stats: TreeStats::new(),
        }
    }

    #[inline]
    pub fn degree(&self) -> Degree {
        self.degree
    }

    /// Number of keys inserted, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 when empty, 1 for a lone leaf root.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of nodes allocated.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a handle issued by this tree.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this tree.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    /// The root node, if any.
    pub fn root_node(&self) -> Option<&Node<K>> {
        self.root.map(|id| self.node(id))
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn alloc(&mut self, node: Node<K>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl<K: Ord> BTree<K> {
    /// Insert a key.
    ///
    /// Always succeeds. Inserting a key that is already present stores
    /// another copy.
    pub fn insert(&mut self, key: K) {
        self.stats.record_insert();
        self.len += 1;

        let root = match self.root {
            Some(root) => root,
            None => {
                let id = self.alloc(Node::leaf_with(key));
                self.root = Some(id);
                self.height = 1;
                return;
            }
        };

        if !self.nodes[root.0].is_full(self.degree) {
            self.insert_non_full(root, key);
            return;
        }

        // Root is full: grow a level above it, then split it.
        let new_root = self.alloc(Node::internal_with_child(root));
        self.root = Some(new_root);
        self.height += 1;
        self.split_child(new_root, 0);
        debug!(root = %new_root, height = self.height, "root split");

        // Ties go right, matching the descent rule in `child_index`.
        let i = if self.nodes[new_root.0].keys()[0] <= key { 1 } else { 0 };
        let target = self.nodes[new_root.0].children()[i];
        self.insert_non_full(target, key);
    }

    /// Split the full child at `children[index]` of `parent`.
    ///
    /// The child keeps its lower half, a new sibling takes the upper half,
    /// and the median moves up into `parent` at `index`.
    fn split_child(&mut self, parent: NodeId, index: usize) {
        let degree = self.degree;
        let child = self.nodes[parent.0].children()[index];

        let (median, sibling) = self.nodes[child.0].split_upper(degree);
        let sibling = self.alloc(sibling);
        self.nodes[parent.0].adopt(index, median, sibling);

        let is_root = self.root == Some(parent) && self.nodes[parent.0].len() == 1;
        self.stats.record_split(is_root);
        trace!(%parent, index, %child, %sibling, "split child");

        debug_assert_eq!(self.nodes[child.0].len(), degree.min_keys());
        debug_assert_eq!(self.nodes[sibling.0].len(), degree.min_keys());
        debug_assert!(self.nodes[parent.0].len() <= degree.max_keys());
    }

    /// Insert into the subtree rooted at `id`, which must not be full.
    fn insert_non_full(&mut self, mut id: NodeId, key: K) {
        let degree = self.degree;

        loop {
            debug_assert!(
                !self.nodes[id.0].is_full(degree),
                "descended into a full node"
            );

            if self.nodes[id.0].is_leaf() {
                self.nodes[id.0].insert_into_leaf(key);
                debug_assert!(self.nodes[id.0].len() <= degree.max_keys());
                return;
            }

            let mut i = self.nodes[id.0].child_index(&key);
            let child = self.nodes[id.0].children()[i];
            if self.nodes[child.0].is_full(degree) {
                self.split_child(id, i);
                if self.nodes[id.0].keys()[i] <= key {
                    i += 1;
                }
            }
            id = self.nodes[id.0].children()[i];
        }
    }

    /// Look up a key.
    ///
    /// Never mutates the tree structure; only the lookup counters move.
    pub fn search(&self, key: &K) -> SearchResult {
        let result = self.find(key);
        self.stats.record_search(result.is_found());
        result
    }

    /// `true` if `key` was inserted at least once.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_found()
    }

    fn find(&self, key: &K) -> SearchResult {
        let mut id = match self.root {
            Some(root) => root,
            None => return SearchResult::NotFound,
        };

        loop {
            let node = &self.nodes[id.0];
            let i = node.lower_bound(key);
            if i < node.len() && node.keys()[i] == *key {
                return SearchResult::Found { node: id, index: i };
            }
            if node.is_leaf() {
                return SearchResult::NotFound;
            }
            id = node.children()[i];
        }
    }

    /// Walk the whole tree and check every structural invariant.
    ///
    /// # Errors
    /// `Error::InvariantViolation` describing the first broken rule found.
    pub fn validate(&self) -> Result<()> {
        let root = match self.root {
            Some(root) => root,
            None => {
                if self.len != 0 || self.height != 0 || !self.nodes.is_empty() {
                    return Err(violation("empty tree carries keys or nodes"));
                }
                return Ok(());
            }
        };

        let mut walk = Walk {
            leaf_depth: None,
            keys: 0,
            nodes: 0,
        };
        self.validate_node(root, None, None, 1, &mut walk)?;

        if walk.leaf_depth != Some(self.height) {
            return Err(violation(format!(
                "leaf depth {:?} does not match height {}",
                walk.leaf_depth, self.height
            )));
        }
        if walk.keys != self.len {
            return Err(violation(format!(
                "found {} keys, expected {}",
                walk.keys, self.len
            )));
        }
        if walk.nodes != self.nodes.len() {
            return Err(violation(format!(
                "{} of {} nodes reachable from the root",
                walk.nodes,
                self.nodes.len()
            )));
        }
        Ok(())
    }

    fn validate_node(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<()> {
        let node = self.nodes.get(id.0).ok_or_else(|| {
            violation(format!("{} does not exist", id))
        })?;
        let is_root = self.root == Some(id);
        walk.nodes += 1;
        walk.keys += node.len();

        if node.len() > self.degree.max_keys() {
            return Err(violation(format!(
                "{} holds {} keys, max is {}",
                id,
                node.len(),
                self.degree.max_keys()
            )));
        }
        if !is_root && node.len() < self.degree.min_keys() {
            return Err(violation(format!(
                "{} holds {} keys, min is {}",
                id,
                node.len(),
                self.degree.min_keys()
            )));
        }
        if node.is_empty() {
            return Err(violation(format!("{} holds no keys", id)));
        }
        if node.keys().windows(2).any(|w| w[0] > w[1]) {
            return Err(violation(format!("{} keys are out of order", id)));
        }
        let first = &node.keys()[0];
        let last = &node.keys()[node.len() - 1];
        if lower.is_some_and(|lo| first < lo) || upper.is_some_and(|hi| last > hi) {
            return Err(violation(format!(
                "{} keys escape the separators of its parent",
                id
            )));
        }

        if node.is_leaf() {
            if !node.children().is_empty() {
                return Err(violation(format!("leaf {} has children", id)));
            }
            match walk.leaf_depth {
                None => walk.leaf_depth = Some(depth),
                Some(d) if d != depth => {
                    return Err(violation(format!(
                        "leaf {} at depth {}, other leaves at {}",
                        id, depth, d
                    )));
                }
                Some(_) => {}
            }
            return Ok(());
        }

        if node.children().len() != node.len() + 1 {
            return Err(violation(format!(
                "{} has {} keys but {} children",
                id,
                node.len(),
                node.children().len()
            )));
        }
        for (i, &child) in node.children().iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&node.keys()[i - 1]) };
            let hi = node.keys().get(i).or(upper);
            self.validate_node(child, lo, hi, depth + 1, walk)?;
        }
        Ok(())
    }
}

/// Totals gathered while validating.
struct Walk {
    leaf_depth: Option<usize>,
    keys: usize,
    nodes: usize,
}

fn violation(msg: impl Into<String>) -> Error {
    Error::InvariantViolation(msg.into())
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self::with_degree(Degree::default())
    }
}

impl<K: Ord> Extend<K> for BTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for BTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(t: usize, keys: &[i32]) -> BTree<i32> {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().copied());
        tree
    }

    fn child_keys(tree: &BTree<i32>, id: NodeId) -> Vec<Vec<i32>> {
        tree.node(id)
            .children()
            .iter()
            .map(|&c| tree.node(c).keys().to_vec())
            .collect()
    }

    #[test]
    fn test_new_rejects_degree_one() {
        assert!(matches!(
            BTree::<i32>::new(1),
            Err(Error::InvalidDegree(1))
        ));
        assert!(BTree::<i32>::with_config(BTreeConfig::default().with_degree(0)).is_err());
    }

    #[test]
    fn test_empty_tree() {
        let tree: BTree<i32> = BTree::new(2).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.search(&1), SearchResult::NotFound);
        tree.validate().unwrap();
    }

    #[test]
    fn test_single_insert_makes_leaf_root() {
        let tree = tree_of(2, &[42]);

        let root = tree.root_node().unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.keys(), &[42]);
        assert_eq!(tree.height(), 1);
        assert_eq!(
            tree.search(&42),
            SearchResult::Found {
                node: tree.root().unwrap(),
                index: 0
            }
        );
        assert!(!tree.contains(&41));
        tree.validate().unwrap();
    }

    #[test]
    fn test_root_split_on_full_root() {
        // 2t - 1 = 3 keys fill the root, the fourth splits it.
        let mut tree = tree_of(2, &[1, 2, 3]);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.stats().root_splits, 0);

        tree.insert(4);

        let root_id = tree.root().unwrap();
        let root = tree.node(root_id);
        assert_eq!(root.keys(), &[2]);
        assert_eq!(root.children().len(), 2);
        assert!(root.children().iter().all(|&c| tree.node(c).is_leaf()));
        assert_eq!(child_keys(&tree, root_id), vec![vec![1], vec![3, 4]]);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.stats().root_splits, 1);
        tree.validate().unwrap();
    }

    #[test]
    fn test_worked_example_degree_two() {
        let tree = tree_of(2, &[10, 20, 5, 6, 12, 30, 7, 17]);

        let root_id = tree.root().unwrap();
        assert_eq!(tree.node(root_id).keys(), &[10, 20]);
        assert_eq!(
            child_keys(&tree, root_id),
            vec![vec![5, 6, 7], vec![12, 17], vec![30]]
        );
        assert_eq!(tree.height(), 2);

        assert!(tree.search(&6).is_found());
        assert_eq!(tree.search(&99), SearchResult::NotFound);
        tree.validate().unwrap();
    }

    #[test]
    fn test_worked_example_degree_three() {
        let tree = tree_of(3, &[10, 20, 5, 6, 12, 30, 7, 17]);

        let root_id = tree.root().unwrap();
        assert_eq!(tree.node(root_id).keys(), &[10]);
        assert_eq!(
            child_keys(&tree, root_id),
            vec![vec![5, 6, 7], vec![12, 17, 20, 30]]
        );
        tree.validate().unwrap();
    }

    #[test]
    fn test_search_reports_location() {
        let tree = tree_of(2, &[10, 20, 5, 6, 12, 30, 7, 17]);

        match tree.search(&17) {
            SearchResult::Found { node, index } => {
                assert_eq!(tree.node(node).keys()[index], 17);
                assert!(tree.node(node).is_leaf());
            }
            SearchResult::NotFound => panic!("17 was inserted"),
        }
    }

    #[test]
    fn test_duplicate_inserts() {
        let mut tree = tree_of(2, &[7, 7]);
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&7));

        // Push duplicates through several splits.
        for _ in 0..20 {
            tree.insert(7);
        }
        tree.insert(3);
        tree.insert(9);

        assert_eq!(tree.len(), 24);
        assert!(tree.contains(&7));
        assert!(tree.contains(&3));
        assert!(tree.contains(&9));
        assert!(!tree.contains(&8));
        tree.validate().unwrap();
    }

    #[test]
    fn test_tie_with_promoted_key_goes_right() {
        // Root [1, 2, 3] splits around 2; the second 2 lands in the right leaf.
        let tree = tree_of(2, &[1, 2, 3, 2]);
        let root_id = tree.root().unwrap();
        assert_eq!(child_keys(&tree, root_id), vec![vec![1], vec![2, 3]]);
        tree.validate().unwrap();
    }

    #[test]
    fn test_height_grows_only_on_root_split() {
        let mut tree = BTree::new(2).unwrap();
        for key in 0..200 {
            let before_height = tree.height();
            let before_splits = tree.stats().root_splits;
            tree.insert(key);

            let grew = tree.height() - before_height;
            let root_split = tree.stats().root_splits - before_splits;
            if before_height == 0 {
                assert_eq!(grew, 1);
            } else {
                assert_eq!(grew as u64, root_split);
            }
        }
        tree.validate().unwrap();
    }

    #[test]
    fn test_search_does_not_change_structure() {
        let tree = tree_of(3, &[50, 10, 40, 20, 30, 60, 70, 80, 90]);
        let root = tree.root();
        let nodes = tree.node_count();

        let first: Vec<_> = (0..100).map(|k| tree.search(&k)).collect();
        let second: Vec<_> = (0..100).rev().map(|k| tree.search(&k)).collect();

        assert_eq!(first, second.into_iter().rev().collect::<Vec<_>>());
        assert_eq!(tree.root(), root);
        assert_eq!(tree.node_count(), nodes);
        assert_eq!(tree.stats().searches, 200);
    }

    #[test]
    fn test_from_iterator_uses_default_degree() {
        let tree: BTree<u32> = (0..50).collect();
        assert_eq!(tree.degree(), Degree::default());
        assert_eq!(tree.len(), 50);
        assert!((0..50).all(|k| tree.contains(&k)));
        tree.validate().unwrap();
    }

    #[test]
    fn test_larger_degree_descending() {
        let mut tree = BTree::new(5).unwrap();
        for key in (0..1000).rev() {
            tree.insert(key);
        }
        assert!((0..1000).all(|k| tree.contains(&k)));
        assert!(!tree.contains(&1000));
        tree.validate().unwrap();
    }

    #[test]
    fn test_search_result_display() {
        let hit = SearchResult::Found {
            node: NodeId::new(3),
            index: 1,
        };
        assert_eq!(format!("{}", hit), "Found(Node(3), key 1)");
        assert_eq!(format!("{}", SearchResult::NotFound), "NotFound");
        assert_eq!(hit.node(), Some(NodeId::new(3)));
        assert_eq!(SearchResult::NotFound.node(), None);
    }
}
