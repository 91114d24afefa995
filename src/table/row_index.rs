//! Row index - rows grouped by one column's value, keys held in a B-tree.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument, warn};

use crate::common::{BTreeConfig, Result};
use crate::index::btree::{BTree, SearchResult};
use crate::table::source::{Row, Table};

/// Rows of a [`Table`] grouped by the parsed value of one column.
///
/// Every distinct key is inserted into a [`BTree`] once; the rows sharing
/// that key are kept in source order. A row whose key cell is missing or
/// does not parse as `K` is skipped and counted, never fatal.
///
/// # Example
/// ```
/// use rowindex::{BTreeConfig, RowIndex, Table};
///
/// let table = Table::from_reader("Date,Open\nmon,475\ntue,480\nwed,475\n".as_bytes()).unwrap();
/// let index: RowIndex<u32> = RowIndex::build(table, "Open", BTreeConfig::default()).unwrap();
///
/// assert_eq!(index.rows(&475).len(), 2);
/// assert!(index.search(&480).is_found());
/// assert!(index.rows(&999).is_empty());
/// ```
#[derive(Debug)]
pub struct RowIndex<K> {
    column: String,
    header: Vec<String>,
    tree: BTree<K>,
    groups: HashMap<K, Vec<Row>>,
    skipped: usize,
}

impl<K> RowIndex<K>
where
    K: FromStr + Ord + Hash + Clone,
    K::Err: Debug,
{
    /// Index `table` by the column called `column`.
    ///
    /// # Errors
    /// - `Error::ColumnNotFound` if the header has no such column
    /// - `Error::InvalidDegree` if `config` carries a degree below 2
    #[instrument(skip(table, config), fields(rows = table.rows().len()))]
    pub fn build(table: Table, column: &str, config: BTreeConfig) -> Result<Self> {
        let position = table.column_index(column)?;
        let mut tree = BTree::with_config(config)?;
        let mut groups: HashMap<K, Vec<Row>> = HashMap::new();
        let mut skipped = 0;

        let header = table.header().to_vec();
        for (line, row) in table.into_rows().into_iter().enumerate() {
            let cell = match row.get(position) {
                Some(cell) => cell,
                None => {
                    warn!(line, column, "row has no cell for key column, skipping");
                    skipped += 1;
                    continue;
                }
            };
            let key = match cell.parse::<K>() {
                Ok(key) => key,
                Err(e) => {
                    warn!(line, column, cell = %cell, error = ?e, "unparsable key, skipping");
                    skipped += 1;
                    continue;
                }
            };

            let group = groups.entry(key.clone()).or_default();
            if group.is_empty() {
                tree.insert(key);
            }
            group.push(row);
        }

        debug!(
            keys = tree.len(),
            height = tree.height(),
            skipped,
            "row index built"
        );

        Ok(Self {
            column: column.to_string(),
            header,
            tree,
            groups,
            skipped,
        })
    }

    /// Read a delimited text file and index it by `column`.
    ///
    /// # Errors
    /// Any error from [`Table::open`] or [`RowIndex::build`].
    pub fn open<P: AsRef<Path>>(path: P, column: &str, config: BTreeConfig) -> Result<Self> {
        Self::build(Table::open(path)?, column, config)
    }

    /// Rows whose key cell equals `key`, in source order.
    pub fn rows(&self, key: &K) -> &[Row] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<K: Ord> RowIndex<K> {
    /// Look `key` up in the underlying tree.
    pub fn search(&self, key: &K) -> SearchResult {
        self.tree.search(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }
}

impl<K> RowIndex<K> {
    /// Name of the key column.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn tree(&self) -> &BTree<K> {
        &self.tree
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Number of rows indexed.
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of rows dropped for a missing or unparsable key.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
