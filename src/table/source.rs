//! Delimited text sources.
//!
//! A source is a header line followed by data lines, cells separated by
//! commas:
//!
//! ```text
//! Date,Open,Close
//! 2023-01-02,475,480
//! 2023-01-03,480,471
//! ```
//!
//! Cells are trimmed. Blank lines are skipped. Quoting is not supported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::instrument;

use crate::common::{Error, Result};

/// One data row: the cells of a line, in header order.
pub type Row = Vec<String>;

const DELIMITER: char = ',';

/// An in-memory table read from a delimited text source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Read a table from a file.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be opened or read
    /// - `Error::EmptySource` if the file has no header line
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a table from any buffered reader.
    ///
    /// # Errors
    /// - `Error::Io` on a read failure
    /// - `Error::EmptySource` if there is no header line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut header = None;
        let mut rows = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cells = split_cells(&line);
            if header.is_none() {
                header = Some(cells);
            } else {
                rows.push(cells);
            }
        }

        let header = header.ok_or(Error::EmptySource)?;
        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Position of the column called `name`.
    ///
    /// # Errors
    /// `Error::ColumnNotFound` if the header has no such column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    pub(crate) fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

fn split_cells(line: &str) -> Row {
    line.split(DELIMITER).map(|c| c.trim().to_string()).collect()
}
