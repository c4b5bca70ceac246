//! Table Loader — reads the job postings CSV into an in-memory text table.
//!
//! Every call re-reads the file; nothing is cached between requests.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read CSV {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A row/column text table. Missing cells are stored as empty strings,
/// so every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl JobTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at (`row`, `column`); empty when out of range.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Loads a CSV file with a header row. Short rows are padded with empty cells.
pub fn load_job_table(path: &Path) -> Result<JobTable, TableError> {
    info!("Loading jobs from CSV: {}", path.display());

    if !path.exists() {
        return Err(TableError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let read_err = |source| TableError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_path(path)
        .map_err(read_err)?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = JobTable::new(columns, rows);
    if table.is_empty() {
        warn!("CSV {} has a header but no job rows", path.display());
    } else {
        info!("Loaded {} jobs from CSV", table.len());
    }
    debug!("CSV columns: {:?}", table.columns());

    Ok(table)
}
