//! Schema resolution — maps the two supported CSV layouts onto the three
//! text columns the ranker combines.

use thiserror::Error;

use crate::jobs::table::JobTable;

/// (preferred header, alternate header)
pub const TITLE_COLUMNS: (&str, &str) = ("Job Title", "title");
pub const DESCRIPTION_COLUMNS: (&str, &str) = ("Job Description", "description");
pub const RESPONSIBILITIES_COLUMNS: (&str, &str) = ("Responsibilities", "requirements");

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("No matching column: expected '{preferred}' or '{alternate}'")]
    MissingColumn {
        preferred: &'static str,
        alternate: &'static str,
    },
}

/// Column indices of the three text fields in a loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSchema {
    pub title: usize,
    pub description: usize,
    pub responsibilities: usize,
}

pub fn resolve_schema(table: &JobTable) -> Result<JobSchema, SchemaError> {
    Ok(JobSchema {
        title: resolve_column(table, TITLE_COLUMNS)?,
        description: resolve_column(table, DESCRIPTION_COLUMNS)?,
        responsibilities: resolve_column(table, RESPONSIBILITIES_COLUMNS)?,
    })
}

fn resolve_column(
    table: &JobTable,
    (preferred, alternate): (&'static str, &'static str),
) -> Result<usize, SchemaError> {
    table
        .column_index(preferred)
        .or_else(|| table.column_index(alternate))
        .ok_or(SchemaError::MissingColumn {
            preferred,
            alternate,
        })
}

impl JobSchema {
    /// Title, description and responsibilities joined by single spaces.
    pub fn combined_text(&self, table: &JobTable, row: usize) -> String {
        format!(
            "{} {} {}",
            table.cell(row, self.title),
            table.cell(row, self.description),
            table.cell(row, self.responsibilities)
        )
    }
}
