//! Batch import: rebuild records from rows, collecting per-cell failures.
//!
//! Every row is rebuilt into a fresh `R::default()`. A row with any failed
//! cell is left out of [`ImportResult::records`], but every failure of every
//! row is kept in [`ImportResult::errors`], so a partially bad sheet still
//! yields its good rows.

use crate::error::FieldError;
use crate::headers::PATH_SEPARATOR;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::setter::set_field;
use crate::type_token::TypeTag;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell that could not be written into its field.
#[derive(Debug)]
pub struct ImportError {
    /// 1-based sheet row, counting the header row (the first data row is 2).
    pub row: usize,
    /// Header of the offending column.
    pub column: String,
    /// The raw cell.
    pub value: CellValue,
    /// Declared type of the field the column names, if it names one.
    pub target: Option<TypeTag>,
    /// Why the cell was rejected.
    pub source: FieldError,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column '{}': cannot convert '{}' to ",
            self.row, self.column, self.value
        )?;
        match self.target {
            Some(target) => write!(f, "{target}")?,
            None => f.write_str("<unknown>")?,
        }
        write!(f, ": {}", self.source)
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl ImportError {
    /// Serializable summary of this error.
    pub fn report(&self) -> ImportErrorReport {
        ImportErrorReport {
            row: self.row,
            column: self.column.clone(),
            value: self.value.clone(),
            target: self.target.map(|tag| tag.to_string()),
            message: self.source.to_string(),
        }
    }
}

/// Flat, serializable form of an [`ImportError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportErrorReport {
    pub row: usize,
    pub column: String,
    pub value: CellValue,
    pub target: Option<String>,
    pub message: String,
}

/// Records rebuilt from clean rows, plus every cell failure.
#[derive(Debug)]
pub struct ImportResult<R> {
    /// Records from rows without failures, in input order.
    pub records: Vec<R>,
    /// All failures across all rows, in row then column order.
    pub errors: Vec<ImportError>,
}

impl<R> ImportResult<R> {
    /// Whether every row was imported.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Distinct sheet rows that produced at least one error, ascending.
    pub fn failed_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.dedup();
        rows
    }

    pub fn reports(&self) -> Vec<ImportErrorReport> {
        self.errors.iter().map(ImportError::report).collect()
    }
}

/// Render errors one per line, in order.
pub fn format_import_errors(errors: &[ImportError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rebuild one `R` per row.
///
/// Cells are matched to headers by position; cells beyond the last header
/// and headers beyond the end of a short row are ignored.
pub fn import_rows<R: Record>(
    headers: &[String],
    rows: &[Vec<CellValue>],
    registry: &TypeRegistry,
) -> ImportResult<R> {
    let shape = R::shape();
    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (r, row) in rows.iter().enumerate() {
        let sheet_row = r + 2;
        let mut record = R::default();
        let before = errors.len();

        for (column, raw) in headers.iter().zip(row) {
            if let Err(source) = set_field(&mut record, column, raw, registry) {
                let path: Vec<&str> = column.split(PATH_SEPARATOR).collect();
                let target = shape.resolve(&path).map(|field| field.tag);
                tracing::debug!(row = sheet_row, %column, error = %source, "cell rejected");
                errors.push(ImportError {
                    row: sheet_row,
                    column: column.clone(),
                    value: raw.clone(),
                    target,
                    source,
                });
            }
        }

        if errors.len() == before {
            records.push(record);
        } else {
            tracing::warn!(
                row = sheet_row,
                failures = errors.len() - before,
                "skipping row with conversion errors"
            );
        }
    }

    tracing::debug!(
        rows = rows.len(),
        imported = records.len(),
        errors = errors.len(),
        "imported rows"
    );
    ImportResult { records, errors }
}
