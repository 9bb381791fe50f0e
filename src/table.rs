//! The tabular container exchanged with sheet readers and writers.

use crate::error::{ExportError, TableError};
use crate::flatten::values;
use crate::headers::headers;
use crate::import::{ImportResult, import_rows};
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// Column headers plus rows of cells, each row exactly as wide as the headers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// An empty table with a fixed header row.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from reader output, validating every row.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        let mut table = Self {
            headers,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.add_row(row)?;
        }
        Ok(table)
    }

    /// Flatten `records` into a table with headers derived from `R`.
    ///
    /// Fails on an empty slice, on the first record whose flattening fails and
    /// on any record whose cell count differs from the header count.
    pub fn from_records<R: Record>(records: &[R], registry: &TypeRegistry) -> Result<Self, ExportError> {
        if records.is_empty() {
            return Err(ExportError::EmptyInput);
        }
        let mut table = Self::new(headers::<R>(registry));
        for (index, record) in records.iter().enumerate() {
            let row = values(record, registry).map_err(|source| ExportError::Item {
                index,
                source: Box::new(source),
            })?;
            if row.len() != table.width() {
                return Err(ExportError::LengthMismatch {
                    index,
                    headers: table.width(),
                    values: row.len(),
                });
            }
            table.add_row(row)?;
        }
        tracing::debug!(
            rows = table.len(),
            columns = table.width(),
            "flattened records into table"
        );
        Ok(table)
    }

    /// Rebuild records of type `R` from every row.
    pub fn to_records<R: Record>(&self, registry: &TypeRegistry) -> ImportResult<R> {
        import_rows(&self.headers, &self.rows, registry)
    }

    /// Append a row. A row whose length differs from the header count is
    /// rejected and the table is left unchanged.
    pub fn add_row(&mut self, row: Vec<CellValue>) -> Result<(), TableError> {
        if row.len() != self.headers.len() {
            return Err(TableError::RowLength {
                actual: row.len(),
                expected: self.headers.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<CellValue>>) {
        (self.headers, self.rows)
    }
}
