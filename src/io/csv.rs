//! CSV sheet I/O.
//!
//! - [`write_csv`] writes a [`Table`] with its headers as the first record.
//! - [`read_csv`] reads the first record as headers and sniffs every data
//!   cell with [`sniff_cell`], since CSV carries no cell types.
//!
//! `Null` cells are written as empty fields and read back as `Null`.

use crate::table::Table;
use crate::value::{CellValue, sniff_cell};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::{File, create_dir_all};
use std::path::Path;

/// Write `table` to a CSV file, header row first.
///
/// Parent directories are created as needed.
///
/// # Returns
/// The number of data rows written.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or a record fails to
/// write/flush.
pub fn write_csv(path: impl AsRef<Path>, table: &Table) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(f);
    wtr.write_record(table.headers())
        .with_context(|| format!("write CSV header to {}", path.display()))?;
    for (i, row) in table.rows().iter().enumerate() {
        wtr.write_record(row.iter().map(CellValue::to_string))
            .with_context(|| format!("write CSV row #{}", i + 1))?;
    }
    wtr.flush()?;
    tracing::debug!(path = %path.display(), rows = table.len(), "wrote csv");
    Ok(table.len())
}

/// Read a CSV file into a [`Table`].
///
/// # Errors
/// Returns an error if the file cannot be opened or parsed, if a row's width
/// differs from the header's, or if the file has no data rows.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut rdr = ReaderBuilder::new().has_headers(false).from_reader(f);
    let records = rdr
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .with_context(|| format!("parse CSV {}", path.display()))?;
    if records.len() < 2 {
        bail!("csv file is empty or has no data rows: {}", path.display());
    }
    let headers = records[0].iter().map(str::to_string).collect();
    let rows = records[1..]
        .iter()
        .map(|record| record.iter().map(sniff_cell).collect())
        .collect();
    let table = Table::from_rows(headers, rows).with_context(|| format!("read {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = table.len(), "read csv");
    Ok(table)
}
