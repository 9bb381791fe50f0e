//! XLSX sheet I/O.
//!
//! Writing goes through `rust_xlsxwriter`, reading through `calamine`. Both
//! work on a single named sheet (default `"Sheet1"`) with the headers on row 1
//! and data from row 2.
//!
//! Cell mapping on write: `Text` -> string, `Int`/`Float` -> number,
//! `Bool` -> boolean, `Timestamp` -> RFC 3339 string, `Null` -> blank.
//! Integers that `f64` cannot hold exactly are written as decimal strings.
//!
//! Blank cells are not stored, so a trailing row of `Null`s leaves nothing in
//! the sheet. The writer records the data span as the workbook name
//! [`ROW_SPAN_NAME`] and the reader pads the table back to it.
//!
//! Cell mapping on read: blank -> `Null`, number -> `Int` when integral and
//! exactly representable, otherwise `Float`, boolean -> `Bool`, string ->
//! `Text` (or sniffed with [`sniff_cell`] when [`XlsxOptions::sniff_text`] is
//! set), anything else (dates, errors) -> sniffed display text.

use crate::import::ImportResult;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::table::Table;
use crate::column::{cell_ref, index_to_letters};
use crate::value::{CellValue, format_timestamp, sniff_cell};
use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::create_dir_all;
use std::io::{Read, Seek};
use std::path::Path;

/// Largest magnitude below which every integer is an exact `f64`.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Workbook-level name holding the header and data span of the written sheet.
pub const ROW_SPAN_NAME: &str = "SheetmapRows";

/// Sheet selection and cell decoding options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XlsxOptions {
    /// Sheet to write to or read from.
    pub sheet_name: String,
    /// Run string cells through [`sniff_cell`] when reading.
    pub sniff_text: bool,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            sniff_text: false,
        }
    }
}

impl XlsxOptions {
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_sniff_text(mut self, sniff_text: bool) -> Self {
        self.sniff_text = sniff_text;
        self
    }
}

/// Write `table` to an `.xlsx` file.
///
/// Parent directories are created as needed.
///
/// # Returns
/// The number of data rows written.
///
/// # Errors
/// Returns an error if the sheet name is rejected, a cell cannot be written
/// or the workbook cannot be saved.
pub fn write_xlsx(path: impl AsRef<Path>, table: &Table, opts: &XlsxOptions) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let mut workbook = build_workbook(table, opts)?;
    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = table.len(), sheet = %opts.sheet_name, "wrote xlsx");
    Ok(table.len())
}

/// Write `table` to an in-memory `.xlsx` document.
pub fn write_xlsx_buffer(table: &Table, opts: &XlsxOptions) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(table, opts)?;
    workbook.save_to_buffer().context("serialize xlsx workbook")
}

fn build_workbook(table: &Table, opts: &XlsxOptions) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook
        .define_name(ROW_SPAN_NAME, &row_span_formula(table, &opts.sheet_name))
        .with_context(|| format!("define name {ROW_SPAN_NAME}"))?;
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&opts.sheet_name)
        .with_context(|| format!("set sheet name {:?}", opts.sheet_name))?;

    for (col, header) in table.headers().iter().enumerate() {
        worksheet
            .write_string(0, cast_col(col)?, header)
            .with_context(|| format!("write header {header:?}"))?;
    }
    for (r, row) in table.rows().iter().enumerate() {
        let sheet_row = cast_row(r + 1)?;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, sheet_row, cast_col(col)?, cell)
                .with_context(|| format!("write cell {}", cell_ref(col, r + 2)))?;
        }
    }
    Ok(workbook)
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Null => {}
        CellValue::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        CellValue::Int(i) if (*i as f64).abs() < EXACT_INT_LIMIT => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Int(i) => {
            worksheet.write_string(row, col, i.to_string())?;
        }
        CellValue::Float(x) => {
            worksheet.write_number(row, col, *x)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Timestamp(ts) => {
            worksheet.write_string(row, col, format_timestamp(ts))?;
        }
    }
    Ok(())
}

/// `='Sheet'!$A$1:$C$4` covering the header row and every data row.
fn row_span_formula(table: &Table, sheet_name: &str) -> String {
    let last_col = index_to_letters(table.width().saturating_sub(1));
    format!(
        "='{}'!$A$1:${last_col}${}",
        sheet_name.replace('\'', "''"),
        table.len() + 1
    )
}

/// Sheet row count recorded under [`ROW_SPAN_NAME`] for `sheet_name`.
fn recorded_height(names: &[(String, String)], sheet_name: &str) -> Option<usize> {
    let (_, formula) = names.iter().find(|(name, _)| name == ROW_SPAN_NAME)?;
    let (sheet, span) = formula.trim_start_matches('=').rsplit_once('!')?;
    let sheet = sheet
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .map(|s| s.replace("''", "'"))
        .unwrap_or_else(|| sheet.to_string());
    if sheet != sheet_name {
        return None;
    }
    let (_, last_row) = span.rsplit_once('$')?;
    last_row.parse().ok()
}

fn cast_row(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("row index overflow: {value}"))
}

fn cast_col(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| anyhow!("column index overflow: {value}"))
}

/// Read the configured sheet of an `.xlsx` file into a [`Table`].
///
/// # Errors
/// Returns an error if the file cannot be opened, the sheet is missing or
/// unreadable, or the sheet has fewer than two rows.
pub fn read_xlsx(path: impl AsRef<Path>, opts: &XlsxOptions) -> Result<Table> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| anyhow!("open {}: {e}", path.display()))?;
    let recorded = recorded_height(workbook.defined_names(), &opts.sheet_name);
    let range = workbook
        .worksheet_range(&opts.sheet_name)
        .map_err(|e| anyhow!("read sheet {:?} in {}: {e}", opts.sheet_name, path.display()))?;
    let table = range_to_table(&range, recorded, opts)?;
    tracing::debug!(path = %path.display(), rows = table.len(), sheet = %opts.sheet_name, "read xlsx");
    Ok(table)
}

/// Read the configured sheet from any seekable `.xlsx` source.
pub fn read_xlsx_from<RS: Read + Seek>(reader: RS, opts: &XlsxOptions) -> Result<Table> {
    let mut workbook = Xlsx::new(reader).map_err(|e| anyhow!("open xlsx: {e}"))?;
    let recorded = recorded_height(workbook.defined_names(), &opts.sheet_name);
    let range = workbook
        .worksheet_range(&opts.sheet_name)
        .map_err(|e| anyhow!("read sheet {:?}: {e}", opts.sheet_name))?;
    range_to_table(&range, recorded, opts)
}

fn range_to_table(range: &Range<Data>, recorded: Option<usize>, opts: &XlsxOptions) -> Result<Table> {
    let height = range.height().max(recorded.unwrap_or(0));
    if height < 2 {
        bail!("excel file is empty or has no data rows");
    }
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let mut data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(|cell| decode_cell(cell, opts.sniff_text)).collect())
        .collect();
    // trailing all-blank rows
    data.resize_with(height - 1, || vec![CellValue::Null; headers.len()]);
    Ok(Table::from_rows(headers, data)?)
}

fn decode_cell(cell: &Data, sniff_text: bool) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(text) if text.is_empty() => CellValue::Null,
        Data::String(text) if sniff_text => sniff_cell(text),
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(x) if x.fract() == 0.0 && x.abs() < EXACT_INT_LIMIT => CellValue::Int(*x as i64),
        Data::Float(x) => CellValue::Float(*x),
        Data::Bool(b) => CellValue::Bool(*b),
        other => sniff_cell(&other.to_string()),
    }
}

/// Flatten `records` and write them to an `.xlsx` file.
pub fn export_xlsx<R: Record>(
    path: impl AsRef<Path>,
    records: &[R],
    registry: &TypeRegistry,
    opts: &XlsxOptions,
) -> Result<usize> {
    let table = Table::from_records(records, registry)?;
    write_xlsx(path, &table, opts)
}

/// Read an `.xlsx` file and rebuild records from its rows.
///
/// I/O and sheet shape problems are returned as `Err`; per-cell conversion
/// failures are collected in the returned [`ImportResult`].
pub fn import_xlsx<R: Record>(
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    opts: &XlsxOptions,
) -> Result<ImportResult<R>> {
    let table = read_xlsx(path, opts)?;
    Ok(table.to_records(registry))
}
