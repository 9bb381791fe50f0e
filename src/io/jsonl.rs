//! JSON Lines export of import error reports.
//!
//! Each [`ImportError`] is written as one [`ImportErrorReport`] object per
//! line, so a rejected batch can be inspected or fed to other tooling.

use crate::import::{ImportError, ImportErrorReport};
use anyhow::{Context, Result};
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write one JSON report per error.
///
/// Parent directories are created as needed.
///
/// # Returns
/// The number of reports written (`errors.len()`).
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or a report fails to
/// serialize/flush.
pub fn write_error_report(path: impl AsRef<Path>, errors: &[ImportError]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for (i, error) in errors.iter().enumerate() {
        serde_json::to_writer(&mut w, &error.report())
            .with_context(|| format!("serialize JSONL report #{}", i + 1))?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(errors.len())
}

/// Read reports written by [`write_error_report`].
///
/// Empty lines are skipped.
///
/// # Errors
/// Returns an error if the file cannot be read or a line fails to parse.
pub fn read_error_report(path: impl AsRef<Path>) -> Result<Vec<ImportErrorReport>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let report = serde_json::from_str(&line)
            .with_context(|| format!("parse JSONL line {} in {}", i + 1, path.display()))?;
        out.push(report);
    }
    Ok(out)
}
