//! Export nested records to an XLSX file and read them back.
//!
//! Demonstrates:
//! - Declaring records with `impl_record!`
//! - Registering a custom identifier type
//! - Partial imports with per-cell error reporting
//!
//! Run with: cargo run --example roundtrip

use anyhow::Result;
use chrono::{TimeZone, Utc};
use sheetmap::*;
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct EmployeeId(u32);
impl_opaque!(EmployeeId);

#[derive(Debug, Clone, Default, PartialEq)]
struct Address {
    street: String,
    city: String,
}
impl_record!(Address { street => "Street", city => "City" });

#[derive(Debug, Clone, Default, PartialEq)]
struct Employee {
    id: EmployeeId,
    name: String,
    hired: chrono::DateTime<Utc>,
    salary: Option<f64>,
    skills: Vec<String>,
    address: Option<Address>,
}
impl_record!(Employee {
    id => "ID",
    name => "Name",
    hired => "Hired",
    salary => "Salary",
    skills => "Skills",
    address => "Address",
});

fn main() -> Result<()> {
    println!("📄 Spreadsheet Round-Trip Example\n");

    let mut registry = TypeRegistry::default();
    registry.register::<EmployeeId, Infallible, String>(
        |id| Ok(format!("EMP-{:04}", id.0)),
        |s| {
            s.strip_prefix("EMP-")
                .and_then(|n| n.parse().ok())
                .map(EmployeeId)
                .ok_or_else(|| format!("not an employee id: {s}"))
        },
    );

    let employees = vec![
        Employee {
            id: EmployeeId(1),
            name: "Alice".into(),
            hired: Utc.with_ymd_and_hms(2019, 3, 1, 9, 0, 0).unwrap(),
            salary: Some(85_000.0),
            skills: vec!["rust".into(), "sql".into()],
            address: Some(Address {
                street: "1 Main St".into(),
                city: "Springfield".into(),
            }),
        },
        Employee {
            id: EmployeeId(2),
            name: "Bob".into(),
            hired: Utc.with_ymd_and_hms(2021, 7, 15, 9, 0, 0).unwrap(),
            salary: None,
            skills: Vec::new(),
            address: None,
        },
    ];

    let dir = std::env::temp_dir().join("sheetmap_demo");
    let path = dir.join("employees.xlsx");
    let opts = XlsxOptions::default();

    let table = Table::from_records(&employees, &registry)?;
    println!("Headers: {:?}", table.headers());
    write_xlsx(&path, &table, &opts)?;
    println!("Wrote {} rows to {}\n", table.len(), path.display());

    let result = import_xlsx::<Employee>(&path, &registry, &opts)?;
    for employee in &result.records {
        println!("  {employee:?}");
    }

    // Corrupt one cell and import again.
    let (headers, mut rows) = table.into_parts();
    rows[1][0] = CellValue::from("E-2");
    let broken = Table::from_rows(headers, rows)?;
    let result = broken.to_records::<Employee>(&registry);
    println!(
        "\nImported {} record(s), {} error(s):",
        result.records.len(),
        result.errors.len()
    );
    println!("{}", format_import_errors(&result.errors));

    write_error_report(dir.join("errors.jsonl"), &result.errors)?;
    Ok(())
}
