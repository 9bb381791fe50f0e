//! # sheetmap
//!
//! A **bidirectional mapper** between structured Rust records and spreadsheet
//! rows. Export flattens a homogeneous slice of records into a header row plus
//! one row of scalar cells per record; import rebuilds records from such a
//! table, collecting per-cell conversion failures instead of aborting.
//!
//! ## Key Features
//!
//! - **Field descriptor tables** - declare exported fields once with [`impl_record!`]
//! - **Nested records** - nested fields become `"Parent Child"` columns
//! - **Optional and collection fields** - `Option<T>` and `Vec<T>` flatten through their payload
//! - **Custom types** - register converters and parsers per type in a [`TypeRegistry`]
//! - **Partial imports** - good rows are kept, bad cells are reported as [`ImportError`]s
//! - **I/O integrations** - XLSX, CSV and JSON Lines error reports (all optional via feature flags)
//!
//! ## Quick Start
//!
//! ```
//! use sheetmap::*;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Address {
//!     street: String,
//!     city: String,
//! }
//! impl_record!(Address { street => "Street", city => "City" });
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//!     address: Option<Address>,
//! }
//! impl_record!(Person { name => "Name", age => "Age", address => "Address" });
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = TypeRegistry::default();
//! let people = vec![Person {
//!     name: "Alice".into(),
//!     age: 30,
//!     address: Some(Address { street: "1 Main St".into(), city: "Springfield".into() }),
//! }];
//!
//! let table = Table::from_records(&people, &registry)?;
//! assert_eq!(table.headers(), ["Name", "Age", "Address Street", "Address City"]);
//!
//! let result = table.to_records::<Person>(&registry);
//! assert!(result.is_clean());
//! assert_eq!(result.records, people);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Records and fields
//!
//! A [`Record`] is a struct with a static table of [`FieldDescriptor`]s, one
//! per exported field, in column order. Every field type implements [`Field`],
//! which describes its [`Shape`] and how a value of it is flattened into
//! cells and assigned from a cell.
//!
//! ### Cells and tables
//!
//! A [`CellValue`] is one scalar cell: text, integer, float, boolean,
//! timestamp or `Null`. `Null` marks absent data (`None`, empty collections)
//! and is skipped on import. A [`Table`] holds headers plus rows whose width
//! always equals the header count.
//!
//! ### Registry
//!
//! A [`TypeRegistry`] is passed by reference into every export and import
//! call. `TypeRegistry::default()` formats and parses `DateTime<Utc>` as
//! RFC 3339; register your own types with
//! [`register`](TypeRegistry::register).
//!
//! ## Feature Flags
//!
//! - `io-xlsx` - XLSX read/write ([`io::xlsx`])
//! - `io-csv` - CSV read/write ([`io::csv`])
//! - `io-jsonl` - JSON Lines import error reports ([`io::jsonl`])

pub mod column;
pub mod error;
pub mod field;
pub mod flatten;
pub mod headers;
pub mod import;
pub mod io;
pub mod record;
pub mod registry;
pub mod setter;
pub mod table;
pub mod type_token;
pub mod value;

// General re-exports
pub use error::{BoxError, ExportError, FieldError, TableError};
pub use field::{AnyField, Field, FieldShape, Kind, ScalarKind, Shape};
pub use flatten::{Flattener, values};
pub use headers::{PATH_SEPARATOR, column_count, derive_headers, headers};
pub use import::{ImportError, ImportErrorReport, ImportResult, format_import_errors, import_rows};
pub use record::{FieldDescriptor, Record};
pub use registry::TypeRegistry;
pub use setter::set_field;
pub use table::Table;
pub use type_token::TypeTag;
pub use value::{CellValue, sniff_cell};

// Gated re-exports
#[cfg(feature = "io-xlsx")]
pub use io::xlsx::{XlsxOptions, export_xlsx, import_xlsx, read_xlsx, write_xlsx};

#[cfg(feature = "io-csv")]
pub use io::csv::{read_csv, write_csv};

#[cfg(feature = "io-jsonl")]
pub use io::jsonl::{read_error_report, write_error_report};
