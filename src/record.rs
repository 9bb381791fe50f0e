//! Record types and their field descriptor tables.
//!
//! A record is a struct whose exported fields are listed, in column order, in
//! a static table of [`FieldDescriptor`]s. The table maps a column name to a
//! pair of plain accessor functions, so header derivation, flattening and
//! field setting all look fields up by name without runtime reflection.
//!
//! Declare the table with [`impl_record!`](crate::impl_record):
//!
//! ```
//! use sheetmap::{impl_record, headers, TypeRegistry};
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
//!     address: Address,
//!     notes: String, // not listed: never exported or imported
//! }
//! impl_record!(Person { name => "Name", address => "Address" });
//!
//! let cols = headers::<Person>(&TypeRegistry::default());
//! assert_eq!(cols, vec!["Name", "Address Street", "Address City"]);
//! ```

use crate::error::{ExportError, FieldError};
use crate::field::{AnyField, Field, FieldShape, Kind, Shape};
use crate::flatten::Flattener;
use crate::registry::TypeRegistry;
use crate::setter::assign_field;
use crate::type_token::TypeTag;
use crate::value::CellValue;

/// One exported field of record `R`.
pub struct FieldDescriptor<R> {
    /// Column name (one header path segment).
    pub name: &'static str,
    /// Shared accessor.
    pub get: fn(&R) -> &dyn Field,
    /// Mutable accessor.
    pub get_mut: fn(&mut R) -> &mut dyn Field,
}

impl<R> FieldDescriptor<R> {
    pub const fn new(
        name: &'static str,
        get: fn(&R) -> &dyn Field,
        get_mut: fn(&mut R) -> &mut dyn Field,
    ) -> Self {
        Self { name, get, get_mut }
    }
}

impl<R> std::fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A struct with a field descriptor table.
///
/// `Default` supplies the fresh zero value the importer fills in.
pub trait Record: Field + Default + Sized {
    /// Exported fields in declaration order.
    fn fields() -> &'static [FieldDescriptor<Self>];

    /// Look up an exported field by column name.
    fn field(name: &str) -> Option<&'static FieldDescriptor<Self>> {
        Self::fields().iter().find(|descriptor| descriptor.name == name)
    }
}

/// Shape of a record, built from its descriptor table.
pub fn record_shape<R: Record>() -> Shape {
    let proto = R::default();
    let fields = R::fields()
        .iter()
        .map(|descriptor| FieldShape {
            name: descriptor.name,
            shape: (descriptor.get)(&proto).describe(),
        })
        .collect();
    Shape {
        tag: TypeTag::of::<R>(),
        kind: Kind::Record(fields),
    }
}

/// Flatten every exported field of `record` under its column name.
pub fn flatten_record<R: Record>(record: &R, out: &mut Flattener<'_>) -> Result<(), ExportError> {
    for descriptor in R::fields() {
        out.named(descriptor.name, (descriptor.get)(record))?;
    }
    Ok(())
}

/// Route `path` to the exported field named by its first segment.
pub fn assign_record<R: Record>(
    record: &mut R,
    path: &[&str],
    raw: &CellValue,
    registry: &TypeRegistry,
) -> Result<(), FieldError> {
    let Some((head, rest)) = path.split_first() else {
        return Err(FieldError::UnsupportedRecord(TypeTag::of::<R>()));
    };
    let descriptor = R::field(head).ok_or_else(|| FieldError::NoSuchField((*head).to_string()))?;
    assign_field((descriptor.get_mut)(record), rest, raw, registry)
}

/// Implement [`Record`] and [`Field`] for a struct from a list of
/// `field => "Column"` pairs.
///
/// Listed fields must themselves implement [`Field`]. Fields left out of the
/// list are skipped by export and import. The struct must implement `Default`.
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident => $column:expr),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn fields() -> &'static [$crate::FieldDescriptor<Self>] {
                const FIELDS: &[$crate::FieldDescriptor<$ty>] = &[$(
                    $crate::FieldDescriptor::new(
                        $column,
                        {
                            fn get(record: &$ty) -> &dyn $crate::Field {
                                &record.$field
                            }
                            get
                        },
                        {
                            fn get_mut(record: &mut $ty) -> &mut dyn $crate::Field {
                                &mut record.$field
                            }
                            get_mut
                        },
                    )
                ),*];
                FIELDS
            }
        }

        impl $crate::Field for $ty {
            fn shape() -> $crate::Shape {
                $crate::record::record_shape::<Self>()
            }

            fn flatten(
                &self,
                out: &mut $crate::Flattener<'_>,
            ) -> ::std::result::Result<(), $crate::ExportError> {
                $crate::record::flatten_record(self, out)
            }

            fn assign(
                &mut self,
                path: &[&str],
                raw: &$crate::CellValue,
                registry: &$crate::TypeRegistry,
            ) -> ::std::result::Result<(), $crate::FieldError> {
                $crate::record::assign_record(self, path, raw, registry)
            }
        }
    };
}

/// Implement [`Field`] for a domain type that is only exported and imported
/// through a [`TypeRegistry`](crate::TypeRegistry) entry.
///
/// Such a type derives a single header. Without a converter it fails to
/// export; without a parser it fails to import.
#[macro_export]
macro_rules! impl_opaque {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::Field for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::new::<Self>($crate::Kind::Opaque)
            }

            fn flatten(
                &self,
                out: &mut $crate::Flattener<'_>,
            ) -> ::std::result::Result<(), $crate::ExportError> {
                $crate::field::opaque_flatten::<Self>(out)
            }

            fn assign(
                &mut self,
                _path: &[&str],
                _raw: &$crate::CellValue,
                _registry: &$crate::TypeRegistry,
            ) -> ::std::result::Result<(), $crate::FieldError> {
                $crate::field::opaque_assign::<Self>()
            }
        }
    )+};
}
