//! Value flattening: one record instance -> one row of cells.
//!
//! The walk mirrors [`derive_headers`](crate::headers::derive_headers): a type
//! with a registry converter becomes one `Text` cell, `Option`/`Vec` descend
//! into their payload (or pad with `Null`s when there is none), records emit
//! their exported fields in order and scalars emit one cell each.

use crate::error::ExportError;
use crate::field::{AnyField, Field, Shape};
use crate::headers::{PATH_SEPARATOR, column_count};
use crate::registry::TypeRegistry;
use crate::value::CellValue;
use std::iter;

/// Accumulates the cells of one row while a value is being flattened.
///
/// The current header path is tracked so that errors name the column that
/// failed.
pub struct Flattener<'a> {
    registry: &'a TypeRegistry,
    cells: Vec<CellValue>,
    path: Vec<&'static str>,
}

impl<'a> Flattener<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            cells: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Flatten `value` at the current path, applying its registry converter
    /// if one is registered.
    pub fn field(&mut self, value: &dyn Field) -> Result<(), ExportError> {
        let registry = self.registry;
        let Some(convert) = registry.converter(value.type_tag()) else {
            return value.flatten(self);
        };
        let text = convert(value.as_any()).map_err(|source| ExportError::Convert {
            column: self.column(),
            target: value.type_tag(),
            source,
        })?;
        tracing::trace!(column = %self.column(), target = %value.type_tag(), "converted custom value");
        self.cells.push(CellValue::Text(text));
        Ok(())
    }

    /// Flatten `value` under the child segment `name`.
    pub fn named(&mut self, name: &'static str, value: &dyn Field) -> Result<(), ExportError> {
        self.path.push(name);
        let result = self.field(value);
        self.path.pop();
        result
    }

    /// Append one cell.
    pub fn push(&mut self, cell: CellValue) {
        self.cells.push(cell);
    }

    /// Append one `Null` for every column `shape` contributes.
    pub fn push_absent(&mut self, shape: &Shape) {
        let count = column_count(shape, self.registry);
        self.cells.extend(iter::repeat_n(CellValue::Null, count));
    }

    /// Header of the column being written.
    pub fn column(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    pub fn finish(self) -> Vec<CellValue> {
        self.cells
    }
}

/// Flatten `value` into a row aligned with the headers of its type.
pub fn values<T: Field>(value: &T, registry: &TypeRegistry) -> Result<Vec<CellValue>, ExportError> {
    let mut out = Flattener::new(registry);
    out.field(value)?;
    Ok(out.finish())
}
