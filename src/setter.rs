//! Structure reconstruction: write one raw cell into a record by header path.

use crate::error::FieldError;
use crate::field::{AnyField, Field};
use crate::headers::PATH_SEPARATOR;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::value::CellValue;

/// Write `raw` into the field of `record` named by the header `column`.
///
/// `Null` cells are skipped and leave the record untouched. Intermediate
/// `Option`s are allocated and collections gain their first element as the
/// path is walked; both are rolled back if the leaf assignment fails.
///
/// ```
/// use sheetmap::{impl_record, set_field, CellValue, TypeRegistry};
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i32,
///     label: Option<String>,
/// }
/// impl_record!(Point { x => "X", label => "Label" });
///
/// let registry = TypeRegistry::default();
/// let mut p = Point::default();
/// set_field(&mut p, "X", &CellValue::Int(7), &registry).unwrap();
/// set_field(&mut p, "Label", &CellValue::Null, &registry).unwrap();
/// assert_eq!(p.x, 7);
/// assert!(p.label.is_none());
///
/// assert!(set_field(&mut p, "X", &CellValue::from("seven"), &registry).is_err());
/// assert_eq!(p.x, 7);
/// ```
pub fn set_field<R: Record>(
    record: &mut R,
    column: &str,
    raw: &CellValue,
    registry: &TypeRegistry,
) -> Result<(), FieldError> {
    if raw.is_null() {
        return Ok(());
    }
    let path: Vec<&str> = column.split(PATH_SEPARATOR).collect();
    assign_field(record, &path, raw, registry)
}

/// Assign through a registry parser when the path ends at a registered type,
/// otherwise defer to the type's own [`Field::assign`].
pub(crate) fn assign_field(
    field: &mut dyn Field,
    path: &[&str],
    raw: &CellValue,
    registry: &TypeRegistry,
) -> Result<(), FieldError> {
    let target = field.type_tag();
    if path.is_empty()
        && let Some(parse) = registry.parser(target)
    {
        let value = parse(&raw.to_string()).map_err(|source| FieldError::Custom { target, source })?;
        tracing::trace!(%target, "parsed custom value");
        return field
            .replace_from(value)
            .map_err(|_| FieldError::ParserMismatch(target));
    }
    field.assign(path, raw, registry)
}
