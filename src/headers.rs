//! Header derivation from a record type's shape.

use crate::field::{Kind, Shape};
use crate::record::Record;
use crate::registry::TypeRegistry;

/// Separator between path segments in a derived header.
pub const PATH_SEPARATOR: &str = " ";

/// Column headers of record type `R`, in flattening order.
///
/// Nested records are prefixed with the parent column name and
/// [`PATH_SEPARATOR`]. `Option` and `Vec` fields are transparent and
/// contribute the columns of their payload. Types with a registry converter
/// and date/time fields are single columns.
pub fn headers<R: Record>(registry: &TypeRegistry) -> Vec<String> {
    derive_headers(&R::shape(), registry)
}

/// Headers contributed by an arbitrary shape.
pub fn derive_headers(shape: &Shape, registry: &TypeRegistry) -> Vec<String> {
    let mut out = Vec::new();
    walk(shape, "", registry, &mut |path: &str| out.push(path.to_string()));
    out
}

/// Number of columns `shape` contributes.
pub fn column_count(shape: &Shape, registry: &TypeRegistry) -> usize {
    let mut count = 0;
    walk(shape, "", registry, &mut |_: &str| count += 1);
    count
}

fn walk(shape: &Shape, prefix: &str, registry: &TypeRegistry, emit: &mut dyn FnMut(&str)) {
    if registry.converter(shape.tag).is_some() {
        emit(prefix);
        return;
    }
    match &shape.kind {
        Kind::Optional(inner) | Kind::List(inner) => walk(inner, prefix, registry, emit),
        Kind::Record(fields) => {
            for field in fields {
                if prefix.is_empty() {
                    walk(&field.shape, field.name, registry, emit);
                } else {
                    let path = format!("{prefix}{PATH_SEPARATOR}{}", field.name);
                    walk(&field.shape, &path, registry, emit);
                }
            }
        }
        Kind::Scalar(_) | Kind::Timestamp | Kind::Opaque => emit(prefix),
    }
}
