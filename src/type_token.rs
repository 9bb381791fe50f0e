//! Runtime type identifiers.
//!
//! [`TypeTag`] is the key of the [`TypeRegistry`](crate::TypeRegistry) and the
//! "destination type" reported by [`ImportError`](crate::ImportError). It pairs
//! a `TypeId` with a readable type name so errors can say what they failed to
//! build without carrying a generic parameter.

use std::any::{TypeId, type_name};
use std::fmt;

/// A lightweight runtime type tag.
///
/// Equality and hashing only consider the `TypeId`; the name is best-effort
/// and exists for diagnostics.
///
/// ```
/// use sheetmap::TypeTag;
/// let tag = TypeTag::of::<u32>();
/// assert_eq!(tag.name, "u32");
/// assert_eq!(tag, TypeTag::of::<u32>());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Whether this tag identifies `T`.
    pub fn is<T: 'static + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The type name with module paths stripped
    /// (`core::option::Option<alloc::string::String>` -> `Option<String>`).
    pub fn short_name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.name;
        while let Some(pos) = rest.find(|c: char| "<>,()[]&; ".contains(c)) {
            let (segment, tail) = rest.split_at(pos);
            f.write_str(last_path_segment(segment))?;
            let mut chars = tail.chars();
            if let Some(delim) = chars.next() {
                write!(f, "{delim}")?;
            }
            rest = chars.as_str();
        }
        f.write_str(last_path_segment(rest))
    }
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
