//! Field model: the static shape of a field type and how one value of it is
//! flattened into cells or assigned from a cell.
//!
//! Every type that can appear as a record field implements [`Field`]. The
//! crate ships impls for `String`, the integer and float primitives, `bool`,
//! `chrono::DateTime<Utc>`, `Option<T>` (one level of indirection) and
//! `Vec<T>` (a collection flattened through its first element). Record types
//! get their impl from [`impl_record!`](crate::impl_record) and opaque domain
//! types from [`impl_opaque!`](crate::impl_opaque).

use crate::error::{ExportError, FieldError};
use crate::flatten::Flattener;
use crate::registry::TypeRegistry;
use crate::setter::assign_field;
use crate::type_token::TypeTag;
use crate::value::{CellValue, parse_timestamp};
use chrono::{DateTime, Utc};
use std::any::Any;

/// The scalar families understood by the setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Int,
    Uint,
    Float,
    Bool,
}

/// What a field type looks like to header derivation.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// One scalar column.
    Scalar(ScalarKind),
    /// One date/time column, never descended into.
    Timestamp,
    /// A domain type only the [`TypeRegistry`] knows how to render.
    Opaque,
    /// One level of indirection (`Option<T>`).
    Optional(Box<Shape>),
    /// A collection represented by one element (`Vec<T>`).
    List(Box<Shape>),
    /// A record with named fields in declaration order.
    Record(Vec<FieldShape>),
}

/// A named field inside a record shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    pub name: &'static str,
    pub shape: Shape,
}

/// Type tag plus structural kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub tag: TypeTag,
    pub kind: Kind,
}

impl Shape {
    /// Shape of `T` with the given kind.
    pub fn new<T: 'static>(kind: Kind) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            kind,
        }
    }

    /// Strip `Optional` and `List` wrappers.
    pub fn peel(&self) -> &Shape {
        match &self.kind {
            Kind::Optional(inner) | Kind::List(inner) => inner.peel(),
            _ => self,
        }
    }

    /// Follow a header path to the shape of the field it names.
    ///
    /// Wrappers are looked through only while segments remain, so the
    /// returned shape is the declared type of the last named field.
    pub fn resolve(&self, path: &[&str]) -> Option<&Shape> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        match &self.peel().kind {
            Kind::Record(fields) => fields
                .iter()
                .find(|field| field.name == *head)?
                .shape
                .resolve(rest),
            _ => None,
        }
    }
}

/// Object-safe view of a [`Field`], implemented for every `Field` type.
pub trait AnyField {
    /// The shape of this value's type.
    fn describe(&self) -> Shape;
    /// Registry key of this value's type.
    fn type_tag(&self) -> TypeTag;
    fn as_any(&self) -> &dyn Any;
    /// Overwrite `self` with a boxed value of the same type.
    ///
    /// Hands the box back unchanged when the types differ.
    fn replace_from(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}

impl<T: Field> AnyField for T {
    fn describe(&self) -> Shape {
        T::shape()
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn replace_from(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = *value.downcast::<T>()?;
        Ok(())
    }
}

/// A type that can be stored in a record field.
///
/// `flatten` and `assign` are called by the engine after it has consulted the
/// [`TypeRegistry`]; implementors only describe the built-in behavior.
pub trait Field: AnyField + 'static {
    /// Static shape of the type.
    fn shape() -> Shape
    where
        Self: Sized;

    /// Push exactly as many cells as header derivation yields for this type.
    fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError>;

    /// Write `raw` into the field reached by `path`, relative to `self`.
    fn assign(
        &mut self,
        path: &[&str],
        raw: &CellValue,
        registry: &TypeRegistry,
    ) -> Result<(), FieldError>;
}

fn leaf<T: 'static>(path: &[&str]) -> Result<(), FieldError> {
    match path.first() {
        None => Ok(()),
        Some(segment) => Err(FieldError::NotARecord {
            segment: segment.to_string(),
            target: TypeTag::of::<T>(),
        }),
    }
}

impl Field for String {
    fn shape() -> Shape {
        Shape::new::<Self>(Kind::Scalar(ScalarKind::Text))
    }

    fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
        out.push(CellValue::Text(self.clone()));
        Ok(())
    }

    fn assign(
        &mut self,
        path: &[&str],
        raw: &CellValue,
        _registry: &TypeRegistry,
    ) -> Result<(), FieldError> {
        leaf::<Self>(path)?;
        match raw {
            CellValue::Text(text) => {
                self.clone_from(text);
                Ok(())
            }
            other => Err(FieldError::NotText(other.kind_name())),
        }
    }
}

macro_rules! parsed_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {$(
        impl Field for $ty {
            fn shape() -> Shape {
                Shape::new::<Self>(Kind::Scalar($kind))
            }

            fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
                out.push(CellValue::from(*self));
                Ok(())
            }

            fn assign(
                &mut self,
                path: &[&str],
                raw: &CellValue,
                _registry: &TypeRegistry,
            ) -> Result<(), FieldError> {
                leaf::<Self>(path)?;
                *self = raw.to_string().parse::<Self>()?;
                Ok(())
            }
        }
    )+};
}

parsed_scalar!(ScalarKind::Int => i8, i16, i32, i64);
parsed_scalar!(ScalarKind::Uint => u8, u16, u32);
parsed_scalar!(ScalarKind::Float => f32, f64);
parsed_scalar!(ScalarKind::Bool => bool);

macro_rules! wide_int {
    ($kind:expr => $($ty:ty),+) => {$(
        impl Field for $ty {
            fn shape() -> Shape {
                Shape::new::<Self>(Kind::Scalar($kind))
            }

            fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
                let value = i64::try_from(*self).map_err(|_| ExportError::OutOfRange {
                    column: out.column(),
                    target: TypeTag::of::<Self>(),
                })?;
                out.push(CellValue::Int(value));
                Ok(())
            }

            fn assign(
                &mut self,
                path: &[&str],
                raw: &CellValue,
                _registry: &TypeRegistry,
            ) -> Result<(), FieldError> {
                leaf::<Self>(path)?;
                *self = raw.to_string().parse::<Self>()?;
                Ok(())
            }
        }
    )+};
}

wide_int!(ScalarKind::Int => isize);
wide_int!(ScalarKind::Uint => u64, usize);

impl Field for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::new::<Self>(Kind::Timestamp)
    }

    fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
        out.push(CellValue::Timestamp(*self));
        Ok(())
    }

    fn assign(
        &mut self,
        path: &[&str],
        raw: &CellValue,
        _registry: &TypeRegistry,
    ) -> Result<(), FieldError> {
        leaf::<Self>(path)?;
        *self = match raw {
            CellValue::Timestamp(ts) => *ts,
            other => parse_timestamp(&other.to_string())?,
        };
        Ok(())
    }
}

impl<T: Field + Default> Field for Option<T> {
    fn shape() -> Shape {
        Shape::new::<Self>(Kind::Optional(Box::new(T::shape())))
    }

    fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
        match self {
            Some(value) => out.field(value),
            None => {
                out.push_absent(&T::shape());
                Ok(())
            }
        }
    }

    fn assign(
        &mut self,
        path: &[&str],
        raw: &CellValue,
        registry: &TypeRegistry,
    ) -> Result<(), FieldError> {
        let fresh = self.is_none();
        let result = assign_field(self.get_or_insert_with(T::default), path, raw, registry);
        if result.is_err() && fresh {
            *self = None;
        }
        result
    }
}

impl<T: Field + Default> Field for Vec<T> {
    fn shape() -> Shape {
        Shape::new::<Self>(Kind::List(Box::new(T::shape())))
    }

    fn flatten(&self, out: &mut Flattener<'_>) -> Result<(), ExportError> {
        match self.first() {
            Some(first) => out.field(first),
            None => {
                out.push_absent(&T::shape());
                Ok(())
            }
        }
    }

    fn assign(
        &mut self,
        path: &[&str],
        raw: &CellValue,
        registry: &TypeRegistry,
    ) -> Result<(), FieldError> {
        let fresh = self.is_empty();
        if fresh {
            self.push(T::default());
        }
        let result = assign_field(&mut self[0], path, raw, registry);
        if result.is_err() && fresh {
            self.clear();
        }
        result
    }
}

#[doc(hidden)]
pub fn opaque_flatten<T: 'static>(out: &Flattener<'_>) -> Result<(), ExportError> {
    Err(ExportError::Unregistered {
        column: out.column(),
        target: TypeTag::of::<T>(),
    })
}

#[doc(hidden)]
pub fn opaque_assign<T: 'static>() -> Result<(), FieldError> {
    Err(FieldError::Unsupported(TypeTag::of::<T>()))
}
