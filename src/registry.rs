//! Custom type conversion registry.
//!
//! A [`TypeRegistry`] maps a type to a *converter* (value -> display text,
//! used on export) and a *parser* (text -> value, used on import). Types with
//! a converter are treated as opaque leaf columns by header derivation and
//! flattening; types with a parser are rebuilt from the cell's display text.
//!
//! The registry is an ordinary value: build one, register what you need and
//! pass it by reference into [`Table::from_records`](crate::Table::from_records)
//! and [`Table::to_records`](crate::Table::to_records). Mutation needs
//! `&mut TypeRegistry`, so sharing a registry across threads while registering
//! is ruled out by the borrow checker; wrap it in your own lock if you need that.
//!
//! # Example
//!
//! ```
//! use sheetmap::TypeRegistry;
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq)]
//! struct CustomId(u32);
//!
//! fn parse_id(s: &str) -> Result<CustomId, String> {
//!     let digits = s.strip_prefix("ID-").ok_or_else(|| format!("missing ID- prefix in {s:?}"))?;
//!     digits.parse().map(CustomId).map_err(|e| format!("{e}"))
//! }
//!
//! let mut registry = TypeRegistry::default();
//! registry.register::<CustomId, String, String>(|id| Ok(format!("ID-{:05}", id.0)), parse_id);
//! assert!(registry.contains::<CustomId>());
//! ```

use crate::error::BoxError;
use crate::type_token::TypeTag;
use crate::value::{format_timestamp, parse_timestamp};
use chrono::{DateTime, Utc};
use std::any::Any;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Type-erased converter: value -> display text.
pub type ConvertFn = dyn Fn(&dyn Any) -> Result<String, BoxError> + Send + Sync;

/// Type-erased parser: display text -> boxed value.
pub type ParseFn = dyn Fn(&str) -> Result<Box<dyn Any>, BoxError> + Send + Sync;

#[derive(Clone, Default)]
struct Entry {
    converter: Option<Arc<ConvertFn>>,
    parser: Option<Arc<ParseFn>>,
}

/// Registry of custom converters and parsers keyed by [`TypeTag`].
///
/// `TypeRegistry::default()` is seeded with an RFC 3339 handler for
/// `chrono::DateTime<Utc>`; [`TypeRegistry::empty`] has no entries.
#[derive(Clone)]
pub struct TypeRegistry {
    entries: HashMap<TypeTag, Entry>,
}

impl TypeRegistry {
    /// A registry with no entries, not even the built-in date/time handler.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a converter used when exporting values of type `T`.
    ///
    /// Replaces any converter previously registered for `T`; an existing
    /// parser for `T` is kept.
    pub fn register_converter<T, E>(
        &mut self,
        convert: impl Fn(&T) -> Result<String, E> + Send + Sync + 'static,
    ) -> &mut Self
    where
        T: 'static,
        E: Into<BoxError> + 'static,
    {
        let tag = TypeTag::of::<T>();
        let erased = move |value: &dyn Any| -> Result<String, BoxError> {
            let value = value
                .downcast_ref::<T>()
                .ok_or_else(|| format!("converter for {tag} received a value of another type"))?;
            convert(value).map_err(Into::into)
        };
        self.entries.entry(tag).or_default().converter = Some(Arc::new(erased));
        self
    }

    /// Register a parser used when importing values of type `T`.
    ///
    /// Replaces any parser previously registered for `T`; an existing
    /// converter for `T` is kept.
    pub fn register_parser<T, E>(
        &mut self,
        parse: impl Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    ) -> &mut Self
    where
        T: 'static,
        E: Into<BoxError> + 'static,
    {
        let erased = move |text: &str| -> Result<Box<dyn Any>, BoxError> {
            parse(text)
                .map(|value| Box::new(value) as Box<dyn Any>)
                .map_err(Into::into)
        };
        self.entries
            .entry(TypeTag::of::<T>())
            .or_default()
            .parser = Some(Arc::new(erased));
        self
    }

    /// Register a converter and a parser for `T` in one call.
    pub fn register<T, E1, E2>(
        &mut self,
        convert: impl Fn(&T) -> Result<String, E1> + Send + Sync + 'static,
        parse: impl Fn(&str) -> Result<T, E2> + Send + Sync + 'static,
    ) -> &mut Self
    where
        T: 'static,
        E1: Into<BoxError> + 'static,
        E2: Into<BoxError> + 'static,
    {
        self.register_converter(convert).register_parser(parse)
    }

    /// Remove both handlers for `T`. Returns `true` if anything was registered.
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.entries.remove(&TypeTag::of::<T>()).is_some()
    }

    /// Whether `T` has a converter or a parser.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeTag::of::<T>())
    }

    /// Converter for the type identified by `tag`.
    pub fn converter(&self, tag: TypeTag) -> Option<&ConvertFn> {
        self.entries.get(&tag)?.converter.as_deref()
    }

    /// Parser for the type identified by `tag`.
    pub fn parser(&self, tag: TypeTag) -> Option<&ParseFn> {
        self.entries.get(&tag)?.parser.as_deref()
    }

    /// Whether `tag` has a converter or a parser.
    pub fn is_registered(&self, tag: TypeTag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register::<DateTime<Utc>, Infallible, chrono::ParseError>(
            |ts| Ok(format_timestamp(ts)),
            parse_timestamp,
        );
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.entries.keys().map(|tag| tag.to_string()).collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
