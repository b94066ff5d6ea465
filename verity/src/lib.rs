#![cfg_attr(feature = "docs", feature(doc_cfg))]

/*!

# Overview

Verity validates values against schemas that are built by chaining constraints.

Every schema wraps a [Schema](Schema), an ordered list of predicates. Predicates run
in the order they were attached and validation stops at the first one that fails,
so a schema either accepts a value or reports exactly one [Error](Error).

All schemas implement the [Validator](Validator) trait, and composite schemas
([optional_of](optional_of), [ObjectSchema::field_with](ObjectSchema::field_with),
[ArraySchema::items](ArraySchema::items)) accept anything that implements it, not just
the schemas of this crate.

The available schemas are:

- [StringSchema](StringSchema): length and pattern constraints over [str], lengths count characters, not bytes.
- [NumberSchema](NumberSchema): range constraints over any [Numeric](Numeric) type.
- [BoolSchema](BoolSchema): fixed truth values.
- [NullSchema](NullSchema): JSON `null` only.
- [OptionalSchema](OptionalSchema): [Option](Option) values, optionally delegating to an inner schema.
- [ArraySchema](ArraySchema): length, uniqueness and per-item constraints over slices.
- [ObjectSchema](ObjectSchema): named field validators over a typed value, each field extracted by an accessor.
- [RecordSchema](RecordSchema): named field validators over a JSON map, each field looked up by key.

Errors of nested schemas are wrapped once per level with the index or field name,
[Error::path](Error::path) recovers the full location from that chain.

# Basic Usage

```
use verity::{array, number, object, string, Validator};

struct User {
    name: String,
    age: u8,
    tags: Vec<String>,
}

let schema = object::<User>()
    .field_with("name", |u: &User| u.name.as_str(), string().required().max(50))
    .field_with("age", |u: &User| &u.age, number::<u8>().min(18))
    .field_with("tags", |u: &User| u.tags.as_slice(), array::<String>().max(3).unique_items());

let user = User {
    name: "John Doe".into(),
    age: 16,
    tags: vec![],
};

assert_eq!(
    schema.validate(&user).unwrap_err().to_string(),
    r#"validation failed for field "age": value must be at least 18"#
);
```

# JSON Schema

With the `schemars` feature (enabled by default) a [Schemars](https://github.com/GREsau/schemars)
schema can be compiled into a `Schema<serde_json::Value>`, read more about it [here](crate::schemars).

*/

#[macro_use]
mod macros;

pub mod path;

mod array;
mod boolean;
mod error;
mod null;
mod number;
mod object;
mod optional;
mod schema;
mod string;

// Optional implementations for various crates.
mod impls;

// "impls" is only for code structure, it is removed
// for the public API.
pub use impls::*;

pub use array::ArraySchema;
pub use boolean::BoolSchema;
pub use error::Error;
pub use null::NullSchema;
pub use number::{NumberSchema, Numeric};
pub use object::{validate_field, DynValidator, FieldFn, ObjectSchema, RecordSchema};
pub use optional::OptionalSchema;
pub use schema::Schema;
pub use string::StringSchema;

use std::{rc::Rc, sync::Arc};

/// Validator is implemented by everything that can validate a value of type `T`.
///
/// All schemas of this crate implement it, composite schemas accept any implementor
/// as their inner validator.
pub trait Validator<T: ?Sized> {
    /// Validate the value, returning the first violation found.
    fn validate(&self, value: &T) -> Result<(), Error>;
}

impl<T: ?Sized, V: ?Sized + Validator<T>> Validator<T> for &V {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }
}

impl<T: ?Sized, V: ?Sized + Validator<T>> Validator<T> for Box<V> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }
}

impl<T: ?Sized, V: ?Sized + Validator<T>> Validator<T> for Arc<V> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }
}

impl<T: ?Sized, V: ?Sized + Validator<T>> Validator<T> for Rc<V> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        (**self).validate(value)
    }
}

/// A [Validator](Validator) backed by a function, see [from_fn](from_fn).
#[derive(Clone, Copy)]
pub struct FnValidator<F>(F);

impl<T, F> Validator<T> for FnValidator<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), Error>,
{
    fn validate(&self, value: &T) -> Result<(), Error> {
        (self.0)(value)
    }
}

impl<F> core::fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnValidator")
    }
}

/// Turn a function into a [Validator](Validator).
///
/// ```
/// use verity::{array, from_fn, Error, Validator};
///
/// let schema = array::<i32>().items(from_fn(|item: &i32| {
///     if *item < 0 {
///         return Err(Error::violation("item must be non-negative"));
///     }
///     Ok(())
/// }));
///
/// assert_eq!(
///     schema.validate(&[1, -2, 3][..]).unwrap_err().to_string(),
///     "invalid item at index 1: item must be non-negative"
/// );
/// ```
pub fn from_fn<T, F>(f: F) -> FnValidator<F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), Error>,
{
    FnValidator(f)
}

/// Create a new string schema.
pub fn string() -> StringSchema {
    StringSchema::new()
}

/// Create a new number schema for the numeric type `N`.
pub fn number<N: Numeric>() -> NumberSchema<N> {
    NumberSchema::new()
}

/// Create a new boolean schema.
pub fn boolean() -> BoolSchema {
    BoolSchema::new()
}

/// Create a new null schema.
pub fn null() -> NullSchema {
    NullSchema::new()
}

/// Create a new schema for optional values.
pub fn optional<T: 'static>() -> OptionalSchema<T> {
    OptionalSchema::new()
}

/// Create a schema for optional values that validates
/// present values with the given validator.
///
/// Absent values are accepted unless [required](OptionalSchema::required) is set.
pub fn optional_of<T, V>(inner: V) -> OptionalSchema<T>
where
    T: 'static,
    V: Validator<T> + Send + Sync + 'static,
{
    OptionalSchema::of(inner)
}

/// Create a new array schema.
pub fn array<T: 'static>() -> ArraySchema<T> {
    ArraySchema::new()
}

/// Create a new object schema for a typed value.
pub fn object<T: ?Sized + 'static>() -> ObjectSchema<T> {
    ObjectSchema::new()
}

/// Create a new object schema for JSON maps.
pub fn record() -> RecordSchema {
    RecordSchema::new()
}
