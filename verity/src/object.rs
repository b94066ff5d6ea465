use crate::{Error, Schema, Validator};
use serde_json::{Map, Value};

/// A boxed field validator of an [ObjectSchema](ObjectSchema).
pub type FieldFn<T> = Box<dyn Fn(&T) -> Result<(), Error> + Send + Sync>;

/// A boxed validator, used for heterogeneous field lists.
pub type DynValidator<T> = Box<dyn Validator<T> + Send + Sync>;

/// Create a field validator from an accessor and a schema for the field.
///
/// The result can be passed to [ObjectSchema::field](ObjectSchema::field).
pub fn validate_field<T, F, G, V>(
    getter: G,
    schema: V,
) -> impl Fn(&T) -> Result<(), Error> + Send + Sync + 'static
where
    T: ?Sized + 'static,
    F: ?Sized + 'static,
    G: Fn(&T) -> &F + Send + Sync + 'static,
    V: Validator<F> + Send + Sync + 'static,
{
    move |value: &T| schema.validate(getter(value))
}

/// Inserts or replaces a named entry, keeping the position of replaced entries.
fn upsert<E>(entries: &mut Vec<(String, E)>, name: String, entry: E) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some(existing) => existing.1 = entry,
        None => entries.push((name, entry)),
    }
}

/// Schema for typed values with named fields.
///
/// Each field validator receives the whole value and extracts its own field.
/// Fields are validated in the order they were first added, the first error
/// is wrapped with the field name and returned. Predicates added with
/// [custom](ObjectSchema::custom) run after all fields passed.
///
/// ```
/// use verity::{number, object, string, Validator};
///
/// struct User {
///     name: String,
///     age: i32,
/// }
///
/// let schema = object::<User>()
///     .field("name", |u: &User| string().min(2).max(50).validate(u.name.as_str()))
///     .field_with("age", |u: &User| &u.age, number::<i32>().min(18).max(120));
///
/// let user = User { name: "J".into(), age: 30 };
///
/// assert_eq!(
///     schema.validate(&user).unwrap_err().to_string(),
///     r#"validation failed for field "name": length must be at least 2"#
/// );
/// ```
pub struct ObjectSchema<T: ?Sized> {
    schema: Schema<T>,
    fields: Vec<(String, FieldFn<T>)>,
}

impl<T: ?Sized + 'static> ObjectSchema<T> {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
            fields: Vec::new(),
        }
    }

    /// Add a field validator, replacing any previous one with the same name.
    pub fn field<F>(mut self, name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), Error> + Send + Sync + 'static,
    {
        let validator: FieldFn<T> = Box::new(validator);
        upsert(&mut self.fields, name.into(), validator);
        self
    }

    /// Add a field that is extracted by `getter` and validated by `schema`.
    pub fn field_with<F, G, V>(self, name: impl Into<String>, getter: G, schema: V) -> Self
    where
        F: ?Sized + 'static,
        G: Fn(&T) -> &F + Send + Sync + 'static,
        V: Validator<F> + Send + Sync + 'static,
    {
        self.field(name, validate_field(getter, schema))
    }

    /// Add many field validators at once.
    pub fn fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldFn<T>)>,
        K: Into<String>,
    {
        for (name, validator) in fields {
            upsert(&mut self.fields, name.into(), validator);
        }
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl<T: ?Sized + 'static> Default for ObjectSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Validator<T> for ObjectSchema<T> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        for (name, validator) in &self.fields {
            validator(value).map_err(|err| Error::field(name.as_str(), err))?;
        }
        self.schema.validate(value)
    }
}

impl<T: ?Sized> core::fmt::Debug for ObjectSchema<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("fields", &self.fields.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("schema", &self.schema)
            .finish()
    }
}

static NULL: Value = Value::Null;

/// Schema for JSON objects with named fields.
///
/// Each field validator receives the value stored under its name,
/// or `null` if there is none. Whether a missing field is an error
/// is up to the field validator.
///
/// Fields are validated in the order they were first added.
/// A `null` value is validated as an empty object, any other
/// non-object value is rejected.
///
/// ```
/// use serde_json::json;
/// use verity::{record, Schema, Validator};
///
/// let schema = record().field(
///     "name",
///     Schema::<serde_json::Value>::new().custom(|v| match v {
///         serde_json::Value::String(_) => Ok(()),
///         _ => Err(verity::Error::Required),
///     }),
/// );
///
/// assert!(schema.validate(&json!({"name": "John"})).is_ok());
/// assert_eq!(
///     schema.validate(&json!({})).unwrap_err().to_string(),
///     r#"validation failed for field "name": value is required"#
/// );
/// ```
#[derive(Default)]
pub struct RecordSchema {
    schema: Schema<Map<String, Value>>,
    fields: Vec<(String, DynValidator<Value>)>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field validator, replacing any previous one with the same name.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator<Value> + Send + Sync + 'static,
    {
        let validator: DynValidator<Value> = Box::new(validator);
        upsert(&mut self.fields, name.into(), validator);
        self
    }

    /// Add many field validators at once.
    pub fn fields<I, K>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, DynValidator<Value>)>,
        K: Into<String>,
    {
        for (name, validator) in fields {
            upsert(&mut self.fields, name.into(), validator);
        }
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl Validator<Map<String, Value>> for RecordSchema {
    fn validate(&self, value: &Map<String, Value>) -> Result<(), Error> {
        for (name, validator) in &self.fields {
            validator
                .validate(value.get(name).unwrap_or(&NULL))
                .map_err(|err| Error::field(name.as_str(), err))?;
        }
        self.schema.validate(value)
    }
}

impl Validator<Value> for RecordSchema {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        match value {
            Value::Object(map) => self.validate(map),
            Value::Null => self.validate(&Map::new()),
            other => violation!(
                "expected object value, got {}",
                crate::null::type_name(other)
            ),
        }
    }
}

impl core::fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecordSchema")
            .field("fields", &self.fields.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("schema", &self.schema)
            .finish()
    }
}
