use crate::{Error, Schema, Validator};
use serde_json::Value;

/// Schema that only accepts JSON `null`.
///
/// It is meant for dynamically typed values, use an
/// [OptionalSchema](crate::OptionalSchema) for [Option](Option) values.
#[derive(Debug, Default)]
pub struct NullSchema {
    schema: Schema<Value>,
}

impl NullSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl Validator<Value> for NullSchema {
    fn validate(&self, value: &Value) -> Result<(), Error> {
        if !value.is_null() {
            violation!("expected null value, got {}", type_name(value));
        }
        self.schema.validate(value)
    }
}

/// The JSON type name of a value, as used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
