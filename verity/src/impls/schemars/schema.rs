//! Compilation of schemas into validators.

use super::{
    errors::BuildError,
    value::{canonical, IntegerBound, JsonNumber},
};
use crate::{
    null::type_name, path::Path, ArraySchema, BoolSchema, Error, NullSchema, NumberSchema,
    RecordSchema, Schema, StringSchema, Validator,
};
use regex::Regex;
use schemars_crate::{
    schema::{self as json, InstanceType, RootSchema, SchemaObject, SingleOrVec},
    Map,
};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Schemas that can be compiled into a validator for [JSON values](serde_json::Value).
pub trait Compile {
    /// Compile the schema, the whole tree is compiled at once
    /// and any unsupported node fails the compilation.
    fn compile(&self) -> Result<Schema<Value>, BuildError>;
}

impl Compile for RootSchema {
    fn compile(&self) -> Result<Schema<Value>, BuildError> {
        Compiler::new(&self.definitions).object(&self.schema, false, &Path::new())
    }
}

/// References can not be resolved without a [RootSchema](RootSchema),
/// they fail with [MissingDefinition](BuildError::MissingDefinition).
impl Compile for SchemaObject {
    fn compile(&self) -> Result<Schema<Value>, BuildError> {
        let definitions = Map::new();
        Compiler::new(&definitions).object(self, false, &Path::new())
    }
}

impl Compile for json::Schema {
    fn compile(&self) -> Result<Schema<Value>, BuildError> {
        let definitions = Map::new();
        Compiler::new(&definitions).schema(self, false, &Path::new())
    }
}

/// Compile a schema, see [Compile](Compile).
pub fn compile<S: Compile + ?Sized>(schema: &S) -> Result<Schema<Value>, BuildError> {
    schema.compile()
}

const DEFINITION_PREFIXES: &[&str] = &["#/definitions/", "#/$defs/"];

fn local_definition(reference: &str) -> Option<&str> {
    DEFINITION_PREFIXES
        .iter()
        .find_map(|prefix| reference.strip_prefix(prefix))
}

/// How a node treats `null`, which also stands in for missing properties.
#[derive(Debug, Clone, Copy)]
enum Absent {
    Allowed,
    Required,
}

impl Absent {
    fn check(self) -> Result<(), Error> {
        match self {
            Absent::Allowed => Ok(()),
            Absent::Required => Err(Error::Required),
        }
    }
}

/// Wraps the check of present values of a node.
fn node<F>(absent: Absent, check: F) -> Schema<Value>
where
    F: Fn(&Value) -> Result<(), Error> + Send + Sync + 'static,
{
    Schema::new().custom(move |value: &Value| match value {
        Value::Null => absent.check(),
        value => check(value),
    })
}

fn finite(keyword: &'static str, value: f64) -> Result<f64, BuildError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BuildError::bound(keyword, value))
    }
}

fn is_null_schema(schema: &json::Schema) -> bool {
    match schema {
        json::Schema::Object(o) => {
            matches!(&o.instance_type, Some(SingleOrVec::Single(t)) if **t == InstanceType::Null)
        }
        json::Schema::Bool(_) => false,
    }
}

/// The non-null variant of `anyOf: [X, {"type": "null"}]`.
fn nullable_variant(any_of: &[json::Schema]) -> Option<&json::Schema> {
    match any_of {
        [a, b] if is_null_schema(b) && !is_null_schema(a) => Some(a),
        [a, b] if is_null_schema(a) && !is_null_schema(b) => Some(b),
        _ => None,
    }
}

/// The declared type and whether `null` is allowed as well.
fn instance_type(schema: &SchemaObject) -> Result<(InstanceType, bool), BuildError> {
    match &schema.instance_type {
        Some(SingleOrVec::Single(t)) => Ok((**t, false)),
        Some(SingleOrVec::Vec(types)) => match types.as_slice() {
            [t] => Ok((*t, false)),
            [t, InstanceType::Null] | [InstanceType::Null, t] if *t != InstanceType::Null => {
                Ok((*t, true))
            }
            _ => Err(BuildError::InvalidType),
        },
        None => Err(BuildError::InvalidType),
    }
}

fn with_min(
    integers: NumberSchema<i64>,
    bound: IntegerBound,
    relation: &'static str,
    declared: f64,
) -> NumberSchema<i64> {
    match bound {
        IntegerBound::Unbounded => integers,
        IntegerBound::At(min) => integers.min(min),
        IntegerBound::Unsatisfiable => integers.custom(move |_: &i64| {
            Err(Error::violation(format!("value must be {} {}", relation, declared)))
        }),
    }
}

fn with_max(
    integers: NumberSchema<i64>,
    bound: IntegerBound,
    relation: &'static str,
    declared: f64,
) -> NumberSchema<i64> {
    match bound {
        IntegerBound::Unbounded => integers,
        IntegerBound::At(max) => integers.max(max),
        IntegerBound::Unsatisfiable => integers.custom(move |_: &i64| {
            Err(Error::violation(format!("value must be {} {}", relation, declared)))
        }),
    }
}

/// `uniqueItems` for JSON values, numbers are compared by value
/// so `1` and `1.0` are duplicates.
fn unique_values(items: &[Value]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if !seen.insert(canonical(item).to_string()) {
            violation!("array items must be unique (duplicate found at index {})", i);
        }
    }
    Ok(())
}

struct Compiler<'a> {
    definitions: &'a Map<String, json::Schema>,
    // Definitions that are being compiled, for detecting cycles.
    resolving: Vec<String>,
}

impl<'a> Compiler<'a> {
    fn new(definitions: &'a Map<String, json::Schema>) -> Self {
        Self {
            definitions,
            resolving: Vec::new(),
        }
    }

    fn schema(
        &mut self,
        schema: &json::Schema,
        required: bool,
        path: &Path,
    ) -> Result<Schema<Value>, BuildError> {
        match schema {
            json::Schema::Bool(true) => Ok(Schema::new()),
            json::Schema::Bool(false) => Ok(Schema::new().custom(|value: &Value| {
                if !value.is_null() {
                    violation!("value is not allowed here");
                }
                Ok(())
            })),
            json::Schema::Object(o) => self.object(o, required, path),
        }
    }

    fn object(
        &mut self,
        schema: &SchemaObject,
        required: bool,
        path: &Path,
    ) -> Result<Schema<Value>, BuildError> {
        if let Some(reference) = &schema.reference {
            return self.reference(reference, required, path);
        }

        if schema.instance_type.is_none() {
            if let Some(sub) = &schema.subschemas {
                // A single `allOf` is how references are annotated with metadata.
                if let Some([single]) = sub.all_of.as_deref() {
                    return self.schema(single, required, path);
                }

                if let Some(inner) = sub.any_of.as_deref().and_then(nullable_variant) {
                    debug!(path = %path, "compiling nullable schema");
                    let inner = self.schema(inner, required, path)?;
                    return Ok(Schema::new().custom(move |value: &Value| match value {
                        Value::Null => Ok(()),
                        value => inner.validate(value),
                    }));
                }
            }
        }

        let (kind, nullable) = instance_type(schema)?;
        debug!(path = %path, kind = ?kind, required, nullable, "compiling schema node");

        let absent = if required && !nullable {
            Absent::Required
        } else {
            Absent::Allowed
        };

        match kind {
            InstanceType::Null => {
                let nulls = NullSchema::new();
                Ok(Schema::new().custom(move |value: &Value| nulls.validate(value)))
            }
            InstanceType::Boolean => {
                let booleans = Self::boolean(schema);
                Ok(node(absent, move |value| match value {
                    Value::Bool(b) => booleans.validate(b),
                    other => violation!("expected boolean value, got {}", type_name(other)),
                }))
            }
            InstanceType::String => {
                let strings = Self::string(schema, required)?;
                Ok(node(absent, move |value| match value {
                    Value::String(s) => strings.validate(s.as_str()),
                    other => violation!("expected string value, got {}", type_name(other)),
                }))
            }
            InstanceType::Integer => {
                let integers = Self::integer(schema, required)?;
                Ok(node(absent, move |value| match value {
                    Value::Number(n) => integers.validate(&JsonNumber::from(n).to_i64()?),
                    other => {
                        warn!(got = type_name(other), "non-integer value for an integer schema");
                        violation!("expected integer value, got {}", type_name(other))
                    }
                }))
            }
            InstanceType::Number => {
                let numbers = Self::number(schema, required)?;
                Ok(node(absent, move |value| match value {
                    Value::Number(n) => numbers.validate(&JsonNumber::from(n).to_f64()),
                    other => violation!("expected numeric value, got {}", type_name(other)),
                }))
            }
            InstanceType::Array => {
                let arrays = self.array(schema, path)?;

                // Missing arrays validate as empty ones, only a required
                // array that must have items is reported as missing.
                let min_items = schema.array.as_ref().and_then(|a| a.min_items).unwrap_or(0);
                let absent = match absent {
                    Absent::Required if min_items > 0 => Absent::Required,
                    _ => Absent::Allowed,
                };

                Ok(node(absent, move |value| match value {
                    Value::Array(items) => arrays.validate(items),
                    other => violation!("expected array value, got {}", type_name(other)),
                }))
            }
            InstanceType::Object => {
                let records = self.record(schema, path)?;
                Ok(node(absent, move |value| {
                    Validator::<Value>::validate(&records, value)
                }))
            }
        }
    }

    fn reference(
        &mut self,
        reference: &str,
        required: bool,
        path: &Path,
    ) -> Result<Schema<Value>, BuildError> {
        let name = local_definition(reference)
            .ok_or_else(|| BuildError::ExternalReference(reference.to_string()))?;

        let definitions = self.definitions;
        let definition = definitions
            .get(name)
            .ok_or_else(|| BuildError::MissingDefinition(name.to_string()))?;

        if self.resolving.iter().any(|r| r == name) {
            return Err(BuildError::RecursiveReference(name.to_string()));
        }

        trace!(path = %path, definition = name, "resolving reference");

        self.resolving.push(name.to_string());
        let compiled = self.schema(definition, required, path);
        self.resolving.pop();

        compiled
    }

    /// `const` is the only keyword with a meaning for booleans.
    fn boolean(schema: &SchemaObject) -> BoolSchema {
        match &schema.const_value {
            Some(Value::Bool(true)) => BoolSchema::new().must_be_true(),
            Some(Value::Bool(false)) => BoolSchema::new().must_be_false(),
            _ => BoolSchema::new(),
        }
    }

    fn string(schema: &SchemaObject, required: bool) -> Result<StringSchema, BuildError> {
        let mut strings = StringSchema::new();

        if let Some(s) = &schema.string {
            if let Some(min) = s.min_length {
                strings = strings.min(min as usize);
            }
            if let Some(max) = s.max_length {
                strings = strings.max(max as usize);
            }
            if let Some(pattern) = &s.pattern {
                let re = Regex::new(pattern).map_err(|source| BuildError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                strings = strings.regex(re);
            }
        }

        if required {
            strings = strings.required();
        }

        Ok(strings)
    }

    /// Fractional bounds are rounded towards the allowed range,
    /// bounds outside the i64 range are either dropped or reject everything.
    fn integer(schema: &SchemaObject, required: bool) -> Result<NumberSchema<i64>, BuildError> {
        let mut integers = NumberSchema::<i64>::new();

        if let Some(n) = &schema.number {
            if let Some(min) = n.minimum {
                let min = finite("minimum", min)?;
                let bound = IntegerBound::lower(min.ceil());
                integers = with_min(integers, bound, "at least", min);
            }
            if let Some(max) = n.maximum {
                let max = finite("maximum", max)?;
                let bound = IntegerBound::upper(max.floor());
                integers = with_max(integers, bound, "at most", max);
            }
            if let Some(min) = n.exclusive_minimum {
                let min = finite("exclusiveMinimum", min)?;
                let bound = IntegerBound::lower(min.floor()).shift(|v| v.checked_add(1));
                integers = with_min(integers, bound, "greater than", min);
            }
            if let Some(max) = n.exclusive_maximum {
                let max = finite("exclusiveMaximum", max)?;
                let bound = IntegerBound::upper(max.ceil()).shift(|v| v.checked_sub(1));
                integers = with_max(integers, bound, "less than", max);
            }
        }

        if required {
            integers = integers.required();
        }

        Ok(integers)
    }

    fn number(schema: &SchemaObject, required: bool) -> Result<NumberSchema<f64>, BuildError> {
        let mut numbers = NumberSchema::<f64>::new();

        if let Some(n) = &schema.number {
            if let Some(min) = n.minimum {
                numbers = numbers.min(finite("minimum", min)?);
            }
            if let Some(max) = n.maximum {
                numbers = numbers.max(finite("maximum", max)?);
            }
            if let Some(min) = n.exclusive_minimum {
                let min = finite("exclusiveMinimum", min)?;
                numbers = numbers.custom(move |v: &f64| {
                    if *v <= min {
                        violation!("value must be greater than {}", min);
                    }
                    Ok(())
                });
            }
            if let Some(max) = n.exclusive_maximum {
                let max = finite("exclusiveMaximum", max)?;
                numbers = numbers.custom(move |v: &f64| {
                    if *v >= max {
                        violation!("value must be less than {}", max);
                    }
                    Ok(())
                });
            }
        }

        if required {
            numbers = numbers.required();
        }

        Ok(numbers)
    }

    fn array(
        &mut self,
        schema: &SchemaObject,
        path: &Path,
    ) -> Result<ArraySchema<Value>, BuildError> {
        let mut arrays = ArraySchema::<Value>::new();

        let arr = match &schema.array {
            Some(arr) => arr,
            None => return Ok(arrays),
        };

        if let Some(items) = &arr.items {
            let items = match items {
                SingleOrVec::Single(item) => self
                    .schema(item, false, &(path.clone() + "items"))
                    .map_err(BuildError::items)?,
                SingleOrVec::Vec(_) => return Err(BuildError::UnsupportedItems),
            };
            arrays = arrays.items(items);
        }
        if let Some(min) = arr.min_items {
            arrays = arrays.min(min as usize);
        }
        if let Some(max) = arr.max_items {
            arrays = arrays.max(max as usize);
        }
        if let Some(true) = arr.unique_items {
            arrays = arrays.custom(unique_values);
        }

        Ok(arrays)
    }

    fn record(&mut self, schema: &SchemaObject, path: &Path) -> Result<RecordSchema, BuildError> {
        let mut record = RecordSchema::new();

        let obj = match &schema.object {
            Some(obj) => obj,
            None => return Ok(record),
        };

        for (name, property) in &obj.properties {
            if let json::Schema::Bool(true) = property {
                trace!(path = %path, property = %name, "skipping property without constraints");
                continue;
            }

            let required = obj.required.contains(name);
            let field = self
                .schema(property, required, &(path.clone() + name.as_str()))
                .map_err(|err| BuildError::property(name.as_str(), err))?;

            record = record.field(name.as_str(), field);
        }

        Ok(record)
    }
}
