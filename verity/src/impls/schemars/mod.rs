/*!

Compiles [Schemars](schemars_crate) schemas into validators for [JSON values](serde_json::Value).

A schema is compiled once with [Compile](Compile) and the result is an ordinary
[Schema](crate::Schema) that can be used like any hand-built one.

The node types map to the schemas of this crate:

| JSON Schema type | Schema                                          | Keywords                                           |
|------------------|-------------------------------------------------|----------------------------------------------------|
| `string`         | [StringSchema](crate::StringSchema)             | `minLength`, `maxLength`, `pattern`                |
| `integer`        | [NumberSchema](crate::NumberSchema)`<i64>`      | `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum` |
| `number`         | [NumberSchema](crate::NumberSchema)`<f64>`      | `minimum`, `maximum`, `exclusiveMinimum`, `exclusiveMaximum` |
| `boolean`        | [BoolSchema](crate::BoolSchema)                 |                                                    |
| `null`           | [NullSchema](crate::NullSchema)                 |                                                    |
| `array`          | [ArraySchema](crate::ArraySchema)`<Value>`      | `items`, `minItems`, `maxItems`, `uniqueItems`     |
| `object`         | [RecordSchema](crate::RecordSchema)             | `properties`, `required`                           |

Properties listed in `required` are compiled with their schema's required flag set,
so a missing value, an empty string or zero fails with [Required](crate::Error::Required).
Missing or `null` optional properties are accepted without running their keyword checks,
so an absent optional string with `minLength` or integer with `minimum` passes.

Local references (`#/definitions/...`) are resolved when compiling a [RootSchema](schemars_crate::schema::RootSchema).

```
# use schemars_crate::schema::RootSchema;
# use serde_json::json;
use verity::{schemars::Compile, Validator};

let schema: RootSchema = serde_json::from_value(json!({
    "type": "object",
    "required": ["name"],
    "properties": {
        "name": { "type": "string", "minLength": 2 }
    }
})).unwrap();

let validator = schema.compile().unwrap();

assert!(validator.validate(&json!({ "name": "John" })).is_ok());
assert_eq!(
    validator.validate(&json!({})).unwrap_err().to_string(),
    r#"validation failed for field "name": value is required"#
);
```

*/

mod errors;
mod schema;
mod value;

pub use errors::BuildError;
pub use schema::{compile, Compile};
pub use value::JsonNumber;
