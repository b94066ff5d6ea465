/*!
This example validates values parsed from JSON against a schema
that was also parsed from JSON.

Run it with `RUST_LOG=trace` to see how the schema is compiled.
*/

use schemars_crate::schema::RootSchema;
use serde_json::json;
use verity::{schemars::Compile, Validator};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema_value = json! {
        {
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "SomeStruct",
            "type": "object",
            "required": [
              "some_inner",
              "some_int"
            ],
            "properties": {
              "some_inner": {
                "type": "object",
                "required": [
                  "inner_values",
                  "inner_value"
                ],
                "properties": {
                  "inner_values": {
                    "type": "array",
                    "maxItems": 2,
                    "items": {
                        "type": "string"
                    }
                  },
                  "inner_value": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 3
                  }
                }
              },
              "some_int": {
                "type": "integer",
                "format": "int32"
              }
            }
          }
    };

    let values = [
        json! {
            {
                "some_inner": {
                  "inner_value": 2,
                  "inner_values": ["value"]
                },
                "some_int": 7
            }
        },
        json! {
            {
                "some_inner": {
                  "inner_value": 2,
                  "inner_values": ["value", 2]
                },
                "some_int": 7
            }
        },
        json! {
            {
                "some_inner": {
                  "inner_value": 4,
                  "inner_values": []
                },
                "some_int": 7
            }
        },
        json! {
            {
                "some_inner": {
                  "inner_value": 1,
                  "inner_values": []
                }
            }
        },
    ];

    let schema = match serde_json::from_value::<RootSchema>(schema_value)
        .map_err(|err| err.to_string())
        .and_then(|schema| schema.compile().map_err(|err| err.to_string()))
    {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("invalid schema: {}", err);
            return;
        }
    };

    for value in &values {
        match schema.validate(value) {
            Ok(()) => println!("() valid"),
            Err(err) => println!("({path}) {err}", path = err.path().dotted(), err = err),
        }
    }
    // () valid
    // (some_inner.inner_values.1) validation failed for field "some_inner": validation failed for field "inner_values": invalid item at index 1: expected string value, got integer
    // (some_inner.inner_value) validation failed for field "some_inner": validation failed for field "inner_value": value must be at most 3
    // (some_int) validation failed for field "some_int": value is required
}
