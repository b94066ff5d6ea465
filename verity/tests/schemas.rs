use regex::Regex;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use verity::{
    array, boolean, from_fn, number, object, optional_of, record, string, validate_field,
    Error, FieldFn, ObjectSchema, Validator,
};

#[derive(Debug, Clone, Serialize)]
struct Address {
    street: String,
    city: String,
    zip: String,
}

#[derive(Debug, Clone, Serialize)]
struct User {
    name: String,
    email: Option<String>,
    age: u32,
    accepted_terms: bool,
    address: Address,
    tags: Vec<String>,
}

fn address_schema() -> ObjectSchema<Address> {
    object::<Address>()
        .field_with("street", |a: &Address| a.street.as_str(), string().required())
        .field_with("city", |a: &Address| a.city.as_str(), string().required())
        .field_with(
            "zip",
            |a: &Address| a.zip.as_str(),
            string().regex(Regex::new(r"^\d{5}$").unwrap()),
        )
}

fn user_schema() -> ObjectSchema<User> {
    object::<User>()
        .field_with(
            "name",
            |u: &User| u.name.as_str(),
            string().required().min(2).max(50),
        )
        .field_with(
            "email",
            |u: &User| &u.email,
            optional_of::<String, _>(string().regex(Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap())),
        )
        .field_with("age", |u: &User| &u.age, number::<u32>().min(18).max(120))
        .field_with(
            "accepted_terms",
            |u: &User| &u.accepted_terms,
            boolean().must_be_true(),
        )
        .field_with("address", |u: &User| &u.address, address_schema())
        .field_with(
            "tags",
            |u: &User| &u.tags,
            array::<String>()
                .max(3)
                .unique_items()
                .items(string().required()),
        )
}

fn user() -> User {
    User {
        name: "Jane Doe".into(),
        email: Some("jane@example.com".into()),
        age: 34,
        accepted_terms: true,
        address: Address {
            street: "Main Street 1".into(),
            city: "Springfield".into(),
            zip: "12345".into(),
        },
        tags: vec!["admin".into(), "staff".into()],
    }
}

#[test]
fn valid_user() {
    assert!(user_schema().validate(&user()).is_ok());

    let mut no_email = user();
    no_email.email = None;
    assert!(user_schema().validate(&no_email).is_ok());
}

#[test]
fn first_invalid_field_is_reported() {
    let schema = user_schema();

    let mut u = user();
    u.name = "J".into();
    u.age = 7;
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "name": length must be at least 2"#
    );

    let mut u = user();
    u.email = Some("not an email".into());
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "email": string must match pattern "^[^@\\s]+@[^@\\s]+$""#
    );

    let mut u = user();
    u.accepted_terms = false;
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "accepted_terms": bool value must be true"#
    );
}

#[test]
fn nested_errors_are_wrapped_twice() {
    let mut u = user();
    u.address.zip = "1234a".into();

    let err = user_schema().validate(&u).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"validation failed for field "address": validation failed for field "zip": string must match pattern "^\\d{5}$""#
    );
    assert_eq!(err.path().dotted(), "address.zip");

    let mut u = user();
    u.address.city = String::new();
    let err = user_schema().validate(&u).unwrap_err();
    assert!(err.is_required());
    assert_eq!(err.path().to_string(), "address.city");
}

#[test]
fn array_fields() {
    let schema = user_schema();

    let mut u = user();
    u.tags = vec!["a".into(), "".into()];
    let err = schema.validate(&u).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"validation failed for field "tags": invalid item at index 1: value is required"#
    );
    assert_eq!(err.path().dotted(), "tags.1");

    let mut u = user();
    u.tags = vec!["a".into(), "b".into(), "a".into()];
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "tags": array items must be unique (duplicate found at index 2)"#
    );

    let mut u = user();
    u.tags = vec!["a".into(), "b".into(), "c".into(), "d".into()];
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "tags": array length must be at most 3"#
    );
}

#[test]
fn arrays_of_objects() {
    let schema = array::<Address>().min(1).items(address_schema());

    let mut addresses = vec![user().address, user().address];
    assert!(schema.validate(&addresses).is_ok());

    addresses[1].street.clear();
    let err = schema.validate(&addresses).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid item at index 1: validation failed for field "street": value is required"#
    );
    assert_eq!(err.path().dotted(), "1.street");

    assert_eq!(
        schema.validate(&Vec::new()).unwrap_err().to_string(),
        "array length must be at least 1"
    );
}

#[test]
fn fields_from_closures() {
    let fields: Vec<(&str, FieldFn<User>)> = vec![
        (
            "name",
            Box::new(validate_field(|u: &User| u.name.as_str(), string().max(4))) as FieldFn<User>,
        ),
        (
            "age",
            Box::new(|u: &User| {
                if u.age % 2 != 0 {
                    return Err(Error::violation("age must be even"));
                }
                Ok(())
            }) as FieldFn<User>,
        ),
    ];

    let schema = object::<User>().fields(fields);

    let mut u = user();
    u.name = "Jane".into();
    assert!(schema.validate(&u).is_ok());

    u.age = 35;
    assert_eq!(
        schema.validate(&u).unwrap_err().to_string(),
        r#"validation failed for field "age": age must be even"#
    );
}

#[test]
fn shared_field_schemas() {
    let name = Arc::new(string().required().max(10));

    let users = object::<User>().field_with("name", |u: &User| u.name.as_str(), name.clone());
    let addresses =
        object::<Address>().field_with("street", |a: &Address| a.street.as_str(), name.clone());

    assert!(users.validate(&user()).is_ok());
    assert_eq!(
        addresses.validate(&user().address).unwrap_err().to_string(),
        r#"validation failed for field "street": length must be at most 10"#
    );
}

#[derive(Debug, thiserror::Error)]
#[error("{0} is a reserved name")]
struct Reserved(String);

#[test]
fn custom_errors_can_be_recovered() {
    let schema = object::<User>().field_with(
        "name",
        |u: &User| u.name.as_str(),
        string().custom(|name| {
            if name == "root" {
                return Err(Error::custom(Reserved(name.to_string())));
            }
            Ok(())
        }),
    );

    let mut u = user();
    u.name = "root".into();

    let err = schema.validate(&u).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"validation failed for field "name": root is a reserved name"#
    );
    let reserved = err.downcast_ref::<Reserved>().unwrap();
    assert_eq!(reserved.0, "root");
}

#[test]
fn records() {
    let schema = record()
        .field("name", from_fn(|v: &serde_json::Value| match v.as_str() {
            Some(s) => string().required().min(2).validate(s),
            None => Err(Error::Required),
        }))
        .field(
            "address",
            record().field(
                "zip",
                from_fn(|v: &serde_json::Value| match v {
                    serde_json::Value::String(s) if s.len() == 5 => Ok(()),
                    _ => Err(Error::violation("zip must have 5 characters")),
                }),
            ),
        );

    assert!(schema
        .validate(&json!({"name": "Jane", "address": {"zip": "12345"}}))
        .is_ok());

    let err = schema
        .validate(&json!({"name": "Jane", "address": {"zip": 12345}}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"validation failed for field "address": validation failed for field "zip": zip must have 5 characters"#
    );

    let err = schema.validate(&json!({"address": {}})).unwrap_err();
    assert!(err.is_required());
    assert_eq!(err.path().dotted(), "name");
}
