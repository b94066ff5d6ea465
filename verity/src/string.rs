use crate::{Error, Schema, Validator};
use regex::Regex;

/// Schema for string values.
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Default)]
pub struct StringSchema {
    schema: Schema<str>,
    required: bool,
}

impl StringSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject empty strings with [Required](Error::Required).
    ///
    /// This is checked before any other constraint regardless of
    /// the order it was set in.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The string must be at least `min` characters long.
    pub fn min(mut self, min: usize) -> Self {
        self.schema.attach(move |v: &str| {
            if v.chars().count() < min {
                violation!("length must be at least {}", min);
            }
            Ok(())
        });
        self
    }

    /// The string must be at most `max` characters long.
    pub fn max(mut self, max: usize) -> Self {
        self.schema.attach(move |v: &str| {
            if v.chars().count() > max {
                violation!("length must be at most {}", max);
            }
            Ok(())
        });
        self
    }

    /// The string must be exactly `length` characters long.
    pub fn length(mut self, length: usize) -> Self {
        self.schema.attach(move |v: &str| {
            if v.chars().count() != length {
                violation!("length must be exactly {}", length);
            }
            Ok(())
        });
        self
    }

    /// The string must match the pattern.
    pub fn regex(mut self, re: Regex) -> Self {
        self.schema.attach(move |v: &str| {
            if !re.is_match(v) {
                violation!("string must match pattern {:?}", re.as_str());
            }
            Ok(())
        });
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl Validator<str> for StringSchema {
    fn validate(&self, value: &str) -> Result<(), Error> {
        if self.required && value.is_empty() {
            return Err(Error::Required);
        }
        self.schema.validate(value)
    }
}

impl Validator<String> for StringSchema {
    fn validate(&self, value: &String) -> Result<(), Error> {
        Validator::<str>::validate(self, value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(schema: &StringSchema, value: &str) -> Option<String> {
        Validator::<str>::validate(schema, value)
            .err()
            .map(|e| e.to_string())
    }

    #[test]
    fn constraints_compose() {
        let schema = StringSchema::new()
            .max(8)
            .regex(Regex::new("^[a-zA-Z]*$").unwrap());

        assert_eq!(message(&schema, "hello"), None);
        assert_eq!(message(&schema, ""), None);
        assert_eq!(
            message(&schema, "hellohello").as_deref(),
            Some("length must be at most 8")
        );
        assert_eq!(
            message(&schema, "hello123").as_deref(),
            Some(r#"string must match pattern "^[a-zA-Z]*$""#)
        );
    }

    #[test]
    fn required_rejects_empty_first() {
        let schema = StringSchema::new().min(3).required();

        let err = Validator::<str>::validate(&schema, "").unwrap_err();
        assert!(matches!(err, Error::Required));
        assert_eq!(
            message(&schema, "hi").as_deref(),
            Some("length must be at least 3")
        );
        assert_eq!(message(&schema, "hey"), None);
    }

    #[test]
    fn length_bounds() {
        assert_eq!(
            message(&StringSchema::new().min(3), "hi").as_deref(),
            Some("length must be at least 3")
        );
        assert_eq!(
            message(&StringSchema::new().max(5), "too long").as_deref(),
            Some("length must be at most 5")
        );
        assert_eq!(
            message(&StringSchema::new().length(5), "too long").as_deref(),
            Some("length must be exactly 5")
        );
        assert_eq!(message(&StringSchema::new().length(5), "hello"), None);
    }

    #[test]
    fn length_counts_characters() {
        let schema = StringSchema::new().max(4);
        assert_eq!(message(&schema, "äöüß"), None);
    }

    #[test]
    fn custom_predicate() {
        let schema = StringSchema::new().custom(|s| {
            if s == "hello" {
                return Ok(());
            }
            Err(Error::violation("invalid string"))
        });

        assert_eq!(message(&schema, "hello"), None);
        assert_eq!(message(&schema, "world").as_deref(), Some("invalid string"));
    }

    #[test]
    fn owned_strings_validate_too() {
        let schema = StringSchema::new().required();
        assert!(schema.validate(&String::new()).unwrap_err().is_required());
    }
}
