use crate::{Error, Schema, Validator};

/// Schema for [Option](Option) values.
///
/// `None` is accepted without running any predicate unless
/// [required](OptionalSchema::required) is set.
#[derive(Debug)]
pub struct OptionalSchema<T> {
    schema: Schema<Option<T>>,
    required: bool,
}

impl<T: 'static> OptionalSchema<T> {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
            required: false,
        }
    }

    /// Validate present values with `inner`.
    ///
    /// The inner validator is moved into the schema as is, pass a reference
    /// counted schema to share it with other schemas.
    pub fn of<V>(inner: V) -> Self
    where
        V: Validator<T> + Send + Sync + 'static,
    {
        Self::new().custom(move |value: &Option<T>| match value {
            Some(v) => inner.validate(v),
            None => Ok(()),
        })
    }

    /// Reject `None` with [Required](Error::Required).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Alias of [required](OptionalSchema::required).
    pub fn not_none(self) -> Self {
        self.required()
    }

    /// Attach a predicate, it is only called for present values.
    ///
    /// `None` is accepted, or rejected with [Required](Error::Required) when required,
    /// before any predicate runs.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Option<T>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl<T: 'static> Default for OptionalSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Validator<Option<T>> for OptionalSchema<T> {
    fn validate(&self, value: &Option<T>) -> Result<(), Error> {
        match value {
            None if self.required => Err(Error::Required),
            None => Ok(()),
            Some(_) => self.schema.validate(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberSchema, StringSchema};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn required_rejects_none() {
        let schema = OptionalSchema::<String>::new().required();

        assert!(schema.validate(&Some("hello".to_string())).is_ok());
        assert!(matches!(schema.validate(&None), Err(Error::Required)));
    }

    #[test]
    fn not_none_is_required() {
        let schema = OptionalSchema::<u8>::new().not_none();
        assert!(schema.validate(&None).unwrap_err().is_required());
    }

    #[test]
    fn custom_predicate() {
        let schema = OptionalSchema::<i32>::new().custom(|n| match n {
            Some(n) if *n < 0 => Err(Error::violation("value must be positive")),
            _ => Ok(()),
        });

        assert!(schema.validate(&Some(10)).is_ok());
        assert_eq!(
            schema.validate(&Some(-1)).unwrap_err().to_string(),
            "value must be positive"
        );
        assert!(schema.validate(&None).is_ok());
    }

    #[test]
    fn predicates_skip_none() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let schema = OptionalSchema::<i32>::new().required().custom(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Error::violation("predicate called"))
        });

        assert!(matches!(schema.validate(&None), Err(Error::Required)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(
            schema.validate(&Some(1)).unwrap_err().to_string(),
            "predicate called"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wraps_inner_schema() {
        let schema = OptionalSchema::<String>::of(StringSchema::new().min(3));

        assert!(schema.validate(&Some("hello".to_string())).is_ok());
        assert_eq!(
            schema.validate(&Some("hi".to_string())).unwrap_err().to_string(),
            "length must be at least 3"
        );
        assert!(schema.validate(&None).is_ok());

        let schema = schema.required();
        assert!(schema.validate(&None).unwrap_err().is_required());
    }

    #[test]
    fn shares_inner_schema() {
        let inner = Arc::new(NumberSchema::<u32>::new().max(10));
        let a = OptionalSchema::of(inner.clone());
        let b = OptionalSchema::of(inner.clone()).required();

        assert!(a.validate(&Some(11)).is_err());
        assert!(b.validate(&Some(11)).is_err());
        assert!(a.validate(&None).is_ok());
        assert!(b.validate(&None).is_err());
        assert!(inner.validate(&3).is_ok());
    }
}
