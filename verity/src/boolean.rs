use crate::{Error, Schema, Validator};

/// Schema for boolean values.
#[derive(Debug, Default)]
pub struct BoolSchema {
    schema: Schema<bool>,
}

impl BoolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value must be `true`.
    pub fn must_be_true(mut self) -> Self {
        self.schema.attach(|v: &bool| {
            if !*v {
                violation!("bool value must be true");
            }
            Ok(())
        });
        self
    }

    /// The value must be `false`.
    pub fn must_be_false(mut self) -> Self {
        self.schema.attach(|v: &bool| {
            if *v {
                violation!("bool value must be false");
            }
            Ok(())
        });
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&bool) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl Validator<bool> for BoolSchema {
    fn validate(&self, value: &bool) -> Result<(), Error> {
        self.schema.validate(value)
    }
}
