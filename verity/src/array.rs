use crate::{Error, Schema, Validator};
use serde::Serialize;
use std::collections::HashSet;

/// Schema for sequences of `T`.
///
/// Every constraint is a predicate over the whole sequence, including
/// [items](ArraySchema::items), so constraints are checked in the order
/// they were added.
///
/// An absent sequence (`None`) is validated as an empty one.
#[derive(Debug)]
pub struct ArraySchema<T> {
    schema: Schema<[T]>,
}

impl<T: 'static> ArraySchema<T> {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(),
        }
    }

    /// Validate every item, stopping at the first invalid one.
    pub fn items<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + Send + Sync + 'static,
    {
        self.schema.attach(move |items: &[T]| {
            for (i, item) in items.iter().enumerate() {
                validator.validate(item).map_err(|err| Error::item(i, err))?;
            }
            Ok(())
        });
        self
    }

    /// The sequence must have at least `min` items.
    pub fn min(mut self, min: usize) -> Self {
        self.schema.attach(move |items: &[T]| {
            if items.len() < min {
                violation!("array length must be at least {}", min);
            }
            Ok(())
        });
        self
    }

    /// The sequence must have at most `max` items.
    pub fn max(mut self, max: usize) -> Self {
        self.schema.attach(move |items: &[T]| {
            if items.len() > max {
                violation!("array length must be at most {}", max);
            }
            Ok(())
        });
        self
    }

    /// The sequence must have exactly `length` items.
    pub fn length(mut self, length: usize) -> Self {
        self.schema.attach(move |items: &[T]| {
            if items.len() != length {
                violation!("array length must be exactly {}", length);
            }
            Ok(())
        });
        self
    }

    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&[T]) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.schema.attach(predicate);
        self
    }
}

impl<T: Serialize + 'static> ArraySchema<T> {
    /// All items must be distinct.
    ///
    /// Items are compared by their JSON serialization, the error
    /// names the index of the first repeated item.
    pub fn unique_items(mut self) -> Self {
        self.schema.attach(|items: &[T]| {
            let mut seen = HashSet::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let key = serde_json::to_string(item).map_err(|err| {
                    Error::violation(format!(
                        "failed to serialize array item for uniqueness check at index {}: {}",
                        i, err
                    ))
                })?;

                if !seen.insert(key) {
                    violation!("array items must be unique (duplicate found at index {})", i);
                }
            }
            Ok(())
        });
        self
    }
}

impl<T: 'static> Default for ArraySchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Validator<[T]> for ArraySchema<T> {
    fn validate(&self, value: &[T]) -> Result<(), Error> {
        self.schema.validate(value)
    }
}

impl<T> Validator<Vec<T>> for ArraySchema<T> {
    fn validate(&self, value: &Vec<T>) -> Result<(), Error> {
        self.schema.validate(value.as_slice())
    }
}

impl<T> Validator<Option<Vec<T>>> for ArraySchema<T> {
    fn validate(&self, value: &Option<Vec<T>>) -> Result<(), Error> {
        match value {
            Some(items) => self.schema.validate(items.as_slice()),
            None => self.schema.validate(&[]),
        }
    }
}
