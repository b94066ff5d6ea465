use crate::{Error, Validator};

/// A predicate attached to a schema.
pub(crate) type Predicate<T> = Box<dyn Fn(&T) -> Result<(), Error> + Send + Sync>;

/// The base of every schema: an ordered list of predicates over `T`.
///
/// Predicates run in the order they were attached, the first error
/// is returned and the remaining predicates are skipped.
///
/// A schema is built up front and then only read, it can be shared
/// between threads once built.
///
/// ```
/// use verity::{Error, Schema, Validator};
///
/// let even = Schema::<u32>::new().custom(|v| {
///     if v % 2 != 0 {
///         return Err(Error::violation("value must be even"));
///     }
///     Ok(())
/// });
///
/// assert!(even.validate(&4).is_ok());
/// assert_eq!(even.validate(&3).unwrap_err().to_string(), "value must be even");
/// ```
pub struct Schema<T: ?Sized> {
    predicates: Vec<Predicate<T>>,
}

impl<T: ?Sized> Schema<T> {
    /// Create a schema without any predicates, it accepts every value.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Attach a predicate after the existing ones.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.attach(predicate);
        self
    }

    /// The number of attached predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub(crate) fn attach<F>(&mut self, predicate: F)
    where
        F: Fn(&T) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
    }
}

impl<T: ?Sized> Validator<T> for Schema<T> {
    fn validate(&self, value: &T) -> Result<(), Error> {
        for predicate in &self.predicates {
            predicate(value)?;
        }
        Ok(())
    }
}

impl<T: ?Sized> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> core::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Schema")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
