use crate::path::{Path, Segment};

/// A validation error.
///
/// Built-in constraints report a [Violation](Error::Violation) with a human-readable message,
/// composite schemas wrap the error of the failing element or field with its position.
/// The [Required](Error::Required) variant is the only one meant to be matched on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required value is absent, empty or zero.
    #[error("value is required")]
    Required,

    /// A built-in constraint failed.
    #[error("{0}")]
    Violation(String),

    /// An array item failed validation.
    #[error("invalid item at index {index}: {source}")]
    Item { index: usize, source: Box<Error> },

    /// An object field failed validation.
    #[error("validation failed for field {name:?}: {source}")]
    Field { name: String, source: Box<Error> },

    /// An error returned by a custom predicate.
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Create a violation with the given message.
    pub fn violation<T: core::fmt::Display>(message: T) -> Self {
        Error::Violation(message.to_string())
    }

    /// Wrap any error, it is displayed as is.
    ///
    /// Custom predicates can use this to return errors
    /// that can be told apart by their type.
    pub fn custom<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Error::Custom(error.into())
    }

    pub(crate) fn item(index: usize, error: Error) -> Self {
        Error::Item {
            index,
            source: Box::new(error),
        }
    }

    pub(crate) fn field(name: impl Into<String>, error: Error) -> Self {
        Error::Field {
            name: name.into(),
            source: Box::new(error),
        }
    }

    /// Whether the innermost error is [Required](Error::Required).
    pub fn is_required(&self) -> bool {
        matches!(self.root_cause(), Error::Required)
    }

    /// The innermost error, with all item and field wrappers removed.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        loop {
            match err {
                Error::Item { source, .. } | Error::Field { source, .. } => err = &**source,
                _ => return err,
            }
        }
    }

    /// The location of the invalid value relative to the validated one.
    pub fn path(&self) -> Path {
        let mut path = Path::new();
        let mut err = self;
        loop {
            match err {
                Error::Item { index, source } => {
                    path.push(Segment::Index(*index));
                    err = &**source;
                }
                Error::Field { name, source } => {
                    path.push(Segment::Field(name.clone()));
                    err = &**source;
                }
                _ => return path,
            }
        }
    }

    /// Return the custom error if it is of type `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self.root_cause() {
            Error::Custom(err) => err.downcast_ref(),
            _ => None,
        }
    }
}
