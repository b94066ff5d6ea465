//! Errors that occur while compiling a schema.

/// A schema that cannot be compiled into a validator.
///
/// These are only returned by [Compile](super::Compile), a compiled
/// validator never reports them.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The `type` keyword is missing or names a type that is not supported.
    #[error("invalid type")]
    InvalidType,

    /// A `pattern` is not a valid regular expression.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A numeric bound is not a finite number.
    #[error("invalid `{keyword}` value {value:?}")]
    InvalidBound { keyword: &'static str, value: String },

    /// The `items` schema of an array cannot be compiled.
    #[error("invalid item schema: {source}")]
    InvalidItems { source: Box<BuildError> },

    /// Tuple validation with a list of `items` schemas.
    #[error("only a single `items` schema is supported")]
    UnsupportedItems,

    /// A property schema of an object cannot be compiled.
    #[error("invalid schema for property {name:?}: {source}")]
    InvalidProperty {
        name: String,
        source: Box<BuildError>,
    },

    #[error("missing local definition {0:?}")]
    MissingDefinition(String),

    #[error("the schema contains unresolved external reference: {0:?}")]
    ExternalReference(String),

    /// A definition refers to itself, directly or through other definitions.
    #[error("recursive reference {0:?} cannot be compiled")]
    RecursiveReference(String),
}

impl BuildError {
    pub(crate) fn items(error: BuildError) -> Self {
        BuildError::InvalidItems {
            source: Box::new(error),
        }
    }

    pub(crate) fn property(name: impl Into<String>, error: BuildError) -> Self {
        BuildError::InvalidProperty {
            name: name.into(),
            source: Box::new(error),
        }
    }

    pub(crate) fn bound(keyword: &'static str, value: f64) -> Self {
        BuildError::InvalidBound {
            keyword,
            value: value.to_string(),
        }
    }
}
