use thiserror::Error;

/// Result type for property operations
pub type PropResult<T> = Result<T, PropError>;

/// Top-level error for the property facade.
///
/// Converter, resolver, processor and expansion errors all flow into this
/// so callers can handle everything at one seam.
#[derive(Error, Debug)]
pub enum PropError {
    #[error("Unresolved property: {0}")]
    Unresolved(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Errors raised by the conversion engine.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// No registered converter accepted the target type.
    #[error("Conversion to target type not supported: {0}. Make sure a converter which supports the target type is registered.")]
    UnsupportedTargetType(String),

    /// The value does not parse for the requested target type.
    #[error("Invalid value for {target}: {value:?}")]
    InvalidValue {
        target: String,
        value: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The target type contains an unresolved type variable (e.g. `T` in `Vec<T>`).
    #[error("Type variables are not supported in conversion targets: {0}")]
    UnresolvedTypeVariable(String),

    /// A converter produced a value shape the typed accessor did not expect.
    #[error("Unexpected converted value shape, expected {expected}")]
    ValueMismatch { expected: &'static str },
}

impl ConversionError {
    /// Build an [`ConversionError::InvalidValue`] without an underlying cause.
    pub fn invalid(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            target: target.into(),
            value: value.into(),
            source: None,
        }
    }

    /// Build an [`ConversionError::InvalidValue`] wrapping the parse failure.
    pub fn invalid_with(
        target: impl Into<String>,
        value: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidValue {
            target: target.into(),
            value: value.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Errors raised while reading from a property source.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to read property source {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Property source returned a non-unicode value for {0}")]
    NotUnicode(String),
}

/// Errors raised during `${...}` variable expansion.
#[derive(Error, Debug)]
pub enum ExpansionError {
    #[error("Failed to expand \"{name}\" variable. Variable value cannot be resolved.")]
    UnresolvedVariable { name: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Errors raised by post-resolution processors.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Processor {processor} failed: {message}")]
    Failed { processor: &'static str, message: String },
}

impl ProcessingError {
    pub fn failed(processor: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            processor,
            message: message.into(),
        }
    }
}
