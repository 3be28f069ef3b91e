//! Type-aware string conversion.
//!
//! The engine is a chain of [`Converter`]s held by a [`RootConverter`].
//! Each converter is asked, in registration order, whether it handles a
//! [`TargetType`]; the first that accepts runs. A converter that
//! recognizes the coarse type but not the exact shape returns
//! [`ConversionResult::Skip`] and dispatch continues with the next
//! candidate. Converters are stateless; recursive shapes re-enter the
//! dispatcher through the per-call [`ConversionContext`].

pub mod converters;
pub mod root;
pub mod target;
pub mod tokenizer;

pub use root::RootConverter;
pub use target::{DateTimeKind, EnumSpec, RawKind, TargetType};

use crate::error::ConversionError;
use crate::value::PropValue;

/// Default delimiter used when splitting values into array/collection
/// elements.
pub const DEFAULT_DELIMITER: &str = ",";

/// The outcome of one converter invocation.
///
/// `Skip` is control flow, not an error: it tells the dispatcher to try
/// the next registered converter. It is distinct from a successfully
/// converted empty payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionResult {
    Converted(PropValue),
    Skip,
}

impl ConversionResult {
    /// A successful conversion carrying `value`.
    pub fn of(value: PropValue) -> Self {
        Self::Converted(value)
    }

    /// The "not my shape, try the next converter" signal.
    pub fn skip() -> Self {
        Self::Skip
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

/// Per-call conversion policy, carried from the call site (or from
/// `#[property(...)]` attributes) down through recursive conversions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionOptions {
    /// Delimiter override for array/collection splitting. `None` means
    /// [`DEFAULT_DELIMITER`].
    pub delimiter: Option<String>,
    /// Discard empty tokens produced by delimiter splitting.
    pub strip_empty: bool,
    /// chrono format pattern for date/time targets.
    pub datetime_format: Option<String>,
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn strip_empty(mut self, strip_empty: bool) -> Self {
        self.strip_empty = strip_empty;
        self
    }

    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_format = Some(format.into());
        self
    }
}

/// Immutable context for one conversion call.
///
/// Created per dispatch pass and discarded afterwards; recursive
/// conversions go back through the root converter with a narrowed target.
pub struct ConversionContext<'a> {
    value: &'a str,
    target: &'a TargetType,
    options: &'a ConversionOptions,
    root: &'a RootConverter,
}

impl<'a> ConversionContext<'a> {
    pub(crate) fn new(
        value: &'a str,
        target: &'a TargetType,
        options: &'a ConversionOptions,
        root: &'a RootConverter,
    ) -> Self {
        Self {
            value,
            target,
            options,
            root,
        }
    }

    /// The raw string value being converted.
    pub fn value(&self) -> &str {
        self.value
    }

    /// The requested target type.
    pub fn target(&self) -> &TargetType {
        self.target
    }

    /// The conversion policy in effect.
    pub fn options(&self) -> &ConversionOptions {
        self.options
    }

    /// Re-enter the dispatcher for an element value with a narrowed
    /// target, keeping the current options in effect.
    pub fn convert_child(
        &self,
        value: &str,
        target: &TargetType,
    ) -> Result<PropValue, ConversionError> {
        self.root.convert_with_options(value, target, self.options)
    }
}

/// A single type-specific converter.
///
/// Implementations are stateless value objects; one instance may be
/// shared by any number of threads.
pub trait Converter: Send + Sync {
    /// Whether this converter handles the given target type. Consulted in
    /// registration order by the dispatcher.
    fn can_convert(&self, target: &TargetType) -> bool;

    /// Convert the context's value to its target type, or signal
    /// [`ConversionResult::Skip`] when the exact shape is not handled.
    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError>;
}
