//! The root dispatcher all conversion requests route through.

use std::sync::Arc;

use tracing::trace;

use super::converters::{
    ArrayConverter, DateTimeConverter, DurationConverter, EnumConverter, ListConverter,
    OptionalConverter, PrimitiveConverter, PropertiesConverter, SetConverter,
};
use super::{ConversionContext, ConversionOptions, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Ordered, first-match conversion dispatcher.
///
/// Converters registered earlier win. A converter may accept a coarse
/// type and still produce [`ConversionResult::Skip`] for an exact shape
/// it does not handle, in which case dispatch continues down the chain.
/// `String` targets never reach the chain: the raw value is returned
/// as-is.
///
/// Registration happens during composition only; dispatch itself is
/// `&self` and safe to share across threads.
pub struct RootConverter {
    converters: Vec<Arc<dyn Converter>>,
}

impl RootConverter {
    /// An empty dispatcher with no registered converters.
    pub fn empty() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// A dispatcher pre-loaded with the built-in converters, in the
    /// default order: primitives, list, set, array, optional, enum,
    /// date/time, duration, properties.
    pub fn with_defaults() -> Self {
        let mut root = Self::empty();
        root.register(Arc::new(PrimitiveConverter));
        root.register(Arc::new(ListConverter::new()));
        root.register(Arc::new(SetConverter::new()));
        root.register(Arc::new(ArrayConverter));
        root.register(Arc::new(OptionalConverter));
        root.register(Arc::new(EnumConverter));
        root.register(Arc::new(DateTimeConverter));
        root.register(Arc::new(DurationConverter));
        root.register(Arc::new(PropertiesConverter));
        root
    }

    /// Append a converter to the end of the chain.
    pub fn register(&mut self, converter: Arc<dyn Converter>) {
        self.converters.push(converter);
    }

    /// Whether any registered converter accepts the target type.
    pub fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Raw(RawKind::String))
            || self.converters.iter().any(|c| c.can_convert(target))
    }

    /// Convert `value` to `target` with default options.
    pub fn convert(&self, value: &str, target: &TargetType) -> Result<PropValue, ConversionError> {
        self.convert_with_options(value, target, &ConversionOptions::default())
    }

    /// Convert `value` to `target` under the given options.
    pub fn convert_with_options(
        &self,
        value: &str,
        target: &TargetType,
        options: &ConversionOptions,
    ) -> Result<PropValue, ConversionError> {
        // No conversion needed for string targets.
        if matches!(target, TargetType::Raw(RawKind::String)) {
            return Ok(PropValue::Str(value.to_string()));
        }

        let ctx = ConversionContext::new(value, target, options, self);
        for converter in &self.converters {
            if !converter.can_convert(target) {
                continue;
            }

            match converter.convert(&ctx)? {
                ConversionResult::Converted(converted) => {
                    trace!(target = %target, "converted value");
                    return Ok(converted);
                }
                ConversionResult::Skip => {
                    trace!(target = %target, "converter skipped, trying next");
                    continue;
                }
            }
        }

        Err(ConversionError::UnsupportedTargetType(target.to_string()))
    }
}

impl Default for RootConverter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
