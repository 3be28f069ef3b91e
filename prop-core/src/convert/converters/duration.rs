use std::time::Duration;

use crate::convert::{ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts values to a [`Duration`].
///
/// Plain integers are read as milliseconds; anything else goes through
/// humantime (`"1h 30m"`, `"250ms"`, `"2s"`).
pub struct DurationConverter;

impl Converter for DurationConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Raw(RawKind::Duration))
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        if !matches!(ctx.target(), TargetType::Raw(RawKind::Duration)) {
            return Ok(ConversionResult::skip());
        }

        let value = ctx.value();
        let duration = if value.bytes().all(|b| b.is_ascii_digit()) && !value.is_empty() {
            let millis: u64 = value
                .parse()
                .map_err(|e| ConversionError::invalid_with("Duration", value, e))?;
            Duration::from_millis(millis)
        } else {
            humantime::parse_duration(value)
                .map_err(|e| ConversionError::invalid_with("Duration", value, e))?
        };

        Ok(ConversionResult::of(PropValue::Duration(duration)))
    }
}
