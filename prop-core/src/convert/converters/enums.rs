use crate::convert::{ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts values to enum variants by exact name match against the
/// target's [`EnumSpec`](crate::convert::EnumSpec).
pub struct EnumConverter;

impl Converter for EnumConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Raw(RawKind::Enum(_)))
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        let TargetType::Raw(RawKind::Enum(spec)) = ctx.target() else {
            return Ok(ConversionResult::skip());
        };

        let value = ctx.value();
        let Some(variant) = spec.variants.iter().find(|v| **v == value) else {
            return Err(ConversionError::invalid(spec.type_name, value));
        };

        Ok(ConversionResult::of(PropValue::Enum {
            type_name: spec.type_name,
            variant: (*variant).to_string(),
        }))
    }
}
