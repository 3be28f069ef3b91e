use crate::convert::{ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts values to the primitive scalar types.
///
/// Booleans are lenient: anything other than `true` (case-insensitive)
/// converts to `false`. Numeric parse failures raise a conversion error
/// wrapping the underlying parse failure.
pub struct PrimitiveConverter;

impl Converter for PrimitiveConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(
            target,
            TargetType::Raw(
                RawKind::Bool
                    | RawKind::I8
                    | RawKind::I16
                    | RawKind::I32
                    | RawKind::I64
                    | RawKind::U8
                    | RawKind::U16
                    | RawKind::U32
                    | RawKind::U64
                    | RawKind::F32
                    | RawKind::F64
            )
        )
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        let TargetType::Raw(raw) = ctx.target() else {
            return Ok(ConversionResult::skip());
        };

        let value = ctx.value();
        let converted = match raw {
            RawKind::Bool => PropValue::Bool(value.eq_ignore_ascii_case("true")),
            RawKind::I8 => PropValue::I8(parse(raw, value)?),
            RawKind::I16 => PropValue::I16(parse(raw, value)?),
            RawKind::I32 => PropValue::I32(parse(raw, value)?),
            RawKind::I64 => PropValue::I64(parse(raw, value)?),
            RawKind::U8 => PropValue::U8(parse(raw, value)?),
            RawKind::U16 => PropValue::U16(parse(raw, value)?),
            RawKind::U32 => PropValue::U32(parse(raw, value)?),
            RawKind::U64 => PropValue::U64(parse(raw, value)?),
            RawKind::F32 => PropValue::F32(parse(raw, value)?),
            RawKind::F64 => PropValue::F64(parse(raw, value)?),
            _ => return Ok(ConversionResult::skip()),
        };

        Ok(ConversionResult::of(converted))
    }
}

fn parse<T>(raw: &RawKind, value: &str) -> Result<T, ConversionError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .map_err(|e| ConversionError::invalid_with(raw.to_string(), value, e))
}
