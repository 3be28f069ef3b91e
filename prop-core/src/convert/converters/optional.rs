use crate::convert::{ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts values to an optional-wrapped value.
///
/// The wrapped type follows the same defaulting rule as the element
/// types of arrays and collections: a missing parameter, `Any`, or a
/// wildcard means the original string is wrapped; an unresolved type
/// variable is rejected. An empty input converts to `None`, not an
/// empty string.
pub struct OptionalConverter;

impl Converter for OptionalConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        target.raw() == Some(RawKind::Optional)
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        let string_inner = TargetType::Raw(RawKind::String);
        let inner = match ctx.target() {
            TargetType::Raw(RawKind::Optional) => &string_inner,
            TargetType::Parameterized {
                raw: RawKind::Optional,
                args,
            } => args.first().unwrap_or(&string_inner),
            _ => return Ok(ConversionResult::skip()),
        };

        if inner.is_type_var() {
            return Err(ConversionError::UnresolvedTypeVariable(
                ctx.target().to_string(),
            ));
        }

        if ctx.value().is_empty() {
            return Ok(ConversionResult::of(PropValue::Optional(None)));
        }

        let converted = if inner.defaults_to_string() {
            PropValue::Str(ctx.value().to_string())
        } else {
            ctx.convert_child(ctx.value(), inner)?
        };

        Ok(ConversionResult::of(PropValue::Optional(Some(Box::new(
            converted,
        )))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::RootConverter;

    fn root() -> RootConverter {
        RootConverter::with_defaults()
    }

    #[test]
    fn test_wraps_recursively_converted_value() {
        let target = TargetType::optional_of(TargetType::Raw(RawKind::F64));
        let value = root().convert("2.5", &target).unwrap();
        assert_eq!(
            value,
            PropValue::Optional(Some(Box::new(PropValue::F64(2.5))))
        );
    }

    #[test]
    fn test_empty_value_is_none() {
        let target = TargetType::optional_of(TargetType::Raw(RawKind::String));
        assert_eq!(root().convert("", &target).unwrap(), PropValue::Optional(None));
    }

    #[test]
    fn test_missing_parameter_defaults_to_string() {
        let target = TargetType::Raw(RawKind::Optional);
        let value = root().convert("keep", &target).unwrap();
        assert_eq!(
            value,
            PropValue::Optional(Some(Box::new(PropValue::Str("keep".into()))))
        );
    }

    #[test]
    fn test_wildcard_and_any_default_to_string() {
        for inner in [TargetType::Wildcard, TargetType::Raw(RawKind::Any)] {
            let target = TargetType::optional_of(inner);
            let value = root().convert("raw", &target).unwrap();
            assert_eq!(
                value,
                PropValue::Optional(Some(Box::new(PropValue::Str("raw".into()))))
            );
        }
    }

    #[test]
    fn test_type_variable_parameter_is_rejected() {
        let target = TargetType::optional_of(TargetType::TypeVar("T".into()));
        let err = root().convert("x", &target).unwrap_err();
        assert!(matches!(err, ConversionError::UnresolvedTypeVariable(_)));
    }

    #[test]
    fn test_nested_parameterized_inner_type() {
        let target = TargetType::optional_of(TargetType::list_of(TargetType::Raw(RawKind::I32)));
        let value = root().convert("1,2", &target).unwrap();
        assert_eq!(
            value,
            PropValue::Optional(Some(Box::new(PropValue::List(vec![
                PropValue::I32(1),
                PropValue::I32(2)
            ]))))
        );
    }
}
