use crate::convert::{tokenizer, ConversionContext, ConversionResult, Converter, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts delimited values to arrays.
///
/// The component type may itself be parameterized (`[Option<i32>]`) and is
/// converted by re-entering the dispatcher per token. Unresolved type
/// variables in component position are rejected; `Any`, wildcard, and
/// `String` components take the tokens as-is.
pub struct ArrayConverter;

impl Converter for ArrayConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Array(_))
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        let TargetType::Array(component) = ctx.target() else {
            return Ok(ConversionResult::skip());
        };

        // Do not allow [T].
        if component.is_type_var() {
            return Err(ConversionError::UnresolvedTypeVariable(
                ctx.target().to_string(),
            ));
        }

        if ctx.value().is_empty() {
            return Ok(ConversionResult::of(PropValue::List(Vec::new())));
        }

        let tokens = tokenizer::tokenize(ctx.value(), ctx.options());

        if component.defaults_to_string() {
            let items = tokens
                .into_iter()
                .map(|token| PropValue::Str(token.to_string()))
                .collect();
            return Ok(ConversionResult::of(PropValue::List(items)));
        }

        let mut items = Vec::with_capacity(tokens.len());
        for token in tokens {
            items.push(ctx.convert_child(token, component)?);
        }

        Ok(ConversionResult::of(PropValue::List(items)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConversionOptions, RawKind, RootConverter};

    fn root() -> RootConverter {
        RootConverter::with_defaults()
    }

    #[test]
    fn test_empty_value_yields_empty_array() {
        let target = TargetType::array_of(TargetType::Raw(RawKind::I32));
        assert_eq!(
            root().convert("", &target).unwrap(),
            PropValue::List(Vec::new())
        );
    }

    #[test]
    fn test_empty_tokens_are_preserved_by_default() {
        let target = TargetType::array_of(TargetType::Raw(RawKind::String));
        let value = root().convert("a,,b", &target).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![
                PropValue::Str("a".into()),
                PropValue::Str("".into()),
                PropValue::Str("b".into()),
            ])
        );
    }

    #[test]
    fn test_strip_empty_policy() {
        let target = TargetType::array_of(TargetType::Raw(RawKind::String));
        let options = ConversionOptions::default().strip_empty(true);
        let value = root().convert_with_options("a,,b", &target, &options).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![PropValue::Str("a".into()), PropValue::Str("b".into())])
        );
    }

    #[test]
    fn test_recursive_component_conversion() {
        let target = TargetType::array_of(TargetType::Raw(RawKind::I32));
        let value = root().convert("1,2,3", &target).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![PropValue::I32(1), PropValue::I32(2), PropValue::I32(3)])
        );
    }

    #[test]
    fn test_nested_generic_component() {
        let target = TargetType::array_of(TargetType::optional_of(TargetType::Raw(RawKind::U16)));
        let value = root().convert("8080,9090", &target).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![
                PropValue::Optional(Some(Box::new(PropValue::U16(8080)))),
                PropValue::Optional(Some(Box::new(PropValue::U16(9090)))),
            ])
        );
    }

    #[test]
    fn test_wildcard_component_defaults_to_string() {
        let target = TargetType::array_of(TargetType::Wildcard);
        let value = root().convert("x,y", &target).unwrap();
        assert_eq!(
            value,
            PropValue::List(vec![PropValue::Str("x".into()), PropValue::Str("y".into())])
        );
    }

    #[test]
    fn test_type_variable_component_is_rejected() {
        let target = TargetType::array_of(TargetType::TypeVar("T".into()));
        let err = root().convert("a,b", &target).unwrap_err();
        assert!(matches!(err, ConversionError::UnresolvedTypeVariable(_)));
    }

    #[test]
    fn test_unconvertible_component_type_errors() {
        // Only skipping converters see i32 here, so the recursive dispatch
        // for the component type must fail.
        let mut root = RootConverter::empty();
        root.register(std::sync::Arc::new(ArrayConverter));
        let target = TargetType::array_of(TargetType::Raw(RawKind::I32));
        let err = root.convert("1,2,3", &target).unwrap_err();
        assert!(matches!(err, ConversionError::UnsupportedTargetType(_)));
    }
}
