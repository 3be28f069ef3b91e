use std::sync::Arc;

use crate::convert::{tokenizer, ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Assembles converted elements into the final collection value.
///
/// Injected into the list/set converters so callers can plug their own
/// collection shape without touching the splitting/recursion policy.
pub type CollectionFactory = Arc<dyn Fn(Vec<PropValue>) -> PropValue + Send + Sync>;

/// Converts delimited values to list collections.
///
/// Splitting, strip-empty, and element recursion follow the same policy
/// as [`ArrayConverter`](super::ArrayConverter); assembly goes through a
/// pluggable [`CollectionFactory`].
pub struct ListConverter {
    factory: CollectionFactory,
}

impl ListConverter {
    pub fn new() -> Self {
        Self {
            factory: Arc::new(PropValue::List),
        }
    }

    /// Use a custom assembly factory instead of the default `List`.
    pub fn with_factory(factory: CollectionFactory) -> Self {
        Self { factory }
    }
}

impl Default for ListConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for ListConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        target.raw() == Some(RawKind::List)
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        match convert_elements(ctx, RawKind::List)? {
            Some(items) => Ok(ConversionResult::of((self.factory)(items))),
            None => Ok(ConversionResult::skip()),
        }
    }
}

/// Converts delimited values to order-preserving sets.
///
/// Duplicate elements are dropped, first occurrence wins.
pub struct SetConverter {
    factory: CollectionFactory,
}

impl SetConverter {
    pub fn new() -> Self {
        Self {
            factory: Arc::new(|items| {
                let mut deduped: Vec<PropValue> = Vec::with_capacity(items.len());
                for item in items {
                    if !deduped.contains(&item) {
                        deduped.push(item);
                    }
                }
                PropValue::Set(deduped)
            }),
        }
    }

    /// Use a custom assembly factory instead of the default dedup set.
    pub fn with_factory(factory: CollectionFactory) -> Self {
        Self { factory }
    }
}

impl Default for SetConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter for SetConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        target.raw() == Some(RawKind::Set)
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        match convert_elements(ctx, RawKind::Set)? {
            Some(items) => Ok(ConversionResult::of((self.factory)(items))),
            None => Ok(ConversionResult::skip()),
        }
    }
}

/// Shared split-and-recurse policy for the collection shapes.
///
/// Returns `None` when the target is not the expected collection kind so
/// the caller can skip. A raw (un-parameterized) collection target
/// defaults its element type to `String`.
fn convert_elements(
    ctx: &ConversionContext<'_>,
    expected: RawKind,
) -> Result<Option<Vec<PropValue>>, ConversionError> {
    let string_element = TargetType::Raw(RawKind::String);
    let element = match ctx.target() {
        TargetType::Raw(raw) if *raw == expected => &string_element,
        TargetType::Parameterized { raw, args } if *raw == expected => {
            args.first().unwrap_or(&string_element)
        }
        _ => return Ok(None),
    };

    if element.is_type_var() {
        return Err(ConversionError::UnresolvedTypeVariable(
            ctx.target().to_string(),
        ));
    }

    if ctx.value().is_empty() {
        return Ok(Some(Vec::new()));
    }

    let tokens = tokenizer::tokenize(ctx.value(), ctx.options());

    if element.defaults_to_string() {
        return Ok(Some(
            tokens
                .into_iter()
                .map(|token| PropValue::Str(token.to_string()))
                .collect(),
        ));
    }

    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        items.push(ctx.convert_child(token, element)?);
    }
    Ok(Some(items))
}
