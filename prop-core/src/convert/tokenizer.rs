//! Delimiter splitting for array/collection conversion.

use super::{ConversionOptions, DEFAULT_DELIMITER};

/// Split `value` on the delimiter in effect, preserving empty tokens
/// unless the strip-empty policy is set.
pub fn tokenize<'a>(value: &'a str, options: &ConversionOptions) -> Vec<&'a str> {
    let delimiter = options.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER);

    let tokens = value.split(delimiter);
    if options.strip_empty {
        tokens.filter(|token| !token.is_empty()).collect()
    } else {
        tokens.collect()
    }
}
