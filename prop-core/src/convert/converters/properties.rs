use std::collections::HashMap;

use crate::convert::{ConversionContext, ConversionResult, Converter, RawKind, TargetType};
use crate::error::ConversionError;
use crate::value::PropValue;

/// Converts a `key=value` text block to a properties map.
///
/// The text format is the JDK `Properties` format: `#`/`!` comment
/// lines, `=`/`:`/whitespace key separators, backslash line
/// continuations, and `\t`/`\n`/`\r`/`\f`/`\uXXXX` escapes. Malformed
/// unicode escapes degrade to the literal characters instead of failing
/// the whole block.
pub struct PropertiesConverter;

impl Converter for PropertiesConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Raw(RawKind::Properties))
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        if !matches!(ctx.target(), TargetType::Raw(RawKind::Properties)) {
            return Ok(ConversionResult::skip());
        }

        Ok(ConversionResult::of(PropValue::Properties(parse_properties(
            ctx.value(),
        ))))
    }
}

/// Parse properties-format text into a key/value map.
///
/// Later occurrences of a key overwrite earlier ones.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in logical_lines(text) {
        let (key, value) = split_key_value(&line);
        if !key.is_empty() {
            map.insert(key, value);
        }
    }
    map
}

/// Join natural lines into logical lines: a line ending in an odd number
/// of backslashes continues on the next line, whose leading whitespace is
/// dropped. Comment and blank lines are filtered out.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for natural in text.lines() {
        let line = if continuing {
            natural.trim_start()
        } else {
            let trimmed = natural.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            natural
        };

        let trailing_backslashes = line.chars().rev().take_while(|c| *c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }
    if continuing {
        // Trailing continuation at end of input.
        lines.push(current);
    }

    lines
}

/// Split one logical line into an unescaped key and value.
fn split_key_value(line: &str) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }

    let mut key = String::new();
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 1;
            if i < chars.len() {
                push_escaped(&mut key, &chars, &mut i);
            }
        } else if c == '=' || c == ':' {
            i += 1;
            break;
        } else if c.is_whitespace() {
            // Whitespace terminates the key; an optional single '=' or ':'
            // may follow it.
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            if i < chars.len() && (chars[i] == '=' || chars[i] == ':') {
                i += 1;
            }
            break;
        } else {
            key.push(c);
            i += 1;
        }
    }

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }

    let mut value = String::new();
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 1;
            if i < chars.len() {
                push_escaped(&mut value, &chars, &mut i);
            }
        } else {
            value.push(c);
            i += 1;
        }
    }

    (key, value)
}

/// Append the escape sequence starting at `chars[*i]` (the character
/// after the backslash), advancing `*i` past it.
fn push_escaped(buf: &mut String, chars: &[char], i: &mut usize) {
    match chars[*i] {
        't' => {
            buf.push('\t');
            *i += 1;
        }
        'n' => {
            buf.push('\n');
            *i += 1;
        }
        'r' => {
            buf.push('\r');
            *i += 1;
        }
        'f' => {
            buf.push('\u{000C}');
            *i += 1;
        }
        'u' => {
            let hex: String = chars.iter().skip(*i + 1).take(4).collect();
            let decoded = if hex.len() == 4 {
                u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
            } else {
                None
            };
            match decoded {
                Some(c) => {
                    buf.push(c);
                    *i += 5;
                }
                None => {
                    buf.push('u');
                    *i += 1;
                }
            }
        }
        other => {
            buf.push(other);
            *i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::RootConverter;

    #[test]
    fn test_separators_and_comments() {
        let map = parse_properties(
            "# comment\n! also a comment\napp.name=demo\napp.mode: dev\napp.flag yes\n\n",
        );
        assert_eq!(map.get("app.name").unwrap(), "demo");
        assert_eq!(map.get("app.mode").unwrap(), "dev");
        assert_eq!(map.get("app.flag").unwrap(), "yes");
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_line_continuation() {
        let map = parse_properties("fruits=apple, \\\n    banana, \\\n    cherry\n");
        assert_eq!(map.get("fruits").unwrap(), "apple, banana, cherry");
    }

    #[test]
    fn test_escapes() {
        let map = parse_properties("tabbed=a\\tb\npath=C\\:\\\\dir\nkey\\ with\\ space=v\n");
        assert_eq!(map.get("tabbed").unwrap(), "a\tb");
        assert_eq!(map.get("path").unwrap(), "C:\\dir");
        assert_eq!(map.get("key with space").unwrap(), "v");
    }

    #[test]
    fn test_unicode_escape() {
        let map = parse_properties("greeting=caf\\u00e9\nbad=\\u00zz\n");
        assert_eq!(map.get("greeting").unwrap(), "café");
        assert_eq!(map.get("bad").unwrap(), "u00zz");
    }

    #[test]
    fn test_key_without_value() {
        let map = parse_properties("lonely=\njust.key\n");
        assert_eq!(map.get("lonely").unwrap(), "");
        assert_eq!(map.get("just.key").unwrap(), "");
    }

    #[test]
    fn test_converter_dispatch() {
        let root = RootConverter::with_defaults();
        let value = root
            .convert("a=1\nb=2\n", &TargetType::Raw(RawKind::Properties))
            .unwrap();
        let PropValue::Properties(map) = value else {
            panic!("expected properties value");
        };
        assert_eq!(map.get("a").unwrap(), "1");
        assert_eq!(map.get("b").unwrap(), "2");
    }
}
