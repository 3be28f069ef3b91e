//! `${...}` variable expansion.

use crate::error::ExpansionError;
use crate::resolvers::Resolver;

const DEFAULT_PREFIX: &str = "${";
const DEFAULT_SUFFIX: &str = "}";

/// Expands `${name}` references in a value against a resolver.
///
/// Expansion restarts from the beginning after each substitution, so
/// variables introduced by a substitution are expanded as well. A
/// dangling prefix (`"${test"`) or an empty name (`"${}"`) is left
/// verbatim; an unresolvable variable is an error.
pub struct VariableExpander {
    prefix: String,
    suffix: String,
}

impl VariableExpander {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Use custom variable markers instead of `${` / `}`.
    pub fn with_markers(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn expand(
        &self,
        value: &str,
        resolver: &dyn Resolver,
    ) -> Result<String, ExpansionError> {
        let mut current = value.to_string();

        loop {
            let Some(start) = current.find(&self.prefix) else {
                return Ok(current);
            };
            let name_start = start + self.prefix.len();
            let Some(name_len) = current[name_start..].find(&self.suffix) else {
                // No end marker, e.g. "${test".
                return Ok(current);
            };
            if name_len == 0 {
                // Empty variable name, e.g. "${}".
                return Ok(current);
            }

            let name = &current[name_start..name_start + name_len];
            let resolved = resolver
                .resolve(name)?
                .ok_or_else(|| ExpansionError::UnresolvedVariable {
                    name: name.to_string(),
                })?;

            current.replace_range(start..name_start + name_len + self.suffix.len(), &resolved);
        }
    }
}

impl Default for VariableExpander {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::MapResolver;

    fn resolver() -> MapResolver {
        MapResolver::from_iter([
            ("env", "prod"),
            ("region", "eu-west"),
            ("site", "${env}.${region}"),
        ])
    }

    #[test]
    fn test_expands_variables() {
        let expander = VariableExpander::new();
        let expanded = expander.expand("${env}.database.url", &resolver()).unwrap();
        assert_eq!(expanded, "prod.database.url");
    }

    #[test]
    fn test_expansion_is_recursive() {
        let expander = VariableExpander::new();
        let expanded = expander.expand("host.${site}", &resolver()).unwrap();
        assert_eq!(expanded, "host.prod.eu-west");
    }

    #[test]
    fn test_dangling_and_empty_markers_are_verbatim() {
        let expander = VariableExpander::new();
        assert_eq!(expander.expand("${test", &resolver()).unwrap(), "${test");
        assert_eq!(expander.expand("a${}b", &resolver()).unwrap(), "a${}b");
        assert_eq!(expander.expand("plain", &resolver()).unwrap(), "plain");
    }

    #[test]
    fn test_unresolved_variable_is_error() {
        let expander = VariableExpander::new();
        let err = expander.expand("${nope}", &resolver()).unwrap_err();
        assert!(matches!(err, ExpansionError::UnresolvedVariable { name } if name == "nope"));
    }

    #[test]
    fn test_custom_markers() {
        let expander = VariableExpander::with_markers("#[", "]");
        let expanded = expander.expand("#[env].url", &resolver()).unwrap();
        assert_eq!(expanded, "prod.url");
    }
}
