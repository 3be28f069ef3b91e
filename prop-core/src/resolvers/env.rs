use std::env;

use super::Resolver;
use crate::error::ResolveError;

/// Resolver backed by environment variables.
///
/// Dotted property names map to the conventional environment form:
/// `app.connection-timeout` is looked up as `APP_CONNECTION_TIMEOUT`
/// (after the exact name is tried first). An optional prefix is
/// prepended to the mapped form, so prefix `MYAPP_` resolves
/// `app.timeout` from `MYAPP_APP_TIMEOUT`.
pub struct EnvResolver {
    prefix: Option<String>,
}

impl EnvResolver {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn env_name(&self, name: &str) -> String {
        let mapped = name.to_uppercase().replace(['.', '-'], "_");
        match &self.prefix {
            Some(prefix) => format!("{prefix}{mapped}"),
            None => mapped,
        }
    }
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for EnvResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        let var = |key: &str| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ResolveError::NotUnicode(key.to_string())),
        };

        if self.prefix.is_none() {
            if let Some(value) = var(name)? {
                return Ok(Some(value));
            }
        }
        var(&self.env_name(name))
    }
}

// Test helper: set a variable for the closure's duration only.
#[cfg(test)]
fn with_env_var<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let previous: Option<std::ffi::OsString> = env::var_os(key);
    env::set_var(key, value);
    let result = f();
    match previous {
        Some(v) => env::set_var(key, v),
        None => env::remove_var(key),
    }
    result
}
