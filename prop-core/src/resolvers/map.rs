use std::collections::HashMap;
use std::sync::Arc;

use super::Resolver;
use crate::error::ResolveError;

/// Handler consulted for names missing from the backing map.
pub type UnresolvedHandler = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolver backed by an in-memory map.
pub struct MapResolver {
    properties: HashMap<String, String>,
    unresolved_handler: Option<UnresolvedHandler>,
}

impl MapResolver {
    pub fn new(properties: HashMap<String, String>) -> Self {
        Self {
            properties,
            unresolved_handler: None,
        }
    }

    /// Consult `handler` for names the map does not contain.
    pub fn with_unresolved_handler(mut self, handler: UnresolvedHandler) -> Self {
        self.unresolved_handler = Some(handler);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Resolver for MapResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        if let Some(value) = self.properties.get(name) {
            return Ok(Some(value.clone()));
        }

        match &self.unresolved_handler {
            Some(handler) => Ok(handler(name)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_from_map() {
        let resolver = MapResolver::from_iter([("app.name", "demo")]);
        assert_eq!(resolver.resolve("app.name").unwrap().as_deref(), Some("demo"));
        assert_eq!(resolver.resolve("missing").unwrap(), None);
    }

    #[test]
    fn test_unresolved_handler_fallback() {
        let resolver = MapResolver::from_iter([("a", "1")])
            .with_unresolved_handler(Arc::new(|name| Some(format!("default-{name}"))));
        assert_eq!(resolver.resolve("a").unwrap().as_deref(), Some("1"));
        assert_eq!(
            resolver.resolve("b").unwrap().as_deref(),
            Some("default-b")
        );
    }
}
