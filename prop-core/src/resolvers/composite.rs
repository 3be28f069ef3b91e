use std::sync::Arc;

use tracing::trace;

use super::Resolver;
use crate::error::ResolveError;

/// Ordered chain of resolvers; the first source with a value wins.
///
/// Source errors propagate immediately instead of falling through, so a
/// broken source is never silently shadowed by a later one.
pub struct CompositeResolver {
    resolvers: Vec<Arc<dyn Resolver>>,
}

impl CompositeResolver {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    pub fn from_resolvers(resolvers: Vec<Arc<dyn Resolver>>) -> Self {
        Self { resolvers }
    }

    /// Append a resolver to the end of the chain.
    pub fn push(&mut self, resolver: Arc<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl Default for CompositeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for CompositeResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        for (index, resolver) in self.resolvers.iter().enumerate() {
            if let Some(value) = resolver.resolve(name)? {
                trace!(name, source_index = index, "property resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolvers::MapResolver;

    #[test]
    fn test_first_source_wins() {
        let mut composite = CompositeResolver::new();
        composite.push(Arc::new(MapResolver::from_iter([("k", "first")])));
        composite.push(Arc::new(MapResolver::from_iter([("k", "second"), ("only", "2nd")])));

        assert_eq!(composite.resolve("k").unwrap().as_deref(), Some("first"));
        assert_eq!(composite.resolve("only").unwrap().as_deref(), Some("2nd"));
        assert_eq!(composite.resolve("none").unwrap(), None);
    }
}
