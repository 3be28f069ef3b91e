//! Property sources.
//!
//! A [`Resolver`] maps a property name to a raw string value. Resolvers
//! compose: [`CompositeResolver`] chains them in order,
//! [`CachingResolver`] decorates any of them with a TTL cache.

mod caching;
mod composite;
mod env;
mod file;
mod map;

pub use caching::CachingResolver;
pub use composite::CompositeResolver;
pub use env::EnvResolver;
pub use file::FileResolver;
pub use map::MapResolver;

use crate::error::ResolveError;

/// A single property source.
///
/// `Ok(None)` means "not found here" and lets composition move on to the
/// next source; errors mean the source itself failed and propagate.
pub trait Resolver: Send + Sync {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError>;
}
