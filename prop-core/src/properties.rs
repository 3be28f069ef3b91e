//! The property facade and its builder.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::convert::{ConversionOptions, Converter, RootConverter, TargetType};
use crate::error::{PropError, PropResult};
use crate::expansion::VariableExpander;
use crate::processing::{Processor, ProcessorChain};
use crate::resolvers::{CompositeResolver, Resolver};
use crate::value::{PropType, PropValue};

/// Entry point: resolves property names through a source chain, runs
/// post-processing, and converts values through the dispatcher.
///
/// Built once via [`PropertiesBuilder`], then shared freely across
/// threads; every operation is `&self`.
pub struct Properties {
    resolver: CompositeResolver,
    processors: ProcessorChain,
    converter: RootConverter,
    expander: Option<VariableExpander>,
    preloaded: HashMap<String, String>,
    cache: Option<ResolutionCache>,
}

impl std::fmt::Debug for Properties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Properties").finish_non_exhaustive()
    }
}

struct ResolutionCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl Properties {
    pub fn builder() -> PropertiesBuilder {
        PropertiesBuilder::new()
    }

    /// Resolve a property to its raw (post-processed) string value.
    ///
    /// `${...}` references in the name are expanded first, then the
    /// source chain is consulted, then processors run over the value.
    pub fn resolve(&self, name: &str) -> PropResult<String> {
        let name = self.expand_name(name)?;

        if let Some(value) = self.preloaded.get(&name) {
            return Ok(value.clone());
        }

        if let Some(cache) = &self.cache {
            let entries = cache.entries.read();
            if let Some((value, cached_at)) = entries.get(&name) {
                if cached_at.elapsed() < cache.ttl {
                    return Ok(value.clone());
                }
            }
        }

        let value = self.resolve_uncached(&name)?;

        if let Some(cache) = &self.cache {
            cache
                .entries
                .write()
                .insert(name, (value.clone(), Instant::now()));
        }

        Ok(value)
    }

    /// Resolve a property, falling back to `default` when no source has it.
    pub fn resolve_or(&self, name: &str, default: &str) -> PropResult<String> {
        match self.resolve(name) {
            Ok(value) => Ok(value),
            Err(PropError::Unresolved(_)) => Ok(default.to_string()),
            Err(e) => Err(e),
        }
    }

    /// Resolve and convert a property to a typed value.
    pub fn resolve_as<T: PropType>(&self, name: &str) -> PropResult<T> {
        self.resolve_as_with(name, &ConversionOptions::default())
    }

    /// Resolve and convert a property under explicit conversion options.
    pub fn resolve_as_with<T: PropType>(
        &self,
        name: &str,
        options: &ConversionOptions,
    ) -> PropResult<T> {
        let raw = self.resolve(name)?;
        let value = self
            .converter
            .convert_with_options(&raw, &T::target_type(), options)?;
        Ok(T::from_value(value)?)
    }

    /// Convert an already-resolved value through the dispatcher.
    pub fn convert(&self, value: &str, target: &TargetType) -> PropResult<PropValue> {
        Ok(self.converter.convert(value, target)?)
    }

    /// Convert an already-resolved value under explicit options.
    pub fn convert_with_options(
        &self,
        value: &str,
        target: &TargetType,
        options: &ConversionOptions,
    ) -> PropResult<PropValue> {
        Ok(self.converter.convert_with_options(value, target, options)?)
    }

    /// The underlying conversion dispatcher.
    pub fn converter(&self) -> &RootConverter {
        &self.converter
    }

    fn expand_name(&self, name: &str) -> PropResult<String> {
        match &self.expander {
            Some(expander) => Ok(expander.expand(name, &self.resolver)?),
            None => Ok(name.to_string()),
        }
    }

    fn resolve_uncached(&self, name: &str) -> PropResult<String> {
        let raw = self
            .resolver
            .resolve(name)?
            .ok_or_else(|| PropError::Unresolved(name.to_string()))?;
        debug!(name, "property resolved");
        Ok(self.processors.process(raw)?)
    }
}

/// Builder for [`Properties`].
///
/// At least one resolver is required; the built-in converters are
/// registered unless explicitly disabled.
pub struct PropertiesBuilder {
    resolvers: Vec<Arc<dyn Resolver>>,
    processors: Vec<Arc<dyn Processor>>,
    converters: Vec<Arc<dyn Converter>>,
    default_converters: bool,
    expander: Option<VariableExpander>,
    expansion_enabled: bool,
    cache_ttl: Option<Duration>,
    eager_keys: Vec<String>,
}

impl PropertiesBuilder {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
            processors: Vec::new(),
            converters: Vec::new(),
            default_converters: true,
            expander: None,
            expansion_enabled: true,
            cache_ttl: None,
            eager_keys: Vec::new(),
        }
    }

    /// Append a property source to the resolution chain.
    pub fn with_resolver<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    /// Append a post-resolution processor.
    pub fn with_processor<P: Processor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Arc::new(processor));
        self
    }

    /// Register an additional converter after the defaults.
    pub fn with_converter<C: Converter + 'static>(mut self, converter: C) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    /// Skip registering the built-in converters.
    pub fn without_default_converters(mut self) -> Self {
        self.default_converters = false;
        self
    }

    /// Replace the default `${...}` expander.
    pub fn with_expander(mut self, expander: VariableExpander) -> Self {
        self.expander = Some(expander);
        self
    }

    /// Turn variable expansion of property names on or off.
    pub fn with_expansion(mut self, enabled: bool) -> Self {
        self.expansion_enabled = enabled;
        self
    }

    /// Cache resolved values for `ttl` before consulting sources again.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Resolve the given properties once at build time. Unknown names
    /// fail the build instead of the first access.
    pub fn eager_load<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eager_keys.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> PropResult<Properties> {
        if self.resolvers.is_empty() {
            return Err(PropError::Configuration(
                "at least one resolver is required".to_string(),
            ));
        }

        let mut converter = if self.default_converters {
            RootConverter::with_defaults()
        } else {
            RootConverter::empty()
        };
        for c in self.converters {
            converter.register(c);
        }

        let mut processors = ProcessorChain::new();
        for p in self.processors {
            processors.register(p);
        }

        let expander = if self.expansion_enabled {
            Some(self.expander.unwrap_or_default())
        } else {
            None
        };

        let mut properties = Properties {
            resolver: CompositeResolver::from_resolvers(self.resolvers),
            processors,
            converter,
            expander,
            preloaded: HashMap::new(),
            cache: self.cache_ttl.map(|ttl| ResolutionCache {
                ttl,
                entries: RwLock::new(HashMap::new()),
            }),
        };

        if !self.eager_keys.is_empty() {
            let mut preloaded = HashMap::new();
            for name in &self.eager_keys {
                let name = properties.expand_name(name)?;
                let value = properties.resolve_uncached(&name)?;
                preloaded.insert(name, value);
            }
            properties.preloaded = preloaded;
        }

        Ok(properties)
    }
}

impl Default for PropertiesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
