use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use prop_core::{
    Base64Processor, CachingResolver, CompositeResolver, MapResolver, PropError, Properties,
    ResolveError, Resolver, VariableExpander,
};

/// Test factory functions
fn map_resolver() -> MapResolver {
    MapResolver::from_iter([
        ("app.name", "demo"),
        ("app.secret", "c2VjcmV0"),
        ("env", "prod"),
        ("prod.db.host", "db.internal"),
        ("greeting", "hello ${who}"),
        ("who", "world"),
    ])
}

/// Resolver that counts how many times it is consulted.
struct CountingResolver {
    inner: MapResolver,
    hits: Arc<AtomicUsize>,
}

impl CountingResolver {
    fn new(inner: MapResolver) -> (Self, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                hits: hits.clone(),
            },
            hits,
        )
    }
}

impl Resolver for CountingResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(name)
    }
}

#[test]
fn test_composite_resolution_is_first_source_wins() {
    let primary = MapResolver::from_iter([("shared", "from-primary")]);
    let fallback = MapResolver::from_iter([("shared", "from-fallback"), ("only", "fallback")]);

    let props = Properties::builder()
        .with_resolver(primary)
        .with_resolver(fallback)
        .build()
        .unwrap();

    assert_eq!(props.resolve("shared").unwrap(), "from-primary");
    assert_eq!(props.resolve("only").unwrap(), "fallback");
}

#[test]
fn test_name_expansion_chains_through_sources() {
    let props = Properties::builder()
        .with_resolver(map_resolver())
        .build()
        .unwrap();

    assert_eq!(props.resolve("${env}.db.host").unwrap(), "db.internal");
}

#[test]
fn test_expansion_can_be_disabled() {
    let props = Properties::builder()
        .with_resolver(map_resolver())
        .with_expansion(false)
        .build()
        .unwrap();

    let err = props.resolve("${env}.db.host").unwrap_err();
    assert!(matches!(err, PropError::Unresolved(_)));
}

#[test]
fn test_value_expansion_through_expander() {
    let expander = VariableExpander::default();
    let resolver = map_resolver();

    let raw = resolver.resolve("greeting").unwrap().unwrap();
    assert_eq!(expander.expand(&raw, &resolver).unwrap(), "hello world");
}

#[test]
fn test_base64_processing_decodes_resolved_values() {
    let props = Properties::builder()
        .with_resolver(map_resolver())
        .with_processor(Base64Processor)
        .build()
        .unwrap();

    assert_eq!(props.resolve("app.secret").unwrap(), "secret");
}

#[test]
fn test_caching_resolver_serves_from_cache_within_ttl() {
    let (counting, hits) = CountingResolver::new(map_resolver());
    let caching = CachingResolver::new(Arc::new(counting), Duration::from_secs(60));

    assert_eq!(caching.resolve("app.name").unwrap().as_deref(), Some("demo"));
    assert_eq!(caching.resolve("app.name").unwrap().as_deref(), Some("demo"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Misses are not cached.
    assert_eq!(caching.resolve("absent").unwrap(), None);
    assert_eq!(caching.resolve("absent").unwrap(), None);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn test_facade_cache_avoids_repeated_source_hits() {
    let (counting, hits) = CountingResolver::new(map_resolver());

    let props = Properties::builder()
        .with_resolver(counting)
        .with_cache_ttl(Duration::from_secs(60))
        .build()
        .unwrap();

    assert_eq!(props.resolve("app.name").unwrap(), "demo");
    assert_eq!(props.resolve("app.name").unwrap(), "demo");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_eager_load_pins_values_at_build_time() {
    let (counting, hits) = CountingResolver::new(map_resolver());

    let props = Properties::builder()
        .with_resolver(counting)
        .eager_load(["app.name"])
        .build()
        .unwrap();

    let after_build = hits.load(Ordering::SeqCst);
    assert_eq!(props.resolve("app.name").unwrap(), "demo");
    assert_eq!(props.resolve("app.name").unwrap(), "demo");
    assert_eq!(hits.load(Ordering::SeqCst), after_build);
}

#[test]
fn test_composite_resolver_standalone_ordering() {
    let mut composite = CompositeResolver::new();
    composite.push(Arc::new(MapResolver::from_iter([("k", "first")])));
    composite.push(Arc::new(MapResolver::from_iter([("k", "second")])));

    assert_eq!(composite.resolve("k").unwrap().as_deref(), Some("first"));
    assert_eq!(composite.resolve("missing").unwrap(), None);
}

#[test]
fn test_typed_access_end_to_end() {
    let props = Properties::builder()
        .with_resolver(MapResolver::from_iter([
            ("timeout", "2s"),
            ("replicas", "3"),
            ("hosts", "a.example.com,b.example.com"),
        ]))
        .build()
        .unwrap();

    assert_eq!(
        props.resolve_as::<Duration>("timeout").unwrap(),
        Duration::from_secs(2)
    );
    assert_eq!(props.resolve_as::<u32>("replicas").unwrap(), 3);
    assert_eq!(
        props.resolve_as::<Vec<String>>("hosts").unwrap(),
        vec!["a.example.com".to_string(), "b.example.com".to_string()]
    );
}
