//! # prop-core: externalized configuration properties
//!
//! prop-core resolves named properties from pluggable sources
//! (environment variables, maps, `.properties` files), optionally
//! expands `${...}` references and post-processes values (e.g. base64
//! decoding), and converts the resulting strings into typed values:
//! primitives, enums, date/times, durations, collections, optionals,
//! and nested combinations of these.
//!
//! ## Quick start
//!
//! ```rust
//! use prop_core::{Properties, resolvers::MapResolver};
//!
//! let props = Properties::builder()
//!     .with_resolver(MapResolver::from_iter([
//!         ("app.name", "demo"),
//!         ("app.ports", "8080,8081"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! let name: String = props.resolve_as("app.name").unwrap();
//! let ports: Vec<u16> = props.resolve_as("app.ports").unwrap();
//! assert_eq!(name, "demo");
//! assert_eq!(ports, vec![8080, 8081]);
//! ```
//!
//! ## Conversion engine
//!
//! Conversion is driven by runtime [`TargetType`] descriptors and an
//! ordered chain of [`Converter`]s: the first converter accepting a
//! target type runs, a converter may skip shapes it does not handle,
//! and nested shapes (`Vec<Option<i32>>`, arrays of parameterized
//! types) recurse back through the dispatcher. Compile-time callers use
//! [`PropType`] (or the `prop-macros` derives) instead of building
//! descriptors by hand.
//!
//! Everything is synchronous and stateless: one [`Properties`] instance
//! can be shared across threads without coordination.

pub mod convert;
pub mod error;
pub mod expansion;
pub mod processing;
pub mod properties;
pub mod resolvers;
pub mod value;

pub use convert::{
    ConversionContext, ConversionOptions, ConversionResult, Converter, DateTimeKind, EnumSpec,
    RawKind, RootConverter, TargetType,
};
pub use error::{
    ConversionError, ExpansionError, ProcessingError, PropError, PropResult, ResolveError,
};
pub use expansion::VariableExpander;
pub use processing::{Base64Processor, Processor, ProcessorChain};
pub use properties::{Properties, PropertiesBuilder};
pub use resolvers::{
    CachingResolver, CompositeResolver, EnvResolver, FileResolver, MapResolver, Resolver,
};
pub use value::{DateTimeValue, PropType, PropValue};
