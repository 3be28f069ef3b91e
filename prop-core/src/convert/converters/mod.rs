//! Built-in converters.

mod array;
mod collection;
mod datetime;
mod duration;
mod enums;
mod optional;
mod primitive;
mod properties;

pub use array::ArrayConverter;
pub use collection::{CollectionFactory, ListConverter, SetConverter};
pub use datetime::DateTimeConverter;
pub use duration::DurationConverter;
pub use enums::EnumConverter;
pub use optional::OptionalConverter;
pub use primitive::PrimitiveConverter;
pub use properties::{parse_properties, PropertiesConverter};
