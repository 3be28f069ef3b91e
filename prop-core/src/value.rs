//! Dynamically-typed conversion output and the typed bridge.
//!
//! Converters are driven by runtime [`TargetType`] descriptors, so their
//! output is the tagged [`PropValue`] union. Compile-time callers go
//! through [`PropType`], which pairs a Rust type with the descriptor that
//! produces it and the extraction back out of the union.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

use crate::convert::{DateTimeKind, RawKind, TargetType};
use crate::error::ConversionError;

/// A converted property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// A validated enum variant name.
    Enum {
        type_name: &'static str,
        variant: String,
    },
    DateTime(DateTimeValue),
    Duration(Duration),
    List(Vec<PropValue>),
    /// Order-preserving set (first occurrence wins).
    Set(Vec<PropValue>),
    Optional(Option<Box<PropValue>>),
    Properties(HashMap<String, String>),
}

/// A converted date/time value, one variant per [`DateTimeKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    DateTimeUtc(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Weekday(Weekday),
    Month(Month),
}

impl PropValue {
    /// The target-type raw kind this value corresponds to, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropValue::Str(_) => "String",
            PropValue::Bool(_) => "bool",
            PropValue::I8(_) => "i8",
            PropValue::I16(_) => "i16",
            PropValue::I32(_) => "i32",
            PropValue::I64(_) => "i64",
            PropValue::U8(_) => "u8",
            PropValue::U16(_) => "u16",
            PropValue::U32(_) => "u32",
            PropValue::U64(_) => "u64",
            PropValue::F32(_) => "f32",
            PropValue::F64(_) => "f64",
            PropValue::Enum { type_name, .. } => type_name,
            PropValue::DateTime(_) => "DateTime",
            PropValue::Duration(_) => "Duration",
            PropValue::List(_) => "List",
            PropValue::Set(_) => "Set",
            PropValue::Optional(_) => "Optional",
            PropValue::Properties(_) => "Properties",
        }
    }
}

/// Bridge between compile-time Rust types and the runtime conversion engine.
///
/// `target_type()` names the descriptor the dispatcher should convert to,
/// and `from_value` extracts the typed result out of the [`PropValue`] the
/// matching converter produced.
pub trait PropType: Sized {
    fn target_type() -> TargetType;

    fn from_value(value: PropValue) -> Result<Self, ConversionError>;
}

macro_rules! scalar_prop_type {
    ($ty:ty, $kind:ident, $variant:ident, $expected:literal) => {
        impl PropType for $ty {
            fn target_type() -> TargetType {
                TargetType::Raw(RawKind::$kind)
            }

            fn from_value(value: PropValue) -> Result<Self, ConversionError> {
                match value {
                    PropValue::$variant(v) => Ok(v),
                    _ => Err(ConversionError::ValueMismatch { expected: $expected }),
                }
            }
        }
    };
}

scalar_prop_type!(bool, Bool, Bool, "bool");
scalar_prop_type!(i8, I8, I8, "i8");
scalar_prop_type!(i16, I16, I16, "i16");
scalar_prop_type!(i32, I32, I32, "i32");
scalar_prop_type!(i64, I64, I64, "i64");
scalar_prop_type!(u8, U8, U8, "u8");
scalar_prop_type!(u16, U16, U16, "u16");
scalar_prop_type!(u32, U32, U32, "u32");
scalar_prop_type!(u64, U64, U64, "u64");
scalar_prop_type!(f32, F32, F32, "f32");
scalar_prop_type!(f64, F64, F64, "f64");
scalar_prop_type!(String, String, Str, "String");
scalar_prop_type!(Duration, Duration, Duration, "Duration");

macro_rules! datetime_prop_type {
    ($ty:ty, $kind:ident, $variant:ident, $expected:literal) => {
        impl PropType for $ty {
            fn target_type() -> TargetType {
                TargetType::Raw(RawKind::DateTime(DateTimeKind::$kind))
            }

            fn from_value(value: PropValue) -> Result<Self, ConversionError> {
                match value {
                    PropValue::DateTime(DateTimeValue::$variant(v)) => Ok(v),
                    _ => Err(ConversionError::ValueMismatch { expected: $expected }),
                }
            }
        }
    };
}

datetime_prop_type!(NaiveDateTime, DateTime, DateTime, "NaiveDateTime");
datetime_prop_type!(DateTime<FixedOffset>, DateTimeOffset, DateTimeOffset, "DateTime<FixedOffset>");
datetime_prop_type!(DateTime<Utc>, DateTimeUtc, DateTimeUtc, "DateTime<Utc>");
datetime_prop_type!(NaiveDate, Date, Date, "NaiveDate");
datetime_prop_type!(NaiveTime, Time, Time, "NaiveTime");
datetime_prop_type!(Weekday, Weekday, Weekday, "Weekday");
datetime_prop_type!(Month, Month, Month, "Month");

impl<T: PropType> PropType for Vec<T> {
    fn target_type() -> TargetType {
        TargetType::list_of(T::target_type())
    }

    fn from_value(value: PropValue) -> Result<Self, ConversionError> {
        match value {
            PropValue::List(items) | PropValue::Set(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            _ => Err(ConversionError::ValueMismatch { expected: "List" }),
        }
    }
}

impl<T: PropType> PropType for Option<T> {
    fn target_type() -> TargetType {
        TargetType::optional_of(T::target_type())
    }

    fn from_value(value: PropValue) -> Result<Self, ConversionError> {
        match value {
            PropValue::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            PropValue::Optional(None) => Ok(None),
            _ => Err(ConversionError::ValueMismatch { expected: "Optional" }),
        }
    }
}

impl PropType for HashMap<String, String> {
    fn target_type() -> TargetType {
        TargetType::Raw(RawKind::Properties)
    }

    fn from_value(value: PropValue) -> Result<Self, ConversionError> {
        match value {
            PropValue::Properties(map) => Ok(map),
            _ => Err(ConversionError::ValueMismatch { expected: "Properties" }),
        }
    }
}
