//! Target type descriptors.
//!
//! A [`TargetType`] tells the conversion engine what shape a raw string
//! should be converted into. It is a closed variant set instead of a
//! reflective type: converters pattern-match on it, and recursive shapes
//! (`Vec<Option<String>>`, nested arrays) nest descriptors.

use std::fmt;

/// Raw (unparameterized) conversion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RawKind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Enum(EnumSpec),
    DateTime(DateTimeKind),
    Duration,
    List,
    Set,
    Optional,
    Properties,
    /// The "anything goes" target. Element positions default it to `String`.
    Any,
}

/// Runtime description of an enum conversion target: its name and the
/// exact variant names values are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumSpec {
    pub type_name: &'static str,
    pub variants: &'static [&'static str],
}

/// The supported date/time conversion targets (chrono-backed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DateTimeKind {
    /// `chrono::NaiveDateTime`
    DateTime,
    /// `chrono::DateTime<FixedOffset>`
    DateTimeOffset,
    /// `chrono::DateTime<Utc>`
    DateTimeUtc,
    /// `chrono::NaiveDate`
    Date,
    /// `chrono::NaiveTime`
    Time,
    /// `chrono::Weekday`
    Weekday,
    /// `chrono::Month`
    Month,
}

/// A conversion target type.
///
/// Mirrors the shapes converters dispatch on: a raw type, a parameterized
/// container, an array with a component type, an unbounded wildcard, or an
/// unresolved type variable (always rejected at conversion time).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TargetType {
    Raw(RawKind),
    Parameterized { raw: RawKind, args: Vec<TargetType> },
    Array(Box<TargetType>),
    Wildcard,
    TypeVar(String),
}

impl TargetType {
    /// `Vec<element>` target.
    pub fn list_of(element: TargetType) -> Self {
        Self::Parameterized {
            raw: RawKind::List,
            args: vec![element],
        }
    }

    /// Order-preserving set target.
    pub fn set_of(element: TargetType) -> Self {
        Self::Parameterized {
            raw: RawKind::Set,
            args: vec![element],
        }
    }

    /// `Option<element>` target.
    pub fn optional_of(element: TargetType) -> Self {
        Self::Parameterized {
            raw: RawKind::Optional,
            args: vec![element],
        }
    }

    /// Array target with the given component type.
    pub fn array_of(component: TargetType) -> Self {
        Self::Array(Box::new(component))
    }

    /// The raw kind of this target, looking through parameterization.
    pub fn raw(&self) -> Option<RawKind> {
        match self {
            Self::Raw(raw) | Self::Parameterized { raw, .. } => Some(*raw),
            _ => None,
        }
    }

    /// Whether this target is an unresolved type variable.
    pub fn is_type_var(&self) -> bool {
        matches!(self, Self::TypeVar(_))
    }

    /// Whether element positions of this target default to `String`.
    ///
    /// `Any` and unbounded wildcards carry no usable element information,
    /// so converters fall back to the raw string value.
    pub fn defaults_to_string(&self) -> bool {
        matches!(self, Self::Wildcard | Self::Raw(RawKind::Any | RawKind::String))
    }
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RawKind::String => "String",
            RawKind::Bool => "bool",
            RawKind::I8 => "i8",
            RawKind::I16 => "i16",
            RawKind::I32 => "i32",
            RawKind::I64 => "i64",
            RawKind::U8 => "u8",
            RawKind::U16 => "u16",
            RawKind::U32 => "u32",
            RawKind::U64 => "u64",
            RawKind::F32 => "f32",
            RawKind::F64 => "f64",
            RawKind::Enum(spec) => spec.type_name,
            RawKind::DateTime(kind) => {
                return write!(f, "{}", kind);
            }
            RawKind::Duration => "Duration",
            RawKind::List => "List",
            RawKind::Set => "Set",
            RawKind::Optional => "Optional",
            RawKind::Properties => "Properties",
            RawKind::Any => "Any",
        };
        f.write_str(name)
    }
}

impl fmt::Display for DateTimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateTimeKind::DateTime => "NaiveDateTime",
            DateTimeKind::DateTimeOffset => "DateTime<FixedOffset>",
            DateTimeKind::DateTimeUtc => "DateTime<Utc>",
            DateTimeKind::Date => "NaiveDate",
            DateTimeKind::Time => "NaiveTime",
            DateTimeKind::Weekday => "Weekday",
            DateTimeKind::Month => "Month",
        };
        f.write_str(name)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Raw(raw) => write!(f, "{}", raw),
            TargetType::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TargetType::Array(component) => write!(f, "[{}]", component),
            TargetType::Wildcard => write!(f, "?"),
            TargetType::TypeVar(name) => write!(f, "{}", name),
        }
    }
}
