//! Mapping from Rust value types to GraphQL scalar type literals.

use crate::value::{GraphId, Value};
use chrono::{DateTime, Utc};
use std::fmt;

/// The scalar family a Rust type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Text,
    Float,
    Int,
    DateTime,
    Id,
    /// A type with no GraphQL mapping, carrying its Rust name.
    Other(&'static str),
}

/// The declared type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    pub kind: ScalarKind,
    pub nullable: bool,
}

impl DeclaredType {
    /// A non-nullable declared type.
    #[must_use]
    pub const fn required(kind: ScalarKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// A nullable declared type.
    #[must_use]
    pub const fn nullable(kind: ScalarKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }

    /// Returns the nullable form of this type.
    #[must_use]
    pub const fn into_nullable(self) -> Self {
        Self::nullable(self.kind)
    }
}

/// A GraphQL type literal as written in a variable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLiteral {
    /// A literal from the mapping table.
    Mapped(&'static str),
    /// No mapping exists; renders as `String`.
    Fallback { declared: &'static str },
    /// A literal supplied by the caller.
    Custom(String),
}

impl TypeLiteral {
    /// The literal used when a type has no mapping.
    pub const FALLBACK: &'static str = "String";

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mapped(literal) => *literal,
            Self::Fallback { .. } => Self::FALLBACK,
            Self::Custom(literal) => literal.as_str(),
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl fmt::Display for TypeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a declared type to its GraphQL literal. Total: unmapped kinds yield
/// [`TypeLiteral::Fallback`].
#[must_use]
pub fn map_type(declared: DeclaredType) -> TypeLiteral {
    let literal = match (declared.kind, declared.nullable) {
        (ScalarKind::Text, false) => "String!",
        (ScalarKind::Text, true) => "String",
        (ScalarKind::Float, false) => "Float!",
        (ScalarKind::Float, true) => "Float",
        (ScalarKind::Int, false) => "Int!",
        (ScalarKind::Int, true) => "Int",
        (ScalarKind::DateTime, false) => "Date!",
        (ScalarKind::DateTime, true) => "Date",
        (ScalarKind::Id, false) => "ID!",
        (ScalarKind::Id, true) => "ID",
        (ScalarKind::Other(declared), _) => return TypeLiteral::Fallback { declared },
    };
    TypeLiteral::Mapped(literal)
}

/// A Rust type usable as a scalar parameter value.
pub trait ScalarInput {
    /// The declared type used for the variable definition.
    fn declared_type() -> DeclaredType;

    /// Converts into a runtime value.
    fn into_value(self) -> Value;
}

macro_rules! impl_scalar_input {
    ($kind:expr, $variant:ident, $($ty:ty),+ $(,)?) => {
        $(
            impl ScalarInput for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::required($kind)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self.into())
                }
            }
        )+
    };
}

impl_scalar_input!(ScalarKind::Text, Text, String, &str);
impl_scalar_input!(ScalarKind::Int, Int, i8, i16, i32, i64, u8, u16, u32);
impl_scalar_input!(ScalarKind::Float, Float, f32, f64);
impl_scalar_input!(ScalarKind::DateTime, Date, DateTime<Utc>);
impl_scalar_input!(ScalarKind::Id, Id, GraphId);
impl_scalar_input!(ScalarKind::Other("bool"), Boolean, bool);

impl<T: ScalarInput> ScalarInput for Option<T> {
    fn declared_type() -> DeclaredType {
        T::declared_type().into_nullable()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, T::into_value)
    }
}

/// Returns the literal for a Rust type.
#[must_use]
pub fn literal_of<T: ScalarInput>() -> TypeLiteral {
    map_type(T::declared_type())
}
