//! Arguments bound to variable tokens.

use crate::scalar::{map_type, DeclaredType, ScalarInput, TypeLiteral};
use crate::token::{Token, TokenAllocator};
use crate::value::Value;

/// A single typed argument bound to a token.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarParameter {
    name: String,
    value: Value,
    declared: DeclaredType,
    token: Token,
    type_literal: Option<String>,
}

impl ScalarParameter {
    /// Creates a parameter with a token taken from `tokens`.
    pub fn new<T: ScalarInput>(
        name: impl Into<String>,
        value: T,
        tokens: &mut TokenAllocator,
    ) -> Self {
        Self::with_token(name, value, tokens.next_token())
    }

    /// Creates a parameter bound to an explicit token. An empty token fails
    /// the build.
    pub fn with_token<T: ScalarInput>(
        name: impl Into<String>,
        value: T,
        token: impl Into<Token>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into_value(),
            declared: T::declared_type(),
            token: token.into(),
            type_literal: None,
        }
    }

    /// Creates a parameter bound to `token`, or to a token taken from
    /// `tokens` when `token` is missing or empty.
    pub fn with_optional_token<T: ScalarInput>(
        name: impl Into<String>,
        value: T,
        token: Option<&str>,
        tokens: &mut TokenAllocator,
    ) -> Self {
        Self::with_token(name, value, tokens.token_or_next(token))
    }

    /// Overrides the mapped type literal, e.g. `Boolean!` or a custom scalar.
    #[must_use]
    pub fn with_type_literal(mut self, literal: impl Into<String>) -> Self {
        self.type_literal = Some(literal.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn declared_type(&self) -> DeclaredType {
        self.declared
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The literal used in the variable definition.
    #[must_use]
    pub fn type_literal(&self) -> TypeLiteral {
        match &self.type_literal {
            Some(literal) => TypeLiteral::Custom(literal.clone()),
            None => map_type(self.declared),
        }
    }

    /// The value as it goes into the variables map.
    pub(crate) fn variable_value(&self) -> Value {
        self.value.clone().unwrap_id()
    }

    pub(crate) fn write_argument(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push_str(":$");
        out.push_str(self.token.as_str());
    }
}

/// An input-object argument whose fields are scalar parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedObjectParameter {
    name: String,
    fields: Vec<ScalarParameter>,
}

impl NestedObjectParameter {
    pub fn new(name: impl Into<String>, fields: impl IntoIterator<Item = ScalarParameter>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Appends an input field.
    #[must_use]
    pub fn with_field(mut self, field: ScalarParameter) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[ScalarParameter] {
        &self.fields
    }
}

/// An action argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Scalar(ScalarParameter),
    NestedObject(NestedObjectParameter),
}

impl Parameter {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(p) => p.name(),
            Self::NestedObject(p) => p.name(),
        }
    }

    /// The scalar parameters carrying tokens: the parameter itself, or the
    /// fields of an input object.
    #[must_use]
    pub fn scalars(&self) -> &[ScalarParameter] {
        match self {
            Self::Scalar(p) => std::slice::from_ref(p),
            Self::NestedObject(p) => p.fields(),
        }
    }

    #[must_use]
    pub fn is_nested_object(&self) -> bool {
        matches!(self, Self::NestedObject(_))
    }
}

impl From<ScalarParameter> for Parameter {
    fn from(p: ScalarParameter) -> Self {
        Self::Scalar(p)
    }
}

impl From<NestedObjectParameter> for Parameter {
    fn from(p: NestedObjectParameter) -> Self {
        Self::NestedObject(p)
    }
}
