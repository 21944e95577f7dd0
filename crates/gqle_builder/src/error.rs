//! Build errors.

use crate::operation::OperationKind;
use gqle_core::diagnostics::codes;
use miette::Diagnostic;
use thiserror::Error;

/// An error that stops a build.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum BuildError {
    #[error("action `{action}` combines an input object with other arguments")]
    #[diagnostic(
        code(gqle::input_not_sole),
        help("an input object must be the only argument of its action")
    )]
    InputNotSole { action: String },

    #[error("empty variable token at {location}")]
    #[diagnostic(
        code(gqle::empty_token),
        help("name the token, or let `ScalarParameter::with_optional_token` allocate one")
    )]
    EmptyToken { location: String },

    #[error("`{declared}` has no GraphQL scalar mapping at {location}")]
    #[diagnostic(
        code(gqle::unmapped_type),
        help("set the literal explicitly with `ScalarParameter::with_type_literal`")
    )]
    UnmappedType { declared: String, location: String },

    #[error("`{name}` is attached more than once at {location}")]
    #[diagnostic(code(gqle::duplicate_action))]
    DuplicateAction { name: String, location: String },

    #[error("token `${token}` is bound more than once at {location}")]
    #[diagnostic(
        code(gqle::token_collision),
        help("share one `TokenAllocator` across the request or pick distinct explicit tokens")
    )]
    TokenCollision { token: String, location: String },

    #[error("{what} `{name}` is not a valid GraphQL name at {location}")]
    #[diagnostic(code(gqle::invalid_name))]
    InvalidName {
        what: &'static str,
        name: String,
        location: String,
    },

    #[error("sub-operation `{alias}` is a {found} inside a composed {expected}")]
    #[diagnostic(code(gqle::kind_mismatch))]
    KindMismatch {
        alias: String,
        expected: OperationKind,
        found: OperationKind,
    },

    #[error("failed to serialize request: {0}")]
    #[diagnostic(code(gqle::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl BuildError {
    /// The diagnostic code matching this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InputNotSole { .. } => codes::INPUT_NOT_SOLE,
            Self::EmptyToken { .. } => codes::EMPTY_TOKEN,
            Self::UnmappedType { .. } => codes::UNMAPPED_TYPE,
            Self::DuplicateAction { .. } => codes::DUPLICATE_ACTION,
            Self::TokenCollision { .. } => codes::TOKEN_COLLISION,
            Self::InvalidName { .. } => codes::INVALID_NAME,
            Self::KindMismatch { .. } => codes::KIND_MISMATCH,
            Self::Serialize(_) => codes::SERIALIZE,
        }
    }
}

/// Type alias for build results.
pub type BuildResult<T> = std::result::Result<T, BuildError>;
