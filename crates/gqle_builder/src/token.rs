//! Variable tokens and their allocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The name of a variable, referenced as `$token` in query text and used as
/// the key of the variables map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Token {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Hands out `param1`, `param2`, ... for parameters without an explicit token.
///
/// One allocator serves one request: share it across every parameter that
/// ends up in the same operation or compose operation. Separate allocators
/// never interact, so independent requests may be built on different threads.
#[derive(Debug, Clone, Default)]
pub struct TokenAllocator {
    issued: u64,
}

impl TokenAllocator {
    /// Prefix of every allocated token.
    pub const PREFIX: &'static str = "param";

    /// Creates an allocator whose first token is `param1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.issued += 1;
        Token(format!("{}{}", Self::PREFIX, self.issued))
    }

    /// Uses `explicit` unless it is missing or empty, otherwise allocates.
    pub fn token_or_next(&mut self, explicit: Option<&str>) -> Token {
        match explicit {
            Some(name) if !name.is_empty() => Token::from(name),
            _ => self.next_token(),
        }
    }
}
