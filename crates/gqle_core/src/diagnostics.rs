//! Diagnostic reporting for gqle builds.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finding the build tolerated.
///
/// Findings a policy rejects never become diagnostics; they fail the build
/// with an error instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Diagnostic code, see [`codes`].
    pub code: String,
    /// Short title.
    pub title: String,
    /// Detailed message.
    pub message: Option<String>,
    /// Path from the operation root to the offending element,
    /// e.g. `["Dashboard", "chart1", "startDate"]`.
    pub location: Vec<String>,
}

impl Diagnostic {
    /// Creates a new warning diagnostic.
    pub fn warning(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            message: None,
            location: Vec::new(),
        }
    }

    /// Adds a message to the diagnostic.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the location path.
    #[must_use]
    pub fn at<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location = path.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the location rendered as a dotted path, if any.
    #[must_use]
    pub fn location_path(&self) -> Option<String> {
        if self.location.is_empty() {
            None
        } else {
            Some(self.location.join("."))
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.title)?;
        if let Some(path) = self.location_path() {
            write!(f, " at {path}")?;
        }
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

/// A collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Creates a new empty diagnostic bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns an iterator over the diagnostics carrying `code`.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

/// Common diagnostic codes.
pub mod codes {
    pub const UNMAPPED_TYPE: &str = "G0001";
    pub const DUPLICATE_ACTION: &str = "G0002";
    pub const TOKEN_COLLISION: &str = "G0003";
    pub const INVALID_NAME: &str = "G0004";
    pub const UNDECLARED_VARIABLES: &str = "G0005";
    pub const INPUT_NOT_SOLE: &str = "G0010";
    pub const EMPTY_TOKEN: &str = "G0011";
    pub const KIND_MISMATCH: &str = "G0012";
    pub const SERIALIZE: &str = "G0020";
}
