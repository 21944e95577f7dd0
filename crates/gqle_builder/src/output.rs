//! Build output and the request body handed to a transport.

use crate::error::BuildResult;
use crate::variables::Variables;
use gqle_core::{strip_whitespace, DiagnosticBag};
use serde::Serialize;

/// The result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltOperation {
    query: String,
    variables: Variables,
    operation_name: Option<String>,
    diagnostics: DiagnosticBag,
}

impl BuiltOperation {
    pub(crate) fn new(
        query: String,
        variables: Variables,
        operation_name: Option<String>,
        diagnostics: DiagnosticBag,
    ) -> Self {
        Self {
            query,
            variables,
            operation_name,
            diagnostics,
        }
    }

    /// The query text, newline-delimited without indentation.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The query text with all whitespace removed.
    #[must_use]
    pub fn compact_query(&self) -> String {
        strip_whitespace(&self.query)
    }

    #[must_use]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    #[must_use]
    pub fn operation_name(&self) -> Option<&str> {
        self.operation_name.as_deref()
    }

    /// Warnings recorded under `Policy::Warn`.
    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Splits into query text and variables.
    #[must_use]
    pub fn into_parts(self) -> (String, Variables) {
        (self.query, self.variables)
    }

    /// The JSON request body for an HTTP transport.
    #[must_use]
    pub fn to_request(&self) -> GraphQLRequest {
        GraphQLRequest {
            query: self.query.clone(),
            variables: (!self.variables.is_empty()).then(|| self.variables.clone()),
            operation_name: self.operation_name.clone(),
        }
    }

    /// Serializes [`Self::to_request`] to a JSON string.
    pub fn to_json(&self) -> BuildResult<String> {
        Ok(serde_json::to_string(&self.to_request())?)
    }
}

/// A GraphQL-over-HTTP request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}
