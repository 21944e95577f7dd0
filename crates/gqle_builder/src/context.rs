//! Per-build state: policy enforcement and diagnostics collection.

use crate::config::{BuildConfig, Policy};
use crate::error::{BuildError, BuildResult};
use crate::parameter::ScalarParameter;
use crate::scalar::TypeLiteral;
use crate::value::Value;
use crate::variables::Variables;
use gqle_core::diagnostics::codes;
use gqle_core::{is_name, Diagnostic, DiagnosticBag};
use tracing::warn;

/// Extends `scope` with `tail` into a location path.
pub(crate) fn locate(scope: &[String], tail: &[&str]) -> Vec<String> {
    scope
        .iter()
        .cloned()
        .chain(tail.iter().map(|s| (*s).to_string()))
        .collect()
}

/// Writes `($token:Type,...)` for `params`; nothing when there are none.
pub(crate) fn write_declarations<'p>(
    out: &mut String,
    params: impl IntoIterator<Item = &'p ScalarParameter>,
) {
    let mut params = params.into_iter().peekable();
    if params.peek().is_none() {
        return;
    }
    out.push('(');
    for (i, param) in params.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('$');
        out.push_str(param.token().as_str());
        out.push(':');
        out.push_str(param.type_literal().as_str());
    }
    out.push(')');
}

/// A scalar parameter together with where it sits in the tree.
pub(crate) type Located<'a> = (Vec<String>, &'a ScalarParameter);

pub(crate) struct BuildContext<'c> {
    config: &'c BuildConfig,
    diagnostics: DiagnosticBag,
}

impl<'c> BuildContext<'c> {
    pub(crate) fn new(config: &'c BuildConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub(crate) fn finish(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Records a warning regardless of policy.
    pub(crate) fn warn(&mut self, diagnostic: Diagnostic) {
        warn!(code = %diagnostic.code, "{diagnostic}");
        self.diagnostics.add(diagnostic);
    }

    fn enforce(
        &mut self,
        policy: Policy,
        diagnostic: impl FnOnce() -> Diagnostic,
        error: impl FnOnce() -> BuildError,
    ) -> BuildResult<()> {
        match policy {
            Policy::Allow => Ok(()),
            Policy::Warn => {
                self.warn(diagnostic());
                Ok(())
            }
            Policy::Deny => Err(error()),
        }
    }

    pub(crate) fn check_name(
        &mut self,
        what: &'static str,
        name: &str,
        location: &[String],
    ) -> BuildResult<()> {
        if is_name(name) {
            return Ok(());
        }
        self.enforce(
            self.config.invalid_names,
            || {
                Diagnostic::warning(codes::INVALID_NAME, format!("invalid {what}"))
                    .with_message(format!("`{name}` is not a valid GraphQL name"))
                    .at(location.iter().cloned())
            },
            || BuildError::InvalidName {
                what,
                name: name.to_string(),
                location: location.join("."),
            },
        )
    }

    pub(crate) fn duplicate_action(&mut self, name: &str, location: &[String]) -> BuildResult<()> {
        self.enforce(
            self.config.duplicate_actions,
            || {
                Diagnostic::warning(codes::DUPLICATE_ACTION, "duplicate action")
                    .with_message(format!("`{name}` replaced an earlier entry"))
                    .at(location.iter().cloned())
            },
            || BuildError::DuplicateAction {
                name: name.to_string(),
                location: location.join("."),
            },
        )
    }

    /// Applies the token and type checks to every parameter, whether or not
    /// its declaration is written.
    pub(crate) fn check_parameters<'p>(
        &mut self,
        params: impl IntoIterator<Item = Located<'p>>,
    ) -> BuildResult<()> {
        for (location, param) in params {
            let token = param.token().as_str();
            if token.is_empty() {
                return Err(BuildError::EmptyToken {
                    location: location.join("."),
                });
            }
            self.check_name("token", token, &location)?;

            if let TypeLiteral::Fallback { declared } = param.type_literal() {
                self.enforce(
                    self.config.unmapped_types,
                    || {
                        Diagnostic::warning(codes::UNMAPPED_TYPE, "unmapped value type")
                            .with_message(format!("`{declared}` is declared as `String`"))
                            .at(location.iter().cloned())
                    },
                    || BuildError::UnmappedType {
                        declared: declared.to_string(),
                        location: location.join("."),
                    },
                )?;
            }
        }
        Ok(())
    }

    /// Binds `token` in `variables`, applying the collision policy when the
    /// token is already bound.
    pub(crate) fn bind(
        &mut self,
        variables: &mut Variables,
        token: &str,
        value: Value,
        location: &[String],
    ) -> BuildResult<()> {
        if variables.contains(token) {
            self.enforce(
                self.config.token_collisions,
                || {
                    Diagnostic::warning(codes::TOKEN_COLLISION, "token collision")
                        .with_message(format!("`${token}` is bound more than once"))
                        .at(location.iter().cloned())
                },
                || BuildError::TokenCollision {
                    token: token.to_string(),
                    location: location.join("."),
                },
            )?;
        }
        variables.insert(token, value);
        Ok(())
    }
}
