//! Named queries and mutations.

use crate::action::Action;
use crate::config::BuildConfig;
use crate::context::{locate, write_declarations, BuildContext, Located};
use crate::error::BuildResult;
use crate::output::BuiltOperation;
use crate::parameter::ScalarParameter;
use crate::variables::Variables;
use gqle_core::diagnostics::codes;
use gqle_core::Diagnostic;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// The kind of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The keyword opening the operation.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A query or mutation made of actions, emitted in attachment order.
///
/// ```
/// use gqle_builder::{Action, Operation, ScalarParameter};
///
/// let built = Operation::mutation("Test")
///     .with_action(
///         Action::new("TestQuery")
///             .with_parameter(ScalarParameter::with_token("id", 12_i64, "id"))
///             .with_field("boolField"),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     built.compact_query(),
///     "mutationTest($id:Int!){TestQuery(id:$id){boolField}}"
/// );
/// assert_eq!(built.variables().get("id").and_then(|v| v.as_i64()), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    kind: OperationKind,
    name: String,
    actions: IndexMap<String, Action, FxBuildHasher>,
    compose: bool,
    replaced: Vec<String>,
    config: BuildConfig,
}

impl Operation {
    /// Creates an operation. An empty name makes it anonymous.
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            actions: IndexMap::default(),
            compose: false,
            replaced: Vec::new(),
            config: BuildConfig::default(),
        }
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, name)
    }

    pub fn mutation(name: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, name)
    }

    /// Renders without keyword, name, declarations or outer braces, so the
    /// text can be embedded as one branch of a [`ComposeOperation`].
    ///
    /// [`ComposeOperation`]: crate::ComposeOperation
    #[must_use]
    pub fn compose_mode(mut self) -> Self {
        self.compose = true;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches an action under its name. Attaching a name again replaces
    /// the earlier action in place.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        let name = action.name().to_string();
        if self.actions.insert(name.clone(), action).is_some() {
            self.replaced.push(name);
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_compose(&self) -> bool {
        self.compose
    }

    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Actions in attachment order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Returns true if any action takes an argument.
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        self.actions().any(|a| !a.parameters().is_empty())
    }

    /// Builds the query text and variables map.
    ///
    /// Building never mutates the operation; building twice yields the same
    /// output.
    pub fn build(&self) -> BuildResult<BuiltOperation> {
        let mut ctx = BuildContext::new(&self.config);
        let scope = vec![self.root_label().to_string()];
        ctx.check_parameters(self.located_parameters(&scope))?;
        let (query, variables) = self.render(&mut ctx, &scope)?;
        let operation_name = (!self.compose && !self.name.is_empty()).then(|| self.name.clone());
        Ok(BuiltOperation::new(
            query,
            variables,
            operation_name,
            ctx.finish(),
        ))
    }

    fn root_label(&self) -> &str {
        if self.name.is_empty() {
            self.kind.keyword()
        } else {
            &self.name
        }
    }

    /// Scalar parameters of every action in declaration order.
    pub(crate) fn scalar_parameters(&self) -> impl Iterator<Item = &ScalarParameter> {
        self.actions.values().flat_map(Action::scalar_parameters)
    }

    /// Scalar parameters of every action, with their locations below `scope`.
    pub(crate) fn located_parameters<'a>(
        &'a self,
        scope: &'a [String],
    ) -> impl Iterator<Item = Located<'a>> + 'a {
        self.actions.iter().flat_map(move |(key, action)| {
            action
                .scalar_parameters()
                .map(move |param| (locate(scope, &[key.as_str(), param.name()]), param))
        })
    }

    pub(crate) fn render(
        &self,
        ctx: &mut BuildContext<'_>,
        scope: &[String],
    ) -> BuildResult<(String, Variables)> {
        debug!(
            kind = %self.kind,
            name = %self.name,
            actions = self.actions.len(),
            compose = self.compose,
            "building operation"
        );

        for name in &self.replaced {
            ctx.duplicate_action(name, scope)?;
        }
        for (key, action) in &self.actions {
            action.check_arguments()?;
            if let Some(alias) = action.alias() {
                ctx.check_name("alias", alias, &locate(scope, &[key.as_str()]))?;
            }
        }

        let mut out = String::new();
        if !self.compose {
            out.push_str(self.kind.keyword());
            if self.name.is_empty() {
                if self.has_parameters() {
                    ctx.warn(
                        Diagnostic::warning(codes::UNDECLARED_VARIABLES, "undeclared variables")
                            .with_message("an anonymous operation emits no variable definitions")
                            .at(scope.iter().cloned()),
                    );
                }
            } else {
                ctx.check_name("operation name", &self.name, scope)?;
                out.push(' ');
                out.push_str(&self.name);
                write_declarations(&mut out, self.scalar_parameters());
            }
            out.push_str("{\n");
        }

        for (key, action) in &self.actions {
            trace!(action = %key, "rendering action");
            action.write_to(&mut out);
        }

        if !self.compose {
            out.push('}');
        }

        let mut variables = Variables::new();
        for (location, param) in self.located_parameters(scope) {
            ctx.bind(
                &mut variables,
                param.token().as_str(),
                param.variable_value(),
                &location,
            )?;
        }

        debug!(variables = variables.len(), "operation built");
        Ok((out, variables))
    }
}
