//! Merging several operations into one aliased request.

use crate::config::BuildConfig;
use crate::context::{locate, write_declarations, BuildContext};
use crate::error::{BuildError, BuildResult};
use crate::operation::{Operation, OperationKind};
use crate::output::BuiltOperation;
use crate::variables::Variables;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// Several operations sent as one request, each under its own alias, sharing
/// a single variable definition list.
///
/// Sub-operations are switched to compose mode when attached. Their tokens
/// must be unique across the whole request: allocate them from one
/// [`TokenAllocator`](crate::TokenAllocator).
///
/// ```
/// use gqle_builder::{Action, ComposeOperation, Operation};
///
/// let built = ComposeOperation::query("Test")
///     .with_query("myTest1", Operation::query("").with_action(Action::new("query1").with_field("field1")))
///     .with_query("myTest2", Operation::query("").with_action(Action::new("query2").with_field("field1")))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     built.compact_query(),
///     "queryTest{myTest1:query1{field1}myTest2:query2{field1}}"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOperation {
    kind: OperationKind,
    name: String,
    queries: IndexMap<String, Operation, FxBuildHasher>,
    replaced: Vec<String>,
    config: BuildConfig,
}

impl ComposeOperation {
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            queries: IndexMap::default(),
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

    /// Sets the config. It applies to every sub-operation, whose own config
    /// is ignored during the compose build.
    #[must_use]
    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches `operation` under `alias`. Attaching an alias again replaces
    /// the earlier operation in place.
    #[must_use]
    pub fn with_query(mut self, alias: impl Into<String>, operation: Operation) -> Self {
        let alias = alias.into();
        if self
            .queries
            .insert(alias.clone(), operation.compose_mode())
            .is_some()
        {
            self.replaced.push(alias);
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

    /// Sub-operations with their aliases, in attachment order.
    pub fn queries(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.queries.iter().map(|(alias, op)| (alias.as_str(), op))
    }

    /// Returns true if any sub-operation takes an argument.
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        self.queries.values().any(Operation::has_parameters)
    }

    /// Builds the merged query text and variables map.
    pub fn build(&self) -> BuildResult<BuiltOperation> {
        debug!(
            kind = %self.kind,
            name = %self.name,
            queries = self.queries.len(),
            "building compose operation"
        );

        let mut ctx = BuildContext::new(&self.config);
        let root = if self.name.is_empty() {
            self.kind.keyword()
        } else {
            self.name.as_str()
        };
        let scope = vec![root.to_string()];

        for alias in &self.replaced {
            ctx.duplicate_action(alias, &scope)?;
        }

        let mut scopes = Vec::with_capacity(self.queries.len());
        for (alias, op) in &self.queries {
            if op.kind() != self.kind {
                return Err(BuildError::KindMismatch {
                    alias: alias.clone(),
                    expected: self.kind,
                    found: op.kind(),
                });
            }
            ctx.check_name("alias", alias, &scope)?;
            scopes.push(locate(&scope, &[alias.as_str()]));
        }

        ctx.check_parameters(
            self.queries
                .values()
                .zip(&scopes)
                .flat_map(|(op, sub_scope)| op.located_parameters(sub_scope)),
        )?;

        let mut out = String::from(self.kind.keyword());
        if !self.name.is_empty() {
            ctx.check_name("operation name", &self.name, &scope)?;
            out.push(' ');
            out.push_str(&self.name);
        }
        write_declarations(
            &mut out,
            self.queries.values().flat_map(Operation::scalar_parameters),
        );
        out.push_str("{\n");

        let mut variables = Variables::new();
        for ((alias, op), sub_scope) in self.queries.iter().zip(&scopes) {
            let (text, sub_variables) = op.render(&mut ctx, sub_scope)?;
            out.push_str(alias);
            out.push(':');
            out.push_str(&text);
            for (token, value) in sub_variables {
                ctx.bind(&mut variables, &token, value, sub_scope)?;
            }
        }
        out.push('}');

        debug!(variables = variables.len(), "compose operation built");
        let operation_name = (!self.name.is_empty()).then(|| self.name.clone());
        Ok(BuiltOperation::new(out, variables, operation_name, ctx.finish()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::Policy;
    use crate::parameter::ScalarParameter;
    use crate::token::TokenAllocator;
    use crate::value::Value;
    use gqle_core::diagnostics::codes;

    fn chart(action: &str, tokens: &mut TokenAllocator) -> Operation {
        Operation::query("").with_action(
            Action::new(action)
                .with_parameter(ScalarParameter::new("startDate", "01/10/2018", tokens))
                .with_parameter(ScalarParameter::new("endDate", "17/10/2018", tokens))
                .with_fields(["label", "value"]),
        )
    }

    #[test]
    fn test_sub_operations_are_put_in_compose_mode() {
        let compose = ComposeOperation::query("Q")
            .with_query("a", Operation::query("Inner").with_action(Action::new("x")));
        let (_, sub) = compose.queries().next().unwrap();
        assert!(sub.is_compose());
        assert_eq!(compose.build().unwrap().query(), "query Q{\na:x}");
    }

    #[test]
    fn test_shared_allocator() {
        let mut tokens = TokenAllocator::new();
        let built = ComposeOperation::query("Dashboard")
            .with_query("chart1", chart("TempsPassesParJour", &mut tokens))
            .with_query("chart2", chart("TempsPassesParDossier", &mut tokens))
            .build()
            .unwrap();

        assert_eq!(
            built.compact_query(),
            "queryDashboard($param1:String!,$param2:String!,$param3:String!,$param4:String!)\
             {chart1:TempsPassesParJour(startDate:$param1,endDate:$param2){labelvalue}\
             chart2:TempsPassesParDossier(startDate:$param3,endDate:$param4){labelvalue}}"
        );
        assert_eq!(
            built.variables().tokens().collect::<Vec<_>>(),
            ["param1", "param2", "param3", "param4"]
        );
        assert!(built.diagnostics().is_empty());
    }

    #[test]
    fn test_separate_allocators_collide() {
        let mut first = TokenAllocator::new();
        let mut second = TokenAllocator::new();
        let compose = ComposeOperation::query("Dashboard")
            .with_query("chart1", chart("TempsPassesParJour", &mut first))
            .with_query("chart2", chart("TempsPassesParDossier", &mut second));

        let built = compose.build().unwrap();
        assert_eq!(built.variables().len(), 2);
        assert_eq!(
            built.diagnostics().with_code(codes::TOKEN_COLLISION).count(),
            2
        );

        let denied = compose
            .with_config(BuildConfig::new().token_collisions(Policy::Deny))
            .build();
        assert!(matches!(
            denied,
            Err(BuildError::TokenCollision { ref token, .. }) if token == "param1"
        ));
    }

    #[test]
    fn test_kind_mismatch() {
        let result = ComposeOperation::query("Q")
            .with_query("save", Operation::mutation("").with_action(Action::new("save")))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::KindMismatch {
                expected: OperationKind::Query,
                found: OperationKind::Mutation,
                ..
            })
        ));
    }

    #[test]
    fn test_mutation_compose() {
        let mut tokens = TokenAllocator::new();
        let rename = |id: &str, name: &str, tokens: &mut TokenAllocator| {
            Operation::mutation("").with_action(
                Action::new("renameTache")
                    .with_parameter(ScalarParameter::new("id", id, tokens))
                    .with_parameter(ScalarParameter::new("label", name, tokens))
                    .with_field("id"),
            )
        };
        let built = ComposeOperation::mutation("Rename")
            .with_query("first", rename("1", "A", &mut tokens))
            .with_query("second", rename("2", "B", &mut tokens))
            .build()
            .unwrap();

        assert!(built.query().starts_with("mutation Rename("));
        assert_eq!(built.variables().get("param4"), Some(&Value::Text("B".into())));
    }

    #[test]
    fn test_strict_compose_checks_sub_operation_parameters() {
        let compose = ComposeOperation::query("")
            .with_config(BuildConfig::strict())
            .with_query(
                "flags",
                Operation::query("").with_action(
                    Action::new("toggle")
                        .with_parameter(ScalarParameter::with_token("on", true, "on")),
                ),
            );
        assert!(matches!(
            compose.build(),
            Err(BuildError::UnmappedType { ref location, .. }) if location == "query.flags.toggle.on"
        ));
    }

    #[test]
    fn test_duplicate_alias() {
        let compose = ComposeOperation::query("Q")
            .with_query("a", Operation::query("").with_action(Action::new("x")))
            .with_query("a", Operation::query("").with_action(Action::new("y")));

        let built = compose.build().unwrap();
        assert_eq!(built.compact_query(), "queryQ{a:y}");
        assert_eq!(
            built.diagnostics().with_code(codes::DUPLICATE_ACTION).count(),
            1
        );
    }

    #[test]
    fn test_unnamed_compose_keeps_declarations() {
        let mut tokens = TokenAllocator::new();
        let built = ComposeOperation::query("")
            .with_query("c", chart("Chart", &mut tokens))
            .build()
            .unwrap();
        assert!(built
            .compact_query()
            .starts_with("query($param1:String!,$param2:String!){c:Chart("));
        assert_eq!(built.operation_name(), None);
    }
}
