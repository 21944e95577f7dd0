//! A single field invocation inside an operation.

use crate::error::{BuildError, BuildResult};
use crate::field::Field;
use crate::parameter::{NestedObjectParameter, Parameter, ScalarParameter};

/// One field invocation with its alias, arguments and selection set.
///
/// ```
/// use gqle_builder::{Action, ScalarParameter};
///
/// let action = Action::new("TestQuery")
///     .with_parameter(ScalarParameter::with_token("id", 12_i64, "id"))
///     .with_field("boolField");
/// assert_eq!(action.render(), "TestQuery(id:$id){\nboolField\n}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    name: String,
    alias: Option<String>,
    fields: Vec<Field>,
    parameters: Vec<Parameter>,
}

impl Action {
    /// Creates an unaliased action.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            fields: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Creates an action rendered as `alias:name`.
    pub fn aliased(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(name).with_alias(alias)
    }

    /// Sets the alias. An empty alias renders as no alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Appends a field to the selection set.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Appends several fields to the selection set.
    #[must_use]
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Appends a scalar argument.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ScalarParameter) -> Self {
        self.parameters.push(Parameter::Scalar(parameter));
        self
    }

    /// Appends an input-object argument. It must end up as the action's only
    /// argument.
    #[must_use]
    pub fn with_input(mut self, input: NestedObjectParameter) -> Self {
        self.parameters.push(Parameter::NestedObject(input));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Every scalar parameter in argument order, input-object fields inlined.
    pub fn scalar_parameters(&self) -> impl Iterator<Item = &ScalarParameter> {
        self.parameters.iter().flat_map(Parameter::scalars)
    }

    /// Fails when an input object shares the action with other arguments.
    pub(crate) fn check_arguments(&self) -> BuildResult<()> {
        if self.parameters.len() > 1 && self.parameters.iter().any(Parameter::is_nested_object) {
            return Err(BuildError::InputNotSole {
                action: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Renders `[alias:]name[(args)][{fields}]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        if let Some(alias) = &self.alias {
            out.push_str(alias);
            out.push(':');
        }
        out.push_str(&self.name);

        match self.parameters.first() {
            None => {}
            Some(Parameter::NestedObject(input)) => {
                out.push_str("(input:{");
                write_arguments(out, input.fields());
                out.push_str("})");
            }
            Some(Parameter::Scalar(_)) => {
                out.push('(');
                write_arguments(out, self.scalar_parameters());
                out.push(')');
            }
        }

        if !self.fields.is_empty() {
            out.push_str("{\n");
            for field in &self.fields {
                field.write_to(out);
            }
            out.push('}');
        }
    }
}

fn write_arguments<'a>(out: &mut String, params: impl IntoIterator<Item = &'a ScalarParameter>) {
    for (i, param) in params.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        param.write_argument(out);
    }
}
