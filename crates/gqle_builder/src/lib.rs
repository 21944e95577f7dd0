//! Programmatic GraphQL request builder.
//!
//! Assemble fields and arguments into actions, attach actions to a query or
//! mutation (or several operations to a compose operation), then `build` to
//! obtain the query text and the variables map a transport sends.
//!
//! # Composing queries
//!
//! ```
//! use gqle_builder::{Action, ComposeOperation, Operation, ScalarParameter, TokenAllocator};
//!
//! let mut tokens = TokenAllocator::new();
//! let chart = |name: &str, tokens: &mut TokenAllocator| {
//!     Operation::query("").with_action(
//!         Action::new(name)
//!             .with_parameter(ScalarParameter::new("startDate", "01/10/2018", tokens))
//!             .with_fields(["label", "value"]),
//!     )
//! };
//!
//! let built = ComposeOperation::query("Dashboard")
//!     .with_query("chart1", chart("TempsPassesParJour", &mut tokens))
//!     .with_query("chart2", chart("TempsPassesParDossier", &mut tokens))
//!     .build()?;
//!
//! assert_eq!(
//!     built.compact_query(),
//!     "queryDashboard($param1:String!,$param2:String!)\
//!      {chart1:TempsPassesParJour(startDate:$param1){labelvalue}\
//!      chart2:TempsPassesParDossier(startDate:$param2){labelvalue}}"
//! );
//! assert_eq!(built.variables().len(), 2);
//! # Ok::<(), gqle_builder::BuildError>(())
//! ```

pub mod action;
pub mod compose;
pub mod config;
pub(crate) mod context;
pub mod error;
pub mod field;
pub mod operation;
pub mod output;
pub mod parameter;
pub mod scalar;
pub mod token;
pub mod value;
pub mod variables;

pub use action::Action;
pub use compose::ComposeOperation;
pub use config::{BuildConfig, Policy};
pub use error::{BuildError, BuildResult};
pub use field::Field;
pub use operation::{Operation, OperationKind};
pub use output::{BuiltOperation, GraphQLRequest};
pub use parameter::{NestedObjectParameter, Parameter, ScalarParameter};
pub use scalar::{literal_of, map_type, DeclaredType, ScalarInput, ScalarKind, TypeLiteral};
pub use token::{Token, TokenAllocator};
pub use value::{GraphId, Value};
pub use variables::Variables;

pub use gqle_core::{Diagnostic, DiagnosticBag};
