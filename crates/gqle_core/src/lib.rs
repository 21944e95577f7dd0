//! Core utilities for gqle.
//!
//! This crate provides foundational types shared by the builder:
//! - `diagnostics`: Warnings recorded by tolerant builds
//! - `text`: GraphQL name and whitespace helpers

pub mod diagnostics;
pub mod text;

pub use diagnostics::{Diagnostic, DiagnosticBag};
pub use text::{is_name, strip_whitespace, whitespace_insensitive_eq};
