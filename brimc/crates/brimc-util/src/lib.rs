//! brimc-util - Shared foundation types for the Brim compiler.
//!
//! This crate provides the infrastructure every compiler phase leans on:
//!
//! - [`span`]: source positions and spans for tokens, nodes, and diagnostics
//! - [`index_vec`]: typed index vectors, the backing store for the token
//!   list and the AST arena
//! - [`diagnostic`]: the diagnostics collector shared by the lexer and the
//!   parser
//! - [`error`]: typed error values for fallible utility operations
//!
//! The types here are deliberately small and copyable. Phases communicate
//! through arena indices rather than references, so growing an arena never
//! invalidates anything a previous phase handed out.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use error::IndexVecError;
pub use index_vec::{Idx, IndexVec};
pub use span::{Position, Span};
