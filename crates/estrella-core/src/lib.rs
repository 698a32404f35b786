//! Core contracts for Estrella.
//!
//! This crate defines the relational table model, the dedup/surrogate-key
//! cache, the statement builders, and the schema registry shared by the
//! ingestion engine and the CLI.

pub mod error;
pub mod join;
pub mod schema;
pub mod statement;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use join::{ColumnSelection, JoinClause, compose_join};
pub use schema::{FkEdge, SchemaRegistry, TableRole};
pub use statement::{InsertStatement, render_select};
pub use table::{ResolvedId, TableModel};
pub use value::SqlValue;

/// The literal emitted for "no value / unresolved reference".
///
/// Rendered unquoted, relying on the target dialect reading the bare token
/// as SQL NULL.
pub const NULL_SENTINEL: &str = "null";

/// Source markers that never become dimension rows and always resolve to
/// the null sentinel.
pub const INVALID_VALUES: &[&str] = &["NO INDICA", "(NO REGISTRA)"];
