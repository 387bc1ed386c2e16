use thiserror::Error;

use crate::message::MessageError;

/// Errors that can occur during persistence operations.
///
/// Nothing here is retried internally: every operation makes exactly one
/// attempt and surfaces its first failure. Store failures keep the
/// collaborator's message verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A failure surfaced by the connection collaborator, propagated unchanged.
    #[error("store error: {0}")]
    Store(String),
    /// `commit` or `rollback` called while no transaction was active.
    #[error("{op} attempted without an active transaction")]
    NoTransaction { op: &'static str },
    /// No identity value could be resolved for an update or delete.
    #[error("no identity value: message of {schema} has no '{field}' field set")]
    MissingIdentity { schema: String, field: String },
    /// A schema field has no value on the instance being encoded.
    #[error("field '{0}' missing from message instance")]
    MissingField(String),
    /// A schema field has no matching column in a result row.
    #[error("column '{0}' missing from result row")]
    MissingColumn(String),
    /// A result-row cell does not fit the field's declared kind.
    #[error("column '{column}': expected {expected}, got {actual}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },
    /// A field-level decode or encode failure (unknown enum value, bad JSON).
    #[error(transparent)]
    Message(#[from] MessageError),
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
