use super::error::Result;
use super::types::{SqlRow, SqlValue};

/// A live connection to the SQL-executing store collaborator.
///
/// The engine treats the store as opaque: it hands over parameterized SQL
/// text with `?` placeholders plus bound values, and gets rows back. Any
/// translation to a native placeholder syntax, timeouts, or cancellation is
/// the implementation's business. All calls are synchronous and blocking.
pub trait SqlConnection {
    /// Executes a statement that returns no rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<()>;

    /// Executes a query and returns every row, in result-set order.
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>>;

    /// Opens a transaction on this connection.
    fn begin(&mut self) -> Result<()>;

    /// Commits the open transaction.
    fn commit(&mut self) -> Result<()>;

    /// Rolls the open transaction back.
    fn rollback(&mut self) -> Result<()>;

    /// Releases the connection. No calls may follow.
    fn close(&mut self) -> Result<()>;
}

/// Hands out connections to the store, one per request.
///
/// The engine acquires lazily and holds at most one connection at a time.
pub trait ConnectionSource {
    fn connection(&self) -> Result<Box<dyn SqlConnection>>;
}
