use std::sync::Arc;

use crate::message::{Descriptor, FieldValue, MessageInstance};

use super::error::Result;

/// The uniform CRUD contract over message storage.
///
/// One interface, two implementations selected by the caller: the SQL engine
/// in `protosql::storage::postgres` and the in-memory engine in
/// `protosql::storage::inmemory`. Handles are single-threaded: no internal
/// locking, callers serialize access externally.
pub trait Persistence {
    /// Selects messages of `schema`'s type.
    ///
    /// With `id` set, filters on equality of the identity field (`id_name`,
    /// defaulting to [`super::DEFAULT_ID_NAME`] when omitted); without it,
    /// returns every stored row. Result order is the store's row order.
    /// `None` is the in-memory engine's "table never populated" sentinel;
    /// the SQL engine always reports `Some`, possibly empty.
    fn select(
        &mut self,
        id_name: Option<&str>,
        id: Option<&FieldValue>,
        schema: &Arc<dyn Descriptor>,
    ) -> Result<Option<Vec<MessageInstance>>>;

    /// Inserts one message. Executed once, no retry, no uniqueness check.
    fn insert(&mut self, message: &MessageInstance, id_field: &str) -> Result<()>;

    /// Updates every row whose identity field matches the lookup key.
    ///
    /// The key is `previous_id` when supplied (the identity itself changed),
    /// otherwise the message's current identity-field value.
    fn update(
        &mut self,
        message: &MessageInstance,
        id_field: &str,
        previous_id: Option<&FieldValue>,
    ) -> Result<()>;

    /// Deletes every row whose identity field equals the message's current
    /// identity-field value.
    fn delete(&mut self, message: &MessageInstance, id_field: &str) -> Result<()>;

    /// Deletes every row of `schema`'s table. Unconditional.
    fn delete_all(&mut self, schema: &dyn Descriptor) -> Result<()>;

    /// Starts an explicit transaction; subsequent calls run inside it until
    /// `commit` or `rollback`.
    fn start_transaction(&mut self) -> Result<()>;

    /// Commits the explicit transaction. Fails with
    /// [`super::PersistenceError::NoTransaction`] if none was started.
    fn commit(&mut self) -> Result<()>;

    /// Rolls the explicit transaction back. Fails with
    /// [`super::PersistenceError::NoTransaction`] if none was started.
    fn rollback(&mut self) -> Result<()>;
}
