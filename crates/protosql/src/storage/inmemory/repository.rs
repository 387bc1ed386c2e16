//! In-memory persistence engine.
//!
//! Honors the same contract as the SQL engine, with whole message instances
//! stored per derived table name instead of rows. Selecting from a table that
//! has never been touched yields `None`; a table emptied by deletes yields
//! `Some` of an empty list. Transaction calls are accepted and do nothing, so
//! transactional callers run unmodified.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use protosql_core::message::{Descriptor, FieldValue, MessageInstance};
use protosql_core::storage::{
    table_name, Persistence, PersistenceError, Result, DEFAULT_ID_NAME,
};

/// Message store keyed by derived table name.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: HashMap<String, Vec<MessageInstance>>,
}

impl InMemoryRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn identity<'a>(message: &'a MessageInstance, id_field: &str) -> Result<&'a FieldValue> {
        message
            .get(id_field)
            .ok_or_else(|| PersistenceError::MissingIdentity {
                schema: message.schema().full_name().to_string(),
                field: id_field.to_string(),
            })
    }
}

impl Persistence for InMemoryRepository {
    fn select(
        &mut self,
        id_name: Option<&str>,
        id: Option<&FieldValue>,
        schema: &Arc<dyn Descriptor>,
    ) -> Result<Option<Vec<MessageInstance>>> {
        let table = table_name(schema.full_name());
        let Some(messages) = self.tables.get(&table) else {
            debug!(table, "select on unpopulated table");
            return Ok(None);
        };

        let matches = match id {
            Some(value) => {
                let name = id_name.unwrap_or(DEFAULT_ID_NAME);
                messages
                    .iter()
                    .filter(|message| message.get(name) == Some(value))
                    .cloned()
                    .collect()
            }
            None => messages.clone(),
        };
        Ok(Some(matches))
    }

    fn insert(&mut self, message: &MessageInstance, _id_field: &str) -> Result<()> {
        let table = table_name(message.schema().full_name());
        debug!(table, "insert");
        self.tables.entry(table).or_default().push(message.clone());
        Ok(())
    }

    fn update(
        &mut self,
        message: &MessageInstance,
        id_field: &str,
        previous_id: Option<&FieldValue>,
    ) -> Result<()> {
        let table = table_name(message.schema().full_name());
        // Lookup key is the previous identity when the identity itself changed.
        let lookup = match previous_id {
            Some(value) => value.clone(),
            None => Self::identity(message, id_field)?.clone(),
        };

        debug!(table, "update");
        if let Some(messages) = self.tables.get_mut(&table) {
            for stored in messages.iter_mut() {
                if stored.get(id_field) == Some(&lookup) {
                    *stored = message.clone();
                }
            }
        }
        Ok(())
    }

    fn delete(&mut self, message: &MessageInstance, id_field: &str) -> Result<()> {
        let table = table_name(message.schema().full_name());
        let id = Self::identity(message, id_field)?.clone();

        debug!(table, "delete");
        if let Some(messages) = self.tables.get_mut(&table) {
            messages.retain(|stored| stored.get(id_field) != Some(&id));
        }
        Ok(())
    }

    fn delete_all(&mut self, schema: &dyn Descriptor) -> Result<()> {
        let table = table_name(schema.full_name());
        debug!(table, "delete_all");
        // Marks the table as populated even if it never held a message.
        self.tables.insert(table, Vec::new());
        Ok(())
    }

    fn start_transaction(&mut self) -> Result<()> {
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }
}
