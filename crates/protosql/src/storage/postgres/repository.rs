//! PostgreSQL-dialect persistence engine.
//!
//! Builds parameterized SELECT/INSERT/UPDATE/DELETE statements from a message
//! schema and runs them through an externally supplied connection
//! collaborator. A handle is either autonomous (each call scopes its own
//! connection) or inside an explicit transaction (the connection is held
//! until commit or rollback).

use std::sync::Arc;

use tracing::{debug, trace};

use protosql_core::message::{Descriptor, FieldDescriptor, FieldKind, FieldValue, MessageInstance};
use protosql_core::storage::{
    table_name, ConnectionSource, Persistence, PersistenceError, Result, SqlConnection,
    DEFAULT_ID_NAME,
};

use super::conversions::{message_to_params, row_to_message, scalar_to_sql};

/// SQL persistence engine over an external connection source.
///
/// Not thread-safe: one handle, one caller. The handle owns at most one
/// connection at a time, acquired lazily on first use.
pub struct PostgresRepository<S: ConnectionSource> {
    source: S,
    connection: Option<Box<dyn SqlConnection>>,
    in_transaction: bool,
}

impl<S: ConnectionSource> PostgresRepository<S> {
    /// Creates an autonomous handle over the given connection source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            connection: None,
            in_transaction: false,
        }
    }

    fn connection(&mut self) -> Result<&mut (dyn SqlConnection + 'static)> {
        if self.connection.is_none() {
            trace!("acquiring connection");
            self.connection = Some(self.source.connection()?);
        }
        self.connection
            .as_deref_mut()
            .ok_or_else(|| PersistenceError::Store("connection unavailable".to_string()))
    }

    /// Runs one statement against the held connection, releasing it afterwards
    /// unless an explicit transaction owns it. Release happens on every exit
    /// path; a close failure only surfaces when the operation itself succeeded.
    fn with_connection<T>(
        &mut self,
        operation: impl FnOnce(&mut dyn SqlConnection) -> Result<T>,
    ) -> Result<T> {
        let result = match self.connection() {
            Ok(connection) => operation(connection),
            Err(err) => Err(err),
        };
        let released = self.release();
        match result {
            Ok(value) => {
                released?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    fn release(&mut self) -> Result<()> {
        if self.in_transaction {
            return Ok(());
        }
        if let Some(mut connection) = self.connection.take() {
            trace!("releasing connection");
            connection.close()?;
        }
        Ok(())
    }

    fn require_transaction(&self, op: &'static str) -> Result<()> {
        if !self.in_transaction {
            return Err(PersistenceError::NoTransaction { op });
        }
        Ok(())
    }
}

impl<S: ConnectionSource> Persistence for PostgresRepository<S> {
    fn select(
        &mut self,
        id_name: Option<&str>,
        id: Option<&FieldValue>,
        schema: &Arc<dyn Descriptor>,
    ) -> Result<Option<Vec<MessageInstance>>> {
        let table = table_name(schema.full_name());
        // The identity field name defaults only when a filter value exists.
        let filter = id.map(|value| (id_name.unwrap_or(DEFAULT_ID_NAME), value));

        let mut sql = format!("SELECT * FROM {table}");
        let mut params = Vec::new();
        if let Some((name, value)) = filter {
            sql.push_str(&format!(" WHERE \"{name}\" = ?"));
            params.push(scalar_to_sql(name, value)?);
        }

        debug!(sql, "select");
        let rows = self.with_connection(|connection| connection.query(&sql, &params))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            messages.push(row_to_message(schema, row)?);
        }
        Ok(Some(messages))
    }

    fn insert(&mut self, message: &MessageInstance, _id_field: &str) -> Result<()> {
        let schema = Arc::clone(message.schema());
        let table = table_name(schema.full_name());

        let mut names = Vec::new();
        let mut placeholders = Vec::new();
        for field in schema.fields() {
            names.push(format!("\"{}\"", field.name));
            placeholders.push(placeholder(field));
        }
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        );
        let params = message_to_params(&*schema, message)?;

        debug!(sql, "insert");
        self.with_connection(|connection| connection.execute(&sql, &params))
    }

    fn update(
        &mut self,
        message: &MessageInstance,
        id_field: &str,
        previous_id: Option<&FieldValue>,
    ) -> Result<()> {
        let schema = Arc::clone(message.schema());
        let table = table_name(schema.full_name());

        let assignments: Vec<String> = schema
            .fields()
            .iter()
            .map(|field| format!("\"{}\" = {}", field.name, placeholder(field)))
            .collect();
        let sql = format!(
            "UPDATE {table} SET {} WHERE \"{id_field}\" = ?",
            assignments.join(", ")
        );

        // The WHERE parameter is the previous identity when it changed,
        // otherwise the message's current identity value. Resolved before
        // encoding so a missing identity surfaces as the contract error.
        let lookup = match previous_id {
            Some(value) => value,
            None => identity_value(message, id_field)?,
        };
        let mut params = message_to_params(&*schema, message)?;
        params.push(scalar_to_sql(id_field, lookup)?);

        debug!(sql, "update");
        self.with_connection(|connection| connection.execute(&sql, &params))
    }

    fn delete(&mut self, message: &MessageInstance, id_field: &str) -> Result<()> {
        let table = table_name(message.schema().full_name());
        let sql = format!("DELETE FROM {table} WHERE \"{id_field}\" = ?");
        let params = vec![scalar_to_sql(id_field, identity_value(message, id_field)?)?];

        debug!(sql, "delete");
        self.with_connection(|connection| connection.execute(&sql, &params))
    }

    fn delete_all(&mut self, schema: &dyn Descriptor) -> Result<()> {
        let sql = format!("DELETE FROM {}", table_name(schema.full_name()));
        debug!(sql, "delete_all");
        self.with_connection(|connection| connection.execute(&sql, &[]))
    }

    fn start_transaction(&mut self) -> Result<()> {
        self.connection()?.begin()?;
        self.in_transaction = true;
        trace!("transaction started");
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.require_transaction("commit")?;
        self.connection()?.commit()?;
        self.in_transaction = false;
        trace!("transaction committed");
        self.release()
    }

    fn rollback(&mut self) -> Result<()> {
        self.require_transaction("rollback")?;
        self.connection()?.rollback()?;
        self.in_transaction = false;
        trace!("transaction rolled back");
        self.release()
    }
}

/// Placeholder text for one field: plain `?`, or a cast into the enum's SQL
/// type for enum fields, array-typed when the field is repeated.
fn placeholder(field: &FieldDescriptor) -> String {
    match &field.kind {
        FieldKind::Enum(descriptor) if field.repeated => {
            format!("CAST(? AS {}[])", descriptor.name)
        }
        FieldKind::Enum(descriptor) => format!("CAST(? AS {})", descriptor.name),
        _ => "?".to_string(),
    }
}

fn identity_value<'a>(message: &'a MessageInstance, id_field: &str) -> Result<&'a FieldValue> {
    message
        .get(id_field)
        .ok_or_else(|| PersistenceError::MissingIdentity {
            schema: message.schema().full_name().to_string(),
            field: id_field.to_string(),
        })
}
