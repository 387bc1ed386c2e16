//! Row and parameter conversions between message instances and SQL values.
//!
//! Pure functions for translating result rows into message instances and
//! message fields into bound statement parameters. Testable in isolation
//! without a live store.

use std::sync::Arc;

use protosql_core::message::{
    json, Descriptor, EnumDescriptor, FieldDescriptor, FieldKind, FieldValue, MessageError,
    MessageInstance,
};
use protosql_core::storage::{PersistenceError, Result, SqlRow, SqlValue};

/// Decodes one result row into a message instance, field by field in schema
/// order. Enum cells resolve by declared value name; embedded-message cells
/// decode from JSON; repeated fields come from array cells with their stored
/// order preserved.
pub fn row_to_message(schema: &Arc<dyn Descriptor>, row: &SqlRow) -> Result<MessageInstance> {
    let mut message = MessageInstance::new(Arc::clone(schema));
    for field in schema.fields() {
        let cell = row
            .get(&field.name)
            .ok_or_else(|| PersistenceError::MissingColumn(field.name.clone()))?;
        let value = decode_field(field, cell)?;
        message = message.set(field.name.clone(), value);
    }
    Ok(message)
}

/// Encodes a message instance into bound parameters, one per schema field, in
/// schema order — the placeholder order of the generated statements. Enums
/// bind as their value name, embedded messages as JSON text, repeated fields
/// as arrays.
pub fn message_to_params(
    schema: &dyn Descriptor,
    message: &MessageInstance,
) -> Result<Vec<SqlValue>> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let value = message
                .get(&field.name)
                .ok_or_else(|| PersistenceError::MissingField(field.name.clone()))?;
            encode_field(field, value)
        })
        .collect()
}

/// Converts a scalar field value into a bindable parameter. Used for WHERE
/// clause identity values, which must be scalars.
pub(crate) fn scalar_to_sql(name: &str, value: &FieldValue) -> Result<SqlValue> {
    match value {
        FieldValue::String(s) => Ok(SqlValue::Text(s.clone())),
        FieldValue::Int32(n) => Ok(SqlValue::Integer(*n)),
        FieldValue::Int64(n) => Ok(SqlValue::BigInt(*n)),
        FieldValue::Bool(b) => Ok(SqlValue::Bool(*b)),
        FieldValue::Enum(v) => Ok(SqlValue::Text(v.clone())),
        FieldValue::Message(_) | FieldValue::Repeated(_) => Err(MessageError::UnexpectedValue {
            field: name.to_string(),
            expected: "a scalar identity value",
        }
        .into()),
    }
}

fn decode_field(field: &FieldDescriptor, cell: &SqlValue) -> Result<FieldValue> {
    match &field.kind {
        FieldKind::Enum(descriptor) => decode_enum(field, descriptor, cell),
        FieldKind::Message(nested) => decode_message(field, nested, cell),
        FieldKind::String | FieldKind::Int32 | FieldKind::Int64 | FieldKind::Bool => {
            decode_scalar(field, cell)
        }
    }
}

fn decode_enum(
    field: &FieldDescriptor,
    descriptor: &EnumDescriptor,
    cell: &SqlValue,
) -> Result<FieldValue> {
    let resolve = |name: &str| -> Result<FieldValue> {
        if !descriptor.contains(name) {
            return Err(MessageError::UnknownEnumValue {
                enum_name: descriptor.name.clone(),
                value: name.to_string(),
            }
            .into());
        }
        Ok(FieldValue::Enum(name.to_string()))
    };

    match (field.repeated, cell) {
        (false, SqlValue::Text(name)) => resolve(name),
        (true, SqlValue::TextArray(names)) => Ok(FieldValue::Repeated(
            names.iter().map(|name| resolve(name)).collect::<Result<_>>()?,
        )),
        _ => Err(column_type(field, cell)),
    }
}

fn decode_message(
    field: &FieldDescriptor,
    nested: &Arc<dyn Descriptor>,
    cell: &SqlValue,
) -> Result<FieldValue> {
    match (field.repeated, cell) {
        (false, SqlValue::Text(doc)) => {
            Ok(FieldValue::Message(json::decode(doc, Arc::clone(nested))?))
        }
        (true, SqlValue::TextArray(docs)) => Ok(FieldValue::Repeated(
            docs.iter()
                .map(|doc| Ok(FieldValue::Message(json::decode(doc, Arc::clone(nested))?)))
                .collect::<Result<_>>()?,
        )),
        _ => Err(column_type(field, cell)),
    }
}

fn decode_scalar(field: &FieldDescriptor, cell: &SqlValue) -> Result<FieldValue> {
    match (&field.kind, field.repeated, cell) {
        (FieldKind::String, false, SqlValue::Text(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Int32, false, SqlValue::Integer(n)) => Ok(FieldValue::Int32(*n)),
        (FieldKind::Int64, false, SqlValue::BigInt(n)) => Ok(FieldValue::Int64(*n)),
        (FieldKind::Bool, false, SqlValue::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::String, true, SqlValue::TextArray(items)) => Ok(FieldValue::Repeated(
            items.iter().cloned().map(FieldValue::String).collect(),
        )),
        (FieldKind::Int32, true, SqlValue::IntegerArray(items)) => Ok(FieldValue::Repeated(
            items.iter().copied().map(FieldValue::Int32).collect(),
        )),
        (FieldKind::Int64, true, SqlValue::BigIntArray(items)) => Ok(FieldValue::Repeated(
            items.iter().copied().map(FieldValue::Int64).collect(),
        )),
        (FieldKind::Bool, true, SqlValue::BoolArray(items)) => Ok(FieldValue::Repeated(
            items.iter().copied().map(FieldValue::Bool).collect(),
        )),
        _ => Err(column_type(field, cell)),
    }
}

fn encode_field(field: &FieldDescriptor, value: &FieldValue) -> Result<SqlValue> {
    if field.repeated {
        let FieldValue::Repeated(items) = value else {
            return Err(unexpected(field, "a repeated value"));
        };
        return encode_repeated(field, items);
    }

    match (&field.kind, value) {
        (FieldKind::Enum(_), FieldValue::Enum(name)) => Ok(SqlValue::Text(name.clone())),
        (FieldKind::Message(_), FieldValue::Message(nested)) => {
            Ok(SqlValue::Text(json::encode(nested)?))
        }
        (FieldKind::String, FieldValue::String(s)) => Ok(SqlValue::Text(s.clone())),
        (FieldKind::Int32, FieldValue::Int32(n)) => Ok(SqlValue::Integer(*n)),
        (FieldKind::Int64, FieldValue::Int64(n)) => Ok(SqlValue::BigInt(*n)),
        (FieldKind::Bool, FieldValue::Bool(b)) => Ok(SqlValue::Bool(*b)),
        _ => Err(unexpected(field, field.kind.name())),
    }
}

fn encode_repeated(field: &FieldDescriptor, items: &[FieldValue]) -> Result<SqlValue> {
    match &field.kind {
        FieldKind::String => Ok(SqlValue::TextArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::String(s) => Ok(s.clone()),
                    _ => Err(unexpected(field, "string elements")),
                })
                .collect::<Result<_>>()?,
        )),
        FieldKind::Int32 => Ok(SqlValue::IntegerArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Int32(n) => Ok(*n),
                    _ => Err(unexpected(field, "int32 elements")),
                })
                .collect::<Result<_>>()?,
        )),
        FieldKind::Int64 => Ok(SqlValue::BigIntArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Int64(n) => Ok(*n),
                    _ => Err(unexpected(field, "int64 elements")),
                })
                .collect::<Result<_>>()?,
        )),
        FieldKind::Bool => Ok(SqlValue::BoolArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Bool(b) => Ok(*b),
                    _ => Err(unexpected(field, "bool elements")),
                })
                .collect::<Result<_>>()?,
        )),
        FieldKind::Enum(_) => Ok(SqlValue::TextArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Enum(name) => Ok(name.clone()),
                    _ => Err(unexpected(field, "enum elements")),
                })
                .collect::<Result<_>>()?,
        )),
        FieldKind::Message(_) => Ok(SqlValue::TextArray(
            items
                .iter()
                .map(|item| match item {
                    FieldValue::Message(nested) => Ok(json::encode(nested)?),
                    _ => Err(unexpected(field, "message elements")),
                })
                .collect::<Result<_>>()?,
        )),
    }
}

fn column_type(field: &FieldDescriptor, cell: &SqlValue) -> PersistenceError {
    PersistenceError::ColumnType {
        column: field.name.clone(),
        expected: field.kind.name(),
        actual: cell.type_name(),
    }
}

fn unexpected(field: &FieldDescriptor, expected: &'static str) -> PersistenceError {
    MessageError::UnexpectedValue {
        field: field.name.clone(),
        expected,
    }
    .into()
}
