//! JSON codec for embedded message instances.
//!
//! Embedded-message fields are stored as JSON text columns. Scalars map to
//! JSON scalars, enum values to their declared names, nested messages to
//! objects, and repeated fields to arrays. Decoding always targets a schema:
//! fields absent from the JSON stay unset, unknown keys are ignored.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::MessageError;
use super::instance::{FieldValue, MessageInstance};
use super::schema::{Descriptor, FieldDescriptor, FieldKind};

/// Encodes a message instance as a JSON object string.
pub fn encode(message: &MessageInstance) -> Result<String, MessageError> {
    Ok(to_value(message)?.to_string())
}

/// Decodes a JSON object string into an instance of the target schema.
pub fn decode(json: &str, schema: Arc<dyn Descriptor>) -> Result<MessageInstance, MessageError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| MessageError::Json(e.to_string()))?;
    from_value(&value, schema)
}

fn to_value(message: &MessageInstance) -> Result<Value, MessageError> {
    let mut object = Map::new();
    for field in message.schema().fields() {
        // Unset fields are simply omitted from the document.
        let Some(value) = message.get(&field.name) else {
            continue;
        };
        object.insert(field.name.clone(), field_to_value(&field.name, value)?);
    }
    Ok(Value::Object(object))
}

fn field_to_value(name: &str, value: &FieldValue) -> Result<Value, MessageError> {
    Ok(match value {
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Int32(n) => Value::from(*n),
        FieldValue::Int64(n) => Value::from(*n),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Enum(v) => Value::String(v.clone()),
        FieldValue::Message(m) => to_value(m)?,
        FieldValue::Repeated(items) => Value::Array(
            items
                .iter()
                .map(|item| field_to_value(name, item))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn from_value(value: &Value, schema: Arc<dyn Descriptor>) -> Result<MessageInstance, MessageError> {
    let Value::Object(object) = value else {
        return Err(MessageError::Json("expected a JSON object".to_string()));
    };

    let mut message = MessageInstance::new(Arc::clone(&schema));
    for field in schema.fields() {
        let Some(raw) = object.get(&field.name) else {
            continue;
        };
        let parsed = if field.repeated {
            let Value::Array(items) = raw else {
                return Err(unexpected(field, "a JSON array"));
            };
            FieldValue::Repeated(
                items
                    .iter()
                    .map(|item| value_to_field(item, field))
                    .collect::<Result<_, _>>()?,
            )
        } else {
            value_to_field(raw, field)?
        };
        message = message.set(field.name.clone(), parsed);
    }
    Ok(message)
}

fn value_to_field(value: &Value, field: &FieldDescriptor) -> Result<FieldValue, MessageError> {
    match &field.kind {
        FieldKind::String => value
            .as_str()
            .map(|s| FieldValue::String(s.to_string()))
            .ok_or_else(|| unexpected(field, "a JSON string")),
        FieldKind::Int32 => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(FieldValue::Int32)
            .ok_or_else(|| unexpected(field, "a 32-bit integer")),
        FieldKind::Int64 => value
            .as_i64()
            .map(FieldValue::Int64)
            .ok_or_else(|| unexpected(field, "a 64-bit integer")),
        FieldKind::Bool => value
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| unexpected(field, "a JSON boolean")),
        FieldKind::Enum(descriptor) => {
            let name = value
                .as_str()
                .ok_or_else(|| unexpected(field, "an enum value name"))?;
            if !descriptor.contains(name) {
                return Err(MessageError::UnknownEnumValue {
                    enum_name: descriptor.name.clone(),
                    value: name.to_string(),
                });
            }
            Ok(FieldValue::Enum(name.to_string()))
        }
        FieldKind::Message(nested) => {
            Ok(FieldValue::Message(from_value(value, Arc::clone(nested))?))
        }
    }
}

fn unexpected(field: &FieldDescriptor, expected: &'static str) -> MessageError {
    MessageError::UnexpectedValue {
        field: field.name.clone(),
        expected,
    }
}
