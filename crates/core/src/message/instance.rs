use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::schema::Descriptor;

/// A concrete value for one message field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    /// An enum value, by declared name.
    Enum(String),
    /// An embedded message.
    Message(MessageInstance),
    /// Values of a repeated field, in order.
    Repeated(Vec<FieldValue>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int32(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int64(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A concrete message: a schema handle plus a value per field.
///
/// Instances are transient — engines read them during a single call and never
/// retain a reference past it. Equality compares the schema's full name and
/// the field values, which is what "the same stored row" means here.
#[derive(Clone)]
pub struct MessageInstance {
    schema: Arc<dyn Descriptor>,
    values: HashMap<String, FieldValue>,
}

impl MessageInstance {
    /// Creates an instance with no field values set.
    pub fn new(schema: Arc<dyn Descriptor>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
        }
    }

    /// The schema this instance belongs to.
    pub fn schema(&self) -> &Arc<dyn Descriptor> {
        &self.schema
    }

    /// Sets a field value, replacing any previous one.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Reads a field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

impl PartialEq for MessageInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.full_name() == other.schema.full_name() && self.values == other.values
    }
}

impl fmt::Debug for MessageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageInstance")
            .field("schema", &self.schema.full_name())
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{FieldDescriptor, FieldKind, MessageSchema};

    fn schema() -> Arc<dyn Descriptor> {
        Arc::new(
            MessageSchema::new("domain.SearchRequest")
                .with_field(FieldDescriptor::new("query", FieldKind::String))
                .with_field(FieldDescriptor::new("page_number", FieldKind::Int32)),
        )
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let message = MessageInstance::new(schema())
            .set("query", "Test query")
            .set("page_number", 1);
        assert_eq!(message.get("query"), Some(&FieldValue::String("Test query".into())));
        assert_eq!(message.get("page_number"), Some(&FieldValue::Int32(1)));
        assert_eq!(message.get("missing"), None);
    }

    #[test]
    fn test_equality_compares_schema_name_and_values() {
        let a = MessageInstance::new(schema()).set("query", "a");
        let b = MessageInstance::new(schema()).set("query", "a");
        let c = MessageInstance::new(schema()).set("query", "b");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let message = MessageInstance::new(schema()).set("query", "old").set("query", "new");
        assert_eq!(message.get("query"), Some(&FieldValue::String("new".into())));
    }
}
