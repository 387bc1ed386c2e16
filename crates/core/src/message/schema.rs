use std::fmt;
use std::sync::Arc;

/// Read-only schema capability consumed by every engine operation.
///
/// A descriptor exposes the field-level description of one message type:
/// names, kinds, repeated/required flags, in declaration order. Engines never
/// assume a particular schema representation beyond this trait.
pub trait Descriptor: Send + Sync {
    /// Fully qualified message type name (e.g. `domain.SearchRequest`).
    fn full_name(&self) -> &str;

    /// Field descriptors in declaration order.
    fn fields(&self) -> &[FieldDescriptor];

    /// Looks up a field by name.
    fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// The declared type of a message field.
///
/// This is the single dispatch point shared by the type mapper and the row
/// marshaller; both branch on it rather than on ad-hoc type-name strings.
#[derive(Clone)]
pub enum FieldKind {
    String,
    Int32,
    Int64,
    Bool,
    /// An enum field, carrying its named value set.
    Enum(EnumDescriptor),
    /// An embedded message field, carrying the nested schema.
    Message(Arc<dyn Descriptor>),
}

impl FieldKind {
    /// Short kind name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int32 => "int32",
            FieldKind::Int64 => "int64",
            FieldKind::Bool => "bool",
            FieldKind::Enum(_) => "enum",
            FieldKind::Message(_) => "message",
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Enum(e) => write!(f, "Enum({})", e.name),
            FieldKind::Message(m) => write!(f, "Message({})", m.full_name()),
            other => f.write_str(other.name()),
        }
    }
}

/// An enum type: a name plus its named values in declared order.
///
/// Enum values round-trip through storage by name, never by ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub values: Vec<String>,
}

impl EnumDescriptor {
    /// Creates an enum descriptor from a name and its value names.
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `value` is one of the declared value names.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// One field of a message schema.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub repeated: bool,
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a singular, optional field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            repeated: false,
            required: false,
        }
    }

    /// Marks this field as repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Marks this field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// In-code schema definition implementing [`Descriptor`].
///
/// Field names must be unique within a schema; the descriptor does not
/// enforce this, callers own that invariant.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    full_name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageSchema {
    /// Creates an empty schema with the given fully qualified name.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, preserving declaration order.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

impl Descriptor for MessageSchema {
    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MessageSchema {
        MessageSchema::new("domain.SearchRequest")
            .with_field(FieldDescriptor::new("query", FieldKind::String).required())
            .with_field(FieldDescriptor::new("page_number", FieldKind::Int32))
            .with_field(
                FieldDescriptor::new(
                    "corpus",
                    FieldKind::Enum(EnumDescriptor::new("Corpus", ["UNIVERSAL", "WEB"])),
                ),
            )
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let schema = sample();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["query", "page_number", "corpus"]);
    }

    #[test]
    fn test_field_lookup_by_name() {
        let schema = sample();
        assert!(schema.field("query").is_some());
        assert!(schema.field("query").unwrap().required);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_enum_descriptor_contains() {
        let corpus = EnumDescriptor::new("Corpus", ["UNIVERSAL", "WEB"]);
        assert!(corpus.contains("WEB"));
        assert!(!corpus.contains("web"));
        assert!(!corpus.contains("IMAGES"));
    }

    #[test]
    fn test_kind_debug_names_nested_types() {
        let corpus = FieldKind::Enum(EnumDescriptor::new("Corpus", ["WEB"]));
        assert_eq!(format!("{corpus:?}"), "Enum(Corpus)");
        let nested = FieldKind::Message(std::sync::Arc::new(MessageSchema::new("domain.Inner")));
        assert_eq!(format!("{nested:?}"), "Message(domain.Inner)");
        assert_eq!(format!("{:?}", FieldKind::Int64), "int64");
    }
}
