//! DDL generation: derives `create type` and `create table` statements from
//! a message schema.
//!
//! Pure string building, no I/O. The emitted text is a contract: column order
//! follows schema order, identifiers are double-quoted, enum literals are
//! single-quoted, statements end in `;`.

use protosql_core::message::{Descriptor, EnumDescriptor, FieldDescriptor, FieldKind};
use protosql_core::storage::{table_name, DEFAULT_ID_NAME};

const VARCHAR: &str = "varchar";
const TEXT: &str = "text";
const BIGINT: &str = "bigint";
const INTEGER: &str = "integer";
const BOOLEAN: &str = "boolean";
const SQL_ARRAY: &str = "[]";
const NOT_NULL: &str = "not null";
const PRIMARY_KEY: &str = "primary key";

/// Column constraint policy for generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdlOptions {
    /// When set, a required field named [`DEFAULT_ID_NAME`] becomes the
    /// table's primary key and other required fields get `not null`. When
    /// unset, every required field gets `not null`, the identity included.
    pub primary_key_on_identity: bool,
}

impl Default for DdlOptions {
    fn default() -> Self {
        Self {
            primary_key_on_identity: true,
        }
    }
}

/// Generates table and enum-type DDL for message schemas.
#[derive(Debug, Clone, Default)]
pub struct DdlGenerator {
    options: DdlOptions,
}

impl DdlGenerator {
    /// Creates a generator with the given constraint policy.
    pub fn new(options: DdlOptions) -> Self {
        Self { options }
    }

    /// Generates the ordered DDL statements for one schema.
    ///
    /// All enum `create type` statements come first, in field order, followed
    /// by the single `create table` statement. A schema with no fields yields
    /// an empty list, not an error.
    pub fn generate(&self, schema: &dyn Descriptor) -> Vec<String> {
        let mut enums = Vec::new();
        let mut columns = Vec::new();

        for field in schema.fields() {
            let sql_type = match &field.kind {
                FieldKind::String => VARCHAR.to_string(),
                FieldKind::Int64 => BIGINT.to_string(),
                FieldKind::Int32 => INTEGER.to_string(),
                FieldKind::Bool => BOOLEAN.to_string(),
                // Embedded messages are stored JSON-encoded.
                FieldKind::Message(_) => TEXT.to_string(),
                FieldKind::Enum(descriptor) => {
                    enums.push(create_enum(descriptor));
                    descriptor.name.clone()
                }
            };
            columns.push(self.column_definition(field, &sql_type));
        }

        if columns.is_empty() {
            return Vec::new();
        }

        let mut output = enums;
        output.push(format!(
            "create table {} (\n{}\n);",
            table_name(schema.full_name()),
            columns.join(",\n")
        ));
        output
    }

    fn column_definition(&self, field: &FieldDescriptor, sql_type: &str) -> String {
        let mut column = format!("  \"{}\" {}", field.name, sql_type);
        if field.repeated {
            column.push_str(SQL_ARRAY);
        }
        if field.required {
            if self.options.primary_key_on_identity && field.name == DEFAULT_ID_NAME {
                column.push(' ');
                column.push_str(PRIMARY_KEY);
            } else {
                column.push(' ');
                column.push_str(NOT_NULL);
            }
        }
        column
    }
}

fn create_enum(descriptor: &EnumDescriptor) -> String {
    let values: Vec<String> = descriptor
        .values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect();
    format!(
        "create type {} as enum({});",
        descriptor.name,
        values.join(", ")
    )
}
