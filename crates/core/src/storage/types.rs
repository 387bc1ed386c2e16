use std::collections::HashMap;

/// Identity field name used when the caller does not designate one.
pub const DEFAULT_ID_NAME: &str = "id";

/// Namespace prefix stripped when deriving table names.
const NAMESPACE_PREFIX: &str = "domain.";

/// Derives the table name for a schema's fully qualified name.
///
/// Strips one leading `domain.` namespace prefix, then joins the remaining
/// name segments with underscores. Deterministic and stateless so both
/// engines share it. Distinct fully qualified names that normalize to the
/// same table name are the caller's problem, not detected here.
pub fn table_name(full_name: &str) -> String {
    let trimmed = full_name.strip_prefix(NAMESPACE_PREFIX).unwrap_or(full_name);
    trimmed.replace('.', "_")
}

/// A SQL-bindable value: a bound statement parameter or a result-row cell.
///
/// Array variants carry repeated fields; embedded messages travel as JSON
/// text. This is the whole vocabulary the connection collaborator has to
/// understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i32),
    BigInt(i64),
    Bool(bool),
    TextArray(Vec<String>),
    IntegerArray(Vec<i32>),
    BigIntArray(Vec<i64>),
    BoolArray(Vec<bool>),
}

impl SqlValue {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Text(_) => "text",
            SqlValue::Integer(_) => "integer",
            SqlValue::BigInt(_) => "bigint",
            SqlValue::Bool(_) => "boolean",
            SqlValue::TextArray(_) => "text[]",
            SqlValue::IntegerArray(_) => "integer[]",
            SqlValue::BigIntArray(_) => "bigint[]",
            SqlValue::BoolArray(_) => "boolean[]",
        }
    }
}

/// One result-set row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlRow {
    columns: HashMap<String, SqlValue>,
}

impl SqlRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column value, builder style.
    pub fn with_column(mut self, name: impl Into<String>, value: SqlValue) -> Self {
        self.columns.insert(name.into(), value);
        self
    }

    /// Reads a column by name.
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_strips_namespace_prefix() {
        assert_eq!(table_name("domain.SearchRequest"), "SearchRequest");
        assert_eq!(table_name("domain.search.Request"), "search_Request");
    }

    #[test]
    fn test_table_name_without_prefix_is_joined_as_is() {
        assert_eq!(table_name("SearchRequest"), "SearchRequest");
        assert_eq!(table_name("other.SearchRequest"), "other_SearchRequest");
    }

    #[test]
    fn test_row_builder_and_lookup() {
        let row = SqlRow::new()
            .with_column("query", SqlValue::Text("Test query".to_string()))
            .with_column("page_number", SqlValue::Integer(1));
        assert_eq!(row.get("query"), Some(&SqlValue::Text("Test query".to_string())));
        assert_eq!(row.get("absent"), None);
    }
}
