use thiserror::Error;

/// Errors raised while decoding or encoding message field values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("unknown value '{value}' for enum {enum_name}")]
    UnknownEnumValue { enum_name: String, value: String },
    #[error("field '{field}': expected {expected}")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
    },
    #[error("malformed message JSON: {0}")]
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_error_display() {
        assert_eq!(
            MessageError::UnknownEnumValue {
                enum_name: "Corpus".to_string(),
                value: "INVALID".to_string(),
            }
            .to_string(),
            "unknown value 'INVALID' for enum Corpus"
        );
        assert_eq!(
            MessageError::UnexpectedValue {
                field: "query".to_string(),
                expected: "a string",
            }
            .to_string(),
            "field 'query': expected a string"
        );
    }
}
