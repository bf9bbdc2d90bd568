//! Error types for input synthesis.
//!
//! [`SynthesisError`] aborts building the schema text; no partial set of
//! input types is ever appended. [`InputError`] aborts the single mutation
//! whose payload did not match its input shape.

use std::fmt;

use serde_json::Value;

/// Fatal errors raised while synthesizing Update input types.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisError {
    /// A field is declared as a list of lists.
    ListOfLists { type_name: String, field: String },

    /// A field's type cannot be expressed as an update input.
    UnsupportedType {
        type_name: String,
        field: String,
        type_ref: String,
    },

    /// A field references a type the document does not declare.
    UnknownType {
        type_name: String,
        field: String,
        referenced: String,
    },

    /// A directive carries arguments that cannot be interpreted.
    InvalidDirective {
        type_name: String,
        field: String,
        message: String,
    },

    /// The schema text could not be parsed.
    Parse(String),
}

impl fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListOfLists { type_name, field } => {
                write!(f, "Field \"{type_name}.{field}\": lists of lists are not allowed")
            }
            Self::UnsupportedType {
                type_name,
                field,
                type_ref,
            } => {
                write!(
                    f,
                    "Field \"{type_name}.{field}\": type \"{type_ref}\" is not supported in update inputs"
                )
            }
            Self::UnknownType {
                type_name,
                field,
                referenced,
            } => {
                write!(f, "Field \"{type_name}.{field}\": unknown type \"{referenced}\"")
            }
            Self::InvalidDirective {
                type_name,
                field,
                message,
            } => {
                write!(f, "Field \"{type_name}.{field}\": {message}")
            }
            Self::Parse(msg) => {
                write!(f, "Failed to parse schema: {msg}")
            }
        }
    }
}

impl std::error::Error for SynthesisError {}

impl SynthesisError {
    pub fn list_of_lists(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ListOfLists {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    pub fn unknown_type(
        type_name: impl Into<String>,
        field: impl Into<String>,
        referenced: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            field: field.into(),
            referenced: referenced.into(),
        }
    }

    /// Returns the error code reported by tooling.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ListOfLists { .. } => "LIST_OF_LISTS",
            Self::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            Self::UnknownType { .. } => "UNKNOWN_TYPE",
            Self::InvalidDirective { .. } => "INVALID_DIRECTIVE",
            Self::Parse(_) => "PARSE_ERROR",
        }
    }
}

/// Errors raised while applying a Create input shape to a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// A payload value does not have the shape its input field expects.
    PayloadShape {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// No input type exists for the requested name.
    UnknownType(String),

    /// The mutation timestamp has no RFC 3339 form.
    Timestamp(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadShape {
                field,
                expected,
                actual,
            } => {
                write!(f, "Expected value for \"{field}\" to be {expected}, but is {actual}")
            }
            Self::UnknownType(name) => {
                write!(f, "No input type for \"{name}\"")
            }
            Self::Timestamp(message) => {
                write!(f, "Cannot render timestamp: {message}")
            }
        }
    }
}

impl std::error::Error for InputError {}

impl InputError {
    pub fn payload_shape(field: impl Into<String>, expected: &'static str, actual: &Value) -> Self {
        Self::PayloadShape {
            field: field.into(),
            expected,
            actual: json_kind(actual),
        }
    }

    pub fn timestamp(error: impl fmt::Display) -> Self {
        Self::Timestamp(error.to_string())
    }

    /// Returns `true` if the client sent a malformed payload.
    #[must_use]
    pub fn is_payload_error(&self) -> bool {
        matches!(self, Self::PayloadShape { .. })
    }
}

/// Article-prefixed name of a JSON value's kind, for messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape_message() {
        let err = InputError::payload_shape("items", "an array", &json!("x"));
        assert_eq!(
            err.to_string(),
            "Expected value for \"items\" to be an array, but is a string"
        );
        assert!(err.is_payload_error());
        assert!(!InputError::UnknownType("X".into()).is_payload_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SynthesisError::list_of_lists("Delivery", "matrix").error_code(),
            "LIST_OF_LISTS"
        );
        assert_eq!(
            SynthesisError::Parse("eof".into()).error_code(),
            "PARSE_ERROR"
        );
    }

    #[test]
    fn test_list_of_lists_message() {
        let err = SynthesisError::list_of_lists("Delivery", "matrix");
        assert!(err.to_string().contains("lists of lists are not allowed"));
    }
}
