use thiserror::Error;

/// Errors raised while resolving a [`ModelConfig`](crate::ModelConfig) into a [`Model`](crate::Model).
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Type \"{name}\" is declared more than once")]
    DuplicateType { name: String },

    #[error("Field \"{type_name}.{field}\" is declared more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("Field \"{type_name}.{field}\" references unknown type \"{referenced}\"")]
    UnknownType {
        type_name: String,
        field: String,
        referenced: String,
    },

    #[error("Field \"{type_name}.{field}\" holds child entities and must be a list")]
    NonListChildEntityField { type_name: String, field: String },

    #[error("Field \"{type_name}.{field}\" embeds root entity \"{referenced}\"; declare it as a relation or a reference")]
    EmbeddedRootEntity {
        type_name: String,
        field: String,
        referenced: String,
    },

    #[error("Field \"{type_name}.{field}\" is a relation or reference but \"{referenced}\" is not a root entity")]
    InvalidRelationTarget {
        type_name: String,
        field: String,
        referenced: String,
    },

    #[error("Primary sort of \"{type_name}\" references unknown field \"{field}\"")]
    UnknownPrimarySortField { type_name: String, field: String },

    #[error("Model configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ModelError {
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType { name: name.into() }
    }

    pub fn duplicate_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::DuplicateField {
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

    /// Returns `true` if the configuration itself could not be deserialized.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
