use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ObjectTypeId;

/// Scalars every model can reference without declaring them.
pub const BUILTIN_SCALARS: &[&str] = &[
    "ID",
    "String",
    "Int",
    "Float",
    "Boolean",
    "DateTime",
    "LocalDate",
    "LocalTime",
    "OffsetDateTime",
    "Int53",
    "Decimal1",
    "Decimal2",
    "Decimal3",
    "JSON",
    "JSONObject",
    "I18nString",
];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Stable handle of a field: the declaring type plus the field's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FieldId {
    pub type_id: ObjectTypeId,
    pub index: usize,
}

/// What a field's values are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(String),
    Enum(String),
    Object(ObjectTypeId),
}

impl FieldType {
    pub fn is_scalar_or_enum(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    pub fn object_type_id(&self) -> Option<ObjectTypeId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }
}

/// Languages with a dedicated full-text analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchLanguage {
    En,
    De,
    Es,
    Fi,
    Fr,
    It,
    Nl,
    No,
    Pt,
    Ru,
    Sv,
    Zh,
}

impl SearchLanguage {
    /// Name of the full-text analyzer registered for this language.
    pub fn fulltext_analyzer(self) -> &'static str {
        match self {
            Self::En => "text_en",
            Self::De => "text_de",
            Self::Es => "text_es",
            Self::Fi => "text_fi",
            Self::Fr => "text_fr",
            Self::It => "text_it",
            Self::Nl => "text_nl",
            Self::No => "text_no",
            Self::Pt => "text_pt",
            Self::Ru => "text_ru",
            Self::Sv => "text_sv",
            Self::Zh => "text_zh",
        }
    }
}

/// Search-index flags of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSearchOptions {
    pub indexed: bool,
    pub fulltext_indexed: bool,
    pub case_sensitive: bool,
    pub language: Option<SearchLanguage>,
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) id: FieldId,
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    pub(crate) is_list: bool,
    pub(crate) is_system_field: bool,
    pub(crate) default_value: Option<Value>,
    pub(crate) is_relation: bool,
    pub(crate) is_reference: bool,
    pub(crate) is_child_entity_field: bool,
    pub(crate) search: FieldSearchOptions,
}

impl Field {
    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The object type declaring this field.
    pub fn declaring_type(&self) -> ObjectTypeId {
        self.id.type_id
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_list(&self) -> bool {
        self.is_list
    }

    pub fn is_system_field(&self) -> bool {
        self.is_system_field
    }

    pub fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_relation(&self) -> bool {
        self.is_relation
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    /// A list of child entities embedded in the declaring object.
    pub fn is_child_entity_field(&self) -> bool {
        self.is_child_entity_field
    }

    pub fn search(&self) -> &FieldSearchOptions {
        &self.search
    }

    pub fn is_search_indexed(&self) -> bool {
        self.search.indexed
    }

    pub fn is_search_fulltext_indexed(&self) -> bool {
        self.search.fulltext_indexed
    }

    pub fn is_search_case_sensitive(&self) -> bool {
        self.search.case_sensitive
    }

    pub fn search_language(&self) -> Option<SearchLanguage> {
        self.search.language
    }
}
