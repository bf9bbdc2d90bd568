//! Declarative model configuration.
//!
//! A [`ModelConfig`] is the serialized form of a model: the list of object
//! types with their fields and flags, as produced by an upstream schema
//! pipeline. It is turned into a resolved [`Model`](super::Model) with
//! [`Model::from_config`](super::Model::from_config).
//!
//! # Example
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "Delivery",
//!       "kind": "rootEntity",
//!       "flexSearch": true,
//!       "flexSearchPrimarySort": [{ "field": "deliveryNumber" }],
//!       "fields": [
//!         { "name": "deliveryNumber", "type": "String", "flexSearch": true },
//!         { "name": "items", "type": "Item", "list": true }
//!       ]
//!     },
//!     { "name": "Item", "kind": "childEntity", "fields": [{ "name": "sku", "type": "String" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::field::SearchLanguage;
use super::object_type::{OrderDirection, TypeKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    #[serde(default)]
    pub types: Vec<TypeConfig>,

    /// Names of enum types fields may reference.
    #[serde(default)]
    pub enums: Vec<String>,
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_config: TypeConfig) -> Self {
        self.types.push(type_config);
        self
    }

    pub fn with_enum(mut self, name: impl Into<String>) -> Self {
        self.enums.push(name.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConfig {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Root entities only; derived from the name when absent.
    #[serde(default)]
    pub plural_name: Option<String>,

    /// Root entities only.
    #[serde(default)]
    pub flex_search: bool,

    /// Root entities only.
    #[serde(default)]
    pub flex_search_primary_sort: Vec<PrimarySortConfig>,
}

impl TypeConfig {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
            plural_name: None,
            flex_search: false,
            flex_search_primary_sort: Vec::new(),
        }
    }

    pub fn root_entity(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::RootEntity)
    }

    pub fn child_entity(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::ChildEntity)
    }

    pub fn value_object(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::ValueObject)
    }

    pub fn entity_extension(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::EntityExtension)
    }

    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    pub fn with_flex_search(mut self, enabled: bool) -> Self {
        self.flex_search = enabled;
        self
    }

    pub fn with_primary_sort(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.flex_search_primary_sort.push(PrimarySortConfig {
            field: field.into(),
            direction,
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimarySortConfig {
    pub field: String,
    #[serde(default)]
    pub direction: OrderDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub name: String,

    /// Name of a built-in scalar, a declared enum or an object type.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub list: bool,

    #[serde(default)]
    pub relation: bool,

    #[serde(default)]
    pub reference: bool,

    /// A declared `null` is a default too; only an absent key means none.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,

    #[serde(default)]
    pub flex_search: bool,

    #[serde(default)]
    pub flex_search_fulltext: bool,

    #[serde(default)]
    pub flex_search_case_sensitive: bool,

    #[serde(default)]
    pub flex_search_language: Option<SearchLanguage>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            list: false,
            relation: false,
            reference: false,
            default_value: None,
            flex_search: false,
            flex_search_fulltext: false,
            flex_search_case_sensitive: false,
            flex_search_language: None,
        }
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn relation(mut self) -> Self {
        self.relation = true;
        self
    }

    pub fn reference(mut self) -> Self {
        self.reference = true;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn flex_search(mut self) -> Self {
        self.flex_search = true;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.flex_search_case_sensitive = true;
        self
    }

    pub fn fulltext(mut self, language: SearchLanguage) -> Self {
        self.flex_search_fulltext = true;
        self.flex_search_language = Some(language);
        self
    }
}
