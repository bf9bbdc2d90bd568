//! View properties: what a view should look like, and when two agree.

use flexschema_core::names::{ID_FIELD, KEY_FIELD};
use flexschema_core::{Field, FieldId, FieldType, Model};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfiguration;
use crate::definition::{
    ArangoSearchDefinition, IDENTITY_ANALYZER, NORM_CI_ANALYZER, PrimarySortConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreValues {
    None,
    Id,
}

/// Link of a collection or field into a view. Unset options use store defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IndexMap<String, CollectionLink>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_all_fields: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_list_positions: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_values: Option<StoreValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewProperties {
    #[serde(default)]
    pub links: IndexMap<String, CollectionLink>,

    #[serde(default)]
    pub primary_sort: Vec<PrimarySortConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_interval_msec: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consolidation_interval_msec: Option<u64>,
}

/// Computes the properties a definition requires.
pub fn properties_for_definition(
    model: &Model,
    definition: &ArangoSearchDefinition,
    config: &SearchConfiguration,
) -> ViewProperties {
    let root = model.object_type(definition.root_entity_type);
    let builder = LinkBuilder {
        model,
        recursion_depth: config.recursion_depth,
    };

    let collection_link = CollectionLink {
        analyzers: Some(vec![IDENTITY_ANALYZER.to_string()]),
        fields: Some(builder.fields(root.fields(), &[])),
        include_all_fields: Some(false),
        track_list_positions: Some(false),
        store_values: Some(StoreValues::Id),
    };

    let mut links = IndexMap::new();
    links.insert(definition.collection_name.clone(), collection_link);

    ViewProperties {
        links,
        primary_sort: definition.primary_sort.clone(),
        commit_interval_msec: Some(config.commit_interval_msec),
        consolidation_interval_msec: Some(config.consolidation_interval_msec),
    }
}

struct LinkBuilder<'a> {
    model: &'a Model,
    recursion_depth: usize,
}

impl LinkBuilder<'_> {
    fn fields(&self, fields: &[Field], path: &[FieldId]) -> IndexMap<String, CollectionLink> {
        fields
            .iter()
            .filter(|field| field.is_search_indexed() || field.is_search_fulltext_indexed())
            // relation targets are not stored in the document
            .filter(|field| !field.is_relation())
            .filter(|field| {
                path.iter().filter(|id| **id == field.id()).count() < self.recursion_depth
            })
            .map(|field| {
                let mut nested_path = path.to_vec();
                nested_path.push(field.id());
                (self.link_name(field), self.field_link(field, &nested_path))
            })
            .collect()
    }

    fn link_name(&self, field: &Field) -> String {
        let declaring = self.model.object_type(field.declaring_type());
        if declaring.is_root_entity_type() && field.is_system_field() && field.name() == ID_FIELD {
            KEY_FIELD.to_string()
        } else {
            field.name().to_string()
        }
    }

    fn field_link(&self, field: &Field, path: &[FieldId]) -> CollectionLink {
        if let FieldType::Object(target) = field.field_type()
            && !field.is_reference()
        {
            let target = self.model.object_type(*target);
            return CollectionLink {
                fields: Some(self.fields(target.fields(), path)),
                ..CollectionLink::default()
            };
        }

        let analyzers = field_analyzers(field);
        if analyzers == [IDENTITY_ANALYZER] {
            CollectionLink::default()
        } else {
            CollectionLink {
                analyzers: Some(analyzers),
                ..CollectionLink::default()
            }
        }
    }
}

/// Analyzers for a leaf field, language analyzer first.
pub fn field_analyzers(field: &Field) -> Vec<String> {
    let mut analyzers = Vec::new();
    if field.is_search_fulltext_indexed()
        && let Some(language) = field.search_language()
    {
        analyzers.push(language.fulltext_analyzer().to_string());
    }
    if field.is_search_indexed() {
        if field.is_search_case_sensitive() {
            analyzers.push(IDENTITY_ANALYZER.to_string());
        } else {
            analyzers.push(NORM_CI_ANALYZER.to_string());
        }
    }
    analyzers
}

/// Whether an existing view already has the required properties.
///
/// Only links, primary sort and commit interval take part; a differing
/// consolidation interval alone never triggers a migration.
pub fn is_equal_properties(required: &ViewProperties, existing: &ViewProperties) -> bool {
    required.links == existing.links
        && required.primary_sort == existing.primary_sort
        && required.commit_interval_msec == existing.commit_interval_msec
}

/// The primary sort of a view cannot change in place.
pub fn is_recreate_required(required: &ViewProperties, existing: &ViewProperties) -> bool {
    required.primary_sort != existing.primary_sort
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexschema_core::{FieldConfig, ModelConfig, SearchLanguage, TypeConfig};
    use serde_json::json;

    fn model() -> Model {
        let config = ModelConfig::new()
            .with_type(
                TypeConfig::root_entity("Delivery")
                    .with_flex_search(true)
                    .with_field(
                        FieldConfig::new("description", "String")
                            .flex_search()
                            .case_sensitive()
                            .fulltext(SearchLanguage::En),
                    )
                    .with_field(FieldConfig::new("code", "String").flex_search().case_sensitive())
                    .with_field(FieldConfig::new("name", "String").flex_search())
                    .with_field(FieldConfig::new("notes", "String").fulltext(SearchLanguage::De))
                    .with_field(FieldConfig::new("unindexed", "String"))
                    .with_field(FieldConfig::new("address", "Address").flex_search()),
            )
            .with_type(
                TypeConfig::value_object("Address")
                    .with_field(FieldConfig::new("city", "String").flex_search())
                    .with_field(FieldConfig::new("next", "Address").flex_search()),
            );
        Model::from_config(config).unwrap()
    }

    fn field<'a>(model: &'a Model, name: &str) -> &'a Field {
        model
            .get_object_type("Delivery")
            .unwrap()
            .field(name)
            .unwrap()
    }

    #[test]
    fn test_fulltext_and_case_sensitive_analyzers() {
        let model = model();
        assert_eq!(
            field_analyzers(field(&model, "description")),
            vec!["text_en", "identity"]
        );
        assert_eq!(field_analyzers(field(&model, "name")), vec!["norm_ci"]);
        assert_eq!(field_analyzers(field(&model, "notes")), vec!["text_de"]);
    }

    #[test]
    fn test_case_sensitive_only_link_is_empty() {
        let model = model();
        let definition = &crate::required_views(&model)[0];
        let properties = properties_for_definition(&model, definition, &SearchConfiguration::default());
        let fields = properties.links["deliveries"].fields.as_ref().unwrap();
        assert_eq!(fields["code"], CollectionLink::default());
        assert_eq!(fields["code"].analyzers, None);
        assert!(!fields.contains_key("unindexed"));
    }

    #[test]
    fn test_properties_serialization() {
        let model = model();
        let definition = &crate::required_views(&model)[0];
        let properties = properties_for_definition(&model, definition, &SearchConfiguration::default());

        assert_eq!(
            serde_json::to_value(&properties).unwrap(),
            json!({
                "links": {
                    "deliveries": {
                        "analyzers": ["identity"],
                        "fields": {
                            "_key": {},
                            "createdAt": {},
                            "updatedAt": {},
                            "description": { "analyzers": ["text_en", "identity"] },
                            "code": {},
                            "name": { "analyzers": ["norm_ci"] },
                            "notes": { "analyzers": ["text_de"] },
                            "address": {
                                "fields": {
                                    "city": { "analyzers": ["norm_ci"] },
                                    "next": {
                                        "fields": {
                                            "city": { "analyzers": ["norm_ci"] }
                                        }
                                    }
                                }
                            }
                        },
                        "includeAllFields": false,
                        "trackListPositions": false,
                        "storeValues": "id"
                    }
                },
                "primarySort": [],
                "commitIntervalMsec": 1000,
                "consolidationIntervalMsec": 1000
            })
        );
    }

    #[test]
    fn test_recursion_depth_allows_repeats() {
        let model = model();
        let definition = &crate::required_views(&model)[0];
        let config = SearchConfiguration {
            recursion_depth: 2,
            ..Default::default()
        };
        let properties = properties_for_definition(&model, definition, &config);
        let address = &properties.links["deliveries"].fields.as_ref().unwrap()["address"];
        let next = &address.fields.as_ref().unwrap()["next"];
        let next_next = &next.fields.as_ref().unwrap()["next"];
        assert!(next_next.fields.as_ref().unwrap().contains_key("city"));
        assert!(!next_next.fields.as_ref().unwrap().contains_key("next"));
    }

    #[test]
    fn test_equality_ignores_consolidation_interval() {
        let required = ViewProperties {
            commit_interval_msec: Some(1000),
            consolidation_interval_msec: Some(1000),
            ..Default::default()
        };
        let mut existing = required.clone();
        existing.consolidation_interval_msec = Some(5000);
        assert!(is_equal_properties(&required, &existing));

        existing.commit_interval_msec = Some(2000);
        assert!(!is_equal_properties(&required, &existing));
        assert!(!is_recreate_required(&required, &existing));

        existing.primary_sort = vec![PrimarySortConfig {
            field: "x".into(),
            asc: true,
        }];
        assert!(is_recreate_required(&required, &existing));
    }
}
