//! Search views a model requires.

use flexschema_core::names::{ID_FIELD, KEY_FIELD};
use flexschema_core::{Model, ObjectType, ObjectTypeId};
use serde::{Deserialize, Serialize};

/// Analyzer comparing values as-is. Implicit on every link.
pub const IDENTITY_ANALYZER: &str = "identity";
/// Analyzer comparing normalized, case-folded values.
pub const NORM_CI_ANALYZER: &str = "norm_ci";
/// Every view this crate manages carries this prefix; others are never dropped.
pub const SEARCH_VIEW_PREFIX: &str = "flex_view_";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimarySortConfig {
    pub field: String,
    pub asc: bool,
}

/// The view one search-indexed root entity requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArangoSearchDefinition {
    pub root_entity_type: ObjectTypeId,
    pub view_name: String,
    pub collection_name: String,
    pub primary_sort: Vec<PrimarySortConfig>,
}

pub fn view_name_for_collection(collection_name: &str) -> String {
    format!("{SEARCH_VIEW_PREFIX}{collection_name}")
}

/// One definition per search-indexed root entity, in model order.
pub fn required_views(model: &Model) -> Vec<ArangoSearchDefinition> {
    model
        .root_entity_types()
        .filter(|t| t.is_search_indexed())
        .filter_map(definition_for)
        .collect()
}

fn definition_for(root_entity: &ObjectType) -> Option<ArangoSearchDefinition> {
    let collection_name = root_entity.collection_name()?.to_string();
    Some(ArangoSearchDefinition {
        root_entity_type: root_entity.id(),
        view_name: view_name_for_collection(&collection_name),
        collection_name,
        primary_sort: root_entity
            .primary_sort()
            .iter()
            .map(|clause| PrimarySortConfig {
                field: if clause.field == ID_FIELD {
                    KEY_FIELD.to_string()
                } else {
                    clause.field.clone()
                },
                asc: clause.is_ascending(),
            })
            .collect(),
    })
}
