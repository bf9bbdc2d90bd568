use std::fmt;

use serde::{Deserialize, Serialize};

use crate::properties::ViewProperties;

/// Data shared by the migrations that build or change a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMigration {
    pub view_name: String,
    pub collection_name: String,
    /// Document count at planning time; large collections may warrant a background build.
    pub collection_size: u64,
    pub properties: ViewProperties,
}

/// One step of a search view migration plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SchemaMigration {
    Create(ViewMigration),
    #[serde(rename_all = "camelCase")]
    Drop { view_name: String },
    Update(ViewMigration),
    /// Drop and build again; required when the primary sort changes.
    Recreate(ViewMigration),
}

impl SchemaMigration {
    pub fn view_name(&self) -> &str {
        match self {
            Self::Create(m) | Self::Update(m) | Self::Recreate(m) => &m.view_name,
            Self::Drop { view_name } => view_name,
        }
    }

    pub fn collection_size(&self) -> Option<u64> {
        match self {
            Self::Create(m) | Self::Update(m) | Self::Recreate(m) => Some(m.collection_size),
            Self::Drop { .. } => None,
        }
    }

    #[must_use]
    pub fn is_drop(&self) -> bool {
        matches!(self, Self::Drop { .. })
    }

    pub fn description(&self) -> String {
        match self {
            Self::Create(m) => format!(
                "Create search view \"{}\" on collection \"{}\" ({} documents)",
                m.view_name, m.collection_name, m.collection_size
            ),
            Self::Drop { view_name } => format!("Drop search view \"{view_name}\""),
            Self::Update(m) => format!(
                "Update properties of search view \"{}\" on collection \"{}\"",
                m.view_name, m.collection_name
            ),
            Self::Recreate(m) => format!(
                "Recreate search view \"{}\" on collection \"{}\" ({} documents) because its primary sort changed",
                m.view_name, m.collection_name, m.collection_size
            ),
        }
    }
}

impl fmt::Display for SchemaMigration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drop_serialization() {
        let migration = SchemaMigration::Drop {
            view_name: "flex_view_old".into(),
        };
        assert_eq!(
            serde_json::to_value(&migration).unwrap(),
            json!({ "type": "drop", "viewName": "flex_view_old" })
        );
        assert_eq!(migration.description(), "Drop search view \"flex_view_old\"");
        assert!(migration.is_drop());
        assert_eq!(migration.collection_size(), None);
    }

    #[test]
    fn test_create_serialization() {
        let migration = SchemaMigration::Create(ViewMigration {
            view_name: "flex_view_deliveries".into(),
            collection_name: "deliveries".into(),
            collection_size: 3,
            properties: ViewProperties::default(),
        });
        let value = serde_json::to_value(&migration).unwrap();
        assert_eq!(value["type"], "create");
        assert_eq!(value["collectionSize"], 3);
        assert_eq!(value["properties"]["primarySort"], json!([]));

        let back: SchemaMigration = serde_json::from_value(value).unwrap();
        assert_eq!(back, migration);
        assert!(migration.to_string().contains("(3 documents)"));
    }
}
