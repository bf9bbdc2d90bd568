//! In-memory store for offline planning and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreProbeError;
use crate::migration::SchemaMigration;
use crate::probe::{ExistingView, StoreProbe};
use crate::properties::ViewProperties;

/// Serialized store state: views plus collection document counts.
///
/// ```json
/// {
///   "views": [{ "name": "flex_view_deliveries", "properties": { "links": {} } }],
///   "collections": { "deliveries": 120 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub views: Vec<ExistingView>,
    #[serde(default)]
    pub collections: IndexMap<String, u64>,
}

/// Thread-safe in-memory views and collections.
#[derive(Debug, Default)]
pub struct InMemorySearchStore {
    views: DashMap<String, ViewProperties>,
    collections: DashMap<String, u64>,
}

impl InMemorySearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let store = Self::new();
        for view in snapshot.views {
            store.views.insert(view.name, view.properties);
        }
        for (name, count) in snapshot.collections {
            store.collections.insert(name, count);
        }
        store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let mut collections: Vec<(String, u64)> = self
            .collections
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        collections.sort();
        StoreSnapshot {
            views: self.sorted_views(),
            collections: collections.into_iter().collect(),
        }
    }

    pub fn with_collection(self, name: impl Into<String>, count: u64) -> Self {
        self.collections.insert(name.into(), count);
        self
    }

    pub fn with_view(self, name: impl Into<String>, properties: ViewProperties) -> Self {
        self.views.insert(name.into(), properties);
        self
    }

    pub fn view(&self, name: &str) -> Option<ViewProperties> {
        self.views.get(name).map(|entry| entry.value().clone())
    }

    /// Applies one migration the way a schema-sync executor would.
    pub fn apply(&self, migration: &SchemaMigration) {
        debug!(migration = %migration, "Applying migration to in-memory store");
        match migration {
            SchemaMigration::Create(m) | SchemaMigration::Update(m) | SchemaMigration::Recreate(m) => {
                self.views.insert(m.view_name.clone(), m.properties.clone());
            }
            SchemaMigration::Drop { view_name } => {
                self.views.remove(view_name);
            }
        }
    }

    pub fn apply_all<'a>(&self, migrations: impl IntoIterator<Item = &'a SchemaMigration>) {
        for migration in migrations {
            self.apply(migration);
        }
    }

    fn sorted_views(&self) -> Vec<ExistingView> {
        let mut views: Vec<ExistingView> = self
            .views
            .iter()
            .map(|entry| ExistingView {
                name: entry.key().clone(),
                properties: entry.value().clone(),
            })
            .collect();
        views.sort_by(|a, b| a.name.cmp(&b.name));
        views
    }
}

#[async_trait]
impl StoreProbe for InMemorySearchStore {
    async fn list_views(&self) -> Result<Vec<ExistingView>, StoreProbeError> {
        Ok(self.sorted_views())
    }

    async fn collection_exists(&self, name: &str) -> Result<bool, StoreProbeError> {
        Ok(self.collections.contains_key(name))
    }

    async fn collection_count(&self, name: &str) -> Result<u64, StoreProbeError> {
        self.collections
            .get(name)
            .map(|entry| *entry.value())
            .ok_or_else(|| StoreProbeError::query("count", name, "collection does not exist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ViewMigration;

    #[tokio::test]
    async fn test_collection_counts() {
        let store = InMemorySearchStore::new().with_collection("deliveries", 7);
        assert!(store.collection_exists("deliveries").await.unwrap());
        assert!(!store.collection_exists("missing").await.unwrap());
        assert_eq!(store.collection_count("deliveries").await.unwrap(), 7);
        assert!(store.collection_count("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_apply_create_and_drop() {
        let store = InMemorySearchStore::new();
        store.apply(&SchemaMigration::Create(ViewMigration {
            view_name: "flex_view_b".into(),
            collection_name: "b".into(),
            collection_size: 0,
            properties: ViewProperties::default(),
        }));
        store.apply(&SchemaMigration::Create(ViewMigration {
            view_name: "flex_view_a".into(),
            collection_name: "a".into(),
            collection_size: 0,
            properties: ViewProperties::default(),
        }));
        let names: Vec<String> = store
            .list_views()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["flex_view_a", "flex_view_b"]);

        store.apply(&SchemaMigration::Drop {
            view_name: "flex_view_a".into(),
        });
        assert!(store.view("flex_view_a").is_none());
        assert!(store.view("flex_view_b").is_some());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let json = r#"{
            "views": [{ "name": "flex_view_deliveries", "properties": { "commitIntervalMsec": 1000 } }],
            "collections": { "deliveries": 120 }
        }"#;
        let snapshot: StoreSnapshot = serde_json::from_str(json).unwrap();
        let store = InMemorySearchStore::from_snapshot(snapshot.clone());
        assert_eq!(store.snapshot(), snapshot);
        assert_eq!(
            store.view("flex_view_deliveries").unwrap().commit_interval_msec,
            Some(1000)
        );
    }
}
