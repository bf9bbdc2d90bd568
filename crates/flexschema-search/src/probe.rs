//! Read-only access to the backing store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreProbeError;
use crate::properties::ViewProperties;

/// A view as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingView {
    pub name: String,
    #[serde(default)]
    pub properties: ViewProperties,
}

/// The queries migration planning issues against a store.
///
/// Implementations must be thread-safe; probes for different views run
/// concurrently.
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Lists all search views with their current properties.
    async fn list_views(&self) -> Result<Vec<ExistingView>, StoreProbeError>;

    async fn collection_exists(&self, name: &str) -> Result<bool, StoreProbeError>;

    /// Number of documents in a collection. Only valid if it exists.
    async fn collection_count(&self, name: &str) -> Result<u64, StoreProbeError>;
}
