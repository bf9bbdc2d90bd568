//! Reconciling existing search views with the views a model requires.
//!
//! The plan is assembled from three independent sets:
//!
//! - **create**: required views missing from the store
//! - **drop**: existing views with the reserved prefix that no longer match a definition
//! - **update/recreate**: matching views whose properties differ
//!
//! Planning only reads from the store. Store probes for different views run
//! concurrently, and any failing probe fails the whole plan.

use flexschema_core::Model;
use futures_util::future::try_join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::SearchConfiguration;
use crate::definition::{ArangoSearchDefinition, SEARCH_VIEW_PREFIX, required_views};
use crate::error::{MigrationError, StoreProbeError};
use crate::migration::{SchemaMigration, ViewMigration};
use crate::probe::{ExistingView, StoreProbe};
use crate::properties::{is_equal_properties, is_recreate_required, properties_for_definition};

/// Computes the migrations that bring `existing` in line with `required`.
///
/// Creates come first, then drops, then updates and recreates.
#[instrument(skip_all, fields(existing = existing.len(), required = required.len()))]
pub async fn diff_search_views(
    model: &Model,
    existing: &[ExistingView],
    required: &[ArangoSearchDefinition],
    probe: &dyn StoreProbe,
    config: &SearchConfiguration,
) -> Result<Vec<SchemaMigration>, MigrationError> {
    config
        .validate()
        .map_err(MigrationError::InvalidConfiguration)?;

    let drops = drop_operations(existing, required);
    let (creates, updates) = tokio::try_join!(
        create_operations(model, existing, required, probe, config),
        update_operations(model, existing, required, probe, config),
    )?;

    let mut plan = creates;
    plan.extend(drops);
    plan.extend(updates);
    Ok(plan)
}

/// Lists the store's views and plans against the model's required views.
///
/// Returns [`MigrationError::Cancelled`] as soon as `cancel` fires.
#[instrument(skip_all)]
pub async fn plan_search_view_migrations(
    model: &Model,
    probe: &dyn StoreProbe,
    config: &SearchConfiguration,
    cancel: &CancellationToken,
) -> Result<Vec<SchemaMigration>, MigrationError> {
    let planning = async {
        let existing = probe.list_views().await.inspect_err(|e| {
            warn!(error = %e, "Failed to list search views");
        })?;
        let required = required_views(model);
        diff_search_views(model, &existing, &required, probe, config).await
    };

    let plan = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            info!("Search view migration planning cancelled");
            return Err(MigrationError::Cancelled);
        }
        result = planning => result?,
    };

    info!(
        migrations = plan.len(),
        creates = plan.iter().filter(|m| matches!(m, SchemaMigration::Create(_))).count(),
        drops = plan.iter().filter(|m| m.is_drop()).count(),
        "Planned search view migrations"
    );
    Ok(plan)
}

/// Drops managed views without a definition. Unprefixed views are left alone.
pub fn drop_operations(
    existing: &[ExistingView],
    required: &[ArangoSearchDefinition],
) -> Vec<SchemaMigration> {
    existing
        .iter()
        .filter(|view| view.name.starts_with(SEARCH_VIEW_PREFIX))
        .filter(|view| !required.iter().any(|def| def.view_name == view.name))
        .map(|view| SchemaMigration::Drop {
            view_name: view.name.clone(),
        })
        .collect()
}

pub async fn create_operations(
    model: &Model,
    existing: &[ExistingView],
    required: &[ArangoSearchDefinition],
    probe: &dyn StoreProbe,
    config: &SearchConfiguration,
) -> Result<Vec<SchemaMigration>, MigrationError> {
    let to_create = required
        .iter()
        .filter(|def| !existing.iter().any(|view| view.name == def.view_name));

    try_join_all(to_create.map(|definition| async move {
        let collection_size = collection_size(probe, &definition.collection_name).await?;
        debug!(view = %definition.view_name, "Search view missing");
        Ok::<_, MigrationError>(SchemaMigration::Create(ViewMigration {
            view_name: definition.view_name.clone(),
            collection_name: definition.collection_name.clone(),
            collection_size,
            properties: properties_for_definition(model, definition, config),
        }))
    }))
    .await
}

pub async fn update_operations(
    model: &Model,
    existing: &[ExistingView],
    required: &[ArangoSearchDefinition],
    probe: &dyn StoreProbe,
    config: &SearchConfiguration,
) -> Result<Vec<SchemaMigration>, MigrationError> {
    let changed = existing.iter().filter_map(|view| {
        let definition = required.iter().find(|def| def.view_name == view.name)?;
        let properties = properties_for_definition(model, definition, config);
        if is_equal_properties(&properties, &view.properties) {
            return None;
        }
        let recreate = is_recreate_required(&properties, &view.properties);
        Some((definition, properties, recreate))
    });

    try_join_all(changed.map(|(definition, properties, recreate)| async move {
        let collection_size = collection_size(probe, &definition.collection_name).await?;
        debug!(view = %definition.view_name, recreate, "Search view properties changed");
        let migration = ViewMigration {
            view_name: definition.view_name.clone(),
            collection_name: definition.collection_name.clone(),
            collection_size,
            properties,
        };
        Ok::<_, MigrationError>(if recreate {
            SchemaMigration::Recreate(migration)
        } else {
            SchemaMigration::Update(migration)
        })
    }))
    .await
}

/// Document count of a collection, zero if it does not exist yet.
async fn collection_size(probe: &dyn StoreProbe, collection: &str) -> Result<u64, StoreProbeError> {
    let exists = probe.collection_exists(collection).await.inspect_err(|e| {
        warn!(collection, error = %e, "Collection existence probe failed");
    })?;
    if !exists {
        return Ok(0);
    }
    probe.collection_count(collection).await.inspect_err(|e| {
        warn!(collection, error = %e, "Collection count probe failed");
    })
}
