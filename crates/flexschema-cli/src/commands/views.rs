use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flexschema_search::{
    InMemorySearchStore, SchemaMigration, SearchConfiguration, StoreSnapshot,
    plan_search_view_migrations,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::{load_model, read_source};
use crate::cli::{OutputFormat, PlanViewsArgs};
use crate::output::{print_plan, print_success};

pub async fn plan_views(
    args: &PlanViewsArgs,
    config: &SearchConfiguration,
    format: OutputFormat,
) -> Result<()> {
    let model = load_model(&args.model)?;
    let store = match &args.store {
        Some(path) => load_store(path)?,
        None => InMemorySearchStore::new(),
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let planned = plan_search_view_migrations(&model, &store, config, &cancel).await;
    signal_task.abort();
    let plan = planned.context("Failed to plan search view migrations")?;
    print_plan(&plan, format)?;

    if args.apply
        && let Some(path) = &args.store
    {
        apply_plan(&store, &plan, path)?;
        print_success(&format!(
            "Applied {} migration(s) to {}",
            plan.len(),
            path.display()
        ));
    }
    Ok(())
}

pub fn load_store(path: &Path) -> Result<InMemorySearchStore> {
    let invalid = || format!("Invalid store snapshot: {}", path.display());
    let value: Value = serde_json::from_str(&read_source(Some(path))?).with_context(invalid)?;
    // serde would read `[]` as an empty store
    if !value.is_object() {
        anyhow::bail!("{}: expected a JSON object", invalid());
    }
    let snapshot: StoreSnapshot = serde_json::from_value(value).with_context(invalid)?;
    Ok(InMemorySearchStore::from_snapshot(snapshot))
}

/// Applies the plan to the store and writes the resulting snapshot.
pub fn apply_plan(store: &InMemorySearchStore, plan: &[SchemaMigration], path: &Path) -> Result<()> {
    store.apply_all(plan);
    let json = serde_json::to_string_pretty(&store.snapshot())?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), migrations = plan.len(), "Wrote store snapshot");
    Ok(())
}
