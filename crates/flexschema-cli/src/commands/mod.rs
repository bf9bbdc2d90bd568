pub mod inputs;
pub mod views;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use flexschema_core::Model;

/// Reads a file, or stdin when no path is given.
fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

pub fn load_model(path: &Path) -> Result<Arc<Model>> {
    let json = read_source(Some(path))?;
    let model = Model::from_json(&json)
        .with_context(|| format!("Invalid model: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        types = model.object_types().len(),
        "Loaded model"
    );
    Ok(Arc::new(model))
}
