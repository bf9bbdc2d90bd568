//! Transformations of schema text that run before the model is resolved.

mod update_inputs;

pub use update_inputs::UpdateInputTypesTransformer;

use tracing::debug;

use crate::ast::Document;
use crate::error::SynthesisError;

/// A pass that extends a schema document in place.
///
/// Implementations must leave the document unchanged when they fail.
pub trait AstTransformer: Send + Sync {
    fn name(&self) -> &'static str;

    fn transform(&self, document: &mut Document) -> Result<(), SynthesisError>;
}

/// Runs each transformer in order, stopping at the first failure.
pub fn run_transformers(
    document: &mut Document,
    transformers: &[&dyn AstTransformer],
) -> Result<(), SynthesisError> {
    for transformer in transformers {
        let before = document.definitions.len();
        transformer.transform(document)?;
        debug!(
            transformer = transformer.name(),
            added = document.definitions.len() - before,
            "Applied schema transformer"
        );
    }
    Ok(())
}
