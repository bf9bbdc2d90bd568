//! # flexschema-graphql
//!
//! Mutation input synthesis for flexschema models.
//!
//! Two passes live here, and they run at different points of the pipeline:
//!
//! - [`transform::UpdateInputTypesTransformer`] works on schema text. Update
//!   inputs have to exist in the schema before the model that depends on it
//!   can be resolved, so this pass reads the [`ast`] directly.
//! - [`input::CreateInputTypeGenerator`] works on a resolved
//!   [`Model`](flexschema_core::Model) and produces Create inputs that can
//!   prepare payloads and report the fields a payload writes.
//!
//! ## Modules
//!
//! - [`ast`] - Schema-text tree, parsing and SDL rendering
//! - [`input`] - Create input shapes and their generator
//! - [`transform`] - Update/UpdateAll input synthesis
//! - [`error`] - Synthesis and payload errors

pub mod ast;
pub mod error;
pub mod input;
pub mod transform;

pub use ast::{Document, parse_sdl};
pub use error::{InputError, SynthesisError};
pub use input::{CreateInputTypeGenerator, CreateObjectInputType, PropertyMap};
pub use transform::{AstTransformer, UpdateInputTypesTransformer, run_transformers};
