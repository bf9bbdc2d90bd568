//! Create input synthesis.
//!
//! A [`CreateObjectInputType`] is derived once per object type of a resolved
//! model by [`CreateInputTypeGenerator`]. It knows how to turn a mutation
//! payload into document properties and which model fields a payload writes.
//!
//! ```text
//! payload ──prepare_value──▶ properties (+ createdAt/updatedAt, + id for child entities)
//!         ──affected_fields─▶ [FieldId]   (permission checks)
//!         ──relation_additions─▶ [(FieldId, ids)]
//! ```

mod create;
mod generator;
mod render;

pub use create::{
    AdditionalProperties, CreateInputField, CreateInputFieldKind, CreateObjectInputType,
    NestedInputType, PropertyMap, RelationAddition,
};
pub use generator::CreateInputTypeGenerator;
pub use render::type_ref;
