//! Rendering Create inputs for schema registration.

use async_graphql::dynamic::{InputObject, InputValue, TypeRef};
use tracing::trace;

use super::create::CreateObjectInputType;
use crate::ast::{InputObjectTypeDefinition, InputValueDefinition, NonNullType, TypeNode};

/// Converts type syntax into a dynamic-schema type reference.
pub fn type_ref(node: &TypeNode) -> TypeRef {
    match node {
        TypeNode::Named(name) => TypeRef::named(name.clone()),
        TypeNode::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
        TypeNode::NonNull(NonNullType::Named(name)) => TypeRef::named_nn(name.clone()),
        TypeNode::NonNull(NonNullType::List(inner)) => {
            TypeRef::NonNull(Box::new(TypeRef::List(Box::new(type_ref(inner)))))
        }
    }
}

impl CreateObjectInputType {
    /// The input object to register with a dynamic schema.
    pub fn to_input_object(&self) -> InputObject {
        trace!(input_type = %self.name(), "Rendering dynamic input object");
        self.fields().iter().fold(
            InputObject::new(self.name()),
            |object, field| object.field(InputValue::new(field.name(), type_ref(field.input_type()))),
        )
    }

    /// Input objects for this type and every nested Create input it uses.
    pub fn to_input_objects(&self) -> Vec<InputObject> {
        self.reachable_types()
            .into_iter()
            .map(CreateObjectInputType::to_input_object)
            .collect()
    }

    /// The schema-text form of this input type.
    pub fn to_definition(&self) -> InputObjectTypeDefinition {
        InputObjectTypeDefinition {
            name: self.name().to_string(),
            directives: Vec::new(),
            fields: self
                .fields()
                .iter()
                .map(|field| InputValueDefinition::new(field.name(), field.input_type().clone()))
                .collect(),
        }
    }
}
