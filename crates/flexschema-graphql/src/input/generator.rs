use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use flexschema_core::names::create_input_type_name;
use flexschema_core::{Field, FieldType, Model, ObjectType, ObjectTypeId, TypeKind};
use tracing::{debug, trace};

use super::create::{
    AdditionalProperties, CreateInputField, CreateInputFieldKind, CreateObjectInputType,
    NestedInputType,
};
use crate::ast::TypeNode;
use crate::error::InputError;

/// Synthesizes Create inputs from a model, memoized per object type.
///
/// Concurrent first requests for the same type may both build it; the first
/// one stored wins and later callers receive that instance. Types referring
/// to each other keep each other alive for the lifetime of the cache.
pub struct CreateInputTypeGenerator {
    model: Arc<Model>,
    cache: DashMap<ObjectTypeId, Arc<CreateObjectInputType>>,
}

/// Types built during one top-level request, published together.
#[derive(Default)]
struct Pending {
    slots: HashMap<ObjectTypeId, NestedInputType>,
    built: Vec<(ObjectTypeId, Arc<CreateObjectInputType>)>,
}

impl CreateInputTypeGenerator {
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            cache: DashMap::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the Create input of an object type.
    pub fn generate(&self, type_id: ObjectTypeId) -> Arc<CreateObjectInputType> {
        if let Some(cached) = self.cache.get(&type_id) {
            return Arc::clone(cached.value());
        }

        let mut pending = Pending::default();
        let root = self.build(type_id, &mut pending);

        // nested slots are filled before anything becomes visible to other callers
        for (id, input_type) in pending.built {
            if id != type_id {
                self.cache.entry(id).or_insert(input_type);
            }
        }
        let stored = Arc::clone(self.cache.entry(type_id).or_insert(root).value());
        debug!(input_type = %stored.name(), "Generated create input type");
        stored
    }

    /// Looks the type up by name.
    pub fn generate_by_name(&self, type_name: &str) -> Result<Arc<CreateObjectInputType>, InputError> {
        let object_type = self
            .model
            .get_object_type(type_name)
            .ok_or_else(|| InputError::UnknownType(type_name.to_string()))?;
        Ok(self.generate(object_type.id()))
    }

    fn build(&self, type_id: ObjectTypeId, pending: &mut Pending) -> Arc<CreateObjectInputType> {
        let object_type = self.model.object_type(type_id);
        let slot = NestedInputType::pending(create_input_type_name(object_type.name()));
        pending.slots.insert(type_id, slot.clone());

        let fields = object_type
            .fields()
            .iter()
            .filter(|field| !field.is_system_field())
            .map(|field| self.input_field(field, pending))
            .collect();

        let input_type = Arc::new(CreateObjectInputType {
            name: slot.name().to_string(),
            type_id,
            additional: additional_properties(object_type),
            fields,
        });
        slot.fill(Arc::clone(&input_type));
        pending.built.push((type_id, Arc::clone(&input_type)));
        trace!(input_type = %input_type.name(), "Built create input type");
        input_type
    }

    fn nested(&self, type_id: ObjectTypeId, pending: &mut Pending) -> NestedInputType {
        if let Some(cached) = self.cache.get(&type_id) {
            return NestedInputType::resolved(Arc::clone(cached.value()));
        }
        if let Some(slot) = pending.slots.get(&type_id) {
            return slot.clone();
        }
        NestedInputType::resolved(self.build(type_id, pending))
    }

    fn input_field(&self, field: &Field, pending: &mut Pending) -> CreateInputField {
        let (input_type, kind) = match field.field_type() {
            FieldType::Scalar(name) | FieldType::Enum(name) => scalar_input(name, field.is_list()),
            FieldType::Object(_) if field.is_relation() => (
                if field.is_list() {
                    TypeNode::list_of_non_null("ID")
                } else {
                    TypeNode::named("ID")
                },
                CreateInputFieldKind::Relation {
                    to_many: field.is_list(),
                },
            ),
            FieldType::Object(_) if field.is_reference() => scalar_input("String", field.is_list()),
            FieldType::Object(target) => {
                let nested = self.nested(*target, pending);
                if field.is_list() {
                    (
                        TypeNode::list_of_non_null(nested.name()),
                        CreateInputFieldKind::ObjectList(nested),
                    )
                } else {
                    (
                        TypeNode::named(nested.name()),
                        CreateInputFieldKind::Object(nested),
                    )
                }
            }
        };

        CreateInputField {
            name: field.name().to_string(),
            field: field.id(),
            default_value: field.default_value().cloned(),
            input_type,
            kind,
        }
    }
}

fn scalar_input(name: &str, is_list: bool) -> (TypeNode, CreateInputFieldKind) {
    if is_list {
        // null entries are not allowed in lists
        (TypeNode::list_of_non_null(name), CreateInputFieldKind::BasicList)
    } else {
        (TypeNode::named(name), CreateInputFieldKind::Basic)
    }
}

fn additional_properties(object_type: &ObjectType) -> AdditionalProperties {
    match object_type.kind() {
        TypeKind::RootEntity => AdditionalProperties::RootEntityDefaults,
        TypeKind::ChildEntity => AdditionalProperties::ChildEntityDefaults,
        TypeKind::EntityExtension | TypeKind::ValueObject | TypeKind::Object => {
            AdditionalProperties::None
        }
    }
}
