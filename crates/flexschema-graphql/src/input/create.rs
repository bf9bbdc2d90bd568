//! Create input shapes and their payload semantics.

use std::fmt;
use std::sync::{Arc, OnceLock};

use flexschema_core::names::{ENTITY_CREATED_AT, ENTITY_UPDATED_AT, ID_FIELD};
use flexschema_core::{FieldId, ObjectTypeId, Timestamp, generate_id};
use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::ast::TypeNode;
use crate::error::InputError;

/// A JSON object payload or prepared property map.
pub type PropertyMap = Map<String, Value>;

/// Server-computed properties a Create input adds to every prepared object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionalProperties {
    None,
    /// `createdAt` and `updatedAt`.
    RootEntityDefaults,
    /// A fresh `id` plus `createdAt` and `updatedAt`.
    ChildEntityDefaults,
}

impl AdditionalProperties {
    fn apply(self, properties: &mut PropertyMap, now: &Timestamp) -> Result<(), InputError> {
        if self == Self::None {
            return Ok(());
        }
        let now = now.to_json().map_err(InputError::timestamp)?;
        if self == Self::ChildEntityDefaults {
            properties.insert(ID_FIELD.to_string(), Value::String(generate_id()));
        }
        properties.insert(ENTITY_CREATED_AT.to_string(), now.clone());
        properties.insert(ENTITY_UPDATED_AT.to_string(), now);
        Ok(())
    }
}

/// Reference from a field to the Create input of its object type.
///
/// The slot is filled once the referenced type has been built, which lets
/// recursive types point at themselves.
#[derive(Clone)]
pub struct NestedInputType {
    name: String,
    slot: Arc<OnceLock<Arc<CreateObjectInputType>>>,
}

impl NestedInputType {
    pub(crate) fn pending(name: String) -> Self {
        Self {
            name,
            slot: Arc::new(OnceLock::new()),
        }
    }

    pub(crate) fn resolved(input_type: Arc<CreateObjectInputType>) -> Self {
        let nested = Self::pending(input_type.name().to_string());
        let _ = nested.slot.set(input_type);
        nested
    }

    pub(crate) fn fill(&self, input_type: Arc<CreateObjectInputType>) {
        let _ = self.slot.set(input_type);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> Result<&CreateObjectInputType, InputError> {
        self.slot
            .get()
            .map(Arc::as_ref)
            .ok_or_else(|| InputError::UnknownType(self.name.clone()))
    }
}

// Compared and printed by name only; nested types may be cyclic.
impl PartialEq for NestedInputType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for NestedInputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NestedInputType").field(&self.name).finish()
    }
}

/// How an input field turns its payload value into document properties.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateInputFieldKind {
    /// Scalar, enum or reference; the value passes through.
    Basic,
    /// List of scalars; an explicit `null` becomes `[]`.
    BasicList,
    /// A nested object prepared with its own input type.
    Object(NestedInputType),
    /// A list of nested objects, usually child entities.
    ObjectList(NestedInputType),
    /// Relation ids; written by the execution engine, not as properties.
    Relation { to_many: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateInputField {
    pub(crate) name: String,
    pub(crate) field: FieldId,
    pub(crate) default_value: Option<Value>,
    pub(crate) input_type: TypeNode,
    pub(crate) kind: CreateInputFieldKind,
}

impl CreateInputField {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The model field this input field writes.
    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn input_type(&self) -> &TypeNode {
        &self.input_type
    }

    pub fn kind(&self) -> &CreateInputFieldKind {
        &self.kind
    }

    /// Whether the field contributes even when the payload omits it.
    pub fn applies_to_missing_fields(&self) -> bool {
        self.default_value.is_some()
    }

    fn properties(
        &self,
        value: Option<&Value>,
        now: &Timestamp,
        out: &mut PropertyMap,
    ) -> Result<(), InputError> {
        let value = match value.or(self.default_value.as_ref()) {
            Some(value) => value,
            None => return Ok(()),
        };

        let coerced = match &self.kind {
            CreateInputFieldKind::Basic => value.clone(),
            CreateInputFieldKind::BasicList => match value {
                Value::Null => Value::Array(Vec::new()),
                other => other.clone(),
            },
            CreateInputFieldKind::Object(nested) => match value {
                Value::Null => Value::Null,
                Value::Object(object) => Value::Object(nested.get()?.prepare_value(object, now)?),
                other => return Err(InputError::payload_shape(&self.name, "an object", other)),
            },
            CreateInputFieldKind::ObjectList(nested) => match value {
                Value::Null => Value::Array(Vec::new()),
                Value::Array(items) => {
                    let nested = nested.get()?;
                    let prepared = items
                        .iter()
                        .map(|item| match item {
                            Value::Object(object) => nested.prepare_value(object, now).map(Value::Object),
                            other => Err(InputError::payload_shape(&self.name, "a list of objects", other)),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Value::Array(prepared)
                }
                other => return Err(InputError::payload_shape(&self.name, "an array", other)),
            },
            CreateInputFieldKind::Relation { .. } => return Ok(()),
        };

        out.insert(self.name.clone(), coerced);
        Ok(())
    }

    fn collect_affected_fields(
        &self,
        value: Option<&Value>,
        out: &mut IndexSet<FieldId>,
    ) -> Result<(), InputError> {
        // a value substituted from the default does not count as written
        let Some(value) = value else {
            return Ok(());
        };
        out.insert(self.field);

        match (&self.kind, value) {
            (_, Value::Null) => Ok(()),
            (CreateInputFieldKind::Object(nested), Value::Object(object)) => {
                nested.get()?.collect_into(object, out)
            }
            (CreateInputFieldKind::Object(_), other) => {
                Err(InputError::payload_shape(&self.name, "an object", other))
            }
            (CreateInputFieldKind::ObjectList(nested), Value::Array(items)) => {
                let nested = nested.get()?;
                for item in items {
                    match item {
                        Value::Object(object) => nested.collect_into(object, out)?,
                        other => {
                            return Err(InputError::payload_shape(
                                &self.name,
                                "a list of objects",
                                other,
                            ));
                        }
                    }
                }
                Ok(())
            }
            (CreateInputFieldKind::ObjectList(_), other) => {
                Err(InputError::payload_shape(&self.name, "an array", other))
            }
            _ => Ok(()),
        }
    }
}

/// Ids a payload asks to link through one relation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationAddition {
    pub field: FieldId,
    pub ids: Vec<String>,
}

/// The Create input of one object type.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateObjectInputType {
    pub(crate) name: String,
    pub(crate) type_id: ObjectTypeId,
    pub(crate) additional: AdditionalProperties,
    pub(crate) fields: Vec<CreateInputField>,
}

impl CreateObjectInputType {
    /// `Create<Type>Input`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_type(&self) -> ObjectTypeId {
        self.type_id
    }

    pub fn additional_properties(&self) -> AdditionalProperties {
        self.additional
    }

    pub fn fields(&self) -> &[CreateInputField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CreateInputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn applicable_fields<'a>(
        &'a self,
        payload: &'a PropertyMap,
    ) -> impl Iterator<Item = &'a CreateInputField> + 'a {
        self.fields
            .iter()
            .filter(move |f| payload.contains_key(&f.name) || f.applies_to_missing_fields())
    }

    /// Turns a payload into the properties of a new document.
    ///
    /// `now` is shared by every nested object prepared within this call.
    pub fn prepare_value(
        &self,
        payload: &PropertyMap,
        now: &Timestamp,
    ) -> Result<PropertyMap, InputError> {
        let mut properties = PropertyMap::new();
        for field in self.applicable_fields(payload) {
            field.properties(payload.get(&field.name), now, &mut properties)?;
        }
        self.additional.apply(&mut properties, now)?;
        Ok(properties)
    }

    /// [`prepare_value`](Self::prepare_value) at the current instant.
    pub fn prepare(&self, payload: &PropertyMap) -> Result<PropertyMap, InputError> {
        self.prepare_value(payload, &Timestamp::now())
    }

    /// Adds the model fields the payload writes to `out`.
    ///
    /// On error `out` is left untouched.
    pub fn collect_affected_fields(
        &self,
        payload: &PropertyMap,
        out: &mut IndexSet<FieldId>,
    ) -> Result<(), InputError> {
        let mut collected = IndexSet::new();
        self.collect_into(payload, &mut collected)?;
        out.extend(collected);
        Ok(())
    }

    pub fn affected_fields(&self, payload: &PropertyMap) -> Result<Vec<FieldId>, InputError> {
        let mut fields = IndexSet::new();
        self.collect_into(payload, &mut fields)?;
        Ok(fields.into_iter().collect())
    }

    fn collect_into(
        &self,
        payload: &PropertyMap,
        out: &mut IndexSet<FieldId>,
    ) -> Result<(), InputError> {
        for field in self.applicable_fields(payload) {
            field.collect_affected_fields(payload.get(&field.name), out)?;
        }
        Ok(())
    }

    /// Relation ids the payload supplies, in field order.
    pub fn relation_additions(
        &self,
        payload: &PropertyMap,
    ) -> Result<Vec<RelationAddition>, InputError> {
        let mut additions = Vec::new();
        for field in &self.fields {
            let CreateInputFieldKind::Relation { to_many } = field.kind else {
                continue;
            };
            let ids = match (payload.get(&field.name), to_many) {
                (None | Some(Value::Null), _) => continue,
                (Some(Value::String(id)), false) => vec![id.clone()],
                (Some(Value::Array(items)), true) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(id) => Ok(id.clone()),
                        other => Err(InputError::payload_shape(&field.name, "a list of ids", other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                (Some(other), false) => {
                    return Err(InputError::payload_shape(&field.name, "an id", other));
                }
                (Some(other), true) => {
                    return Err(InputError::payload_shape(&field.name, "an array", other));
                }
            };
            if !ids.is_empty() {
                additions.push(RelationAddition {
                    field: field.field,
                    ids,
                });
            }
        }
        Ok(additions)
    }

    /// Nested Create inputs reachable from this one, this one first.
    pub fn reachable_types(&self) -> Vec<&CreateObjectInputType> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        let mut out = Vec::new();
        let mut queue = vec![self];
        while let Some(current) = queue.pop() {
            if !seen.insert(current.name()) {
                continue;
            }
            out.push(current);
            for field in current.fields.iter().rev() {
                if let CreateInputFieldKind::Object(nested) | CreateInputFieldKind::ObjectList(nested) =
                    &field.kind
                    && let Ok(nested) = nested.get()
                {
                    queue.push(nested);
                }
            }
        }
        out
    }
}
