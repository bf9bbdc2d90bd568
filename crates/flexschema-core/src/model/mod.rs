//! The resolved domain model.
//!
//! Object types live in an arena owned by [`Model`] and are addressed by
//! [`ObjectTypeId`]; fields are addressed by [`FieldId`]. Both handles are
//! plain indices, so derived artifacts can key caches on them without
//! relying on pointer identity. A model is immutable once built.

mod config;
mod field;
mod object_type;

use std::collections::{HashMap, HashSet};

use tracing::debug;

pub use config::{FieldConfig, ModelConfig, PrimarySortConfig, TypeConfig};
pub use field::{
    BUILTIN_SCALARS, Field, FieldId, FieldSearchOptions, FieldType, SearchLanguage,
    is_builtin_scalar,
};
pub use object_type::{
    ObjectType, ObjectTypeId, OrderDirection, PrimarySortClause, RootEntityOptions, TypeKind,
};

use crate::error::{ModelError, Result};
use crate::names::{self, ENTITY_CREATED_AT, ENTITY_UPDATED_AT, ID_FIELD};

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    types: Vec<ObjectType>,
    by_name: HashMap<String, ObjectTypeId>,
}

impl Model {
    /// Resolves a configuration into a model.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for duplicate declarations, unresolvable type
    /// references, non-list child entity fields and unknown primary sort fields.
    pub fn from_config(config: ModelConfig) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(config.types.len());
        for (index, type_config) in config.types.iter().enumerate() {
            if by_name
                .insert(type_config.name.clone(), ObjectTypeId(index))
                .is_some()
            {
                return Err(ModelError::duplicate_type(&type_config.name));
            }
        }

        let enums: HashSet<&str> = config.enums.iter().map(String::as_str).collect();
        let kinds: Vec<TypeKind> = config.types.iter().map(|t| t.kind).collect();

        let mut types = Vec::with_capacity(config.types.len());
        for (index, type_config) in config.types.iter().enumerate() {
            let type_id = ObjectTypeId(index);
            let fields = resolve_fields(type_id, type_config, &by_name, &enums, &kinds)?;
            let root = resolve_root_options(type_config, &fields)?;
            types.push(ObjectType {
                id: type_id,
                name: type_config.name.clone(),
                kind: type_config.kind,
                fields,
                root,
            });
        }

        debug!(types = types.len(), "Resolved model");
        Ok(Self { types, by_name })
    }

    /// Parses a JSON model configuration and resolves it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ModelConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// All object types in declaration order.
    pub fn object_types(&self) -> &[ObjectType] {
        &self.types
    }

    /// Looks up a type by handle. Handles are only minted by this model.
    pub fn object_type(&self, id: ObjectTypeId) -> &ObjectType {
        &self.types[id.0]
    }

    pub fn get_object_type(&self, name: &str) -> Option<&ObjectType> {
        self.by_name.get(name).map(|id| self.object_type(*id))
    }

    pub fn root_entity_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.types.iter().filter(|t| t.is_root_entity_type())
    }

    pub fn child_entity_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.types.iter().filter(|t| t.is_child_entity_type())
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.object_type(id.type_id).fields[id.index]
    }

    /// The object type a field's values have, if it is object-typed.
    pub fn field_object_type(&self, field: &Field) -> Option<&ObjectType> {
        field
            .field_type
            .object_type_id()
            .map(|id| self.object_type(id))
    }

    /// `Type.field`, for diagnostics.
    pub fn field_path(&self, id: FieldId) -> String {
        format!("{}.{}", self.object_type(id.type_id).name, self.field(id).name)
    }
}

fn system_fields(type_id: ObjectTypeId, type_config: &TypeConfig) -> Vec<Field> {
    if !type_config.kind.has_system_fields() {
        return Vec::new();
    }
    // system fields of a search-indexed root entity are always indexed
    let search = FieldSearchOptions {
        indexed: type_config.kind == TypeKind::RootEntity && type_config.flex_search,
        case_sensitive: true,
        ..FieldSearchOptions::default()
    };
    [(ID_FIELD, "ID"), (ENTITY_CREATED_AT, "DateTime"), (ENTITY_UPDATED_AT, "DateTime")]
        .into_iter()
        .enumerate()
        .map(|(index, (name, scalar))| Field {
            id: FieldId { type_id, index },
            name: name.to_string(),
            field_type: FieldType::Scalar(scalar.to_string()),
            is_list: false,
            is_system_field: true,
            default_value: None,
            is_relation: false,
            is_reference: false,
            is_child_entity_field: false,
            search,
        })
        .collect()
}

fn resolve_fields(
    type_id: ObjectTypeId,
    type_config: &TypeConfig,
    by_name: &HashMap<String, ObjectTypeId>,
    enums: &HashSet<&str>,
    kinds: &[TypeKind],
) -> Result<Vec<Field>> {
    let mut fields = system_fields(type_id, type_config);

    for field_config in &type_config.fields {
        if fields.iter().any(|f| f.name == field_config.name) {
            return Err(ModelError::duplicate_field(
                &type_config.name,
                &field_config.name,
            ));
        }

        let mut is_child_entity_field = false;
        let field_type = if let Some(id) = by_name.get(&field_config.type_name) {
            is_child_entity_field = kinds[id.0] == TypeKind::ChildEntity;
            if is_child_entity_field && !field_config.list {
                return Err(ModelError::NonListChildEntityField {
                    type_name: type_config.name.clone(),
                    field: field_config.name.clone(),
                });
            }
            let target_is_root = kinds[id.0] == TypeKind::RootEntity;
            let linked = field_config.relation || field_config.reference;
            if target_is_root && !linked {
                return Err(ModelError::EmbeddedRootEntity {
                    type_name: type_config.name.clone(),
                    field: field_config.name.clone(),
                    referenced: field_config.type_name.clone(),
                });
            }
            if linked && !target_is_root {
                return Err(ModelError::InvalidRelationTarget {
                    type_name: type_config.name.clone(),
                    field: field_config.name.clone(),
                    referenced: field_config.type_name.clone(),
                });
            }
            FieldType::Object(*id)
        } else if is_builtin_scalar(&field_config.type_name) {
            FieldType::Scalar(field_config.type_name.clone())
        } else if enums.contains(field_config.type_name.as_str()) {
            FieldType::Enum(field_config.type_name.clone())
        } else {
            return Err(ModelError::unknown_type(
                &type_config.name,
                &field_config.name,
                &field_config.type_name,
            ));
        };

        fields.push(Field {
            id: FieldId {
                type_id,
                index: fields.len(),
            },
            name: field_config.name.clone(),
            field_type,
            is_list: field_config.list,
            is_system_field: false,
            default_value: field_config.default_value.clone(),
            is_relation: field_config.relation,
            is_reference: field_config.reference,
            is_child_entity_field,
            search: FieldSearchOptions {
                indexed: field_config.flex_search,
                fulltext_indexed: field_config.flex_search_fulltext,
                case_sensitive: field_config.flex_search_case_sensitive,
                language: field_config.flex_search_language,
            },
        });
    }

    Ok(fields)
}

fn resolve_root_options(
    type_config: &TypeConfig,
    fields: &[Field],
) -> Result<Option<RootEntityOptions>> {
    if type_config.kind != TypeKind::RootEntity {
        return Ok(None);
    }

    let mut primary_sort = Vec::with_capacity(type_config.flex_search_primary_sort.len());
    for clause in &type_config.flex_search_primary_sort {
        let head = clause.field.split('.').next().unwrap_or_default();
        if !fields.iter().any(|f| f.name == head) {
            return Err(ModelError::UnknownPrimarySortField {
                type_name: type_config.name.clone(),
                field: clause.field.clone(),
            });
        }
        primary_sort.push(PrimarySortClause {
            field: clause.field.clone(),
            direction: clause.direction,
        });
    }

    let plural_name = type_config
        .plural_name
        .clone()
        .unwrap_or_else(|| names::pluralize(&type_config.name));

    Ok(Some(RootEntityOptions {
        collection_name: names::collection_name(&plural_name),
        plural_name,
        search_indexed: type_config.flex_search,
        primary_sort,
    }))
}
