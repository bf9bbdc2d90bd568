use serde::{Deserialize, Serialize};

use super::field::Field;

/// Stable handle of an object type inside its [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ObjectTypeId(pub(crate) usize);

impl ObjectTypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The closed set of object type variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    RootEntity,
    ChildEntity,
    EntityExtension,
    ValueObject,
    Object,
}

impl TypeKind {
    /// Whether types of this kind carry `id`, `createdAt` and `updatedAt`.
    pub fn has_system_fields(self) -> bool {
        matches!(self, Self::RootEntity | Self::ChildEntity)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

/// One clause of a root entity's view-level sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimarySortClause {
    /// Dot-separated field path, starting at the root entity.
    pub field: String,
    pub direction: OrderDirection,
}

impl PrimarySortClause {
    pub fn is_ascending(&self) -> bool {
        self.direction == OrderDirection::Ascending
    }
}

/// Data only root entities carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntityOptions {
    pub(crate) plural_name: String,
    pub(crate) collection_name: String,
    pub(crate) search_indexed: bool,
    pub(crate) primary_sort: Vec<PrimarySortClause>,
}

/// An object type of the model. Field order is declaration order, system fields first.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub(crate) id: ObjectTypeId,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) fields: Vec<Field>,
    pub(crate) root: Option<RootEntityOptions>,
}

impl ObjectType {
    pub fn id(&self) -> ObjectTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_root_entity_type(&self) -> bool {
        self.kind == TypeKind::RootEntity
    }

    pub fn is_child_entity_type(&self) -> bool {
        self.kind == TypeKind::ChildEntity
    }

    pub fn is_entity_extension_type(&self) -> bool {
        self.kind == TypeKind::EntityExtension
    }

    pub fn is_value_object_type(&self) -> bool {
        self.kind == TypeKind::ValueObject
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn root_entity(&self) -> Option<&RootEntityOptions> {
        self.root.as_ref()
    }

    /// `false` for every type that is not a search-indexed root entity.
    pub fn is_search_indexed(&self) -> bool {
        self.root.as_ref().is_some_and(|r| r.search_indexed)
    }

    pub fn primary_sort(&self) -> &[PrimarySortClause] {
        match &self.root {
            Some(root) => &root.primary_sort,
            None => &[],
        }
    }

    pub fn collection_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.collection_name.as_str())
    }

    pub fn plural_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.plural_name.as_str())
    }
}
