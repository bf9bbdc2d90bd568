//! Schema-text syntax tree.
//!
//! A deliberately small tree covering the definitions the input passes read
//! or produce: object types, input objects, enums and scalars. Type syntax is
//! a closed set of variants, so a non-null wrapper can only ever wrap a named
//! type or a list.
//!
//! Documents are usually obtained with [`parse_sdl`] and rendered back with
//! their `Display` implementation.

mod convert;
mod print;

pub use async_graphql_value::ConstValue;
pub use convert::parse_sdl;

use flexschema_core::names::directives;

/// Type syntax of a field or input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Named(String),
    List(Box<TypeNode>),
    NonNull(NonNullType),
}

/// The inner part of a non-null type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonNullType {
    Named(String),
    List(Box<TypeNode>),
}

impl TypeNode {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn non_null_named(name: impl Into<String>) -> Self {
        Self::NonNull(NonNullType::Named(name.into()))
    }

    /// `[name!]`
    pub fn list_of_non_null(name: impl Into<String>) -> Self {
        Self::List(Box::new(Self::non_null_named(name)))
    }

    /// Name of the innermost named type.
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) | Self::NonNull(NonNullType::Named(name)) => name,
            Self::List(inner) | Self::NonNull(NonNullType::List(inner)) => inner.named_type(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_) | Self::NonNull(NonNullType::List(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<(String, ConstValue)>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ConstValue) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }
}

fn find_directive<'a>(directives: &'a [Directive], name: &str) -> Option<&'a Directive> {
    directives.iter().find(|d| d.name == name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeNode,
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        find_directive(&self.directives, name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
}

impl ObjectTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn directive(&self, name: &str) -> Option<&Directive> {
        find_directive(&self.directives, name)
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive(name).is_some()
    }

    pub fn is_root_entity(&self) -> bool {
        self.has_directive(directives::ROOT_ENTITY)
    }

    pub fn is_child_entity(&self) -> bool {
        self.has_directive(directives::CHILD_ENTITY)
    }

    pub fn is_entity_extension(&self) -> bool {
        self.has_directive(directives::ENTITY_EXTENSION)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: TypeNode,
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            directives: Vec::new(),
        }
    }

    pub fn with_directives(mut self, directives: Vec<Directive>) -> Self {
        self.directives = directives;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValueDefinition>,
}

impl InputObjectTypeDefinition {
    pub fn field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Object(ObjectTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    Enum(EnumTypeDefinition),
    Scalar(ScalarTypeDefinition),
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Self::Object(def) => &def.name,
            Self::InputObject(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::Scalar(def) => &def.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Object(def) => Some(def),
            _ => None,
        })
    }

    pub fn input_object_types(&self) -> impl Iterator<Item = &InputObjectTypeDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::InputObject(def) => Some(def),
            _ => None,
        })
    }

    pub fn input_object_type(&self, name: &str) -> Option<&InputObjectTypeDefinition> {
        self.input_object_types().find(|def| def.name == name)
    }

    pub fn root_entity_types(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.object_types().filter(|def| def.is_root_entity())
    }

    pub fn child_entity_types(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.object_types().filter(|def| def.is_child_entity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_type_unwraps_wrappers() {
        let ty = TypeNode::NonNull(NonNullType::List(Box::new(TypeNode::non_null_named("Item"))));
        assert_eq!(ty.named_type(), "Item");
        assert!(ty.is_list());
        assert!(!TypeNode::non_null_named("ID").is_list());
    }

    #[test]
    fn test_entity_type_filters() {
        let doc = Document::new(vec![
            Definition::Object(
                ObjectTypeDefinition::new("Delivery")
                    .with_directive(Directive::new(directives::ROOT_ENTITY)),
            ),
            Definition::Object(
                ObjectTypeDefinition::new("Item")
                    .with_directive(Directive::new(directives::CHILD_ENTITY)),
            ),
            Definition::Object(ObjectTypeDefinition::new("Address")),
        ]);
        assert_eq!(doc.root_entity_types().count(), 1);
        assert_eq!(doc.child_entity_types().next().map(|d| d.name.as_str()), Some("Item"));
        assert_eq!(doc.definition("Address").map(Definition::name), Some("Address"));
    }
}
