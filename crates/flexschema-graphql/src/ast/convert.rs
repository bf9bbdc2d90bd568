use async_graphql_parser::Positioned;
use async_graphql_parser::types::{
    BaseType, ConstDirective, FieldDefinition as ParsedField, InputValueDefinition as ParsedInput,
    Type, TypeDefinition, TypeKind as ParsedKind, TypeSystemDefinition,
};
use tracing::trace;

use super::{
    Definition, Directive, Document, EnumTypeDefinition, FieldDefinition,
    InputObjectTypeDefinition, InputValueDefinition, NonNullType, ObjectTypeDefinition,
    ScalarTypeDefinition, TypeNode,
};
use crate::error::SynthesisError;

/// Parses schema text into a [`Document`].
///
/// Interfaces, unions, schema and directive definitions are not part of the
/// tree and are skipped.
pub fn parse_sdl(sdl: &str) -> Result<Document, SynthesisError> {
    let parsed =
        async_graphql_parser::parse_schema(sdl).map_err(|e| SynthesisError::Parse(e.to_string()))?;

    let definitions = parsed
        .definitions
        .into_iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Type(def) => convert_type_definition(def.node),
            _ => None,
        })
        .collect();

    Ok(Document { definitions })
}

fn convert_type_definition(def: TypeDefinition) -> Option<Definition> {
    let name = def.name.node.to_string();
    let directives = convert_directives(def.directives);
    match def.kind {
        ParsedKind::Object(object) => Some(Definition::Object(ObjectTypeDefinition {
            name,
            directives,
            fields: object.fields.into_iter().map(|f| convert_field(f.node)).collect(),
        })),
        ParsedKind::InputObject(input) => Some(Definition::InputObject(InputObjectTypeDefinition {
            name,
            directives,
            fields: input.fields.into_iter().map(|f| convert_input(f.node)).collect(),
        })),
        ParsedKind::Enum(enum_type) => Some(Definition::Enum(EnumTypeDefinition {
            name,
            directives,
            values: enum_type
                .values
                .into_iter()
                .map(|v| v.node.value.node.to_string())
                .collect(),
        })),
        ParsedKind::Scalar => Some(Definition::Scalar(ScalarTypeDefinition { name, directives })),
        _ => {
            trace!(name = %name, "Skipping unsupported definition");
            None
        }
    }
}

fn convert_field(field: ParsedField) -> FieldDefinition {
    FieldDefinition {
        name: field.name.node.to_string(),
        ty: convert_type(field.ty.node),
        directives: convert_directives(field.directives),
    }
}

fn convert_input(input: ParsedInput) -> InputValueDefinition {
    InputValueDefinition {
        name: input.name.node.to_string(),
        ty: convert_type(input.ty.node),
        directives: convert_directives(input.directives),
    }
}

fn convert_type(ty: Type) -> TypeNode {
    match (ty.base, ty.nullable) {
        (BaseType::Named(name), true) => TypeNode::Named(name.to_string()),
        (BaseType::Named(name), false) => TypeNode::NonNull(NonNullType::Named(name.to_string())),
        (BaseType::List(inner), true) => TypeNode::List(Box::new(convert_type(*inner))),
        (BaseType::List(inner), false) => {
            TypeNode::NonNull(NonNullType::List(Box::new(convert_type(*inner))))
        }
    }
}

fn convert_directives(directives: Vec<Positioned<ConstDirective>>) -> Vec<Directive> {
    directives
        .into_iter()
        .map(|directive| {
            let directive = directive.node;
            Directive {
                name: directive.name.node.to_string(),
                arguments: directive
                    .arguments
                    .into_iter()
                    .map(|(name, value)| (name.node.to_string(), value.node))
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ConstValue;

    #[test]
    fn test_parse_object_with_directives() {
        let doc = parse_sdl(
            r#"
            type Delivery @rootEntity @roles(read: "logistics") {
                deliveryNumber: String!
                items: [Item!]! @childEntities
            }
            "#,
        )
        .unwrap();

        let delivery = doc.object_types().next().unwrap();
        assert!(delivery.is_root_entity());
        assert_eq!(
            delivery.directive("roles").and_then(|d| d.argument("read")),
            Some(&ConstValue::String("logistics".into()))
        );
        assert_eq!(
            delivery.fields[0].ty,
            TypeNode::NonNull(NonNullType::Named("String".into()))
        );
        assert_eq!(
            delivery.fields[1].ty,
            TypeNode::NonNull(NonNullType::List(Box::new(TypeNode::non_null_named("Item"))))
        );
    }

    #[test]
    fn test_parse_enum_scalar_and_input() {
        let doc = parse_sdl(
            r#"
            enum Status { NEW, SHIPPED }
            scalar Money
            input Filter { status: Status }
            interface Node { id: ID }
            "#,
        )
        .unwrap();

        assert_eq!(doc.definitions.len(), 3);
        match doc.definition("Status") {
            Some(Definition::Enum(def)) => assert_eq!(def.values, vec!["NEW", "SHIPPED"]),
            other => panic!("expected enum, got {other:?}"),
        }
        assert!(matches!(doc.definition("Money"), Some(Definition::Scalar(_))));
        assert!(doc.input_object_type("Filter").is_some());
        assert!(doc.definition("Node").is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = parse_sdl("type {").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }
}
