use flexschema_core::is_builtin_scalar;
use flexschema_core::names::{
    self, ENTITY_CREATED_AT, ENTITY_UPDATED_AT, ID_FIELD, directives,
};
use tracing::trace;

use super::AstTransformer;
use crate::ast::{
    ConstValue, Definition, Directive, Document, FieldDefinition, InputObjectTypeDefinition,
    InputValueDefinition, NonNullType, ObjectTypeDefinition, TypeNode,
};
use crate::error::SynthesisError;

const SKIPPED_FIELDS: [&str; 3] = [ID_FIELD, ENTITY_CREATED_AT, ENTITY_UPDATED_AT];

/// Appends `Update<Type>Input` and `UpdateAll<Type>Input` for every root
/// entity and `Update<Type>Input` for every child entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateInputTypesTransformer;

impl AstTransformer for UpdateInputTypesTransformer {
    fn name(&self) -> &'static str {
        "update-input-types"
    }

    fn transform(&self, document: &mut Document) -> Result<(), SynthesisError> {
        let synthesized = self.synthesize(document)?;
        document
            .definitions
            .extend(synthesized.into_iter().map(Definition::InputObject));
        Ok(())
    }
}

impl UpdateInputTypesTransformer {
    /// Computes the update input types without touching the document.
    pub fn synthesize(
        &self,
        document: &Document,
    ) -> Result<Vec<InputObjectTypeDefinition>, SynthesisError> {
        let mut synthesized = Vec::new();

        for object_type in document.root_entity_types() {
            let fields = input_fields(document, object_type)?;
            synthesized.push(update_input(object_type, fields.clone()));
            synthesized.push(InputObjectTypeDefinition {
                name: names::update_all_input_type_name(&object_type.name),
                directives: type_roles(object_type),
                fields,
            });
        }

        for object_type in document.child_entity_types() {
            let fields = input_fields(document, object_type)?;
            synthesized.push(update_input(object_type, fields));
        }

        Ok(synthesized)
    }
}

fn update_input(
    object_type: &ObjectTypeDefinition,
    fields: Vec<InputValueDefinition>,
) -> InputObjectTypeDefinition {
    let mut all = Vec::with_capacity(fields.len() + 1);
    all.push(InputValueDefinition::new(ID_FIELD, TypeNode::non_null_named("ID")));
    all.extend(fields);
    InputObjectTypeDefinition {
        name: names::update_input_type_name(&object_type.name),
        directives: type_roles(object_type),
        fields: all,
    }
}

fn type_roles(object_type: &ObjectTypeDefinition) -> Vec<Directive> {
    object_type
        .directive(directives::ROLES)
        .cloned()
        .into_iter()
        .collect()
}

fn input_fields(
    document: &Document,
    object_type: &ObjectTypeDefinition,
) -> Result<Vec<InputValueDefinition>, SynthesisError> {
    let mut inputs = Vec::new();
    for field in &object_type.fields {
        if SKIPPED_FIELDS.contains(&field.name.as_str()) {
            continue;
        }
        let context = FieldContext {
            document,
            type_name: &object_type.name,
            field,
        };
        inputs.extend(context.inputs(&field.ty)?);
    }
    trace!(type_name = %object_type.name, fields = inputs.len(), "Synthesized update input fields");
    Ok(inputs)
}

enum Resolved<'a> {
    Object(&'a ObjectTypeDefinition),
    /// Scalars and enums.
    Leaf,
}

struct FieldContext<'a> {
    document: &'a Document,
    type_name: &'a str,
    field: &'a FieldDefinition,
}

impl<'a> FieldContext<'a> {
    fn inputs(&self, ty: &TypeNode) -> Result<Vec<InputValueDefinition>, SynthesisError> {
        match ty {
            TypeNode::Named(name) | TypeNode::NonNull(NonNullType::Named(name)) => {
                self.named_inputs(name)
            }
            TypeNode::List(inner) | TypeNode::NonNull(NonNullType::List(inner)) => {
                self.list_inputs(inner)
            }
        }
    }

    fn named_inputs(&self, type_name: &str) -> Result<Vec<InputValueDefinition>, SynthesisError> {
        let input_type = match self.resolve(type_name)? {
            Resolved::Leaf => type_name.to_string(),
            Resolved::Object(_) if self.field.has_directive(directives::RELATION) => "ID".into(),
            Resolved::Object(_) if self.field.has_directive(directives::REFERENCE) => {
                "String".into()
            }
            Resolved::Object(target) if target.is_child_entity() || target.is_entity_extension() => {
                names::update_input_type_name(&target.name)
            }
            Resolved::Object(target) if target.is_root_entity() => {
                return Err(self.unsupported(type_name));
            }
            // value objects are replaced as a whole
            Resolved::Object(target) => names::create_input_type_name(&target.name),
        };

        let mut inputs = vec![self.input(self.field.name.clone(), TypeNode::named(input_type))];
        inputs.extend(self.calc_mutation_inputs(type_name)?);
        Ok(inputs)
    }

    fn list_inputs(&self, inner: &TypeNode) -> Result<Vec<InputValueDefinition>, SynthesisError> {
        let element = match inner {
            TypeNode::Named(name) | TypeNode::NonNull(NonNullType::Named(name)) => name,
            TypeNode::List(_) | TypeNode::NonNull(NonNullType::List(_)) => {
                return Err(SynthesisError::list_of_lists(self.type_name, &self.field.name));
            }
        };

        let field_name = &self.field.name;
        let inputs = match self.resolve(element)? {
            Resolved::Leaf => vec![self.input(field_name.clone(), TypeNode::list_of_non_null(element))],
            Resolved::Object(_) if self.field.has_directive(directives::RELATION) => vec![
                self.input(names::add_relation_field_name(field_name), TypeNode::list_of_non_null("ID")),
                self.input(names::remove_relation_field_name(field_name), TypeNode::list_of_non_null("ID")),
            ],
            Resolved::Object(target) if target.is_child_entity() => vec![
                self.input(
                    names::add_child_entities_field_name(field_name),
                    TypeNode::list_of_non_null(names::create_input_type_name(&target.name)),
                ),
                self.input(
                    names::update_child_entities_field_name(field_name),
                    TypeNode::list_of_non_null(names::update_input_type_name(&target.name)),
                ),
                self.input(
                    names::remove_child_entities_field_name(field_name),
                    TypeNode::list_of_non_null("ID"),
                ),
            ],
            Resolved::Object(target) => vec![self.input(
                field_name.clone(),
                TypeNode::list_of_non_null(names::update_input_type_name(&target.name)),
            )],
        };
        Ok(inputs)
    }

    fn calc_mutation_inputs(
        &self,
        type_name: &str,
    ) -> Result<Vec<InputValueDefinition>, SynthesisError> {
        let Some(directive) = self.field.directive(directives::CALC_MUTATIONS) else {
            return Ok(Vec::new());
        };

        let operators: Vec<&ConstValue> = match directive.argument(directives::CALC_MUTATIONS_OPERATORS_ARG) {
            None => Vec::new(),
            Some(ConstValue::List(values)) => values.iter().collect(),
            Some(single) => vec![single],
        };

        operators
            .into_iter()
            .map(|operator| {
                let name = match operator {
                    ConstValue::Enum(name) => name.as_str(),
                    ConstValue::String(name) => name.as_str(),
                    other => return Err(self.invalid_directive(format!("invalid calc mutation operator {other}"))),
                };
                let prefix = names::calc_mutation_prefix(name).ok_or_else(|| {
                    self.invalid_directive(format!("unknown calc mutation operator {name}"))
                })?;
                Ok(self.input(
                    names::calc_mutation_field_name(prefix, &self.field.name),
                    TypeNode::named(type_name),
                ))
            })
            .collect()
    }

    fn resolve(&self, type_name: &str) -> Result<Resolved<'a>, SynthesisError> {
        match self.document.definition(type_name) {
            Some(Definition::Object(def)) => Ok(Resolved::Object(def)),
            Some(Definition::Enum(_) | Definition::Scalar(_)) => Ok(Resolved::Leaf),
            Some(Definition::InputObject(_)) => Err(self.unsupported(type_name)),
            None if is_builtin_scalar(type_name) => Ok(Resolved::Leaf),
            None => Err(SynthesisError::unknown_type(
                self.type_name,
                &self.field.name,
                type_name,
            )),
        }
    }

    /// An input value carrying the source field's `@roles`.
    fn input(&self, name: String, ty: TypeNode) -> InputValueDefinition {
        InputValueDefinition::new(name, ty).with_directives(
            self.field
                .directive(directives::ROLES)
                .cloned()
                .into_iter()
                .collect(),
        )
    }

    fn unsupported(&self, type_ref: &str) -> SynthesisError {
        SynthesisError::UnsupportedType {
            type_name: self.type_name.to_string(),
            field: self.field.name.clone(),
            type_ref: type_ref.to_string(),
        }
    }

    fn invalid_directive(&self, message: String) -> SynthesisError {
        SynthesisError::InvalidDirective {
            type_name: self.type_name.to_string(),
            field: self.field.name.clone(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_sdl;

    fn synthesize(sdl: &str) -> Result<Vec<InputObjectTypeDefinition>, SynthesisError> {
        UpdateInputTypesTransformer.synthesize(&parse_sdl(sdl).unwrap())
    }

    fn field_names(input: &InputObjectTypeDefinition) -> Vec<&str> {
        input.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_scalar_fields_and_system_fields_skipped() {
        let inputs = synthesize(
            r#"
            type Delivery @rootEntity {
                id: ID
                createdAt: DateTime
                updatedAt: DateTime
                deliveryNumber: String!
                tags: [String!]
            }
            "#,
        )
        .unwrap();

        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].name, "UpdateDeliveryInput");
        assert_eq!(field_names(&inputs[0]), vec!["id", "deliveryNumber", "tags"]);
        assert_eq!(inputs[0].fields[0].ty, TypeNode::non_null_named("ID"));
        assert_eq!(inputs[0].fields[1].ty, TypeNode::named("String"));
        assert_eq!(inputs[0].fields[2].ty, TypeNode::list_of_non_null("String"));

        assert_eq!(inputs[1].name, "UpdateAllDeliveryInput");
        assert_eq!(field_names(&inputs[1]), vec!["deliveryNumber", "tags"]);
    }

    #[test]
    fn test_named_object_fields() {
        let inputs = synthesize(
            r#"
            type Delivery @rootEntity {
                address: Address
                dgInfo: DangerousGoodsInfo
                country: Country @reference
                owner: Person @relation
            }
            type Address @valueObject { street: String }
            type DangerousGoodsInfo @entityExtension { notices: [String] }
            type Country @rootEntity { isoCode: String }
            type Person @rootEntity { name: String }
            "#,
        )
        .unwrap();

        let update = &inputs[0];
        assert_eq!(update.field("address").unwrap().ty, TypeNode::named("CreateAddressInput"));
        assert_eq!(
            update.field("dgInfo").unwrap().ty,
            TypeNode::named("UpdateDangerousGoodsInfoInput")
        );
        assert_eq!(update.field("country").unwrap().ty, TypeNode::named("String"));
        assert_eq!(update.field("owner").unwrap().ty, TypeNode::named("ID"));
    }

    #[test]
    fn test_embedded_root_entity_is_unsupported() {
        let err = synthesize(
            r#"
            type Delivery @rootEntity { country: Country }
            type Country @rootEntity { isoCode: String }
            "#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_TYPE");
    }

    #[test]
    fn test_unknown_type() {
        let err = synthesize("type Delivery @rootEntity { x: Missing }").unwrap_err();
        assert!(matches!(err, SynthesisError::UnknownType { .. }));
    }

    #[test]
    fn test_calc_mutations() {
        let inputs = synthesize(
            r#"
            type Delivery @rootEntity {
                quantity: Int @calcMutations(operators: [ADD, MULTIPLY])
                notes: String @calcMutations(operators: APPEND)
            }
            "#,
        )
        .unwrap();

        assert_eq!(
            field_names(&inputs[1]),
            vec!["quantity", "addQuantity", "multiplyWithQuantity", "notes", "appendToNotes"]
        );
        assert_eq!(inputs[1].fields[2].ty, TypeNode::named("Int"));
    }

    #[test]
    fn test_unknown_calc_mutation_operator() {
        let err = synthesize(
            "type Delivery @rootEntity { quantity: Int @calcMutations(operators: [POWER]) }",
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DIRECTIVE");
    }

    #[test]
    fn test_field_roles_are_copied() {
        let inputs = synthesize(
            r#"
            type Delivery @rootEntity {
                secret: String @roles(readWrite: "admin")
                items: [Item] @roles(readWrite: "admin")
            }
            type Item @childEntity { sku: String }
            "#,
        )
        .unwrap();

        let update = &inputs[0];
        for name in ["secret", "addItems", "updateItems", "removeItems"] {
            let field = update.field(name).unwrap();
            assert_eq!(field.directives.len(), 1, "{name}");
            assert_eq!(field.directives[0].name, "roles");
        }
        assert!(update.field("id").unwrap().directives.is_empty());
    }

    #[test]
    fn test_object_list_without_directive() {
        let inputs = synthesize(
            r#"
            type Delivery @rootEntity { addresses: [Address] }
            type Address @valueObject { street: String }
            "#,
        )
        .unwrap();
        assert_eq!(
            inputs[0].field("addresses").unwrap().ty,
            TypeNode::list_of_non_null("UpdateAddressInput")
        );
    }
}
