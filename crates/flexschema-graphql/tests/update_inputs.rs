//! Update/UpdateAll input synthesis on schema text

use flexschema_graphql::ast::{Definition, TypeNode};
use flexschema_graphql::{
    AstTransformer, SynthesisError, UpdateInputTypesTransformer, parse_sdl, run_transformers,
};

const SCHEMA: &str = r#"
type Delivery @rootEntity @roles(readWrite: "logistics") {
    deliveryNumber: String
    items: [Item!]!
    handlingUnits: [HandlingUnit] @relation
}

type Item @childEntity {
    sku: String
}

type HandlingUnit @rootEntity {
    huNumber: String
}
"#;

#[test]
fn test_relation_list_yields_add_and_remove() {
    let mut doc = parse_sdl(SCHEMA).unwrap();
    UpdateInputTypesTransformer.transform(&mut doc).unwrap();

    let update = doc.input_object_type("UpdateDeliveryInput").unwrap();
    let relation_fields: Vec<_> = update
        .fields
        .iter()
        .filter(|f| f.name.ends_with("HandlingUnits"))
        .collect();
    assert_eq!(relation_fields.len(), 2);
    assert_eq!(relation_fields[0].name, "addHandlingUnits");
    assert_eq!(relation_fields[1].name, "removeHandlingUnits");
    for field in relation_fields {
        assert_eq!(field.ty, TypeNode::list_of_non_null("ID"));
    }
    assert!(update.field("handlingUnits").is_none());
}

#[test]
fn test_child_entity_list_yields_three_fields() {
    let mut doc = parse_sdl(SCHEMA).unwrap();
    UpdateInputTypesTransformer.transform(&mut doc).unwrap();

    let update = doc.input_object_type("UpdateAllDeliveryInput").unwrap();
    assert_eq!(
        update.field("addItems").unwrap().ty,
        TypeNode::list_of_non_null("CreateItemInput")
    );
    assert_eq!(
        update.field("updateItems").unwrap().ty,
        TypeNode::list_of_non_null("UpdateItemInput")
    );
    assert_eq!(
        update.field("removeItems").unwrap().ty,
        TypeNode::list_of_non_null("ID")
    );
}

#[test]
fn test_synthesized_types_and_order() {
    let mut doc = parse_sdl(SCHEMA).unwrap();
    run_transformers(&mut doc, &[&UpdateInputTypesTransformer]).unwrap();

    let names: Vec<&str> = doc.input_object_types().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "UpdateDeliveryInput",
            "UpdateAllDeliveryInput",
            "UpdateHandlingUnitInput",
            "UpdateAllHandlingUnitInput",
            "UpdateItemInput",
        ]
    );
    assert!(doc.input_object_type("UpdateAllItemInput").is_none());
    assert!(doc.input_object_type("UpdateItemInput").unwrap().field("id").is_some());
}

#[test]
fn test_type_roles_copied_to_both_inputs() {
    let mut doc = parse_sdl(SCHEMA).unwrap();
    UpdateInputTypesTransformer.transform(&mut doc).unwrap();

    for name in ["UpdateDeliveryInput", "UpdateAllDeliveryInput"] {
        let input = doc.input_object_type(name).unwrap();
        assert_eq!(input.directives.len(), 1);
        assert_eq!(input.directives[0].name, "roles");
    }
    assert!(doc
        .input_object_type("UpdateHandlingUnitInput")
        .unwrap()
        .directives
        .is_empty());
}

#[test]
fn test_list_of_lists_is_fatal_and_leaves_document_untouched() {
    let sdl = r#"
        type Delivery @rootEntity { deliveryNumber: String }
        type Grid @rootEntity { cells: [[Int!]!] }
    "#;
    let mut doc = parse_sdl(sdl).unwrap();
    let before = doc.clone();

    let err = UpdateInputTypesTransformer.transform(&mut doc).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::ListOfLists {
            type_name: "Grid".into(),
            field: "cells".into(),
        }
    );
    assert_eq!(doc, before);
}

#[test]
fn test_output_is_valid_sdl() {
    let mut doc = parse_sdl(SCHEMA).unwrap();
    UpdateInputTypesTransformer.transform(&mut doc).unwrap();

    let printed = doc.to_string();
    assert!(printed.contains("input UpdateItemInput {\n  id: ID!\n  sku: String\n}"));

    let reparsed = parse_sdl(&printed).unwrap();
    assert_eq!(reparsed.definitions.len(), doc.definitions.len());
    assert!(matches!(
        reparsed.definition("UpdateDeliveryInput"),
        Some(Definition::InputObject(_))
    ));
}
