use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use flexschema_core::Model;
use flexschema_graphql::{
    AstTransformer, CreateInputTypeGenerator, UpdateInputTypesTransformer, parse_sdl, run_transformers,
};
use serde_json::{Value, json};

use super::{load_model, read_source};
use crate::cli::OutputFormat;
use crate::output::{affected_fields_table, print_json};

pub fn update_inputs(schema: Option<&Path>, full: bool) -> Result<()> {
    let sdl = read_source(schema)?;
    println!("{}", update_inputs_sdl(&sdl, full)?);
    Ok(())
}

/// Synthesized Update inputs as SDL, or the whole document with them appended.
pub fn update_inputs_sdl(sdl: &str, full: bool) -> Result<String> {
    let mut document = parse_sdl(sdl).context("Invalid schema")?;
    let transformer = UpdateInputTypesTransformer;
    if full {
        run_transformers(&mut document, &[&transformer as &dyn AstTransformer])?;
        return Ok(document.to_string());
    }
    let synthesized = transformer.synthesize(&document)?;
    Ok(synthesized
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n"))
}

pub fn create_input(model_path: &Path, type_name: &str) -> Result<()> {
    let model = load_model(model_path)?;
    println!("{}", create_input_sdl(model, type_name)?);
    Ok(())
}

/// The Create input of a type plus every Create input it nests, as SDL.
pub fn create_input_sdl(model: Arc<Model>, type_name: &str) -> Result<String> {
    let generator = CreateInputTypeGenerator::new(model);
    let input = generator.generate_by_name(type_name)?;
    Ok(input
        .reachable_types()
        .into_iter()
        .map(|input| input.to_definition().to_string())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

pub fn prepare(
    model_path: &Path,
    type_name: &str,
    payload: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let model = load_model(model_path)?;
    let payload: Value =
        serde_json::from_str(&read_source(payload)?).context("Invalid payload JSON")?;
    let result = prepare_payload(model, type_name, payload)?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!("{}", serde_json::to_string_pretty(&result["properties"])?);
            let affected: Vec<String> = result["affectedFields"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|path| path.as_str().map(str::to_string))
                .collect();
            println!("{}", affected_fields_table(&affected));
        }
    }
    Ok(())
}

/// Prepared properties, affected field paths and relation ids for a payload.
pub fn prepare_payload(model: Arc<Model>, type_name: &str, payload: Value) -> Result<Value> {
    let Value::Object(payload) = payload else {
        anyhow::bail!("Payload must be a JSON object");
    };

    let generator = CreateInputTypeGenerator::new(Arc::clone(&model));
    let input = generator.generate_by_name(type_name)?;

    let properties = input.prepare(&payload)?;
    let affected: Vec<String> = input
        .affected_fields(&payload)?
        .into_iter()
        .map(|id| model.field_path(id))
        .collect();
    let relations: Vec<Value> = input
        .relation_additions(&payload)?
        .into_iter()
        .map(|addition| json!({ "field": model.field_path(addition.field), "ids": addition.ids }))
        .collect();

    Ok(json!({
        "properties": properties,
        "affectedFields": affected,
        "relationAdditions": relations,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "types": [
            {
                "name": "Delivery",
                "kind": "rootEntity",
                "fields": [
                    { "name": "deliveryNumber", "type": "String" },
                    { "name": "priority", "type": "Int", "defaultValue": 3 },
                    { "name": "items", "type": "Item", "list": true },
                    { "name": "handlingUnits", "type": "HandlingUnit", "list": true, "relation": true }
                ]
            },
            { "name": "HandlingUnit", "kind": "rootEntity", "fields": [] },
            {
                "name": "Item",
                "kind": "childEntity",
                "fields": [{ "name": "sku", "type": "String" }]
            }
        ]
    }"#;

    fn model() -> Arc<Model> {
        Arc::new(Model::from_json(MODEL).unwrap())
    }

    #[test]
    fn test_prepare_payload() {
        let result = prepare_payload(
            model(),
            "Delivery",
            json!({
                "deliveryNumber": "D-1",
                "items": [{ "sku": "a" }],
                "handlingUnits": ["h1"]
            }),
        )
        .unwrap();

        let properties = &result["properties"];
        assert_eq!(properties["deliveryNumber"], "D-1");
        assert_eq!(properties["priority"], 3);
        assert!(properties["createdAt"].is_string());
        assert!(properties["items"][0]["id"].is_string());
        assert!(properties.get("handlingUnits").is_none());

        assert_eq!(
            result["affectedFields"],
            json!([
                "Delivery.deliveryNumber",
                "Delivery.items",
                "Item.sku",
                "Delivery.handlingUnits"
            ])
        );
        assert_eq!(
            result["relationAdditions"],
            json!([{ "field": "Delivery.handlingUnits", "ids": ["h1"] }])
        );
    }

    #[test]
    fn test_prepare_rejects_bad_payloads() {
        assert!(prepare_payload(model(), "Delivery", json!([1])).is_err());
        let err = prepare_payload(model(), "Delivery", json!({ "items": "x" })).unwrap_err();
        assert!(err.to_string().contains("items"));
        assert!(prepare_payload(model(), "Nope", json!({})).is_err());
    }

    #[test]
    fn test_create_input_sdl() {
        let sdl = create_input_sdl(model(), "Delivery").unwrap();
        assert!(sdl.starts_with("input CreateDeliveryInput {"));
        assert!(sdl.contains("items: [CreateItemInput!]"));
        assert!(sdl.contains("handlingUnits: [ID!]"));
        assert!(sdl.contains("input CreateItemInput {"));
    }

    #[test]
    fn test_update_inputs_sdl() {
        let schema = r#"
            type Delivery @rootEntity {
                deliveryNumber: String
                items: [Item]
            }

            type Item @childEntity {
                sku: String
            }
        "#;
        let sdl = update_inputs_sdl(schema, false).unwrap();
        assert!(sdl.starts_with("input UpdateDeliveryInput {"));
        assert!(sdl.contains("input UpdateAllDeliveryInput {"));
        assert!(sdl.contains("addItems: [CreateItemInput!]"));
        assert!(!sdl.contains("type Delivery"));

        let full = update_inputs_sdl(schema, true).unwrap();
        assert!(full.starts_with("type Delivery"));
        assert!(full.contains("input UpdateItemInput {"));
    }
}
