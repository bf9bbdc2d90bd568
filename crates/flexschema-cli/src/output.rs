use anyhow::Result;
use colored::Colorize;
use flexschema_search::SchemaMigration;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_plan(plan: &[SchemaMigration], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&serde_json::to_value(plan)?),
        OutputFormat::Table => {
            if plan.is_empty() {
                println!("Search views are up to date.");
            } else {
                println!("{}", plan_table(plan));
            }
            Ok(())
        }
    }
}

pub fn plan_table(plan: &[SchemaMigration]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Kind", "View", "Documents", "Description"]);
    for migration in plan {
        let kind = match migration {
            SchemaMigration::Create(_) => "create",
            SchemaMigration::Drop { .. } => "drop",
            SchemaMigration::Update(_) => "update",
            SchemaMigration::Recreate(_) => "recreate",
        };
        let documents = migration
            .collection_size()
            .map_or_else(|| "-".to_string(), |size| size.to_string());
        builder.push_record([
            kind.to_string(),
            migration.view_name().to_string(),
            documents,
            migration.description(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Two-column table of a prepared payload's affected fields.
pub fn affected_fields_table(affected: &[String]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Affected field"]);
    for (index, path) in affected.iter().enumerate() {
        builder.push_record([(index + 1).to_string(), path.clone()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_table_lists_every_migration() {
        let plan = vec![SchemaMigration::Drop {
            view_name: "flex_view_old".into(),
        }];
        let table = plan_table(&plan);
        assert!(table.contains("flex_view_old"));
        assert!(table.contains("drop"));
        assert!(table.contains("Drop search view"));
    }
}
