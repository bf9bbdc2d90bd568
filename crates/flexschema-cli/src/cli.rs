use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "flexschema")]
#[command(about = "Synthesize mutation inputs and plan search view migrations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./flexschema.toml when present)
    #[arg(short, long, global = true, env = "FLEXSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Update/UpdateAll input types for a schema
    UpdateInputs(UpdateInputsArgs),
    /// Print the Create input of a type and the inputs it nests
    CreateInput(CreateInputArgs),
    /// Prepare a create payload and list the fields it writes
    Prepare(PrepareArgs),
    /// Plan search view migrations against a store snapshot
    PlanViews(PlanViewsArgs),
}

#[derive(clap::Args)]
pub struct UpdateInputsArgs {
    /// Path to the schema SDL (reads from stdin if omitted)
    #[arg(long)]
    pub schema: Option<PathBuf>,
    /// Print the whole schema with the inputs appended
    #[arg(long)]
    pub full: bool,
}

#[derive(clap::Args)]
pub struct CreateInputArgs {
    /// Path to the model JSON
    #[arg(long)]
    pub model: PathBuf,
    /// Object type name (e.g. Delivery)
    #[arg(long = "type")]
    pub type_name: String,
}

#[derive(clap::Args)]
pub struct PrepareArgs {
    /// Path to the model JSON
    #[arg(long)]
    pub model: PathBuf,
    /// Object type name (e.g. Delivery)
    #[arg(long = "type")]
    pub type_name: String,
    /// Path to the payload JSON (reads from stdin if omitted)
    #[arg(long)]
    pub payload: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct PlanViewsArgs {
    /// Path to the model JSON
    #[arg(long)]
    pub model: PathBuf,
    /// Store snapshot JSON; an empty store if omitted
    #[arg(long)]
    pub store: Option<PathBuf>,
    /// Apply the plan and write the resulting snapshot back to --store
    #[arg(long, requires = "store")]
    pub apply: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_apply_requires_store() {
        let result = Cli::try_parse_from(["flexschema", "plan-views", "--model", "m.json", "--apply"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "flexschema",
            "prepare",
            "--model",
            "m.json",
            "--type",
            "Delivery",
            "--format",
            "table",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert!(matches!(cli.command, Commands::Prepare(ref args) if args.type_name == "Delivery"));
    }
}
