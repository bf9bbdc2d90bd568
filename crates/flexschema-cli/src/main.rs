mod cli;
mod commands;
mod config;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let app_config = config::loader::load_config(cli.config.as_deref()).map_err(anyhow::Error::msg)?;

    let level = cli.log_level.as_deref().unwrap_or(&app_config.logging.level);
    observability::init_tracing_with_level(level);
    tracing::debug!(?app_config, "Configuration loaded");

    let format = cli.format.unwrap_or_default();

    match &cli.command {
        Commands::UpdateInputs(args) => {
            commands::inputs::update_inputs(args.schema.as_deref(), args.full)?;
        }
        Commands::CreateInput(args) => {
            commands::inputs::create_input(&args.model, &args.type_name)?;
        }
        Commands::Prepare(args) => {
            commands::inputs::prepare(&args.model, &args.type_name, args.payload.as_deref(), format)?;
        }
        Commands::PlanViews(args) => {
            commands::views::plan_views(args, &app_config.search, format).await?;
        }
    }

    Ok(())
}
