mod pipeline;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(name = "reviewsync")]
#[command(about = "Inject translated third-party product reviews into the catalog store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one ingestion batch over every active catalog product
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = reviewsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run) | None => {
            let mut pipeline = Pipeline::from_config(&config)?;
            pipeline.run().await?;
        }
    }

    Ok(())
}
