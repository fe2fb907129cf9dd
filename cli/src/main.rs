mod commands;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use commands::{CommandLine, Commands, check_ids, generate, reindex, serve, stats};
use quotes_core::catalog::CatalogService;
use quotes_core::store::MemoryStore;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init_logging()?;

    let config = commands.config();
    config.validate().context("invalid configuration")?;

    let store = match &config.data_file {
        Some(path) => MemoryStore::open(path)
            .await
            .with_context(|| format!("could not load {}", path.display()))?,
        None => MemoryStore::new(),
    };
    let catalog = CatalogService::new(Arc::new(store));

    match commands.command {
        Commands::Serve => {
            print::banner();
            serve::serve(catalog, config).await
        }
        Commands::Generate { count, clear } => {
            print::header("generating quotes");
            generate::generate(&catalog, count, clear).await
        }
        Commands::Reindex { dry_run, yes } => {
            print::header("reindexing quotes");
            reindex::reindex(&catalog, dry_run, yes).await
        }
        Commands::CheckIds => {
            print::header("checking quote ids");
            check_ids::check_ids(&catalog).await
        }
        Commands::Stats => {
            print::header("catalog statistics");
            stats::stats(&catalog).await
        }
    }
}
