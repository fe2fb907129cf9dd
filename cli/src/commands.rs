pub mod check_ids;
pub mod generate;
pub mod reindex;
pub mod serve;
pub mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quotes_common::config::{Config, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PaginationConfig};

#[derive(Parser)]
#[command(name = "quotes")]
#[command(version, about = "A quotes catalog with merged-page pagination.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Address the HTTP server binds to
    #[arg(long, global = true, env = "QUOTES_ADDRESS", default_value = "127.0.0.1")]
    pub address: String,

    #[arg(long, global = true, env = "QUOTES_PORT", default_value_t = 8000)]
    pub port: u16,

    /// JSON file holding the catalog; in-memory only when omitted
    #[arg(long, global = true, env = "QUOTES_DATA")]
    pub data: Option<PathBuf>,

    /// Items per page when the client sends no page_size
    #[arg(long, global = true, env = "QUOTES_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Upper bound for client page_size overrides
    #[arg(long, global = true, env = "QUOTES_MAX_PAGE_SIZE", default_value_t = MAX_PAGE_SIZE)]
    pub max_page_size: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the JSON API and the HTML pages
    #[command(alias = "s")]
    Serve,
    /// Fill the catalog with synthetic quotes
    #[command(alias = "g")]
    Generate {
        #[arg(long, default_value_t = 4000)]
        count: usize,
        /// Delete every quote and type first
        #[arg(long)]
        clear: bool,
    },
    /// Renumber quote ids from 1 without gaps
    #[command(alias = "r")]
    Reindex {
        /// Only report what would change
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Report id range, gaps and continuity
    #[command(alias = "c")]
    CheckIds,
    /// Print catalog statistics
    Stats,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            address: self.address.clone(),
            port: self.port,
            data_file: self.data.clone(),
            pagination: PaginationConfig {
                default_page_size: self.page_size,
                max_page_size: self.max_page_size,
            },
        }
    }
}
