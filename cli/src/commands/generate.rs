use std::time::Instant;

use colored::*;
use quotes_core::catalog::CatalogService;
use quotes_core::maintenance::{self, GenerateOptions};

use crate::terminal::print;

pub async fn generate(catalog: &CatalogService, count: usize, clear: bool) -> anyhow::Result<()> {
    if clear {
        print::print_status("Clearing existing quotes and types...");
    }
    print::print_status(format!("Generating {count} quotes..."));

    let started = Instant::now();
    let report = maintenance::generate(catalog, GenerateOptions { count, clear }).await?;

    print::aligned_line("Generated", report.generated.to_string().green().bold());
    print::aligned_line("Total quotes", report.total_quotes.to_string());
    print::aligned_line("Took", format!("{:.2}s", started.elapsed().as_secs_f64()));
    Ok(())
}
