use std::io::{self, BufRead, Write};

use anyhow::Context;
use colored::*;
use quotes_common::models::quote::Quote;
use quotes_core::catalog::CatalogService;
use quotes_core::maintenance;

use crate::qprint;
use crate::terminal::print;

pub async fn reindex(catalog: &CatalogService, dry_run: bool, yes: bool) -> anyhow::Result<()> {
    let preview = maintenance::reindex(catalog, true).await?;

    if dry_run {
        print::check(false, "Dry run, no changes will be made");
    }
    print::aligned_line("Quotes", preview.total.to_string());

    let Some((first, last)) = preview.previous_range else {
        print::check(false, "No quotes found");
        return Ok(());
    };
    print::aligned_line("Current id range", format!("{first} - {last}"));

    if dry_run {
        print::aligned_line("Would become", format!("1 - {}", preview.total));
        return Ok(());
    }

    if !yes && !confirm()? {
        print::print_status("Operation cancelled".red().to_string());
        return Ok(());
    }

    let report = maintenance::reindex(catalog, false).await?;
    let quotes = catalog.list::<Quote>().await?;
    let new_range = match (quotes.first(), quotes.last()) {
        (Some(f), Some(l)) => format!("{} - {}", f.id, l.id),
        _ => "empty".to_string(),
    };
    qprint!();
    print::check(true, &format!("Reindexed {} quotes", report.total));
    print::aligned_line("New id range", new_range.green());
    Ok(())
}

fn confirm() -> anyhow::Result<bool> {
    let mut stdout = io::stdout();
    write!(
        stdout,
        "This will renumber every quote id starting from 1. Are you sure? (yes/no): "
    )?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("could not read the confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
