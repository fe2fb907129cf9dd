use colored::*;
use quotes_core::catalog::CatalogService;
use quotes_core::statistics::TermCount;

use crate::qprint;
use crate::terminal::print;

pub async fn stats(catalog: &CatalogService) -> anyhow::Result<()> {
    let report = catalog.statistics().await?;

    print::aligned_line("Quotes", report.total_quotes.to_string().green().bold());
    qprint!();

    print::tree_head(1, "Types");
    print_terms(&report.type_stats, report.quotes_without_types, "Without type");
    qprint!();

    print::tree_head(2, "Topics");
    print_terms(&report.topic_stats, report.quotes_without_topics, "Without topic");
    qprint!();

    print::tree_head(3, "Authors");
    let mut authors: Vec<(String, ColoredString)> = report
        .author_stats
        .iter()
        .map(|a| (a.full_name.clone(), a.quote_count.to_string().normal()))
        .collect();
    authors.push((
        "Without author".to_string(),
        report.quotes_without_authors.to_string().yellow(),
    ));
    print::as_tree_one_level(authors);
    Ok(())
}

fn print_terms(terms: &[TermCount], without: usize, without_label: &str) {
    let mut lines: Vec<(String, ColoredString)> = terms
        .iter()
        .map(|t| (t.name.clone(), t.quote_count.to_string().normal()))
        .collect();
    lines.push((without_label.to_string(), without.to_string().yellow()));
    print::as_tree_one_level(lines);
}
