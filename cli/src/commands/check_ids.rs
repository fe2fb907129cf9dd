use quotes_core::catalog::CatalogService;
use quotes_core::maintenance::{self, MAX_LISTED_GAPS};

use crate::terminal::print;

pub async fn check_ids(catalog: &CatalogService) -> anyhow::Result<()> {
    let report = maintenance::check_ids(catalog).await?;

    let (Some(first), Some(last)) = (report.first_id, report.last_id) else {
        print::check(false, "No quotes found");
        return Ok(());
    };

    print::aligned_line("Total quotes", report.total.to_string());
    print::aligned_line("Id range", format!("{first} - {last}"));
    print::aligned_line("Expected range", format!("1 - {}", report.total));

    if report.has_gaps() {
        print::check(false, &format!("Found {} gaps in ids", report.gap_count));
        if report.gap_count <= MAX_LISTED_GAPS {
            let missing: Vec<String> = report.missing.iter().map(u64::to_string).collect();
            print::aligned_line("Missing ids", missing.join(", "));
        }
    } else {
        print::check(true, "No gaps in id sequence");
    }

    if report.starts_at_one() {
        print::check(true, "Ids start from 1");
    } else {
        print::check(false, &format!("Ids start from {first} instead of 1"));
    }

    if report.is_sequential() {
        print::check(true, &format!("Perfect sequential ids from 1 to {}", report.total));
    }
    Ok(())
}
