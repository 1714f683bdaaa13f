//! Crawl report output
//!
//! Pure observation: formatting and printing the final crawl report has no
//! effect on crawl behavior.

use crate::crawler::CrawlReport;

/// Prints the full crawl report: the visited URL listing plus summary lines
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!("Seed: {}", report.seed);
    println!();

    println!("Visited URLs ({}):", report.visited.len());
    for url in &report.visited {
        println!("  {}", url);
    }

    if !report.abandoned.is_empty() {
        println!("\nAbandoned after retries ({}):", report.abandoned.len());
        for url in &report.abandoned {
            println!("  {}", url);
        }
    }

    println!();
    print_summary(report);
}

/// Prints the one-screen summary without the URL listing
pub fn print_summary(report: &CrawlReport) {
    println!("Total visited URLs: {}", report.visited.len());
    println!("Abandoned URLs:     {}", report.abandoned.len());
    println!(
        "Waves dispatched:   {} ({} retry passes)",
        report.waves, report.retry_passes
    );
    println!("Elapsed:            {:.2?}", report.elapsed);
}
