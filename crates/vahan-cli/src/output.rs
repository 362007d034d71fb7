//! Output formatting module

use vahan_app::app::CheckSummary;
use vahan_domain::model::Category;
use vahan_domain::service::FancyCandidate;
use vahan_types::{OutputFormat, RegistrationStatus, Result};

pub fn output_candidates(output_format: OutputFormat, candidates: &[FancyCandidate]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(candidates)?;
        println!("{}", content);
        return Ok(());
    }

    println!("{:<16} {:<6} {}", "Candidate", "Number", "Category");
    println!("{}", "-".repeat(40));
    for c in candidates {
        println!("{:<16} {:<6} {}", c.candidate, c.number, c.category);
    }

    println!();
    println!("Total: {}", candidates.len());
    for category in Category::ALL {
        let n = candidates.iter().filter(|c| c.category == category).count();
        if n > 0 {
            println!("  {:<13} {}", category.label(), n);
        }
    }

    Ok(())
}

pub fn output_summary(output_format: OutputFormat, summary: &CheckSummary) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(summary)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nRegistration Check Complete");
    println!("===========================");
    println!("Candidates:    {}", summary.total);
    println!("From cache:    {}", summary.cached);
    println!("Looked up:     {}", summary.looked_up);
    println!("Failed:        {}", summary.failed.len());
    println!("Available:     {}", summary.count(RegistrationStatus::Available));
    println!("Not available: {}", summary.count(RegistrationStatus::NotAvailable));
    println!("Unknown:       {}", summary.count(RegistrationStatus::Unknown));
    println!("Duration:      {:.1}s", summary.duration_secs());

    let available: Vec<_> = summary.available().collect();
    if !available.is_empty() {
        println!("\nAvailable numbers:");
        for record in available {
            println!("  {:<16} {}", record.candidate, record.category);
        }
    }

    if !summary.failed.is_empty() {
        println!("\nFailed lookups:");
        for failure in &summary.failed {
            println!("  {:<16} {}", failure.candidate, failure.error);
        }
    }

    Ok(())
}
