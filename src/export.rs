//! Result export and console reports
//!
//! Profiles go to a timestamped CSV with a fixed column set; ratings go to
//! a detailed JSON file plus a simplified CSV. Console summaries cover the
//! scrape batch, the top-rated prospects and the deal-ledger breakdowns.

use crate::deals::{Dimension, HistoricalPatternModel};
use crate::profile::{FirmographicProfile, PROFILE_CSV_HEADERS};
use crate::scorer::Rating;
use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write as IoWrite;
use std::path::Path;
use tracing::{debug, info};

/// Write profiles to CSV with the fixed column set.
pub fn export_profiles_csv(profiles: &[FirmographicProfile], output_path: &Path) -> Result<()> {
    debug!(
        "Exporting {} profiles to CSV: {}",
        profiles.len(),
        output_path.display()
    );

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(PROFILE_CSV_HEADERS)?;

    for profile in profiles {
        wtr.write_record(&[
            profile.company_name.clone(),
            profile.domain.clone(),
            profile.url.clone(),
            profile.status.to_string(),
            profile.detected_language.clone().unwrap_or_default(),
            profile.translated.to_string(),
            profile
                .employee_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            profile
                .employee_range
                .map(|r| r.to_string())
                .unwrap_or_default(),
            profile.region.to_string(),
            profile.industry.to_string(),
            profile.size_category.to_string(),
            profile.reasoning.join("; "),
            profile.scraped_at.to_rfc3339(),
            profile.error.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    info!(
        "Successfully exported {} profiles to CSV: {}",
        profiles.len(),
        output_path.display()
    );

    Ok(())
}

/// Write ratings as detailed JSON plus a simplified CSV. Returns the two
/// file paths.
pub fn export_ratings(ratings: &[Rating], base_path: &Path) -> Result<(String, String)> {
    let json_path = format!("{}.json", base_path.display());
    let csv_path = format!("{}.csv", base_path.display());

    if let Some(parent) = base_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(ratings)?;
    let mut file = File::create(&json_path)
        .with_context(|| format!("Failed to create ratings file: {}", json_path))?;
    file.write_all(json.as_bytes())?;

    let file = File::create(&csv_path)
        .with_context(|| format!("Failed to create ratings file: {}", csv_path))?;
    let mut wtr = Writer::from_writer(file);
    wtr.write_record([
        "company_name",
        "domain",
        "score",
        "grade",
        "priority",
        "potential_value",
        "industry",
        "region",
        "size",
        "recommendation",
    ])?;
    for rating in ratings {
        wtr.write_record(&[
            rating.company_name.clone(),
            rating.domain.clone(),
            rating.score.to_string(),
            rating.grade.to_string(),
            rating.priority.to_string(),
            rating.potential_value.to_string(),
            rating.factors.industry.value.clone(),
            rating.factors.region.value.clone(),
            rating.factors.size.value.clone(),
            rating.recommendation.to_string(),
        ])?;
    }
    wtr.flush()?;

    info!(
        "Successfully exported {} ratings to {} and {}",
        ratings.len(),
        json_path,
        csv_path
    );

    Ok((json_path, csv_path))
}

/// Console summary of a scrape batch.
pub fn print_scrape_summary(profiles: &[FirmographicProfile]) {
    if profiles.is_empty() {
        println!("No companies processed.");
        return;
    }

    let successful = profiles.iter().filter(|p| p.status.is_success()).count();
    let with_employees = profiles.iter().filter(|p| p.has_employee_data()).count();
    let with_industry = profiles.iter().filter(|p| p.industry.is_known()).count();
    let translated = profiles.iter().filter(|p| p.translated).count();

    println!("\n=== Scrape Summary ===");
    println!("Companies processed: {}", profiles.len());
    println!("Successful fetches: {}", successful);
    println!("Employee data found: {}", with_employees);
    println!("Industry identified: {}", with_industry);
    println!("Pages translated: {}", translated);
    println!("======================\n");
}

/// Console table of the top-rated prospects.
pub fn print_rating_summary(ratings: &[Rating]) {
    println!("\n=== COMPANY RATING COMPLETE ===");
    println!("Rated {} companies", ratings.len());
    println!("\nTop 10 Companies by Score:");
    println!("{}", "-".repeat(80));
    println!(
        "{:<30} {:<8} {:<6} {:<10} {:<10}",
        "Company", "Score", "Grade", "Priority", "Potential"
    );
    println!("{}", "-".repeat(80));

    for rating in ratings.iter().take(10) {
        let name: String = rating.company_name.chars().take(29).collect();
        println!(
            "{:<30} {:<8} {:<6} {:<10} ${:<10.0}",
            name, rating.score, rating.grade, rating.priority, rating.potential_value
        );
    }
}

/// Console breakdown of ledger win rates and amounts per dimension.
pub fn print_deal_analysis(model: &HistoricalPatternModel) {
    println!("\n=== DEAL PATTERN ANALYSIS ===\n");
    println!("Total deals: {}", model.total_deals());
    println!("Overall win rate: {:.1}%", model.overall_win_rate() * 100.0);
    if let Some(avg) = model.overall_avg_amount() {
        println!("Overall average amount: ${:.0}", avg);
    }

    let sections = [
        ("Win Rates by Industry", Dimension::Industry),
        ("Win Rates by Region", Dimension::Region),
        ("Win Rates by Company Size", Dimension::Size),
        ("Win Rates by Headcount Range", Dimension::HeadcountRange),
    ];

    for (title, dimension) in sections {
        println!("\n{}:", title);
        let stats = model.stats(dimension);
        for value in stats.values() {
            let rate = stats.win_rate(value).unwrap_or(0.0);
            let count = stats.deal_count(value).unwrap_or(0);
            match stats.avg_amount(value) {
                Some(avg) => println!(
                    "  {}: {:.1}% ({} deals, avg ${:.0})",
                    value,
                    rate * 100.0,
                    count,
                    avg
                ),
                None => println!("  {}: {:.1}% ({} deals)", value, rate * 100.0, count),
            }
        }
    }
    println!();
}
