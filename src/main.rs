// The binary shares modules with the library; items only the library API
// exposes are not dead code here.
#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod companies;
mod config;
mod content;
mod deals;
mod export;
mod extract;
mod fetch;
mod page;
mod pipeline;
mod profile;
mod reference;
mod resolver;
mod scorer;
mod text;

use cli::{Cli, Commands};
use config::{AppConfig, ConfigError};
use deals::HistoricalPatternModel;
use pipeline::CompanyPipeline;
use scorer::ProspectScorer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(message) = cli.validate() {
        eprintln!("❌ {}", message);
        std::process::exit(1);
    }

    // Handle --init before any other processing
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("✅ Created default configuration file at: {}", path.display());
                println!("   Edit this file to customize settings, then run prospectfinder again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    let config = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(ConfigError::FileNotFound(path)) => match AppConfig::prompt_create_config() {
            Ok(Some(created_path)) => {
                println!(
                    "✅ Created default configuration file at: {}",
                    created_path.display()
                );
                println!("   Edit this file to customize settings, then run prospectfinder again.");
                std::process::exit(0);
            }
            Ok(None) => {
                eprintln!("❌ Configuration file not found at: {}", path.display());
                eprintln!("   Run with --init to create a default configuration file.");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("❌ Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    match &cli.command {
        Some(Commands::Rate {
            profiles,
            deals,
            output,
        }) => run_rate(&config, &cli, profiles, deals, output),
        Some(Commands::Analyze { deals }) => run_analyze(deals),
        None => run_scrape(&config, &cli).await,
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prospectfinder={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Scrape mode: companies file -> profiles CSV.
async fn run_scrape(config: &AppConfig, cli: &Cli) -> Result<()> {
    let companies = companies::parse_company_file(Path::new(&cli.input), cli.max_companies)?;
    if companies.is_empty() {
        eprintln!("❌ No valid companies found in {}", cli.input);
        std::process::exit(1);
    }

    println!(
        "🚀 Scraping {} companies from {}",
        companies.len(),
        cli.input
    );

    let pipeline = Arc::new(CompanyPipeline::from_config(config)?);
    let parallel = cli.parallel.unwrap_or(config.scrape.parallel_companies);
    let profiles = pipeline::run_batch(pipeline, companies, parallel).await;

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let output_path = PathBuf::from(&output_dir).join(format!(
        "company_data_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    ));
    export::export_profiles_csv(&profiles, &output_path)?;

    export::print_scrape_summary(&profiles);
    println!("✅ Results saved to {}", output_path.display());

    Ok(())
}

/// Rate mode: profiles CSV + deal ledger -> ranked ratings.
fn run_rate(
    config: &AppConfig,
    cli: &Cli,
    profiles_path: &str,
    deals_path: &str,
    output: &str,
) -> Result<()> {
    let model = HistoricalPatternModel::from_path(Path::new(deals_path))
        .context("Failed to build historical pattern model")?;

    let profiles = profile::read_profiles_csv(Path::new(profiles_path))?;
    if profiles.is_empty() {
        eprintln!("❌ No profiles found in {}", profiles_path);
        std::process::exit(1);
    }

    let scorer = ProspectScorer::new(&model);
    let ratings = scorer.rate_batch(&profiles);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.dir.clone());
    let base = PathBuf::from(&output_dir).join(format!(
        "{}_{}",
        output,
        Utc::now().format("%Y%m%d_%H%M%S")
    ));
    let (json_file, csv_file) = export::export_ratings(&ratings, &base)?;

    export::print_rating_summary(&ratings);
    println!("\nRatings saved to:");
    println!("  - {} (detailed)", json_file);
    println!("  - {} (simplified)", csv_file);

    Ok(())
}

/// Analyze mode: print deal-ledger breakdowns.
fn run_analyze(deals_path: &str) -> Result<()> {
    let model = HistoricalPatternModel::from_path(Path::new(deals_path))
        .context("Failed to build historical pattern model")?;
    export::print_deal_analysis(&model);
    Ok(())
}
