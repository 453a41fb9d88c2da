use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "prospectfinder")]
#[command(about = "Extracts firmographic profiles from company websites and scores prospects against historical deals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Create default configuration file at ./config/prospectfinder.toml
    #[arg(long, global = true)]
    pub init: bool,

    /// Path to the companies CSV (semicolon-delimited Name;Domain rows)
    #[arg(short, long, default_value = "data/companies.csv")]
    pub input: String,

    /// Maximum number of companies to process
    #[arg(long, value_name = "N")]
    pub max_companies: Option<usize>,

    /// Number of companies scraped in parallel (overrides config)
    #[arg(short = 'j', long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Output directory for results (overrides config)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score previously scraped profiles against the historical deal ledger
    Rate {
        /// Path to the profiles CSV produced by a scrape run
        #[arg(long)]
        profiles: String,

        /// Path to the semicolon-delimited deal ledger
        #[arg(long, default_value = "data/deals/deals.csv")]
        deals: String,

        /// Output base name; `.json` and `.csv` files are written next to it
        #[arg(short, long, default_value = "company_ratings")]
        output: String,
    },

    /// Print win-rate breakdowns mined from the deal ledger
    Analyze {
        /// Path to the semicolon-delimited deal ledger
        #[arg(long, default_value = "data/deals/deals.csv")]
        deals: String,
    },
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(parallel) = self.parallel {
            if parallel == 0 {
                return Err("Parallel companies must be greater than 0".to_string());
            }
            if parallel > 20 {
                return Err(
                    "Parallel companies cannot exceed 20 to avoid overwhelming target sites"
                        .to_string(),
                );
            }
        }

        if let Some(max) = self.max_companies {
            if max == 0 {
                return Err("Max companies must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args_validate() {
        let cli = Cli::parse_from(["prospectfinder"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.input, "data/companies.csv");
    }

    #[test]
    fn test_parallel_bounds() {
        let cli = Cli::parse_from(["prospectfinder", "-j", "0"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["prospectfinder", "-j", "21"]);
        assert!(cli.validate().is_err());

        let cli = Cli::parse_from(["prospectfinder", "-j", "5"]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_rate_subcommand_parses() {
        let cli = Cli::parse_from([
            "prospectfinder",
            "rate",
            "--profiles",
            "output/company_data.csv",
        ]);
        match cli.command {
            Some(Commands::Rate { profiles, deals, .. }) => {
                assert_eq!(profiles, "output/company_data.csv");
                assert_eq!(deals, "data/deals/deals.csv");
            }
            _ => panic!("expected rate subcommand"),
        }
    }
}
