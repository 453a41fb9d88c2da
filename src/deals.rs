//! Historical deal ledger and pattern model
//!
//! The ledger is a semicolon-delimited export of closed deals. The pattern
//! model aggregates it once at construction into per-dimension win rates,
//! average amounts and deal counts, plus overall fallbacks. The model is
//! read-only afterwards; concurrent scoring reads need no locking.
//!
//! Construction is fatal when the ledger is missing or has no parseable
//! rows: no default pattern model is safe to assume.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Stage value that marks a won deal.
const STAGE_CLOSED_WON: &str = "Closed Won";

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("deal ledger not found at {0}")]
    Missing(PathBuf),

    #[error("failed to read deal ledger: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse deal ledger: {0}")]
    Malformed(#[from] csv::Error),

    #[error("deal ledger contains no parseable rows")]
    Empty,
}

/// One row of the deal ledger.
#[derive(Debug, Clone)]
pub struct Deal {
    pub industry: String,
    pub region: String,
    pub size: String,
    pub headcount_range: String,
    /// Missing when the source cell was blank or non-numeric
    pub amount: Option<f64>,
    pub stage: String,
}

impl Deal {
    pub fn is_won(&self) -> bool {
        self.stage == STAGE_CLOSED_WON
    }
}

/// Grouping dimensions the model aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Industry,
    Region,
    Size,
    HeadcountRange,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Industry => "industry",
            Dimension::Region => "region",
            Dimension::Size => "size",
            Dimension::HeadcountRange => "headcount range",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default)]
struct GroupStats {
    deals: u32,
    wins: u32,
    amount_sum: f64,
    amount_count: u32,
}

impl GroupStats {
    fn add(&mut self, deal: &Deal) {
        self.deals += 1;
        if deal.is_won() {
            self.wins += 1;
        }
        if let Some(amount) = deal.amount {
            self.amount_sum += amount;
            self.amount_count += 1;
        }
    }

    fn win_rate(&self) -> f64 {
        self.wins as f64 / self.deals as f64
    }

    fn avg_amount(&self) -> Option<f64> {
        if self.amount_count == 0 {
            None
        } else {
            Some(self.amount_sum / self.amount_count as f64)
        }
    }
}

/// Aggregates for one grouping dimension. Absent groups mean absence of
/// deals, never a zero rate.
#[derive(Debug, Clone, Default)]
pub struct DimensionStats {
    groups: HashMap<String, GroupStats>,
}

impl DimensionStats {
    pub fn win_rate(&self, value: &str) -> Option<f64> {
        self.groups.get(value).map(GroupStats::win_rate)
    }

    pub fn avg_amount(&self, value: &str) -> Option<f64> {
        self.groups.get(value).and_then(GroupStats::avg_amount)
    }

    pub fn deal_count(&self, value: &str) -> Option<u32> {
        self.groups.get(value).map(|g| g.deals)
    }

    pub fn total_amount(&self, value: &str) -> Option<f64> {
        self.groups.get(value).map(|g| g.amount_sum)
    }

    /// Group values sorted for stable report output.
    pub fn values(&self) -> Vec<&str> {
        let mut values: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        values.sort_unstable();
        values
    }
}

/// Read-only win-rate/amount aggregates mined from the deal ledger.
#[derive(Debug, Clone)]
pub struct HistoricalPatternModel {
    industry: DimensionStats,
    region: DimensionStats,
    size: DimensionStats,
    headcount: DimensionStats,
    total_deals: u32,
    total_wins: u32,
    overall_avg: Option<f64>,
}

impl HistoricalPatternModel {
    /// Build the model from a ledger file.
    pub fn from_path(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            return Err(LedgerError::Missing(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Build the model from any reader of semicolon-delimited ledger rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LedgerError> {
        let deals = parse_deals(reader)?;
        if deals.is_empty() {
            return Err(LedgerError::Empty);
        }
        Ok(Self::from_deals(&deals))
    }

    /// Aggregate parsed deals into the model.
    pub fn from_deals(deals: &[Deal]) -> Self {
        let mut industry = DimensionStats::default();
        let mut region = DimensionStats::default();
        let mut size = DimensionStats::default();
        let mut headcount = DimensionStats::default();
        let mut total_wins = 0u32;
        let mut amount_sum = 0f64;
        let mut amount_count = 0u32;

        for deal in deals {
            industry
                .groups
                .entry(deal.industry.clone())
                .or_default()
                .add(deal);
            region
                .groups
                .entry(deal.region.clone())
                .or_default()
                .add(deal);
            size.groups.entry(deal.size.clone()).or_default().add(deal);
            headcount
                .groups
                .entry(deal.headcount_range.clone())
                .or_default()
                .add(deal);

            if deal.is_won() {
                total_wins += 1;
            }
            if let Some(amount) = deal.amount {
                amount_sum += amount;
                amount_count += 1;
            }
        }

        let overall_avg = if amount_count == 0 {
            None
        } else {
            Some(amount_sum / amount_count as f64)
        };

        info!(
            "Built pattern model from {} deals ({} industries, {} regions, {} sizes)",
            deals.len(),
            industry.groups.len(),
            region.groups.len(),
            size.groups.len()
        );

        Self {
            industry,
            region,
            size,
            headcount,
            total_deals: deals.len() as u32,
            total_wins,
            overall_avg,
        }
    }

    pub fn stats(&self, dimension: Dimension) -> &DimensionStats {
        match dimension {
            Dimension::Industry => &self.industry,
            Dimension::Region => &self.region,
            Dimension::Size => &self.size,
            Dimension::HeadcountRange => &self.headcount,
        }
    }

    pub fn win_rate(&self, dimension: Dimension, value: &str) -> Option<f64> {
        self.stats(dimension).win_rate(value)
    }

    pub fn avg_amount(&self, dimension: Dimension, value: &str) -> Option<f64> {
        self.stats(dimension).avg_amount(value)
    }

    pub fn deal_count(&self, dimension: Dimension, value: &str) -> Option<u32> {
        self.stats(dimension).deal_count(value)
    }

    pub fn overall_win_rate(&self) -> f64 {
        self.total_wins as f64 / self.total_deals as f64
    }

    /// Mean over deals with a present amount; `None` when no deal carried one.
    pub fn overall_avg_amount(&self) -> Option<f64> {
        self.overall_avg
    }

    pub fn total_deals(&self) -> u32 {
        self.total_deals
    }
}

/// Parse ledger rows. Rows that fail CSV parsing propagate as
/// `LedgerError::Malformed`; a blank required cell just yields an empty
/// group key, matching the source data.
fn parse_deals<R: Read>(reader: R) -> Result<Vec<Deal>, LedgerError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = |name: &str| headers.iter().position(|h| h == name);

    let industry_idx = index("Industry");
    let region_idx = index("Region");
    let size_idx = index("Company Headcount Size");
    let range_idx = index("Company Headcount Range");
    let amount_idx = index("Amount");
    let stage_idx = index("Stage");

    let cell = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let mut deals = Vec::new();
    for result in csv_reader.records() {
        let record = result?;

        let stage = cell(&record, stage_idx);
        if stage.is_empty() {
            continue;
        }

        // Non-numeric amounts are missing, not zero
        let amount = cell(&record, amount_idx).parse::<f64>().ok();

        deals.push(Deal {
            industry: cell(&record, industry_idx),
            region: cell(&record, region_idx),
            size: cell(&record, size_idx),
            headcount_range: cell(&record, range_idx),
            amount,
            stage,
        });
    }

    Ok(deals)
}
