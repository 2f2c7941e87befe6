use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use vinalchemy_core::{MAX_ROWS, MIN_ROWS, WineRecord};

pub const DEFAULT_ROWS: i64 = 500;
pub const DEFAULT_SEED: u64 = 42;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Requested number of wines before duplicates; clamped to [100, 1000].
    pub rows: i64,
    /// Seed of the main stream; the shuffle uses `seed + 1`.
    pub seed: u64,
    /// Reference instant order dates and order ids are derived from.
    pub as_of: DateTime<Utc>,
}

impl GenerateOptions {
    /// Row count actually generated.
    pub fn normalized_rows(&self) -> usize {
        clamp_rows(self.rows)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            as_of: default_as_of(),
        }
    }
}

/// Clamp a requested row count into the supported range.
pub fn clamp_rows(requested: i64) -> usize {
    let min = MIN_ROWS as i64;
    let max = MAX_ROWS as i64;
    requested.clamp(min, max) as usize
}

/// Fixed reference instant used when callers do not supply one.
pub fn default_as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Structured dataset violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// Min / mean / max of the ground-truth prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl PriceStats {
    pub fn from_records(records: &[WineRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut total = 0.0;
        for record in records {
            min = min.min(record.price_eur);
            max = max.max(record.price_eur);
            total += record.price_eur;
        }
        Some(Self {
            min,
            mean: total / records.len() as f64,
            max,
        })
    }
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub as_of: DateTime<Utc>,
    pub rows_requested: i64,
    pub rows_generated: u64,
    pub duplicates_injected: u64,
    pub rows_total: u64,
    pub rows_by_color: BTreeMap<String, u64>,
    pub rows_by_country: BTreeMap<String, u64>,
    pub price_eur: Option<PriceStats>,
    pub price_format_usage: BTreeMap<String, u64>,
    pub date_format_usage: BTreeMap<String, u64>,
    pub duration_ms: u64,
    pub violations: Vec<Violation>,
}

impl GenerationReport {
    pub fn new(options: &GenerateOptions) -> Self {
        Self {
            seed: options.seed,
            as_of: options.as_of,
            rows_requested: options.rows,
            rows_generated: 0,
            duplicates_injected: 0,
            rows_total: 0,
            rows_by_color: BTreeMap::new(),
            rows_by_country: BTreeMap::new(),
            price_eur: None,
            price_format_usage: BTreeMap::new(),
            date_format_usage: BTreeMap::new(),
            duration_ms: 0,
            violations: Vec::new(),
        }
    }

    pub fn record_price_format(&mut self, id: &str) {
        *self.price_format_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_date_format(&mut self, id: &str) {
        *self.date_format_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    /// Fill the dataset-wide counters from the final rows.
    pub fn summarize(&mut self, records: &[WineRecord]) {
        self.rows_total = records.len() as u64;
        self.rows_by_color.clear();
        self.rows_by_country.clear();
        for record in records {
            *self
                .rows_by_color
                .entry(record.color.to_string())
                .or_insert(0) += 1;
            *self
                .rows_by_country
                .entry(record.country.clone())
                .or_insert(0) += 1;
        }
        self.price_eur = PriceStats::from_records(records);
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
