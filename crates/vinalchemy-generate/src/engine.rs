use std::time::Instant;

use tracing::{debug, info, warn};

use vinalchemy_core::{Taxonomy, WineRecord, validate_taxonomy};

use crate::checks::check_dataset;
use crate::dirty::DirtyTransformer;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::rng::SeededRng;
use crate::sampler::AttributeSampler;

/// Share of generated rows that get an exact duplicate, in percent.
pub const DUPLICATE_PERCENT: usize = 5;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Final rows: generated wines plus duplicates, shuffled.
    pub records: Vec<WineRecord>,
    pub report: GenerationReport,
}

/// Entry point for assembling a wine orders dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    taxonomy: Taxonomy,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_taxonomy(options, Taxonomy::builtin())
    }

    pub fn with_taxonomy(options: GenerateOptions, taxonomy: Taxonomy) -> Self {
        Self { options, taxonomy }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        validate_taxonomy(&self.taxonomy)?;

        let start = Instant::now();
        let rows = self.options.normalized_rows();
        let seed = self.options.seed;
        if rows as i64 != self.options.rows {
            debug!(
                requested = self.options.rows,
                rows, "row count clamped into supported range"
            );
        }
        info!(seed, rows, as_of = %self.options.as_of, "generation started");

        let mut rng = SeededRng::new(seed);
        let sampler = AttributeSampler::new(&self.taxonomy);
        let transformer = DirtyTransformer::new(self.options.as_of);
        let mut report = GenerationReport::new(&self.options);

        let mut records = Vec::with_capacity(rows + duplicate_count(rows));
        for id in 1..=rows as u32 {
            let wine = sampler.sample(&mut rng, id)?;
            let dirty = transformer.apply(&mut rng, wine.price_eur);
            report.record_price_format(dirty.price_format.id());
            report.record_date_format(dirty.date_format.id());
            records.push(wine.into_record(dirty));
        }
        report.rows_generated = records.len() as u64;

        let duplicates = inject_duplicates(&mut records, &mut rng);
        report.duplicates_injected = duplicates as u64;
        info!(duplicates, "duplicates injected");

        let mut shuffle_rng = rng.shuffle_stream();
        shuffle_rng.shuffle(&mut records);
        debug!(shuffle_seed = shuffle_rng.seed(), "dataset shuffled");

        report.summarize(&records);
        report.violations = check_dataset(&records, &self.taxonomy, rows);
        for violation in &report.violations {
            warn!(
                code = %violation.code,
                row_id = ?violation.row_id,
                column = ?violation.column,
                message = %violation.message,
                "dataset check failed"
            );
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            rows_total = report.rows_total,
            violations = report.violations.len(),
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { records, report })
    }
}

/// Number of duplicates injected into a dataset of `rows` generated wines:
/// 5% rounded half to even, at least one for a non-empty dataset.
pub fn duplicate_count(rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    let scaled = rows * DUPLICATE_PERCENT;
    let quotient = scaled / 100;
    let remainder = scaled % 100;
    let rounded = if remainder > 50 || (remainder == 50 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.max(1)
}

/// Append exact copies of rows picked uniformly without replacement from the
/// main stream. Returns how many copies were appended.
fn inject_duplicates(records: &mut Vec<WineRecord>, rng: &mut SeededRng) -> usize {
    let count = duplicate_count(records.len());
    let copies: Vec<WineRecord> = rng
        .sample_indices(records.len(), count)
        .into_iter()
        .filter_map(|idx| records.get(idx).cloned())
        .collect();
    let appended = copies.len();
    records.extend(copies);
    appended
}
