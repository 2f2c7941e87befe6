use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};

use vinalchemy_core::{BottleSize, ColorWeights, RegionProfile, Taxonomy, WineRecord};
use vinalchemy_generate::checks::check_dataset;
use vinalchemy_generate::dirty::normalize_price;
use vinalchemy_generate::output::csv::{write_records, write_records_csv};
use vinalchemy_generate::{GenerateOptions, GenerationEngine, GenerationError, duplicate_count};

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
        .single()
        .expect("valid instant")
}

fn options(rows: i64, seed: u64) -> GenerateOptions {
    GenerateOptions {
        rows,
        seed,
        as_of: as_of(),
    }
}

fn generate(rows: i64, seed: u64) -> Vec<WineRecord> {
    GenerationEngine::new(options(rows, seed))
        .run()
        .expect("run generation")
        .records
}

fn csv_digest(records: &[WineRecord]) -> String {
    let mut bytes = Vec::new();
    write_records(&mut bytes, records).expect("write csv");
    hex::encode(Sha256::digest(&bytes))
}

fn row_one(records: &[WineRecord]) -> &WineRecord {
    records
        .iter()
        .find(|record| record.id == 1)
        .expect("row with id 1")
}

#[test]
fn generate_is_deterministic() {
    let first = generate(250, 7);
    let second = generate(250, 7);
    assert_eq!(first, second);
    assert_eq!(csv_digest(&first), csv_digest(&second));
}

#[test]
fn output_size_includes_duplicates() {
    for rows in [100, 130, 257, 1000] {
        let records = generate(rows, 42);
        let expected = rows as usize + duplicate_count(rows as usize);
        assert_eq!(records.len(), expected, "rows={rows}");
    }
}

#[test]
fn out_of_range_row_counts_are_clamped() {
    assert_eq!(generate(5, 1).len(), 105);
    assert_eq!(generate(50_000, 1).len(), 1050);
}

#[test]
fn duplicates_are_exact_copies() {
    let records = generate(300, 99);
    let mut by_id: BTreeMap<u32, Vec<&WineRecord>> = BTreeMap::new();
    for record in &records {
        by_id.entry(record.id).or_default().push(record);
    }

    let duplicated: Vec<&Vec<&WineRecord>> =
        by_id.values().filter(|rows| rows.len() > 1).collect();
    assert_eq!(duplicated.len(), duplicate_count(300));
    for rows in duplicated {
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
    }
    assert_eq!(by_id.len(), 300);
}

#[test]
fn rows_respect_ranges_and_references() {
    let taxonomy = Taxonomy::builtin();
    let records = generate(1000, 2024);

    for record in &records {
        assert!((80.0..=100.0).contains(&record.rating), "{record:?}");
        let profile = taxonomy.color_profile(record.color).expect("profile");
        assert!(profile.alcohol.contains(record.alcohol_percent), "{record:?}");
        assert!((1..=5).contains(&record.tannin));
        assert!((1..=5).contains(&record.acidity));
        assert!((6.0..=500.0).contains(&record.price_eur));
        assert!(BottleSize::from_liters(record.bottle_size_l).is_some());
        assert!((1985..=2024).contains(&record.vintage));
        assert!(record.name.is_none());

        assert!(
            taxonomy.is_valid_appellation(&record.region, &record.appellation),
            "{} not in {}",
            record.appellation,
            record.region
        );
        let grapes = taxonomy.grapes_for(record.color).expect("grapes");
        assert!(
            record
                .grapes
                .iter()
                .all(|grape| grapes.contains(&grape.as_str())),
            "{:?} not all {}",
            record.grapes,
            record.color
        );
    }

    assert!(check_dataset(&records, &taxonomy, 1000).is_empty());
}

#[test]
fn weighted_draws_follow_their_tables() {
    let records = generate(1000, 17);
    let distinct: BTreeMap<u32, &WineRecord> =
        records.iter().map(|record| (record.id, record)).collect();
    assert_eq!(distinct.len(), 1000);

    let standard = distinct
        .values()
        .filter(|record| record.bottle_size_l == 0.75)
        .count();
    assert!((850..=950).contains(&standard), "standard bottles {standard}");

    let mut bands = [0usize; 4];
    for record in distinct.values() {
        let band = match record.vintage {
            2015.. => 0,
            2005..=2014 => 1,
            1995..=2004 => 2,
            _ => 3,
        };
        bands[band] += 1;
    }
    assert!(
        bands.windows(2).all(|pair| pair[0] > pair[1]),
        "vintage bands {bands:?}"
    );
    assert!(bands[0] > 450, "recent vintages {bands:?}");
}

#[test]
fn dirty_price_round_trips_to_ground_truth() {
    for record in generate(500, 5) {
        let parsed = normalize_price(&record.price).expect("normalize price");
        assert!(
            (parsed - record.price_eur).abs() <= 0.01,
            "{} vs {}",
            record.price,
            record.price_eur
        );
    }
}

#[test]
fn dirty_formats_are_all_used() {
    let result = GenerationEngine::new(options(1000, 42))
        .run()
        .expect("run generation");
    assert_eq!(result.report.price_format_usage.len(), 6);
    assert_eq!(result.report.date_format_usage.len(), 3);
    assert_eq!(
        result.report.price_format_usage.values().sum::<u64>(),
        1000
    );
    assert!(result.report.is_clean(), "{:?}", result.report.violations);
}

#[test]
fn example_scenario_seed_42() {
    let records = generate(100, 42);
    assert_eq!(records.len(), 105);

    let reference = Regex::new(r"^WN-\d{4}-[A-Z]{1,3}-0001-[A-Z0-9]{3}$").expect("regex");
    let first = row_one(&records);
    assert!(reference.is_match(&first.reference), "{}", first.reference);
    assert!(first.order_id.starts_with("ORD-2025-"));

    let rerun = generate(100, 42);
    assert_eq!(row_one(&rerun), first);

    let other = generate(100, 43);
    let other_first = row_one(&other);
    assert!(other_first.producer != first.producer || other_first.region != first.region);
}

#[test]
fn region_without_appellations_uses_synthesized_fallback() {
    const REGIONS: &[RegionProfile] = &[RegionProfile {
        country: "France",
        region: "Savoie",
        color_weights: ColorWeights::new(0.7, 0.25, 0.05),
    }];
    let taxonomy = Taxonomy {
        regions: REGIONS,
        ..Taxonomy::builtin()
    };

    let result = GenerationEngine::with_taxonomy(options(100, 3), taxonomy)
        .run()
        .expect("run generation");
    for record in &result.records {
        assert_eq!(record.appellation, "Savoie AOC");
        assert!(record.reference.contains("-SAV-"));
    }
    assert!(result.report.is_clean(), "{:?}", result.report.violations);
}

#[test]
fn malformed_taxonomy_is_rejected_up_front() {
    const REGIONS: &[RegionProfile] = &[RegionProfile {
        country: "France",
        region: "Savoie",
        color_weights: ColorWeights::new(0.0, 0.0, 0.0),
    }];
    let taxonomy = Taxonomy {
        regions: REGIONS,
        ..Taxonomy::builtin()
    };
    let result = GenerationEngine::with_taxonomy(options(100, 3), taxonomy).run();
    assert!(matches!(result, Err(GenerationError::InvalidTaxonomy(_))));
}

#[test]
fn csv_file_has_contract_header_and_empty_name() {
    let records = generate(100, 42);
    let out_dir = temp_out_dir("csv");
    let path = out_dir.join("wines.csv");
    let bytes = write_records_csv(&path, &records).expect("write csv");
    assert_eq!(bytes, fs::metadata(&path).expect("csv metadata").len());

    let mut reader = csv::Reader::from_path(&path).expect("open csv");
    let header: Vec<String> = reader
        .headers()
        .expect("header")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(header, vinalchemy_core::COLUMNS.to_vec());

    let mut rows = 0;
    for row in reader.records() {
        let row = row.expect("csv row");
        assert_eq!(row.len(), 21);
        assert_eq!(row.get(4), Some(""));
        rows += 1;
    }
    assert_eq!(rows, 105);
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "vinalchemy_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
