use std::collections::{BTreeMap, BTreeSet};

use vinalchemy_core::{BottleSize, Taxonomy, WineRecord};

use crate::dirty::{normalize_price, parse_order_date};
use crate::engine::duplicate_count;
use crate::model::Violation;
use crate::rng::TOKEN_ALPHABET;
use crate::sampler::{
    PRICE_MAX_EUR, PRICE_MIN_EUR, RATING, VINTAGE_MAX, VINTAGE_MIN, region_code,
};

const PRICE_TOLERANCE: f64 = 0.01;
const SCALE_MIN: u8 = 1;
const SCALE_MAX: u8 = 5;
const REFERENCE_SUFFIX_LEN: usize = 3;
const ORDER_TOKEN_LEN: usize = 6;

/// Check one row against range and referential invariants.
pub fn check_record(record: &WineRecord, taxonomy: &Taxonomy) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut push = |code: &str, column: &str, message: String| {
        violations.push(Violation {
            code: code.to_string(),
            message,
            row_id: Some(record.id),
            column: Some(column.to_string()),
        });
    };

    if !RATING.contains(record.rating) {
        push(
            "range.rating",
            "rating",
            format!("rating {} outside [80, 100]", record.rating),
        );
    }

    match taxonomy.color_profile(record.color) {
        Some(profile) => {
            if !profile.alcohol.contains(record.alcohol_percent) {
                push(
                    "range.alcohol_percent",
                    "alcohol_percent",
                    format!(
                        "alcohol {} outside [{}, {}] for {}",
                        record.alcohol_percent,
                        profile.alcohol.low,
                        profile.alcohol.high,
                        record.color
                    ),
                );
            }
            if !profile
                .sweetness
                .iter()
                .any(|(sweetness, weight)| *sweetness == record.sweetness && *weight > 0.0)
            {
                push(
                    "ref.sweetness",
                    "sweetness",
                    format!("{} wines are never {}", record.color, record.sweetness),
                );
            }
        }
        None => push(
            "ref.color",
            "color",
            format!("no profile for color {}", record.color),
        ),
    }

    for (column, value) in [("tannin", record.tannin), ("acidity", record.acidity)] {
        if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
            push(
                &format!("range.{column}"),
                column,
                format!("{column} {value} outside [1, 5]"),
            );
        }
    }

    if !(PRICE_MIN_EUR..=PRICE_MAX_EUR).contains(&record.price_eur) {
        push(
            "range.price_eur",
            "price_eur",
            format!("price {} outside [6, 500]", record.price_eur),
        );
    }

    if BottleSize::from_liters(record.bottle_size_l).is_none() {
        push(
            "range.bottle_size_l",
            "bottle_size_l",
            format!("unsupported bottle size {}", record.bottle_size_l),
        );
    }

    if !(VINTAGE_MIN..=VINTAGE_MAX).contains(&record.vintage) {
        push(
            "range.vintage",
            "vintage",
            format!("vintage {} outside [1985, 2024]", record.vintage),
        );
    }

    match taxonomy
        .regions
        .iter()
        .find(|profile| profile.region == record.region)
    {
        Some(profile) if profile.country != record.country => push(
            "ref.country",
            "country",
            format!("{} is not in {}", record.region, record.country),
        ),
        Some(_) => {}
        None => push(
            "ref.region",
            "region",
            format!("unknown region {}", record.region),
        ),
    }

    if !taxonomy.is_valid_appellation(&record.region, &record.appellation) {
        push(
            "ref.appellation",
            "appellation",
            format!(
                "{} is not an appellation of {}",
                record.appellation, record.region
            ),
        );
    }

    let allowed = taxonomy.grapes_for(record.color).unwrap_or_default();
    let distinct: BTreeSet<&str> = record.grapes.iter().map(String::as_str).collect();
    if record.grapes.is_empty() || record.grapes.len() > 3 || distinct.len() != record.grapes.len()
    {
        push(
            "ref.grapes",
            "grapes",
            format!("malformed grape set {:?}", record.grapes),
        );
    }
    for grape in &record.grapes {
        if !allowed.contains(&grape.as_str()) {
            push(
                "ref.grapes",
                "grapes",
                format!("{grape} is not a {} grape", record.color),
            );
        }
    }

    match normalize_price(&record.price) {
        Some(parsed) if (parsed - record.price_eur).abs() <= PRICE_TOLERANCE => {}
        Some(parsed) => push(
            "dirty.price",
            "price",
            format!(
                "price {:?} normalizes to {parsed}, expected {}",
                record.price, record.price_eur
            ),
        ),
        None => push(
            "dirty.price",
            "price",
            format!("price {:?} cannot be normalized", record.price),
        ),
    }

    if parse_order_date(&record.order_date).is_none() {
        push(
            "dirty.order_date",
            "order_date",
            format!("unrecognised order date {:?}", record.order_date),
        );
    }

    if !reference_matches(record) {
        push(
            "shape.reference",
            "reference",
            format!(
                "reference {:?} does not encode vintage {}, region {} and id {}",
                record.reference, record.vintage, record.region, record.id
            ),
        );
    }

    if !order_id_matches(&record.order_id) {
        push(
            "shape.order_id",
            "order_id",
            format!("malformed order id {:?}", record.order_id),
        );
    }

    if record.name.is_some() {
        push(
            "shape.name",
            "name",
            "name column must stay empty".to_string(),
        );
    }

    violations
}

/// Check every row plus dataset-level cardinality and duplicate rules.
///
/// `base_rows` is the number of distinct wines generated before duplicates
/// were injected.
pub fn check_dataset(
    records: &[WineRecord],
    taxonomy: &Taxonomy,
    base_rows: usize,
) -> Vec<Violation> {
    let mut violations: Vec<Violation> = records
        .iter()
        .flat_map(|record| check_record(record, taxonomy))
        .collect();

    let expected_duplicates = duplicate_count(base_rows);
    let expected_total = base_rows + expected_duplicates;
    if records.len() != expected_total {
        violations.push(dataset_violation(
            "shape.row_count",
            format!("expected {expected_total} rows, found {}", records.len()),
        ));
    }

    let mut by_id: BTreeMap<u32, Vec<&WineRecord>> = BTreeMap::new();
    for record in records {
        by_id.entry(record.id).or_default().push(record);
    }

    let ids: BTreeSet<u32> = by_id.keys().copied().collect();
    let expected_ids: BTreeSet<u32> = (1..=base_rows as u32).collect();
    if ids != expected_ids {
        violations.push(dataset_violation(
            "shape.ids",
            format!("ids do not cover 1..={base_rows} exactly"),
        ));
    }

    let mut duplicated = 0;
    for (id, rows) in &by_id {
        let Some((first, rest)) = rows.split_first() else {
            continue;
        };
        if rest.len() > 1 {
            violations.push(dataset_violation(
                "dup.multiplicity",
                format!("id {id} appears {} times", rows.len()),
            ));
        }
        for copy in rest {
            if copy.csv_fields() != first.csv_fields() {
                violations.push(Violation {
                    code: "dup.not_identical".to_string(),
                    message: format!("rows sharing id {id} differ"),
                    row_id: Some(*id),
                    column: None,
                });
            }
        }
        if !rest.is_empty() {
            duplicated += 1;
        }
    }
    if duplicated != expected_duplicates {
        violations.push(dataset_violation(
            "dup.count",
            format!("expected {expected_duplicates} duplicated rows, found {duplicated}"),
        ));
    }

    violations
}

/// `WN-<vintage>-<region code>-<id:04>-<3 token chars>`, built from the
/// row's own fields.
fn reference_matches(record: &WineRecord) -> bool {
    let prefix = format!(
        "WN-{}-{}-{:04}-",
        record.vintage,
        region_code(&record.region),
        record.id
    );
    record
        .reference
        .strip_prefix(&prefix)
        .is_some_and(|suffix| is_token(suffix, REFERENCE_SUFFIX_LEN))
}

/// `ORD-<4 digit year>-<6 token chars>`.
fn order_id_matches(order_id: &str) -> bool {
    let Some((year, token)) = order_id
        .strip_prefix("ORD-")
        .and_then(|rest| rest.split_once('-'))
    else {
        return false;
    };
    year.len() == 4
        && year.bytes().all(|byte| byte.is_ascii_digit())
        && is_token(token, ORDER_TOKEN_LEN)
}

fn is_token(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|byte| TOKEN_ALPHABET.contains(&byte))
}

fn dataset_violation(code: &str, message: String) -> Violation {
    Violation {
        code: code.to_string(),
        message,
        row_id: None,
        column: None,
    }
}
