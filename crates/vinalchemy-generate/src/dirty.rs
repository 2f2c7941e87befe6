use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::rng::SeededRng;

pub const CURRENCY_SYMBOL: char = '€';
/// Orders are placed up to this many days before the reference instant.
pub const ORDER_WINDOW_DAYS: i64 = 90;

const ORDER_TOKEN_LEN: usize = 6;
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const EUROPEAN_FORMAT: &str = "%d/%m/%Y";
const AMERICAN_FORMAT: &str = "%m-%d-%Y";

/// Encodings of a price in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceFormat {
    /// `€12.50`
    EuroPrefixDot,
    /// `12.50€`
    EuroSuffixDot,
    /// `12,50€`
    EuroSuffixComma,
    /// `€12,50`
    EuroPrefixComma,
    /// `12.50`
    Dot,
    /// `12,50`
    Comma,
}

impl PriceFormat {
    pub const ALL: [PriceFormat; 6] = [
        PriceFormat::EuroPrefixDot,
        PriceFormat::EuroSuffixDot,
        PriceFormat::EuroSuffixComma,
        PriceFormat::EuroPrefixComma,
        PriceFormat::Dot,
        PriceFormat::Comma,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PriceFormat::EuroPrefixDot => "euro_prefix_dot",
            PriceFormat::EuroSuffixDot => "euro_suffix_dot",
            PriceFormat::EuroSuffixComma => "euro_suffix_comma",
            PriceFormat::EuroPrefixComma => "euro_prefix_comma",
            PriceFormat::Dot => "dot",
            PriceFormat::Comma => "comma",
        }
    }

    pub fn render(self, price_eur: f64) -> String {
        let dot = format!("{price_eur:.2}");
        let comma = dot.replace('.', ",");
        match self {
            PriceFormat::EuroPrefixDot => format!("{CURRENCY_SYMBOL}{dot}"),
            PriceFormat::EuroSuffixDot => format!("{dot}{CURRENCY_SYMBOL}"),
            PriceFormat::EuroSuffixComma => format!("{comma}{CURRENCY_SYMBOL}"),
            PriceFormat::EuroPrefixComma => format!("{CURRENCY_SYMBOL}{comma}"),
            PriceFormat::Dot => dot,
            PriceFormat::Comma => comma,
        }
    }
}

/// Encodings of an order timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `2025-01-31T14:05:09Z`
    Iso,
    /// `31/01/2025`
    European,
    /// `01-31-2025`
    American,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [DateFormat::Iso, DateFormat::European, DateFormat::American];

    pub fn id(self) -> &'static str {
        match self {
            DateFormat::Iso => "iso",
            DateFormat::European => "eu",
            DateFormat::American => "us",
        }
    }

    pub fn render(self, instant: NaiveDateTime) -> String {
        let pattern = match self {
            DateFormat::Iso => ISO_FORMAT,
            DateFormat::European => EUROPEAN_FORMAT,
            DateFormat::American => AMERICAN_FORMAT,
        };
        instant.format(pattern).to_string()
    }
}

/// Dirtied display fields of one row, with the encodings that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyFields {
    pub order_id: String,
    pub order_date: String,
    pub date_format: DateFormat,
    pub price: String,
    pub price_format: PriceFormat,
}

/// Produces order metadata relative to a fixed reference instant.
#[derive(Debug, Clone, Copy)]
pub struct DirtyTransformer {
    as_of: DateTime<Utc>,
}

impl DirtyTransformer {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self { as_of }
    }

    pub fn apply(&self, rng: &mut SeededRng, price_eur: f64) -> DirtyFields {
        let order_id = self.order_id(rng);
        let (order_date, date_format) = self.order_date(rng);
        let price_format = pick(rng, &PriceFormat::ALL, PriceFormat::Dot);
        DirtyFields {
            order_id,
            order_date,
            date_format,
            price: price_format.render(price_eur),
            price_format,
        }
    }

    fn order_id(&self, rng: &mut SeededRng) -> String {
        format!("ORD-{}-{}", self.as_of.year(), rng.token(ORDER_TOKEN_LEN))
    }

    fn order_date(&self, rng: &mut SeededRng) -> (String, DateFormat) {
        let days = rng.int_range(0, ORDER_WINDOW_DAYS);
        let hours = rng.int_range(0, 23);
        let minutes = rng.int_range(0, 59);
        let placed_at = self.as_of.naive_utc()
            - Duration::days(days)
            - Duration::hours(hours)
            - Duration::minutes(minutes);
        let format = pick(rng, &DateFormat::ALL, DateFormat::Iso);
        (format.render(placed_at), format)
    }
}

fn pick<T: Copy>(rng: &mut SeededRng, items: &[T], fallback: T) -> T {
    rng.choose(items).copied().unwrap_or(fallback)
}

/// Recover the numeric value of any price encoding: strip the currency
/// symbol, turn a decimal comma into a dot, parse.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let digits = raw.trim().trim_matches(CURRENCY_SYMBOL).trim();
    digits.replace(',', ".").parse::<f64>().ok()
}

/// Calendar date of any order-date encoding.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.ends_with('Z') {
        return NaiveDateTime::parse_from_str(raw, ISO_FORMAT)
            .ok()
            .map(|instant| instant.date());
    }
    if raw.contains('/') {
        return NaiveDate::parse_from_str(raw, EUROPEAN_FORMAT).ok();
    }
    NaiveDate::parse_from_str(raw, AMERICAN_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn renders_all_price_encodings() {
        let rendered: Vec<String> = PriceFormat::ALL
            .iter()
            .map(|format| format.render(12.5))
            .collect();
        assert_eq!(
            rendered,
            vec!["€12.50", "12.50€", "12,50€", "€12,50", "12.50", "12,50"]
        );
    }

    #[test]
    fn every_price_encoding_round_trips() {
        for price in [6.0, 12.5, 19.99, 104.07, 500.0] {
            for format in PriceFormat::ALL {
                let raw = format.render(price);
                let parsed = normalize_price(&raw).expect("parse price");
                assert!(
                    (parsed - price).abs() < 0.01,
                    "{raw} parsed as {parsed}, expected {price}"
                );
            }
        }
        assert_eq!(normalize_price("n/a"), None);
    }

    #[test]
    fn renders_date_encodings() {
        let instant = NaiveDate::from_ymd_opt(2025, 1, 31)
            .and_then(|date| date.and_hms_opt(14, 5, 9))
            .expect("valid instant");
        assert_eq!(DateFormat::Iso.render(instant), "2025-01-31T14:05:09Z");
        assert_eq!(DateFormat::European.render(instant), "31/01/2025");
        assert_eq!(DateFormat::American.render(instant), "01-31-2025");
        for format in DateFormat::ALL {
            assert_eq!(
                parse_order_date(&format.render(instant)),
                Some(instant.date())
            );
        }
    }

    #[test]
    fn order_metadata_stays_in_window() {
        let transformer = DirtyTransformer::new(as_of());
        let mut rng = SeededRng::new(42);
        let earliest = (as_of() - Duration::days(ORDER_WINDOW_DAYS + 1)).date_naive();
        for _ in 0..500 {
            let fields = transformer.apply(&mut rng, 42.0);
            assert!(fields.order_id.starts_with("ORD-2025-"));
            assert_eq!(fields.order_id.len(), "ORD-2025-".len() + ORDER_TOKEN_LEN);
            let date = parse_order_date(&fields.order_date).expect("parse order date");
            assert!(date <= as_of().date_naive());
            assert!(date >= earliest);
            assert_eq!(fields.price, fields.price_format.render(42.0));
        }
    }
}
