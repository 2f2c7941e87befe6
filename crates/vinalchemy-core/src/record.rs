use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::{Deserialize, Serialize};

use crate::types::{Color, Sweetness};

/// Output columns, in file order.
pub const COLUMNS: [&str; 21] = [
    "id",
    "order_id",
    "order_date",
    "reference",
    "name",
    "color",
    "country",
    "region",
    "appellation",
    "vintage",
    "grapes",
    "alcohol_percent",
    "bottle_size_l",
    "sweetness",
    "tannin",
    "acidity",
    "rating",
    "price",
    "price_eur",
    "producer",
    "stock_quantity",
];

/// Separator between grapes of a blend in the flat `grapes` column.
pub const GRAPE_SEPARATOR: &str = ", ";

/// One wine order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WineRecord {
    /// Sequential id assigned at creation (1..N). Duplicates share it.
    pub id: u32,
    /// Synthetic order id, `ORD-<year>-<6 alphanumerics>`.
    pub order_id: String,
    /// Order date in one of several textual encodings.
    pub order_date: String,
    /// `WN-<vintage>-<region code>-<id:04>-<3 alphanumerics>`.
    pub reference: String,
    /// Reserved column, never populated.
    pub name: Option<String>,
    pub color: Color,
    pub country: String,
    pub region: String,
    pub appellation: String,
    pub vintage: i32,
    /// One grape, or a blend of two or three.
    pub grapes: Vec<String>,
    pub alcohol_percent: f64,
    pub bottle_size_l: f64,
    pub sweetness: Sweetness,
    pub tannin: u8,
    pub acidity: u8,
    pub rating: f64,
    /// Inconsistently formatted rendering of `price_eur`.
    pub price: String,
    /// Ground-truth price in euros.
    pub price_eur: f64,
    pub producer: String,
    pub stock_quantity: u32,
}

impl WineRecord {
    pub fn grapes_text(&self) -> String {
        self.grapes.join(GRAPE_SEPARATOR)
    }

    /// Field values in [`COLUMNS`] order, formatted for a delimited file.
    pub fn csv_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.order_id.clone(),
            self.order_date.clone(),
            self.reference.clone(),
            self.name.clone().unwrap_or_default(),
            self.color.to_string(),
            self.country.clone(),
            self.region.clone(),
            self.appellation.clone(),
            self.vintage.to_string(),
            self.grapes_text(),
            format!("{:.1}", self.alcohol_percent),
            self.bottle_size_l.to_string(),
            self.sweetness.to_string(),
            self.tannin.to_string(),
            self.acidity.to_string(),
            format!("{:.1}", self.rating),
            self.price.clone(),
            format!("{:.2}", self.price_eur),
            self.producer.clone(),
            self.stock_quantity.to_string(),
        ]
    }
}

/// JSON Schema describing a serialized [`WineRecord`].
pub fn record_json_schema() -> RootSchema {
    schemars::schema_for!(WineRecord)
}
