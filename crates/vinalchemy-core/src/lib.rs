//! Core contracts for Vinalchemy.
//!
//! This crate holds the static wine taxonomy, the wine record model with its
//! CSV column contract, and the validation helpers shared by the generator
//! and the CLI. Nothing in here draws random numbers.

pub mod error;
pub mod record;
pub mod taxonomy;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use record::{COLUMNS, WineRecord, record_json_schema};
pub use taxonomy::{
    Appellations, ColorProfile, ColorWeights, GaussianSpec, GrapeCatalog, Premium,
    ProducerNames, RegionProfile, Taxonomy,
};
pub use types::{BottleSize, Color, Sweetness};
pub use validation::validate_taxonomy;

/// Smallest dataset the generator accepts; smaller requests are clamped up.
pub const MIN_ROWS: usize = 100;
/// Largest dataset the generator accepts; larger requests are clamped down.
pub const MAX_ROWS: usize = 1000;
