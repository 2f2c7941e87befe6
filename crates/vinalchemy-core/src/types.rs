use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Wine color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Red,
    Orange,
}

impl Color {
    /// All colors in taxonomy order. Color weight triples follow this order.
    pub const ALL: [Color; 3] = [Color::White, Color::Red, Color::Orange];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Orange => "orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Residual sugar category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Sweetness {
    Dry,
    OffDry,
    Sweet,
}

impl Sweetness {
    pub fn as_str(self) -> &'static str {
        match self {
            Sweetness::Dry => "dry",
            Sweetness::OffDry => "off-dry",
            Sweetness::Sweet => "sweet",
        }
    }
}

impl fmt::Display for Sweetness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bottle formats sold in the orders fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BottleSize {
    Half,
    Standard,
    Magnum,
}

impl BottleSize {
    pub const ALL: [BottleSize; 3] = [BottleSize::Half, BottleSize::Standard, BottleSize::Magnum];

    pub fn liters(self) -> f64 {
        match self {
            BottleSize::Half => 0.375,
            BottleSize::Standard => 0.75,
            BottleSize::Magnum => 1.5,
        }
    }

    /// Share of orders using this format; the standard bottle dominates.
    pub fn weight(self) -> f64 {
        match self {
            BottleSize::Half => 0.05,
            BottleSize::Standard => 0.90,
            BottleSize::Magnum => 0.05,
        }
    }

    pub fn from_liters(liters: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|size| (size.liters() - liters).abs() < f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweetness_serializes_kebab_case() {
        let json = serde_json::to_string(&Sweetness::OffDry).expect("serialize sweetness");
        assert_eq!(json, "\"off-dry\"");
        assert_eq!(Sweetness::OffDry.to_string(), "off-dry");
    }

    #[test]
    fn bottle_sizes_round_trip_from_liters() {
        for size in BottleSize::ALL {
            assert_eq!(BottleSize::from_liters(size.liters()), Some(size));
        }
        assert_eq!(BottleSize::from_liters(0.5), None);
        let total: f64 = BottleSize::ALL.iter().map(|size| size.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
