use vinalchemy_core::{BottleSize, Color, GaussianSpec, Sweetness, Taxonomy, WineRecord};

use crate::dirty::DirtyFields;
use crate::errors::GenerationError;
use crate::rng::SeededRng;

/// Probability that a wine is a blend rather than a single variety.
pub const BLEND_PROBABILITY: f64 = 0.25;
/// Allowed blend sizes, picked uniformly.
pub const BLEND_SIZES: [usize; 2] = [2, 3];
pub const VINTAGE_MIN: i32 = 1985;
pub const VINTAGE_MAX: i32 = 2024;
pub const RATING: GaussianSpec = GaussianSpec::new(90.0, 3.5, 80.0, 100.0);
pub const STOCK: GaussianSpec = GaussianSpec::new(80.0, 60.0, 0.0, 400.0);
pub const PRICE_MIN_EUR: f64 = 6.0;
pub const PRICE_MAX_EUR: f64 = 500.0;
/// Price standard deviation as a share of the computed mean.
pub const PRICE_SPREAD: f64 = 0.35;

const REFERENCE_SUFFIX_LEN: usize = 3;
const REGION_CODE_LEN: usize = 3;

/// A wine with all clean attributes drawn, before display fields are dirtied.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWine {
    pub id: u32,
    pub reference: String,
    pub color: Color,
    pub country: String,
    pub region: String,
    pub appellation: String,
    pub vintage: i32,
    pub grapes: Vec<String>,
    pub alcohol_percent: f64,
    pub bottle_size: BottleSize,
    pub sweetness: Sweetness,
    pub tannin: u8,
    pub acidity: u8,
    pub rating: f64,
    pub price_eur: f64,
    pub producer: String,
    pub stock_quantity: u32,
}

impl SampledWine {
    /// Attach the dirtied display fields and produce the output row.
    pub fn into_record(self, dirty: DirtyFields) -> WineRecord {
        WineRecord {
            id: self.id,
            order_id: dirty.order_id,
            order_date: dirty.order_date,
            reference: self.reference,
            name: None,
            color: self.color,
            country: self.country,
            region: self.region,
            appellation: self.appellation,
            vintage: self.vintage,
            grapes: self.grapes,
            alcohol_percent: self.alcohol_percent,
            bottle_size_l: self.bottle_size.liters(),
            sweetness: self.sweetness,
            tannin: self.tannin,
            acidity: self.acidity,
            rating: self.rating,
            price: dirty.price,
            price_eur: self.price_eur,
            producer: self.producer,
            stock_quantity: self.stock_quantity,
        }
    }
}

/// Samples internally consistent wines from a taxonomy.
///
/// Region and color are drawn first and everything else depends on them.
/// Reordering the draws changes every dataset produced for a given seed.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSampler<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> AttributeSampler<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn sample(&self, rng: &mut SeededRng, id: u32) -> Result<SampledWine, GenerationError> {
        let region = rng
            .choose(self.taxonomy.regions)
            .ok_or_else(|| GenerationError::InvalidTaxonomy("no regions defined".to_string()))?;
        let color = self.choose_color(rng, region.region);
        let appellation = self.choose_appellation(rng, region.region);
        let grapes = self.choose_grapes(rng, color)?;
        let vintage = choose_vintage(rng);
        let reference = build_reference(rng, vintage, region.region, id);
        let rating = round_to(draw(rng, &RATING), 1);

        let profile = self.taxonomy.color_profile(color).ok_or_else(|| {
            GenerationError::InvalidTaxonomy(format!("no chemistry profile for color {color}"))
        })?;
        let alcohol_percent = round_to(draw(rng, &profile.alcohol), 1);
        let tannin = draw(rng, &profile.tannin) as u8;
        let acidity = draw(rng, &profile.acidity) as u8;
        let sweetness = rng
            .weighted(profile.sweetness, |(_, weight)| *weight)
            .map(|(sweetness, _)| *sweetness)
            .unwrap_or(Sweetness::Dry);

        let bottle_size = rng
            .weighted(&BottleSize::ALL, |size| size.weight())
            .copied()
            .unwrap_or(BottleSize::Standard);

        let mean_price = profile.base_price_eur
            * self.taxonomy.region_premium(region.region)
            * self.taxonomy.appellation_premium(&appellation)
            * rating_factor(rating);
        let price_eur = round_to(
            rng.clamped_gaussian(
                mean_price,
                mean_price * PRICE_SPREAD,
                PRICE_MIN_EUR,
                PRICE_MAX_EUR,
            ),
            2,
        );

        let producer = self.choose_producer(rng, region.country);
        let stock_quantity = draw(rng, &STOCK) as u32;

        Ok(SampledWine {
            id,
            reference,
            color,
            country: region.country.to_string(),
            region: region.region.to_string(),
            appellation,
            vintage,
            grapes,
            alcohol_percent,
            bottle_size,
            sweetness,
            tannin,
            acidity,
            rating,
            price_eur,
            producer,
            stock_quantity,
        })
    }

    /// Weighted color for `region`; unknown regions get a uniform color.
    pub fn choose_color(&self, rng: &mut SeededRng, region: &str) -> Color {
        let picked = match self.taxonomy.color_weights(region) {
            Some(weights) => rng
                .weighted(&Color::ALL, |color| weights.weight(*color))
                .copied(),
            None => rng.choose(&Color::ALL).copied(),
        };
        picked.unwrap_or(Color::Red)
    }

    /// Uniform appellation of `region`, or the synthesized `"<region> AOC"`
    /// when the region has none registered.
    pub fn choose_appellation(&self, rng: &mut SeededRng, region: &str) -> String {
        match self.taxonomy.appellations_for(region) {
            Some(names) => rng
                .choose(names)
                .map(|name| name.to_string())
                .unwrap_or_else(|| Taxonomy::fallback_appellation(region)),
            None => Taxonomy::fallback_appellation(region),
        }
    }

    /// One grape, or with [`BLEND_PROBABILITY`] a blend of two or three
    /// distinct grapes of `color`.
    pub fn choose_grapes(
        &self,
        rng: &mut SeededRng,
        color: Color,
    ) -> Result<Vec<String>, GenerationError> {
        let candidates = self
            .taxonomy
            .grapes_for(color)
            .filter(|grapes| !grapes.is_empty())
            .ok_or_else(|| {
                GenerationError::InvalidTaxonomy(format!("no grape list for color {color}"))
            })?;

        if rng.chance(BLEND_PROBABILITY) {
            let size = rng.choose(&BLEND_SIZES).copied().unwrap_or(2);
            return Ok(rng
                .sample(candidates, size)
                .into_iter()
                .map(str::to_string)
                .collect());
        }

        Ok(rng
            .choose(candidates)
            .map(|grape| vec![grape.to_string()])
            .unwrap_or_default())
    }

    fn choose_producer(&self, rng: &mut SeededRng, country: &str) -> String {
        let names = &self.taxonomy.producers;
        let prefixes = if names.traditional_countries.contains(&country) {
            names.traditional_prefixes
        } else {
            names.other_prefixes
        };
        let prefix = rng.choose(prefixes).copied().unwrap_or("Domaine");
        let surname = rng.choose(names.surnames).copied().unwrap_or("Dubois");
        format!("{prefix} {surname}")
    }
}

/// Relative weight of a vintage; recent years dominate.
pub fn vintage_weight(year: i32) -> f64 {
    if year >= 2015 {
        0.20
    } else if year >= 2005 {
        0.10
    } else if year >= 1995 {
        0.05
    } else {
        0.02
    }
}

fn choose_vintage(rng: &mut SeededRng) -> i32 {
    let years: Vec<i32> = (VINTAGE_MIN..=VINTAGE_MAX).collect();
    rng.weighted(&years, |year| vintage_weight(*year))
        .copied()
        .unwrap_or(VINTAGE_MAX)
}

/// First three letters of the region, uppercased.
pub fn region_code(region: &str) -> String {
    region
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .flat_map(char::to_uppercase)
        .take(REGION_CODE_LEN)
        .collect()
}

fn build_reference(rng: &mut SeededRng, vintage: i32, region: &str, id: u32) -> String {
    let suffix = rng.token(REFERENCE_SUFFIX_LEN);
    format!("WN-{vintage}-{}-{id:04}-{suffix}", region_code(region))
}

/// Price multiplier from the rating: 0.8 at 80 points, 1.5 at 100.
pub fn rating_factor(rating: f64) -> f64 {
    0.8 + (rating - 80.0) * 0.035
}

fn draw(rng: &mut SeededRng, spec: &GaussianSpec) -> f64 {
    rng.clamped_gaussian(spec.mean, spec.std_dev, spec.low, spec.high)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_keeps_letters_only() {
        assert_eq!(region_code("Ribera del Duero"), "RIB");
        assert_eq!(region_code("Rias Baixas"), "RIA");
        assert_eq!(region_code("Co"), "CO");
        assert_eq!(region_code("1-A b"), "AB");
    }

    #[test]
    fn vintage_weights_do_not_increase_with_age() {
        let mut previous = f64::INFINITY;
        for year in (VINTAGE_MIN..=VINTAGE_MAX).rev() {
            let weight = vintage_weight(year);
            assert!(weight <= previous);
            previous = weight;
        }
        assert_eq!(vintage_weight(2015), 0.20);
        assert_eq!(vintage_weight(2014), 0.10);
        assert_eq!(vintage_weight(1994), 0.02);
    }

    #[test]
    fn rating_factor_spans_expected_range() {
        assert!((rating_factor(80.0) - 0.8).abs() < 1e-12);
        assert!((rating_factor(100.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn unknown_region_gets_some_color() {
        let taxonomy = Taxonomy::builtin();
        let sampler = AttributeSampler::new(&taxonomy);
        let mut rng = SeededRng::new(9);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            seen.insert(sampler.choose_color(&mut rng, "Atlantis"));
        }
        assert_eq!(seen.len(), Color::ALL.len());
    }

    #[test]
    fn blends_are_distinct_and_match_color() {
        let taxonomy = Taxonomy::builtin();
        let sampler = AttributeSampler::new(&taxonomy);
        let mut rng = SeededRng::new(21);
        let mut blends = 0;
        for _ in 0..400 {
            let grapes = sampler
                .choose_grapes(&mut rng, Color::Orange)
                .expect("grapes");
            assert!((1..=3).contains(&grapes.len()));
            let mut unique = grapes.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), grapes.len());
            let allowed = taxonomy.grapes_for(Color::Orange).expect("orange grapes");
            assert!(grapes.iter().all(|grape| allowed.contains(&grape.as_str())));
            if grapes.len() > 1 {
                blends += 1;
            }
        }
        assert!(blends > 50 && blends < 170, "blend count {blends}");
    }

    #[test]
    fn round_to_rounds_half_away_from_zero() {
        assert_eq!(round_to(12.25, 1), 12.3);
        assert_eq!(round_to(12.345_6, 2), 12.35);
    }
}
