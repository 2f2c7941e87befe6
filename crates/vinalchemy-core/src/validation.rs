use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::taxonomy::{GaussianSpec, Taxonomy};
use crate::types::Color;

/// Largest blend the sampler draws; every grape list must cover it.
pub const MAX_BLEND_SIZE: usize = 3;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Validate internal consistency of a taxonomy.
///
/// This checks:
/// - regions are non-empty, unique, and carry color weights summing to 1.0
/// - every color has a grape list large enough for a three-grape blend
/// - every color has a chemistry profile with sane Gaussian bounds
/// - premiums are positive
pub fn validate_taxonomy(taxonomy: &Taxonomy) -> Result<()> {
    if taxonomy.regions.is_empty() {
        return Err(Error::InvalidTaxonomy("no regions defined".to_string()));
    }

    let mut seen = BTreeSet::new();
    for profile in taxonomy.regions {
        if !seen.insert(profile.region) {
            return Err(Error::InvalidTaxonomy(format!(
                "duplicate region: {}",
                profile.region
            )));
        }
        if !profile.region.chars().any(|ch| ch.is_alphabetic()) {
            return Err(Error::InvalidTaxonomy(format!(
                "region name has no letters: {:?}",
                profile.region
            )));
        }

        let weights = profile.color_weights;
        if Color::ALL
            .iter()
            .any(|color| !weights.weight(*color).is_finite() || weights.weight(*color) < 0.0)
        {
            return Err(Error::InvalidTaxonomy(format!(
                "negative color weight for region {}",
                profile.region
            )));
        }
        if (weights.total() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::InvalidTaxonomy(format!(
                "color weights for region {} sum to {}",
                profile.region,
                weights.total()
            )));
        }
    }

    for color in Color::ALL {
        let grapes = taxonomy.grapes_for(color).ok_or_else(|| {
            Error::InvalidTaxonomy(format!("no grape list for color {color}"))
        })?;
        if grapes.len() < MAX_BLEND_SIZE {
            return Err(Error::InvalidTaxonomy(format!(
                "grape list for {color} has {} entries, need at least {MAX_BLEND_SIZE}",
                grapes.len()
            )));
        }
        let distinct: BTreeSet<_> = grapes.iter().collect();
        if distinct.len() != grapes.len() {
            return Err(Error::InvalidTaxonomy(format!(
                "duplicate grape in list for {color}"
            )));
        }

        let profile = taxonomy.color_profile(color).ok_or_else(|| {
            Error::InvalidTaxonomy(format!("no chemistry profile for color {color}"))
        })?;
        if !(profile.base_price_eur > 0.0) {
            return Err(Error::InvalidTaxonomy(format!(
                "base price for {color} must be positive"
            )));
        }
        validate_gaussian(color, "alcohol", &profile.alcohol)?;
        validate_gaussian(color, "tannin", &profile.tannin)?;
        validate_gaussian(color, "acidity", &profile.acidity)?;
        if profile.sweetness.is_empty() || profile.sweetness.iter().all(|(_, w)| *w <= 0.0) {
            return Err(Error::InvalidTaxonomy(format!(
                "no usable sweetness weights for {color}"
            )));
        }
    }

    for premium in taxonomy.region_premiums {
        if !(premium.multiplier > 0.0) {
            return Err(Error::InvalidTaxonomy(format!(
                "premium for {} must be positive",
                premium.name
            )));
        }
    }

    let producers = &taxonomy.producers;
    if producers.traditional_prefixes.is_empty()
        || producers.other_prefixes.is_empty()
        || producers.surnames.is_empty()
    {
        return Err(Error::InvalidTaxonomy(
            "producer name lists must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_gaussian(color: Color, field: &str, spec: &GaussianSpec) -> Result<()> {
    if !(spec.low <= spec.high) || !(spec.std_dev >= 0.0) || !spec.mean.is_finite() {
        return Err(Error::InvalidTaxonomy(format!(
            "invalid {field} distribution for {color}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{ColorWeights, GrapeCatalog, RegionProfile};

    #[test]
    fn builtin_taxonomy_is_valid() {
        validate_taxonomy(&Taxonomy::builtin()).expect("builtin taxonomy validates");
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        const REGIONS: &[RegionProfile] = &[RegionProfile {
            country: "France",
            region: "Savoie",
            color_weights: ColorWeights::new(0.5, 0.4, 0.4),
        }];
        let taxonomy = Taxonomy {
            regions: REGIONS,
            ..Taxonomy::builtin()
        };
        let err = validate_taxonomy(&taxonomy).expect_err("weights rejected");
        assert!(err.to_string().contains("Savoie"));
    }

    #[test]
    fn rejects_grape_list_too_small_for_blends() {
        const GRAPES: &[GrapeCatalog] = &[
            GrapeCatalog {
                color: Color::White,
                grapes: &["Chardonnay", "Riesling"],
            },
            GrapeCatalog {
                color: Color::Red,
                grapes: &["Merlot", "Syrah", "Grenache"],
            },
            GrapeCatalog {
                color: Color::Orange,
                grapes: &["Rkatsiteli", "Chardonnay", "Pinot Gris"],
            },
        ];
        let taxonomy = Taxonomy {
            grapes: GRAPES,
            ..Taxonomy::builtin()
        };
        assert!(matches!(
            validate_taxonomy(&taxonomy),
            Err(Error::InvalidTaxonomy(_))
        ));
    }
}
