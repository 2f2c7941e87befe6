use crate::types::{Color, Sweetness};

/// Multiplier applied to the price mean for prestige appellations.
pub const PRESTIGE_APPELLATION_PREMIUM: f64 = 1.3;

/// Likelihood of each color for a region, in [`Color::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorWeights {
    pub white: f64,
    pub red: f64,
    pub orange: f64,
}

impl ColorWeights {
    pub const fn new(white: f64, red: f64, orange: f64) -> Self {
        Self { white, red, orange }
    }

    pub fn weight(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white,
            Color::Red => self.red,
            Color::Orange => self.orange,
        }
    }

    pub fn total(&self) -> f64 {
        self.white + self.red + self.orange
    }
}

/// A wine region and the colors it tends to produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionProfile {
    pub country: &'static str,
    pub region: &'static str,
    pub color_weights: ColorWeights,
}

/// Grape varieties that can appear on a wine of the given color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrapeCatalog {
    pub color: Color,
    pub grapes: &'static [&'static str],
}

/// Appellations registered under a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appellations {
    pub region: &'static str,
    pub names: &'static [&'static str],
}

/// Price multiplier keyed by region name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Premium {
    pub name: &'static str,
    pub multiplier: f64,
}

/// Parameters of a clamped Gaussian draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSpec {
    pub mean: f64,
    pub std_dev: f64,
    pub low: f64,
    pub high: f64,
}

impl GaussianSpec {
    pub const fn new(mean: f64, std_dev: f64, low: f64, high: f64) -> Self {
        Self {
            mean,
            std_dev,
            low,
            high,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Color-dependent chemistry and pricing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorProfile {
    pub color: Color,
    pub base_price_eur: f64,
    pub alcohol: GaussianSpec,
    pub tannin: GaussianSpec,
    pub acidity: GaussianSpec,
    pub sweetness: &'static [(Sweetness, f64)],
}

/// Name parts used to synthesize producers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProducerNames {
    /// Countries whose producers use the traditional prefixes.
    pub traditional_countries: &'static [&'static str],
    pub traditional_prefixes: &'static [&'static str],
    pub other_prefixes: &'static [&'static str],
    pub surnames: &'static [&'static str],
}

/// Immutable reference data driving the attribute sampler.
///
/// Every table is a `'static` slice, so a taxonomy is `Copy`. A different
/// shape (say, a region without appellations) is built with struct-update
/// syntax over [`Taxonomy::builtin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Taxonomy {
    pub regions: &'static [RegionProfile],
    pub grapes: &'static [GrapeCatalog],
    pub appellations: &'static [Appellations],
    pub color_profiles: &'static [ColorProfile],
    pub region_premiums: &'static [Premium],
    pub prestige_appellations: &'static [&'static str],
    pub producers: ProducerNames,
}

impl Taxonomy {
    /// The built-in wine taxonomy.
    pub const fn builtin() -> Self {
        BUILTIN
    }

    /// Color weights registered for `region`, if the region is known.
    pub fn color_weights(&self, region: &str) -> Option<ColorWeights> {
        self.regions
            .iter()
            .find(|profile| profile.region == region)
            .map(|profile| profile.color_weights)
    }

    /// Grapes allowed for `color`.
    pub fn grapes_for(&self, color: Color) -> Option<&'static [&'static str]> {
        self.grapes
            .iter()
            .find(|catalog| catalog.color == color)
            .map(|catalog| catalog.grapes)
    }

    pub fn color_profile(&self, color: Color) -> Option<&ColorProfile> {
        self.color_profiles
            .iter()
            .find(|profile| profile.color == color)
    }

    /// Registered appellations for `region`; `None` when the region has no
    /// entry or an empty one.
    pub fn appellations_for(&self, region: &str) -> Option<&'static [&'static str]> {
        self.appellations
            .iter()
            .find(|entry| entry.region == region)
            .map(|entry| entry.names)
            .filter(|names| !names.is_empty())
    }

    /// Appellation synthesized for regions without registered appellations.
    pub fn fallback_appellation(region: &str) -> String {
        format!("{region} AOC")
    }

    /// Whether `appellation` is a legal value for a wine from `region`.
    pub fn is_valid_appellation(&self, region: &str, appellation: &str) -> bool {
        match self.appellations_for(region) {
            Some(names) => names.contains(&appellation),
            None => appellation == Self::fallback_appellation(region),
        }
    }

    /// Price multiplier for `region`; unlisted regions are neutral.
    pub fn region_premium(&self, region: &str) -> f64 {
        self.region_premiums
            .iter()
            .find(|premium| premium.name == region)
            .map(|premium| premium.multiplier)
            .unwrap_or(1.0)
    }

    /// Price multiplier for `appellation`; only the prestige set is boosted.
    pub fn appellation_premium(&self, appellation: &str) -> f64 {
        if self.prestige_appellations.contains(&appellation) {
            PRESTIGE_APPELLATION_PREMIUM
        } else {
            1.0
        }
    }
}

const WHITE_GRAPES: &[&str] = &[
    "Chardonnay",
    "Sauvignon Blanc",
    "Riesling",
    "Chenin Blanc",
    "Pinot Gris",
    "Albarino",
    "Viognier",
    "Gewurztraminer",
    "Semillon",
    "Muscadet",
];

const RED_GRAPES: &[&str] = &[
    "Pinot Noir",
    "Merlot",
    "Cabernet Sauvignon",
    "Syrah",
    "Grenache",
    "Sangiovese",
    "Tempranillo",
    "Nebbiolo",
    "Malbec",
    "Zinfandel",
];

const ORANGE_GRAPES: &[&str] = &[
    "Rkatsiteli",
    "Chardonnay",
    "Sauvignon Blanc",
    "Pinot Gris",
    "Chenin Blanc",
    "Gewurztraminer",
];

const fn region(
    country: &'static str,
    region: &'static str,
    weights: ColorWeights,
) -> RegionProfile {
    RegionProfile {
        country,
        region,
        color_weights: weights,
    }
}

const REGIONS: &[RegionProfile] = &[
    region("France", "Bordeaux", ColorWeights::new(0.05, 0.9, 0.05)),
    region("France", "Burgundy", ColorWeights::new(0.35, 0.6, 0.05)),
    region("France", "Loire", ColorWeights::new(0.6, 0.35, 0.05)),
    region("France", "Rhone", ColorWeights::new(0.2, 0.75, 0.05)),
    region("France", "Provence", ColorWeights::new(0.5, 0.4, 0.1)),
    region("France", "Languedoc", ColorWeights::new(0.4, 0.55, 0.05)),
    region("France", "Alsace", ColorWeights::new(0.85, 0.1, 0.05)),
    region("France", "Jura", ColorWeights::new(0.3, 0.5, 0.2)),
    region("France", "Beaujolais", ColorWeights::new(0.15, 0.8, 0.05)),
    region("France", "Champagne", ColorWeights::new(0.9, 0.05, 0.05)),
    region("Italy", "Tuscany", ColorWeights::new(0.1, 0.85, 0.05)),
    region("Italy", "Piedmont", ColorWeights::new(0.15, 0.8, 0.05)),
    region("Italy", "Veneto", ColorWeights::new(0.4, 0.55, 0.05)),
    region("Italy", "Sicily", ColorWeights::new(0.4, 0.55, 0.05)),
    region("Spain", "Rioja", ColorWeights::new(0.1, 0.85, 0.05)),
    region("Spain", "Ribera del Duero", ColorWeights::new(0.05, 0.9, 0.05)),
    region("Spain", "Rias Baixas", ColorWeights::new(0.9, 0.05, 0.05)),
    region("Georgia", "Kakheti", ColorWeights::new(0.2, 0.3, 0.5)),
];

const APPELLATIONS: &[Appellations] = &[
    Appellations {
        region: "Bordeaux",
        names: &["Medoc", "Saint-Emilion", "Pauillac", "Pomerol", "Graves"],
    },
    Appellations {
        region: "Burgundy",
        names: &["Chablis", "Cote de Nuits", "Cote de Beaune", "Maconnais"],
    },
    Appellations {
        region: "Loire",
        names: &["Sancerre", "Vouvray", "Muscadet", "Chinon"],
    },
    Appellations {
        region: "Rhone",
        names: &[
            "Cote-Rotie",
            "Hermitage",
            "Crozes-Hermitage",
            "Chateauneuf-du-Pape",
        ],
    },
    Appellations {
        region: "Provence",
        names: &["Coteaux d'Aix", "Cotes de Provence"],
    },
    Appellations {
        region: "Languedoc",
        names: &["Minervois", "Corbieres", "Faugeres"],
    },
    Appellations {
        region: "Alsace",
        names: &["Alsace AOC", "Grand Cru"],
    },
    Appellations {
        region: "Jura",
        names: &["Arbois", "Cotes du Jura"],
    },
    Appellations {
        region: "Beaujolais",
        names: &["Beaujolais-Villages", "Moulin-a-Vent", "Fleurie"],
    },
    Appellations {
        region: "Champagne",
        names: &["Champagne AOC"],
    },
    Appellations {
        region: "Tuscany",
        names: &["Chianti Classico", "Brunello di Montalcino", "Bolgheri"],
    },
    Appellations {
        region: "Piedmont",
        names: &["Barolo", "Barbaresco", "Langhe"],
    },
    Appellations {
        region: "Veneto",
        names: &["Valpolicella", "Soave", "Prosecco"],
    },
    Appellations {
        region: "Sicily",
        names: &["Etna", "Nero d'Avola IGT"],
    },
    Appellations {
        region: "Rioja",
        names: &["Rioja DOCa"],
    },
    Appellations {
        region: "Ribera del Duero",
        names: &["Ribera del Duero DO"],
    },
    Appellations {
        region: "Rias Baixas",
        names: &["Rias Baixas DO"],
    },
    Appellations {
        region: "Kakheti",
        names: &["Kakheti PDO"],
    },
];

const COLOR_PROFILES: &[ColorProfile] = &[
    ColorProfile {
        color: Color::White,
        base_price_eur: 18.0,
        alcohol: GaussianSpec::new(12.5, 0.8, 11.0, 14.5),
        tannin: GaussianSpec::new(1.8, 0.6, 1.0, 5.0),
        acidity: GaussianSpec::new(3.6, 0.7, 1.0, 5.0),
        sweetness: &[
            (Sweetness::Dry, 0.7),
            (Sweetness::OffDry, 0.25),
            (Sweetness::Sweet, 0.05),
        ],
    },
    ColorProfile {
        color: Color::Red,
        base_price_eur: 24.0,
        alcohol: GaussianSpec::new(13.5, 0.9, 12.0, 16.0),
        tannin: GaussianSpec::new(4.0, 0.8, 1.0, 5.0),
        acidity: GaussianSpec::new(3.2, 0.7, 1.0, 5.0),
        sweetness: &[(Sweetness::Dry, 0.9), (Sweetness::OffDry, 0.1)],
    },
    ColorProfile {
        color: Color::Orange,
        base_price_eur: 22.0,
        alcohol: GaussianSpec::new(13.0, 0.8, 11.5, 15.0),
        tannin: GaussianSpec::new(3.2, 0.7, 1.0, 5.0),
        acidity: GaussianSpec::new(3.4, 0.6, 1.0, 5.0),
        sweetness: &[(Sweetness::Dry, 0.85), (Sweetness::OffDry, 0.15)],
    },
];

// "Barolo" is an appellation, so this entry never matches a region name.
const REGION_PREMIUMS: &[Premium] = &[
    Premium {
        name: "Bordeaux",
        multiplier: 1.5,
    },
    Premium {
        name: "Burgundy",
        multiplier: 1.7,
    },
    Premium {
        name: "Champagne",
        multiplier: 1.8,
    },
    Premium {
        name: "Rioja",
        multiplier: 1.2,
    },
    Premium {
        name: "Piedmont",
        multiplier: 1.6,
    },
    Premium {
        name: "Rhone",
        multiplier: 1.4,
    },
    Premium {
        name: "Tuscany",
        multiplier: 1.5,
    },
    Premium {
        name: "Barolo",
        multiplier: 2.0,
    },
];

const PRESTIGE_APPELLATIONS: &[&str] = &[
    "Pauillac",
    "Saint-Emilion",
    "Chateauneuf-du-Pape",
    "Cote-Rotie",
    "Hermitage",
    "Barolo",
    "Barbaresco",
    "Rioja DOCa",
    "Ribera del Duero DO",
    "Champagne AOC",
];

const PRODUCERS: ProducerNames = ProducerNames {
    traditional_countries: &["France", "Spain", "Italy"],
    traditional_prefixes: &["Domaine", "Chateau", "Maison", "Bodegas", "Cantina", "Winery"],
    other_prefixes: &["Domaine", "Marani", "Estate"],
    surnames: &[
        "Dubois",
        "Lafitte",
        "Moreau",
        "Marchesi",
        "Rossi",
        "Garcia",
        "Torres",
        "Imeretian",
        "Mukuzani",
        "Nikoladze",
        "Fontaine",
        "Durand",
        "Bonnet",
        "Ferreira",
        "da Costa",
    ],
};

const BUILTIN: Taxonomy = Taxonomy {
    regions: REGIONS,
    grapes: &[
        GrapeCatalog {
            color: Color::White,
            grapes: WHITE_GRAPES,
        },
        GrapeCatalog {
            color: Color::Red,
            grapes: RED_GRAPES,
        },
        GrapeCatalog {
            color: Color::Orange,
            grapes: ORANGE_GRAPES,
        },
    ],
    appellations: APPELLATIONS,
    color_profiles: COLOR_PROFILES,
    region_premiums: REGION_PREMIUMS,
    prestige_appellations: PRESTIGE_APPELLATIONS,
    producers: PRODUCERS,
};
