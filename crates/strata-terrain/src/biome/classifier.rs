//! Decision tree from a physics sample to a biome tag.
//!
//! Priority order, first match wins:
//!
//! 1. temperature below −50 °C or above 100 °C;
//! 2. water (terrain strictly below sea level) versus land;
//! 3. land more than 150 units above sea level is always mountain;
//! 4. volatility: 4–5 mountain, 2–3 highland, 0–1 continental;
//! 5. continental habitability: below 0.4 hostile, up to 0.7 marginal,
//!    above that thriving;
//! 6. temperature, humidity, wind, and elevation within each branch.
//!
//! Every branch ends in an unconditional leaf, so classification is total.

use super::BiomeTag;
use crate::sample::PhysicsSample;

const CRYOGENIC_BELOW: f64 = -50.0;
const MOLTEN_ABOVE: f64 = 100.0;
/// Land above this elevation uses the mountain branch regardless of volatility.
const FORCED_MOUNTAIN_ELEVATION: f64 = 150.0;
const MOUNTAIN_VOLATILITY: u8 = 4;
const HIGHLAND_VOLATILITY: u8 = 2;
const HOSTILE_BELOW: f64 = 0.4;
const MARGINAL_UP_TO: f64 = 0.7;
/// Water deeper than this is deep ocean.
const DEEP_WATER: f64 = 40.0;
/// Water at most this deep is shallow.
const SHALLOW_WATER: f64 = 8.0;
/// Mountain elevation at which peaks begin.
const PEAK_ELEVATION: f64 = 80.0;
/// Thriving elevation at which uplands begin.
const UPLAND_ELEVATION: f64 = 60.0;

/// Pure biome classifier for one planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeClassifier {
    sea_level: f64,
}

/// The inputs the tree reads, with elevation already relative to sea level.
#[derive(Clone, Copy, Debug)]
struct Inputs {
    temperature: f64,
    elevation: f64,
    moisture: f64,
    wind: f64,
    habitability: f64,
    volatility: u8,
}

impl BiomeClassifier {
    /// Classifier for a planet whose sea surface sits at `sea_level`.
    pub fn new(sea_level: f64) -> Self {
        Self { sea_level }
    }

    /// Sea level the classifier compares terrain against.
    pub fn sea_level(&self) -> f64 {
        self.sea_level
    }

    /// Classify one sample.
    pub fn classify(&self, sample: &PhysicsSample) -> BiomeTag {
        let inputs = Inputs {
            temperature: sample.temperature,
            elevation: sample.terrain_height - self.sea_level,
            moisture: sample.moisture,
            wind: sample.wind.speed,
            habitability: sample.habitability,
            volatility: sample.volatility_level,
        };

        if inputs.temperature < CRYOGENIC_BELOW {
            BiomeTag::CryogenicWasteland
        } else if inputs.temperature > MOLTEN_ABOVE {
            BiomeTag::MoltenWasteland
        } else if sample.terrain_height < self.sea_level {
            water(&inputs)
        } else if inputs.elevation > FORCED_MOUNTAIN_ELEVATION
            || inputs.volatility >= MOUNTAIN_VOLATILITY
        {
            mountain(&inputs)
        } else if inputs.volatility >= HIGHLAND_VOLATILITY {
            highland(&inputs)
        } else if inputs.habitability < HOSTILE_BELOW {
            hostile(&inputs)
        } else if inputs.habitability <= MARGINAL_UP_TO {
            marginal(&inputs)
        } else {
            thriving(&inputs)
        }
    }
}

fn water(i: &Inputs) -> BiomeTag {
    let depth = -i.elevation;
    if i.temperature < -10.0 {
        BiomeTag::FrozenOcean
    } else if i.volatility >= MOUNTAIN_VOLATILITY {
        if depth > DEEP_WATER {
            BiomeTag::AbyssalTrench
        } else {
            BiomeTag::HydrothermalVents
        }
    } else if depth > DEEP_WATER {
        BiomeTag::DeepOcean
    } else if i.temperature < 5.0 {
        BiomeTag::ColdOcean
    } else if i.temperature > 25.0 {
        if depth <= SHALLOW_WATER && i.habitability > MARGINAL_UP_TO {
            BiomeTag::CoralReef
        } else {
            BiomeTag::WarmOcean
        }
    } else if depth <= SHALLOW_WATER {
        BiomeTag::ShallowSea
    } else {
        BiomeTag::Ocean
    }
}

fn mountain(i: &Inputs) -> BiomeTag {
    if i.volatility >= 5 && i.temperature >= 30.0 {
        BiomeTag::VolcanicPeaks
    } else if i.elevation >= PEAK_ELEVATION {
        if i.temperature < -10.0 {
            BiomeTag::GlacialPeaks
        } else if i.temperature < 0.0 {
            BiomeTag::FrozenPeaks
        } else if i.temperature < 20.0 {
            BiomeTag::AlpinePeaks
        } else if i.moisture > 0.6 {
            BiomeTag::CloudForestPeaks
        } else {
            BiomeTag::BarrenPeaks
        }
    } else if i.temperature < 0.0 {
        BiomeTag::FrozenRidges
    } else if i.moisture > 0.6 {
        BiomeTag::ForestedMountains
    } else if i.wind > 0.6 {
        BiomeTag::WindsweptRidges
    } else {
        BiomeTag::RockyMountains
    }
}

fn highland(i: &Inputs) -> BiomeTag {
    if i.temperature < 0.0 {
        BiomeTag::TundraHighlands
    } else if i.wind > 0.7 {
        BiomeTag::HighlandMoors
    } else if i.moisture > 0.65 {
        if i.temperature > 20.0 {
            BiomeTag::MistyHighlands
        } else {
            BiomeTag::HighlandForest
        }
    } else if i.moisture < 0.3 {
        if i.temperature > 25.0 {
            BiomeTag::Mesa
        } else {
            BiomeTag::RockyPlateau
        }
    } else if i.habitability > MARGINAL_UP_TO {
        BiomeTag::HighlandMeadows
    } else {
        BiomeTag::RollingHills
    }
}

fn hostile(i: &Inputs) -> BiomeTag {
    if i.temperature < -20.0 {
        BiomeTag::IceSheet
    } else if i.temperature < 0.0 {
        if i.moisture < 0.3 {
            BiomeTag::PolarDesert
        } else {
            BiomeTag::FrozenWastes
        }
    } else if i.temperature > 45.0 {
        if i.moisture < 0.2 {
            BiomeTag::SaltFlats
        } else {
            BiomeTag::ScorchedFlats
        }
    } else if i.moisture < 0.2 {
        BiomeTag::BarrenDesert
    } else if i.moisture > 0.8 {
        BiomeTag::ToxicMarsh
    } else {
        BiomeTag::Badlands
    }
}

fn marginal(i: &Inputs) -> BiomeTag {
    if i.temperature < 0.0 {
        BiomeTag::Tundra
    } else if i.temperature < 10.0 {
        if i.moisture > 0.5 {
            BiomeTag::Taiga
        } else {
            BiomeTag::ColdSteppe
        }
    } else if i.temperature > 30.0 {
        if i.moisture < 0.3 {
            BiomeTag::Desert
        } else {
            BiomeTag::Savanna
        }
    } else if i.moisture < 0.3 {
        BiomeTag::Scrubland
    } else if i.moisture > 0.7 {
        BiomeTag::Wetlands
    } else if i.wind > 0.6 {
        BiomeTag::WindsweptPlains
    } else {
        BiomeTag::Steppe
    }
}

fn thriving(i: &Inputs) -> BiomeTag {
    if i.temperature < 5.0 {
        BiomeTag::BorealForest
    } else if i.temperature > 25.0 {
        if i.moisture > 0.7 {
            BiomeTag::TropicalRainforest
        } else if i.moisture > 0.4 {
            BiomeTag::TropicalSeasonalForest
        } else {
            BiomeTag::TropicalSavanna
        }
    } else if i.elevation >= UPLAND_ELEVATION {
        if i.moisture > 0.5 {
            BiomeTag::UplandForest
        } else {
            BiomeTag::UplandMeadow
        }
    } else if i.moisture > 0.85 {
        BiomeTag::Floodplain
    } else if i.moisture > 0.7 {
        BiomeTag::TemperateRainforest
    } else if i.moisture > 0.4 {
        BiomeTag::MixedPlains
    } else if i.moisture > 0.25 {
        BiomeTag::FlowerMeadow
    } else {
        BiomeTag::DryGrassland
    }
}
