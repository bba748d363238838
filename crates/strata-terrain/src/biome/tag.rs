//! Biome tags: the leaves of the classification tree.

use std::fmt;

/// Branch of the decision tree a tag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BiomeCategory {
    /// Temperature overrides that ignore every other input.
    Extreme,
    /// Below sea level.
    Ocean,
    /// Volatility 4–5 or extreme elevation.
    Mountain,
    /// Volatility 2–3.
    Highland,
    /// Continental, habitability below 0.4.
    Hostile,
    /// Continental, habitability 0.4 to 0.7.
    Marginal,
    /// Continental, habitability above 0.7.
    Thriving,
}

macro_rules! biome_tags {
    ($($variant:ident => $name:literal, $category:ident;)+) => {
        /// Discrete biome assigned to a column.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum BiomeTag {
            $(
                #[doc = $name]
                $variant,
            )+
        }

        impl BiomeTag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [BiomeTag] = &[$(BiomeTag::$variant),+];

            /// Stable SCREAMING_SNAKE tag string.
            pub const fn name(self) -> &'static str {
                match self {
                    $(BiomeTag::$variant => $name,)+
                }
            }

            /// Decision-tree branch this tag belongs to.
            pub const fn category(self) -> BiomeCategory {
                match self {
                    $(BiomeTag::$variant => BiomeCategory::$category,)+
                }
            }
        }
    };
}

biome_tags! {
    CryogenicWasteland => "CRYOGENIC_WASTELAND", Extreme;
    MoltenWasteland => "MOLTEN_WASTELAND", Extreme;

    FrozenOcean => "FROZEN_OCEAN", Ocean;
    AbyssalTrench => "ABYSSAL_TRENCH", Ocean;
    HydrothermalVents => "HYDROTHERMAL_VENTS", Ocean;
    DeepOcean => "DEEP_OCEAN", Ocean;
    ColdOcean => "COLD_OCEAN", Ocean;
    WarmOcean => "WARM_OCEAN", Ocean;
    CoralReef => "CORAL_REEF", Ocean;
    ShallowSea => "SHALLOW_SEA", Ocean;
    Ocean => "OCEAN", Ocean;

    VolcanicPeaks => "VOLCANIC_PEAKS", Mountain;
    GlacialPeaks => "GLACIAL_PEAKS", Mountain;
    FrozenPeaks => "FROZEN_PEAKS", Mountain;
    AlpinePeaks => "ALPINE_PEAKS", Mountain;
    CloudForestPeaks => "CLOUD_FOREST_PEAKS", Mountain;
    BarrenPeaks => "BARREN_PEAKS", Mountain;
    FrozenRidges => "FROZEN_RIDGES", Mountain;
    ForestedMountains => "FORESTED_MOUNTAINS", Mountain;
    WindsweptRidges => "WINDSWEPT_RIDGES", Mountain;
    RockyMountains => "ROCKY_MOUNTAINS", Mountain;

    TundraHighlands => "TUNDRA_HIGHLANDS", Highland;
    HighlandMoors => "HIGHLAND_MOORS", Highland;
    MistyHighlands => "MISTY_HIGHLANDS", Highland;
    HighlandForest => "HIGHLAND_FOREST", Highland;
    Mesa => "MESA", Highland;
    RockyPlateau => "ROCKY_PLATEAU", Highland;
    HighlandMeadows => "HIGHLAND_MEADOWS", Highland;
    RollingHills => "ROLLING_HILLS", Highland;

    IceSheet => "ICE_SHEET", Hostile;
    PolarDesert => "POLAR_DESERT", Hostile;
    FrozenWastes => "FROZEN_WASTES", Hostile;
    SaltFlats => "SALT_FLATS", Hostile;
    ScorchedFlats => "SCORCHED_FLATS", Hostile;
    BarrenDesert => "BARREN_DESERT", Hostile;
    ToxicMarsh => "TOXIC_MARSH", Hostile;
    Badlands => "BADLANDS", Hostile;

    Tundra => "TUNDRA", Marginal;
    Taiga => "TAIGA", Marginal;
    ColdSteppe => "COLD_STEPPE", Marginal;
    Desert => "DESERT", Marginal;
    Savanna => "SAVANNA", Marginal;
    Scrubland => "SCRUBLAND", Marginal;
    Wetlands => "WETLANDS", Marginal;
    WindsweptPlains => "WINDSWEPT_PLAINS", Marginal;
    Steppe => "STEPPE", Marginal;

    BorealForest => "BOREAL_FOREST", Thriving;
    TropicalRainforest => "TROPICAL_RAINFOREST", Thriving;
    TropicalSeasonalForest => "TROPICAL_SEASONAL_FOREST", Thriving;
    TropicalSavanna => "TROPICAL_SAVANNA", Thriving;
    UplandForest => "UPLAND_FOREST", Thriving;
    UplandMeadow => "UPLAND_MEADOW", Thriving;
    Floodplain => "FLOODPLAIN", Thriving;
    TemperateRainforest => "TEMPERATE_RAINFOREST", Thriving;
    MixedPlains => "MIXED_PLAINS", Thriving;
    FlowerMeadow => "FLOWER_MEADOW", Thriving;
    DryGrassland => "DRY_GRASSLAND", Thriving;
}

impl BiomeTag {
    /// Look a tag up by its tag string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.name() == name)
    }

    /// Whether the tag lies below sea level.
    pub fn is_aquatic(self) -> bool {
        self.category() == BiomeCategory::Ocean
    }
}

impl fmt::Display for BiomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
