//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name used for the persisted configuration.
const CONFIG_FILE: &str = "strata.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet-level physical parameters.
    pub planet: PlanetConfig,
    /// Region/chunk cache tuning.
    pub cache: CacheConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Dominant composition of the planet's core.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CoreComposition {
    /// Solid iron core.
    Iron,
    /// Iron-nickel core (Earth-like).
    #[default]
    IronNickel,
    /// Rocky, undifferentiated interior.
    Silicate,
    /// Frozen volatiles.
    Ice,
}

/// Dominant composition of the planet's crust.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CrustComposition {
    /// Granite/silicate continental crust (Earth-like).
    #[default]
    Silicate,
    /// Dense volcanic basalt.
    Basaltic,
    /// Carbon-rich sediment.
    Carbonaceous,
    /// Water or nitrogen ice shell.
    Icy,
    /// Exposed metallic crust.
    Metallic,
}

/// Dominant composition of the planet's atmosphere.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AtmosphereComposition {
    /// Breathable nitrogen/oxygen mix.
    #[default]
    NitrogenOxygen,
    /// Thick greenhouse CO2 atmosphere.
    CarbonDioxide,
    /// Methane-heavy haze.
    Methane,
    /// Light hydrogen envelope.
    Hydrogen,
    /// Trace atmosphere, near vacuum.
    Thin,
}

/// Planet parameters. Values are expected to pass [`PlanetConfig::validate`]
/// before being handed to the generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Numeric planet identifier, unique within a running engine.
    pub id: u64,
    /// Human-readable planet name.
    pub name: String,
    /// Seed for every noise field on this planet.
    pub seed: u64,
    /// Planet radius in world units (blocks). Circumference is derived from it.
    pub radius: f64,
    /// Core composition.
    pub core: CoreComposition,
    /// Crust composition.
    pub crust: CrustComposition,
    /// Atmosphere composition.
    pub atmosphere: AtmosphereComposition,
    /// Plate-tectonic activity in `[0, 1]`.
    pub tectonic_activity: f64,
    /// Surface water content in `[0, 1]`.
    pub water_content: f64,
    /// Atmospheric density in `[0, 1]` (1.0 is very thick).
    pub atmospheric_density: f64,
    /// Length of one rotation in hours.
    pub rotation_period_hours: f64,
    /// Sea level as an absolute world height.
    pub sea_level: f64,
    /// Baseline surface temperature at the equator and sea level, in °C.
    pub base_temperature_c: f64,
    /// Baseline habitability multiplier in `[0, 1.2]`.
    pub base_habitability: f64,
}

/// Region cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Region edge length in chunks.
    pub region_size_chunks: i32,
    /// Number of distinct generated chunks after which a region is completed
    /// and its caches purged.
    pub completion_threshold: usize,
    /// Soft cap on coordinate-keyed volatility cache entries per planet.
    pub volatility_cache_capacity: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "strata_terrain=trace").
    pub log_level: String,
    /// Disable every climate cache (useful for determinism comparisons).
    pub disable_caching: bool,
}

// --- Default implementations ---

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            id: 0,
            name: "Terra".to_string(),
            seed: 0,
            radius: 10_000.0,
            core: CoreComposition::default(),
            crust: CrustComposition::default(),
            atmosphere: AtmosphereComposition::default(),
            tectonic_activity: 0.5,
            water_content: 0.6,
            atmospheric_density: 0.6,
            rotation_period_hours: 24.0,
            sea_level: 64.0,
            base_temperature_c: 14.0,
            base_habitability: 1.0,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            region_size_chunks: 32,
            completion_threshold: 1024,
            volatility_cache_capacity: 262_144,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            disable_caching: false,
        }
    }
}

// --- Validation ---

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a value in [0, 1], got {value}"),
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a positive finite value, got {value}"),
        })
    }
}

impl PlanetConfig {
    /// Check every parameter against the ranges the generator assumes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("planet.radius", self.radius)?;
        check_positive("planet.rotation_period_hours", self.rotation_period_hours)?;
        check_unit("planet.tectonic_activity", self.tectonic_activity)?;
        check_unit("planet.water_content", self.water_content)?;
        check_unit("planet.atmospheric_density", self.atmospheric_density)?;
        if !self.sea_level.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "planet.sea_level",
                reason: "must be finite".to_string(),
            });
        }
        if !self.base_temperature_c.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "planet.base_temperature_c",
                reason: "must be finite".to_string(),
            });
        }
        if !(0.0..=1.2).contains(&self.base_habitability) {
            return Err(ConfigError::InvalidValue {
                field: "planet.base_habitability",
                reason: format!("expected a value in [0, 1.2], got {}", self.base_habitability),
            });
        }
        Ok(())
    }
}

impl CacheConfig {
    /// Check that the region geometry and completion threshold are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region_size_chunks <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.region_size_chunks",
                reason: format!("must be positive, got {}", self.region_size_chunks),
            });
        }
        let chunks_per_region = (self.region_size_chunks as usize).pow(2);
        if self.completion_threshold == 0 || self.completion_threshold > chunks_per_region {
            return Err(ConfigError::InvalidValue {
                field: "cache.completion_threshold",
                reason: format!(
                    "expected 1..={chunks_per_region} for {0}x{0} regions, got {1}",
                    self.region_size_chunks, self.completion_threshold
                ),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planet.validate()?;
        self.cache.validate()
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `strata.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
