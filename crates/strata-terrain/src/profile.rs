//! Planet profile: the immutable parameters and derived physical constants
//! shared by every layer of a planet.

use std::f64::consts::PI;
use std::fmt;

use strata_config::{AtmosphereComposition, CoreComposition, CrustComposition, PlanetConfig};

/// Unique identifier for a planet within a [`crate::PhysicsEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanetId(pub u64);

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable planet description.
///
/// Built once from a validated [`PlanetConfig`]; every component holds it
/// behind an `Arc` and never mutates it. Derived constants are computed in
/// [`PlanetProfile::from_config`] so layers read them without recomputation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetProfile {
    /// Planet identifier.
    pub id: PlanetId,
    /// Human-readable planet name.
    pub name: String,
    /// Seed for every noise field.
    pub seed: u64,
    /// Radius in world units.
    pub radius: f64,
    /// Circumference in world units (`2πr`).
    pub circumference: f64,
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
    /// Atmospheric density in `[0, 1]`.
    pub atmospheric_density: f64,
    /// Rotation period in hours.
    pub rotation_period_hours: f64,
    /// Length of one day in seconds.
    pub day_length_seconds: f64,
    /// Frequency multiplier applied to every terrain/climate noise field.
    /// Larger planets get broader features.
    pub noise_scale: f64,
    /// Vertical relief multiplier for the terrain layers.
    pub terrain_scale: f64,
    /// Absolute world height of the sea surface.
    pub sea_level: f64,
    /// Equatorial sea-level temperature in °C after atmospheric effects.
    pub base_surface_temperature: f64,
    /// Habitability multiplier in `[0, 1.2]`.
    pub base_habitability: f64,
}

/// Reference circumference at which `noise_scale == 1.0`.
const REFERENCE_CIRCUMFERENCE: f64 = 40_000.0;

fn relief_factor(crust: CrustComposition) -> f64 {
    match crust {
        CrustComposition::Silicate => 1.0,
        CrustComposition::Basaltic => 1.15,
        CrustComposition::Carbonaceous => 0.8,
        CrustComposition::Icy => 0.6,
        CrustComposition::Metallic => 0.9,
    }
}

/// Warming (°C) contributed by a fully dense atmosphere of this composition.
fn greenhouse_offset(atmosphere: AtmosphereComposition) -> f64 {
    match atmosphere {
        AtmosphereComposition::NitrogenOxygen => 0.0,
        AtmosphereComposition::CarbonDioxide => 45.0,
        AtmosphereComposition::Methane => 20.0,
        AtmosphereComposition::Hydrogen => 10.0,
        AtmosphereComposition::Thin => -30.0,
    }
}

fn habitability_factor(atmosphere: AtmosphereComposition) -> f64 {
    match atmosphere {
        AtmosphereComposition::NitrogenOxygen => 1.0,
        AtmosphereComposition::CarbonDioxide => 0.55,
        AtmosphereComposition::Methane => 0.45,
        AtmosphereComposition::Hydrogen => 0.4,
        AtmosphereComposition::Thin => 0.25,
    }
}

/// Extra crust heat from a metallic core; nudges baseline temperature.
fn core_heat(core: CoreComposition) -> f64 {
    match core {
        CoreComposition::Iron => 1.5,
        CoreComposition::IronNickel => 1.0,
        CoreComposition::Silicate => 0.0,
        CoreComposition::Ice => -4.0,
    }
}

impl PlanetProfile {
    /// Derive a profile from a planet configuration.
    ///
    /// The configuration is assumed to have passed [`PlanetConfig::validate`];
    /// no clamping happens here beyond keeping `base_habitability` in range.
    pub fn from_config(config: &PlanetConfig) -> Self {
        let circumference = 2.0 * PI * config.radius;
        let noise_scale = (REFERENCE_CIRCUMFERENCE / circumference).clamp(0.25, 4.0);
        let terrain_scale =
            relief_factor(config.crust) * (0.75 + 0.5 * config.tectonic_activity);
        let base_surface_temperature = config.base_temperature_c
            + greenhouse_offset(config.atmosphere) * config.atmospheric_density
            + core_heat(config.core);
        let base_habitability =
            (config.base_habitability * habitability_factor(config.atmosphere)).clamp(0.0, 1.2);

        Self {
            id: PlanetId(config.id),
            name: config.name.clone(),
            seed: config.seed,
            radius: config.radius,
            circumference,
            core: config.core,
            crust: config.crust,
            atmosphere: config.atmosphere,
            tectonic_activity: config.tectonic_activity,
            water_content: config.water_content,
            atmospheric_density: config.atmospheric_density,
            rotation_period_hours: config.rotation_period_hours,
            day_length_seconds: config.rotation_period_hours * 3600.0,
            noise_scale,
            terrain_scale,
            sea_level: config.sea_level,
            base_surface_temperature,
            base_habitability,
        }
    }

    /// Earth-like profile with the given id and seed.
    pub fn earth_like(id: u64, seed: u64) -> Self {
        Self::from_config(&PlanetConfig {
            id,
            seed,
            ..PlanetConfig::default()
        })
    }

    /// Distance from the equator (z = 0) to a pole, in world units.
    pub fn quarter_circumference(&self) -> f64 {
        self.circumference * 0.25
    }

    /// Wind speed of still air on this planet: the density-driven floor of
    /// the wind layer, used when no wind stage is available.
    pub fn baseline_wind_speed(&self) -> f64 {
        self.atmospheric_density * 0.3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circumference_from_radius() {
        let profile = PlanetProfile::from_config(&PlanetConfig {
            radius: 1000.0,
            ..Default::default()
        });
        assert!((profile.circumference - 2.0 * PI * 1000.0).abs() < 1e-9);
        assert!((profile.quarter_circumference() - PI * 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_noise_scale_clamped() {
        let tiny = PlanetProfile::from_config(&PlanetConfig {
            radius: 10.0,
            ..Default::default()
        });
        let huge = PlanetProfile::from_config(&PlanetConfig {
            radius: 10_000_000.0,
            ..Default::default()
        });
        assert_eq!(tiny.noise_scale, 4.0);
        assert_eq!(huge.noise_scale, 0.25);
    }

    #[test]
    fn test_greenhouse_raises_temperature() {
        let earth = PlanetProfile::earth_like(0, 1);
        let venus = PlanetProfile::from_config(&PlanetConfig {
            atmosphere: AtmosphereComposition::CarbonDioxide,
            atmospheric_density: 1.0,
            ..Default::default()
        });
        assert!(venus.base_surface_temperature > earth.base_surface_temperature + 30.0);
    }

    #[test]
    fn test_habitability_stays_in_range() {
        let profile = PlanetProfile::from_config(&PlanetConfig {
            base_habitability: 1.2,
            ..Default::default()
        });
        assert!(profile.base_habitability <= 1.2);
        let thin = PlanetProfile::from_config(&PlanetConfig {
            atmosphere: AtmosphereComposition::Thin,
            ..Default::default()
        });
        assert!(thin.base_habitability < profile.base_habitability);
    }

    #[test]
    fn test_tectonic_activity_scales_relief() {
        let calm = PlanetProfile::from_config(&PlanetConfig {
            tectonic_activity: 0.0,
            ..Default::default()
        });
        let active = PlanetProfile::from_config(&PlanetConfig {
            tectonic_activity: 1.0,
            ..Default::default()
        });
        assert!(active.terrain_scale > calm.terrain_scale);
        assert_eq!(calm.terrain_scale, 0.75);
    }

    #[test]
    fn test_day_length() {
        let profile = PlanetProfile::earth_like(3, 9);
        assert_eq!(profile.day_length_seconds, 86_400.0);
        assert_eq!(profile.id, PlanetId(3));
        assert_eq!(profile.seed, 9);
        assert!((profile.baseline_wind_speed() - 0.18).abs() < 1e-12);
    }
}
