//! Per-coordinate physics bundles returned to the host generator.

use glam::DVec2;

/// Wind at a chunk: scalar speed and unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindSample {
    /// Normalized wind speed in `[0, 1]`.
    pub speed: f64,
    /// Unit direction on the (x, z) plane, or zero for still air.
    pub direction: DVec2,
}

impl WindSample {
    /// Still air at the given speed (no preferred direction).
    pub const fn calm(speed: f64) -> Self {
        Self {
            speed,
            direction: DVec2::ZERO,
        }
    }
}

/// Every physical quantity derived for one (x, z) column.
///
/// Terrain and tectonic values are exact for the column; climate values are
/// the representative sample of the column's chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsSample {
    /// Absolute terrain height (compare against the planet's sea level).
    pub terrain_height: f64,
    /// Continuous tectonic-activity signal in `[0, 1]`.
    pub tectonic_activity: f64,
    /// Discrete volatility level in `0..=5`.
    pub volatility_level: u8,
    /// Surface temperature in °C.
    pub temperature: f64,
    /// Wind speed and direction.
    pub wind: WindSample,
    /// Moisture in `[0, 1]`.
    pub moisture: f64,
    /// Habitability in `[0, 1.2]`.
    pub habitability: f64,
}

impl PhysicsSample {
    /// Wind speed shortcut.
    pub fn wind_speed(&self) -> f64 {
        self.wind.speed
    }

    /// Height above (positive) or below (negative) the given sea level.
    pub fn elevation_above(&self, sea_level: f64) -> f64 {
        self.terrain_height - sea_level
    }
}
