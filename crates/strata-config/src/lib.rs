//! Configuration system for Strata.
//!
//! Provides the planet parameters, cache tuning, and debug settings consumed by
//! the surface-physics core. Settings persist to disk as RON files and support
//! hot-reload detection and forward/backward compatible serialization.

mod config;
mod error;

pub use config::{
    AtmosphereComposition, CacheConfig, Config, CoreComposition, CrustComposition, DebugConfig,
    PlanetConfig,
};
pub use error::ConfigError;
