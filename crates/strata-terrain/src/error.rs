//! Error types for the multi-planet engine.

use crate::profile::PlanetId;

/// Errors returned by [`crate::PhysicsEngine`].
///
/// Sampling itself never fails; only planet lookup and registration do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A planet with this id is already registered.
    #[error("planet {0} is already registered")]
    DuplicatePlanet(PlanetId),

    /// No planet with this id is registered.
    #[error("unknown planet {0}")]
    UnknownPlanet(PlanetId),
}
