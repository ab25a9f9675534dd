//! Simulation errors.
//!
//! These are precondition violations: an operation ran before the state it
//! depends on existed. The engine does not try to recover from them.

use skyrunner_core::types::RenderHandle;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("player vehicle has not been spawned")]
    MissingVehicle,
    #[error("renderable {0:?} is not registered with the presentation layer")]
    MissingRenderable(RenderHandle),
    #[error("entity is missing a component: {0}")]
    Component(#[from] hecs::ComponentError),
    #[error("entity query failed: {0}")]
    Query(#[from] hecs::QueryOneError),
    #[error("entity no longer exists")]
    NoSuchEntity(#[from] hecs::NoSuchEntity),
}
