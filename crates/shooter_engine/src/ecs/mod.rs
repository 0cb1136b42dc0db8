//! Tick-driven entity world
//!
//! Entities live in a slot map keyed by [`EntityHandle`]. Each entity carries
//! a game-defined kind, a template name, a 2D transform, optional movement
//! and an optional [`components::Lifetime`]. Removing an entity always yields
//! a [`DestroyedEntity`] record so pool owners can keep their counts exact.

pub mod components;
pub mod entity;
pub mod world;

pub use entity::{EntityHandle, EntityRecord, EntitySpec, OwnerTag};
pub use world::{DestroyedEntity, World};
