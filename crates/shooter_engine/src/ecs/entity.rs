//! Entity handles, spawn descriptions and stored records

use super::components::{Lifetime, Movement2D, Transform2D};
use crate::foundation::math::Vec2;

slotmap::new_key_type! {
    /// Generational entity identifier. A destroyed entity's handle is never reused.
    pub struct EntityHandle;
}

/// Marks an entity as belonging to a spawning pool in a given session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerTag {
    /// Pool identifier chosen by the spawner
    pub pool: u16,
    /// Session generation of the spawner when the entity was created
    pub generation: u32,
}

impl OwnerTag {
    /// Create a new owner tag
    pub fn new(pool: u16, generation: u32) -> Self {
        Self { pool, generation }
    }
}

/// Description of an entity to spawn (builder pattern)
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec<K> {
    pub(super) kind: K,
    pub(super) template: String,
    pub(super) transform: Transform2D,
    pub(super) movement: Movement2D,
    pub(super) lifetime: Option<f32>,
    pub(super) owner: Option<OwnerTag>,
}

impl<K> EntitySpec<K> {
    /// Start a spawn description for `kind` instantiated from `template`
    pub fn new(kind: K, template: impl Into<String>) -> Self {
        Self {
            kind,
            template: template.into(),
            transform: Transform2D::default(),
            movement: Movement2D::still(),
            lifetime: None,
            owner: None,
        }
    }

    /// Set spawn position
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    /// Set spawn rotation in degrees
    #[must_use]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.transform = Transform2D::new(self.transform.position, degrees);
        self
    }

    /// Set linear velocity in units per second
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.movement.velocity = velocity;
        self
    }

    /// Set angular velocity in degrees per second
    #[must_use]
    pub fn with_angular_velocity(mut self, degrees_per_second: f32) -> Self {
        self.movement.angular_velocity = degrees_per_second;
        self
    }

    /// Destroy the entity `seconds` after it spawns
    #[must_use]
    pub fn with_lifetime(mut self, seconds: f32) -> Self {
        self.lifetime = Some(seconds);
        self
    }

    /// Tag the entity with its owning pool
    #[must_use]
    pub fn with_owner(mut self, owner: OwnerTag) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// An entity stored in the world
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord<K> {
    /// Game-defined kind
    pub kind: K,
    /// Template the entity was instantiated from
    pub template: String,
    /// Position and rotation
    pub transform: Transform2D,
    /// Integrated every tick
    pub movement: Movement2D,
    /// Optional self-destruct timer
    pub lifetime: Option<Lifetime>,
    /// Owning pool, if spawned by one
    pub owner: Option<OwnerTag>,
}
