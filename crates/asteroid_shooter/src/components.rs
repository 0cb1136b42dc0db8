//! Game-specific entity kinds and per-entity state

use bitflags::bitflags;
use rand::Rng;
use shooter_engine::foundation::math::{constants, Vec2};

/// Kind of every entity the game puts in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The player ship
    Player,
    /// Hostile rock; ends the session on contact with the player
    Asteroid,
    /// Collectible granting score
    Star,
    /// Player projectile
    Laser,
}

bitflags! {
    /// Collision layers used to route contact reports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u8 {
        /// The player ship
        const PLAYER = 1 << 0;
        /// Entities that end the session on contact
        const HOSTILE = 1 << 1;
        /// Entities the player can pick up
        const COLLECTIBLE = 1 << 2;
        /// Entities fired by the player
        const PROJECTILE = 1 << 3;
    }
}

impl EntityKind {
    /// Collision layer the kind lives on
    pub fn layer(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::PLAYER,
            Self::Asteroid => CollisionLayers::HOSTILE,
            Self::Star => CollisionLayers::COLLECTIBLE,
            Self::Laser => CollisionLayers::PROJECTILE,
        }
    }

    /// Layers whose contact with this kind has gameplay consequences
    pub fn interacts_with(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::HOSTILE | CollisionLayers::COLLECTIBLE,
            Self::Asteroid => CollisionLayers::PLAYER | CollisionLayers::PROJECTILE,
            Self::Star => CollisionLayers::PLAYER,
            Self::Laser => CollisionLayers::HOSTILE,
        }
    }
}

/// Spawning pools managed by population spawners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    /// Hostile asteroids placed on the screen edge
    Asteroids,
    /// Collectible stars placed inside the screen
    Stars,
}

impl PoolKind {
    /// Identifier stored in entity owner tags
    pub fn pool_id(self) -> u16 {
        match self {
            Self::Asteroids => 1,
            Self::Stars => 2,
        }
    }

    /// Kind of the entities this pool spawns
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Asteroids => EntityKind::Asteroid,
            Self::Stars => EntityKind::Star,
        }
    }
}

/// Wandering direction of an asteroid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidDrift {
    /// Unit direction of travel
    pub direction: Vec2,
    /// Seconds since the last direction roll
    pub since_roll: f32,
}

impl AsteroidDrift {
    /// Drift along `direction`
    pub fn new(direction: Vec2) -> Self {
        Self {
            direction,
            since_roll: 0.0,
        }
    }

    /// Advance the roll timer. Every `interval` seconds the direction is
    /// re-rolled with probability `chance`. Returns `true` when it changed.
    pub fn update<R: Rng + ?Sized>(&mut self, delta_time: f32, interval: f32, chance: f32, rng: &mut R) -> bool {
        self.since_roll += delta_time;
        if self.since_roll < interval {
            return false;
        }
        self.since_roll = 0.0;
        if rng.gen::<f32>() < chance {
            self.direction = random_unit_vector(rng);
            true
        } else {
            false
        }
    }
}

/// Vertical bob of a star around the point it spawned at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarFloat {
    /// Spawn position the star floats around
    pub anchor: Vec2,
}

impl StarFloat {
    /// Float around `anchor`
    pub fn new(anchor: Vec2) -> Self {
        Self { anchor }
    }

    /// Position at game time `time`: the anchor shifted along y by
    /// `sin(time * speed) * amount`. All stars share one phase.
    pub fn position_at(&self, time: f32, speed: f32, amount: f32) -> Vec2 {
        Vec2::new(self.anchor.x, self.anchor.y + (time * speed).sin() * amount)
    }
}

/// Uniformly distributed unit vector
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..constants::TAU);
    Vec2::new(angle.cos(), angle.sin())
}
