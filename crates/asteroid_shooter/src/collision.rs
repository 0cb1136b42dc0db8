//! Routing of reported contacts to gameplay effects
//!
//! Contact detection happens outside the game. The host reports pairs of
//! entities that touched; the router decides what the contact means using
//! the kinds' [`CollisionLayers`](crate::components::CollisionLayers).

use log::debug;
use shooter_engine::ecs::components::DestroyCause;
use shooter_engine::ecs::{DestroyedEntity, EntityHandle, World};

use crate::components::{CollisionLayers, EntityKind};
use crate::game_state::GameState;

/// Meaningful contact between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// An asteroid hit the player ship
    PlayerHitAsteroid {
        /// Player ship
        player: EntityHandle,
        /// Asteroid
        asteroid: EntityHandle,
    },
    /// A laser hit an asteroid
    LaserHitAsteroid {
        /// Laser
        laser: EntityHandle,
        /// Asteroid
        asteroid: EntityHandle,
    },
    /// The player picked up a star
    PlayerCollectedStar {
        /// Player ship
        player: EntityHandle,
        /// Star
        star: EntityHandle,
    },
}

/// Turns contact reports into destruction and score changes
#[derive(Debug, Clone, Copy)]
pub struct CollisionRouter {
    star_value: i32,
}

impl CollisionRouter {
    /// Router granting `star_value` points per collected star
    pub fn new(star_value: i32) -> Self {
        Self { star_value }
    }

    /// Work out what a contact between `a` and `b` means, in either order
    pub fn classify(&self, world: &World<EntityKind>, a: EntityHandle, b: EntityHandle) -> Option<Contact> {
        let kind_a = world.get(a)?.kind;
        let kind_b = world.get(b)?.kind;
        if a == b || !kind_a.interacts_with().contains(kind_b.layer()) {
            return None;
        }

        let pair = kind_a.layer() | kind_b.layer();
        let pick = |kind: EntityKind| if kind_a == kind { a } else { b };
        if pair == CollisionLayers::PLAYER | CollisionLayers::HOSTILE {
            Some(Contact::PlayerHitAsteroid {
                player: pick(EntityKind::Player),
                asteroid: pick(EntityKind::Asteroid),
            })
        } else if pair == CollisionLayers::PROJECTILE | CollisionLayers::HOSTILE {
            Some(Contact::LaserHitAsteroid {
                laser: pick(EntityKind::Laser),
                asteroid: pick(EntityKind::Asteroid),
            })
        } else if pair == CollisionLayers::PLAYER | CollisionLayers::COLLECTIBLE {
            Some(Contact::PlayerCollectedStar {
                player: pick(EntityKind::Player),
                star: pick(EntityKind::Star),
            })
        } else {
            None
        }
    }

    /// Apply a contact. Returns the entities it destroyed.
    pub fn resolve(
        &self,
        contact: Contact,
        world: &mut World<EntityKind>,
        state: &mut GameState,
    ) -> Vec<DestroyedEntity<EntityKind>> {
        debug!("Resolving {:?}", contact);
        let mut destroyed = Vec::new();
        match contact {
            Contact::PlayerHitAsteroid { asteroid, .. } => {
                if let Some(rock) = world.destroy(asteroid, DestroyCause::Collision) {
                    state.asteroid_destroyed();
                    destroyed.push(rock);
                }
                state.on_hostile_collision();
            }
            Contact::LaserHitAsteroid { laser, asteroid } => {
                if let Some(rock) = world.destroy(asteroid, DestroyCause::Collision) {
                    state.asteroid_destroyed();
                    destroyed.push(rock);
                }
                destroyed.extend(world.destroy(laser, DestroyCause::Collision));
            }
            Contact::PlayerCollectedStar { star, .. } => {
                if let Some(star) = world.destroy(star, DestroyCause::Collected) {
                    state.add_score(self.star_value);
                    destroyed.push(star);
                }
            }
        }
        destroyed
    }

    /// Classify and apply a contact report in one step
    pub fn report(
        &self,
        world: &mut World<EntityKind>,
        state: &mut GameState,
        a: EntityHandle,
        b: EntityHandle,
    ) -> Vec<DestroyedEntity<EntityKind>> {
        match self.classify(world, a, b) {
            Some(contact) => self.resolve(contact, world, state),
            None => Vec::new(),
        }
    }
}
