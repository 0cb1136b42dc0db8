//! Player ship movement and firing

use log::{debug, warn};
use shooter_engine::ecs::{EntityHandle, EntitySpec, World};
use shooter_engine::foundation::math::{utils, Vec2};

use crate::components::EntityKind;
use crate::config::{LaserConfig, PlayerConfig};
use crate::placement::CameraBounds;

/// Input sampled by the host for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    /// Horizontal and vertical axis, each in `[-1, 1]`
    pub axis: Vec2,
    /// Fire button held
    pub fire: bool,
}

/// Drives the player ship and spawns its lasers
#[derive(Debug, Clone)]
pub struct PlayerController {
    config: PlayerConfig,
    laser: LaserConfig,
    ship: Option<EntityHandle>,
    next_fire_time: f32,
}

impl PlayerController {
    /// Controller without a ship
    pub fn new(config: &PlayerConfig, laser: &LaserConfig) -> Self {
        Self {
            config: config.clone(),
            laser: laser.clone(),
            ship: None,
            next_fire_time: 0.0,
        }
    }

    /// Create the ship at its spawn point
    pub fn spawn(&mut self, world: &mut World<EntityKind>, bounds: &CameraBounds) -> EntityHandle {
        let (min, max) = self.movement_area(bounds);
        let position = utils::clamp_vec2(bounds.center + self.config.spawn_offset, min, max);
        let ship = world.spawn(EntitySpec::new(EntityKind::Player, self.config.template.clone()).with_position(position));
        self.ship = Some(ship);
        self.next_fire_time = world.now();
        debug!("Player ship {:?} at ({:.2}, {:.2})", ship, position.x, position.y);
        ship
    }

    /// Forget the ship, e.g. after its scene was torn down
    pub fn despawn(&mut self) {
        self.ship = None;
    }

    /// Current ship handle
    pub fn ship(&self) -> Option<EntityHandle> {
        self.ship
    }

    /// Area the ship may move in: the view shrunk by the padding
    pub fn movement_area(&self, bounds: &CameraBounds) -> (Vec2, Vec2) {
        let (min, max) = (bounds.min(-self.config.padding), bounds.max(-self.config.padding));
        // A padding wider than the view pins the ship to the center
        (
            Vec2::new(min.x.min(bounds.center.x), min.y.min(bounds.center.y)),
            Vec2::new(max.x.max(bounds.center.x), max.y.max(bounds.center.y)),
        )
    }

    /// Move the ship and fire if the cooldown allows. Returns a new laser.
    pub fn update(
        &mut self,
        input: PlayerInput,
        delta_time: f32,
        world: &mut World<EntityKind>,
        bounds: &CameraBounds,
    ) -> Option<EntityHandle> {
        let ship = self.ship?;
        let (min, max) = self.movement_area(bounds);
        let axis = Vec2::new(input.axis.x.clamp(-1.0, 1.0), input.axis.y.clamp(-1.0, 1.0));

        let Some(record) = world.get_mut(ship) else {
            self.ship = None;
            return None;
        };
        let moved = record.transform.position + axis * self.config.speed * delta_time;
        record.transform.position = utils::clamp_vec2(moved, min, max);
        let muzzle = record.transform;

        let now = world.now();
        if !input.fire || now < self.next_fire_time {
            return None;
        }
        self.next_fire_time = now + self.config.fire_rate_secs;

        let Some(template) = self.laser.template.clone() else {
            warn!("Laser template is not configured; shot skipped");
            return None;
        };
        let laser = world.spawn(
            EntitySpec::new(EntityKind::Laser, template)
                .with_position(muzzle.position)
                .with_rotation(muzzle.rotation_degrees)
                .with_velocity(muzzle.facing() * self.laser.speed)
                .with_lifetime(self.laser.lifetime_secs),
        );
        Some(laser)
    }
}
