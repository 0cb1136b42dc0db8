//! Movement component for entities that drift or spin

use crate::foundation::math::Vec2;

/// Linear and angular velocity integrated by [`crate::ecs::World::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement2D {
    /// Linear velocity in units per second
    pub velocity: Vec2,
    /// Angular velocity in degrees per second
    pub angular_velocity: f32,
}

impl Movement2D {
    /// Stationary movement
    pub fn still() -> Self {
        Self {
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
        }
    }

    /// Whether integrating this movement changes nothing
    pub fn is_still(&self) -> bool {
        self.velocity.norm_squared() <= f32::EPSILON && self.angular_velocity.abs() <= f32::EPSILON
    }
}

impl Default for Movement2D {
    fn default() -> Self {
        Self::still()
    }
}
