//! 2D transform component

use crate::foundation::math::{utils, Vec2};

/// Position and rotation of an entity in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position in world units
    pub position: Vec2,
    /// Rotation in degrees, kept in `[0, 360)`
    pub rotation_degrees: f32,
}

impl Transform2D {
    /// Create a transform at `position` with `rotation_degrees`
    pub fn new(position: Vec2, rotation_degrees: f32) -> Self {
        Self {
            position,
            rotation_degrees: utils::wrap_degrees(rotation_degrees),
        }
    }

    /// Rotate by `degrees`, wrapping into `[0, 360)`
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation_degrees = utils::wrap_degrees(self.rotation_degrees + degrees);
    }

    /// Unit vector the entity is facing
    pub fn facing(&self) -> Vec2 {
        utils::facing_from_degrees(self.rotation_degrees)
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::new(Vec2::zeros(), 0.0)
    }
}
