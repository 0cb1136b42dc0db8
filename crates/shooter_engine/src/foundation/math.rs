//! 2D math aliases and helpers
//!
//! Angles are in degrees throughout the gameplay layer; rotation 0 points
//! along +Y.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle in degrees into `[0, 360)`
    pub fn wrap_degrees(degrees: f32) -> f32 {
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Unit facing vector for a rotation in degrees.
    ///
    /// Rotation 0 faces +Y ("up"); positive rotation turns counter-clockwise,
    /// matching a 2D sprite whose nose points up.
    pub fn facing_from_degrees(degrees: f32) -> Vec2 {
        let radians = deg_to_rad(degrees);
        Vec2::new(-radians.sin(), radians.cos())
    }

    /// Clamp each component of `value` into `[min, max]`
    pub fn clamp_vec2(value: Vec2, min: Vec2, max: Vec2) -> Vec2 {
        Vec2::new(value.x.clamp(min.x, max.x), value.y.clamp(min.y, max.y))
    }
}
