//! Timed self-destruction

/// Destroys its entity once `duration` seconds of world time have passed.
/// A duration of zero or less never expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    /// World time of the spawn, in seconds
    pub created_at: f32,
    /// Seconds the entity lives
    pub duration: f32,
}

impl Lifetime {
    /// Lifetime starting at `created_at`
    pub fn new(created_at: f32, duration: f32) -> Self {
        Self {
            created_at,
            duration,
        }
    }

    /// Whether the lifetime never runs out
    pub fn is_infinite(&self) -> bool {
        self.duration <= 0.0
    }

    /// World time at which the entity is destroyed
    pub fn expires_at(&self) -> Option<f32> {
        (!self.is_infinite()).then(|| self.created_at + self.duration)
    }

    /// Whether `now` is at or past the expiry time
    pub fn is_expired(&self, now: f32) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }

    /// Seconds left, infinite for lifetimes that never expire
    pub fn remaining(&self, now: f32) -> f32 {
        self.expires_at().map_or(f32::INFINITY, |at| (at - now).max(0.0))
    }
}
