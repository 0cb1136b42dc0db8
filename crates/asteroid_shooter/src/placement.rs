//! Random placement inside and around the visible play area
//!
//! All functions are pure in the bounds and draw from an injected random
//! source, so seeded tests are deterministic.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shooter_engine::foundation::math::Vec2;

/// Fraction of the half extents used for inside placement
pub const INSIDE_INSET: f32 = 0.8;

/// Orthographic camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Half of the visible height in world units
    pub half_height: f32,
    /// Width divided by height
    pub aspect: f32,
    /// Camera position in world space
    pub origin: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            half_height: 5.0,
            aspect: 16.0 / 9.0,
            origin: Vec2::zeros(),
        }
    }
}

/// Visible area as center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    /// Center of the view
    pub center: Vec2,
    /// Half width and half height
    pub half_extents: Vec2,
}

/// Screen edge used for hostile placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Above the view
    Top,
    /// Right of the view
    Right,
    /// Below the view
    Bottom,
    /// Left of the view
    Left,
}

impl Edge {
    /// All edges in sampling order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

impl CameraBounds {
    /// Bounds seen through `viewport`
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            center: viewport.origin,
            half_extents: Vec2::new(viewport.half_height * viewport.aspect, viewport.half_height),
        }
    }

    /// Lowest corner, grown by `margin` (shrunk when negative)
    pub fn min(&self, margin: f32) -> Vec2 {
        self.center - self.half_extents - Vec2::repeat(margin)
    }

    /// Highest corner, grown by `margin` (shrunk when negative)
    pub fn max(&self, margin: f32) -> Vec2 {
        self.center + self.half_extents + Vec2::repeat(margin)
    }

    /// Whether `point` lies within the bounds grown by `margin`
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let (min, max) = (self.min(margin), self.max(margin));
        (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y)
    }
}

/// Uniform sample in `[lo, hi]`, collapsing to the midpoint of an empty or
/// unbounded range
fn sample_span<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi && (hi - lo).is_finite() {
        rng.gen_range(lo..=hi)
    } else {
        let mid = lo * 0.5 + hi * 0.5;
        if mid.is_finite() {
            mid
        } else {
            0.0
        }
    }
}

/// Random point in the inner 80% of the view, used for collectibles
pub fn random_point_inside<R: Rng + ?Sized>(bounds: &CameraBounds, rng: &mut R) -> Vec2 {
    let reach = bounds.half_extents * INSIDE_INSET;
    Vec2::new(
        sample_span(rng, bounds.center.x - reach.x, bounds.center.x + reach.x),
        sample_span(rng, bounds.center.y - reach.y, bounds.center.y + reach.y),
    )
}

/// Random point just outside one of the four edges, used for hostiles.
///
/// The coordinate along the edge is narrowed by `padding` on both ends; the
/// coordinate across it sits `padding` beyond the view.
pub fn random_point_on_edge<R: Rng + ?Sized>(bounds: &CameraBounds, padding: f32, rng: &mut R) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
    let (c, e) = (bounds.center, bounds.half_extents);
    let along_x = |rng: &mut R| sample_span(rng, c.x - e.x + padding, c.x + e.x - padding);
    let along_y = |rng: &mut R| sample_span(rng, c.y - e.y + padding, c.y + e.y - padding);

    let point = match edge {
        Edge::Top => Vec2::new(along_x(rng), c.y + e.y + padding),
        Edge::Right => Vec2::new(c.x + e.x + padding, along_y(rng)),
        Edge::Bottom => Vec2::new(along_x(rng), c.y - e.y - padding),
        Edge::Left => Vec2::new(c.x - e.x - padding, along_y(rng)),
    };
    (edge, point)
}

/// Uniform rotation in `[0, 360)` degrees
pub fn random_rotation_degrees<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..360.0)
}
