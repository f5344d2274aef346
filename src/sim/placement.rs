//! Rejection sampling for non-overlapping spawn points
//!
//! Draws uniform points inside the arena (inset by a margin) until one is far
//! enough from everything already placed. The number of draws is capped; on
//! exhaustion the best candidate seen so far is returned and flagged.

use glam::Vec2;
use rand::Rng;

use crate::consts::{MAX_PLACEMENT_ATTEMPTS, PLACEMENT_MARGIN};

/// Axis-aligned rectangle on the ground plane (x, z)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Square centered on the origin
    pub fn square(half_extent: f32) -> Self {
        Self {
            min: Vec2::splat(-half_extent),
            max: Vec2::splat(half_extent),
        }
    }

    /// Inset each side by `margin`, collapsing to the center if too small
    pub fn shrink(&self, margin: f32) -> Self {
        let center = (self.min + self.max) * 0.5;
        let min = (self.min + Vec2::splat(margin)).min(center);
        let max = (self.max - Vec2::splat(margin)).max(center);
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Result of a placement query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub point: Vec2,
    /// Attempt cap was hit; `point` may violate the requested spacing
    pub exhausted: bool,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Smallest distance from `p` to any existing point (infinite if none)
fn clearance(p: Vec2, existing: &[Vec2]) -> f32 {
    existing
        .iter()
        .map(|e| p.distance(*e))
        .fold(f32::INFINITY, f32::min)
}

/// Pick a point inside `bounds` (shrunk by the placement margin) at least
/// `min_distance` from every point in `existing`.
pub fn sample<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[Vec2],
    min_distance: f32,
    bounds: Bounds,
) -> Placement {
    sample_with_limit(rng, existing, min_distance, bounds, MAX_PLACEMENT_ATTEMPTS)
}

/// [`sample`] with an explicit attempt cap
pub fn sample_with_limit<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[Vec2],
    min_distance: f32,
    bounds: Bounds,
    max_attempts: u32,
) -> Placement {
    let area = bounds.shrink(PLACEMENT_MARGIN);
    let mut best = (area.min + area.max) * 0.5;
    let mut best_clearance = f32::NEG_INFINITY;

    for _ in 0..max_attempts.max(1) {
        let p = Vec2::new(
            uniform(rng, area.min.x, area.max.x),
            uniform(rng, area.min.y, area.max.y),
        );
        let c = clearance(p, existing);
        if c >= min_distance {
            return Placement {
                point: p,
                exhausted: false,
            };
        }
        if c > best_clearance {
            best = p;
            best_clearance = c;
        }
    }

    log::warn!(
        "Placement exhausted after {} attempts (wanted {:.2}, best {:.2})",
        max_attempts.max(1),
        min_distance,
        best_clearance
    );
    Placement {
        point: best,
        exhausted: true,
    }
}
