//! Circular collision volumes
//!
//! Every collidable in the world is a circle: a body's own collision radius,
//! a ship's crystal attractor, the station's crystal collector.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Strict overlap test: touching circles do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }

    /// How far the two circles interpenetrate (<= 0 when apart)
    #[inline]
    pub fn penetration(&self, other: &Circle) -> f32 {
        self.radius + other.radius - self.center.distance(other.center)
    }

    /// Unit vector from `other` toward `self`
    ///
    /// Falls back to +X when the centers coincide.
    pub fn normal_from(&self, other: &Circle) -> Vec2 {
        let n = (self.center - other.center).normalize_or_zero();
        if n == Vec2::ZERO { Vec2::X } else { n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_touching() {
        let a = Circle::new(Vec2::ZERO, 4.0);
        let b = Circle::new(Vec2::new(7.0, 0.0), 4.0);
        assert!(a.overlaps(&b));
        assert!((a.penetration(&b) - 1.0).abs() < 1e-5);

        // Exactly touching is not an overlap
        let c = Circle::new(Vec2::new(8.0, 0.0), 4.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_normal_coincident_centers() {
        let a = Circle::new(Vec2::new(3.0, 3.0), 1.0);
        assert_eq!(a.normal_from(&a), Vec2::X);
    }

    #[test]
    fn test_normal_points_away_from_other() {
        let a = Circle::new(Vec2::new(0.0, 5.0), 1.0);
        let b = Circle::new(Vec2::ZERO, 1.0);
        let n = a.normal_from(&b);
        assert!((n - Vec2::Y).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, ar in 0.1f32..30.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, br in 0.1f32..30.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }
}
