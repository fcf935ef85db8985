//! Collision detection and response between circular bodies
//!
//! Detection is a plain circle-circle test. Response is weighted: each side of
//! a pair gets a restitution weight deciding how much of the separation (and
//! of the velocity exchange) it absorbs. A weight of 0 makes that side
//! immovable.

use glam::Vec2;

use super::circle::Circle;
use super::entity::Body;

/// How a detected overlap is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reposition {
    /// Detect only, leave both bodies untouched
    #[default]
    None,
    /// Push the bodies apart, keep velocities
    Move,
    /// Push apart and exchange normal velocity
    Bounce,
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal, pointing from the second volume toward the first
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check two circles for overlap, reporting the contact normal
pub fn circle_collision(a: &Circle, b: &Circle) -> CollisionResult {
    if !a.overlaps(b) {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: a.normal_from(b),
        penetration: a.penetration(b),
    }
}

/// Test `a` against `b` and resolve the overlap according to `mode`
///
/// `weight_a`/`weight_b` split the response between the two bodies.
/// `separation_bias` is extra distance added to the push so the pair does not
/// register again on the very next frame. Returns whether the bodies
/// overlapped.
pub fn collide(
    a: &mut Body,
    b: &mut Body,
    mode: Reposition,
    weight_a: f32,
    weight_b: f32,
    separation_bias: f32,
) -> bool {
    let result = circle_collision(&a.circle(), &b.circle());
    if !result.hit {
        return false;
    }
    if mode == Reposition::None {
        return true;
    }

    let n = result.normal;
    let total = weight_a + weight_b;
    if total > 0.0 {
        let push = result.penetration + separation_bias;
        a.pos += n * push * (weight_a / total);
        b.pos -= n * push * (weight_b / total);
    }

    if mode == Reposition::Bounce {
        // Only exchange velocity while approaching
        let closing = (a.vel - b.vel).dot(n);
        if closing < 0.0 {
            a.vel -= n * closing * 2.0 * weight_a;
            b.vel += n * closing * 2.0 * weight_b;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;
    use proptest::prelude::*;

    fn body(id: u32, x: f32, y: f32, r: f32) -> Body {
        Body::new(EntityId(id), r, 0).at(Vec2::new(x, y))
    }

    #[test]
    fn test_miss_leaves_bodies_alone() {
        let mut a = body(1, 0.0, 0.0, 4.0);
        let mut b = body(2, 20.0, 0.0, 4.0);
        assert!(!collide(&mut a, &mut b, Reposition::Bounce, 0.5, 0.5, 0.0));
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.pos, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_detect_only() {
        let mut a = body(1, 0.0, 0.0, 4.0);
        let mut b = body(2, 6.0, 0.0, 4.0);
        assert!(collide(&mut a, &mut b, Reposition::None, 0.5, 0.5, 0.0));
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.pos, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_symmetric_bounce_separates_evenly() {
        let mut a = body(1, 0.0, 0.0, 4.0);
        let mut b = body(2, 6.0, 0.0, 4.0);
        a.vel = Vec2::new(10.0, 0.0);
        b.vel = Vec2::new(-10.0, 0.0);

        assert!(collide(&mut a, &mut b, Reposition::Bounce, 0.5, 0.5, 0.0));

        // Penetration 2.0 split evenly
        assert!((a.pos.x - (-1.0)).abs() < 1e-5);
        assert!((b.pos.x - 7.0).abs() < 1e-5);
        // Equal weights swap normal velocity
        assert!((a.vel.x - (-10.0)).abs() < 1e-4);
        assert!((b.vel.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_weight_is_immovable() {
        let mut bullet = body(1, 0.0, 0.0, 2.0);
        let mut rock = body(2, 5.0, 0.0, 4.0);
        bullet.vel = Vec2::new(100.0, 0.0);

        assert!(collide(&mut bullet, &mut rock, Reposition::Bounce, 1.0, 0.0, 0.01));

        assert_eq!(rock.pos, Vec2::new(5.0, 0.0));
        assert_eq!(rock.vel, Vec2::ZERO);
        // Bullet pushed out by penetration (1.0) plus bias
        assert!((bullet.pos.x - (-1.01)).abs() < 1e-4);
        // Full weight reflects
        assert!((bullet.vel.x - (-100.0)).abs() < 1e-3);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let mut a = body(1, 0.0, 0.0, 4.0);
        let mut b = body(2, 6.0, 0.0, 4.0);
        a.vel = Vec2::new(-5.0, 0.0);
        b.vel = Vec2::new(5.0, 0.0);
        collide(&mut a, &mut b, Reposition::Bounce, 0.5, 0.5, 0.0);
        assert_eq!(a.vel, Vec2::new(-5.0, 0.0));
        assert_eq!(b.vel, Vec2::new(5.0, 0.0));
    }

    proptest! {
        #[test]
        fn move_resolves_overlap(
            bx in -7.0f32..7.0, by in -7.0f32..7.0,
            wa in 0.1f32..1.0, wb in 0.1f32..1.0,
        ) {
            let mut a = body(1, 0.0, 0.0, 4.0);
            let mut b = body(2, bx, by, 4.0);
            if collide(&mut a, &mut b, Reposition::Move, wa, wb, 0.01) {
                prop_assert!(!a.circle().overlaps(&b.circle()));
            }
        }
    }
}
