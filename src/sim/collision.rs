//! Collision detection and response
//!
//! Coin-vs-peg is circle-circle; coin-vs-wall is a clamp against the board
//! edges. There is no bottom wall: the bottom of the board is the scoring band.

use glam::Vec2;

use super::state::{Coin, Gate, Peg};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal, pointing from the peg toward the coin
    pub normal: Vec2,
    /// Overlap depth (for position correction)
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

/// Which walls the coin touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    /// Left or right wall
    pub side: bool,
    pub top: bool,
}

/// Check collision between the coin and a peg
pub fn coin_peg_collision(coin_pos: Vec2, coin_radius: f32, peg: &Peg) -> CollisionResult {
    let delta = coin_pos - peg.pos;
    let distance = delta.length();
    let min_distance = coin_radius + peg.radius;

    if distance >= min_distance {
        return CollisionResult::miss();
    }

    // Dead-center hit has no defined normal; push straight up
    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::NEG_Y
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: min_distance - distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Push the coin out of a peg and bounce it
///
/// Returns true if the coin was touching the peg.
pub fn resolve_peg_collision(coin: &mut Coin, peg: &Peg, bounce: f32) -> bool {
    let result = coin_peg_collision(coin.pos, coin.radius, peg);
    if !result.hit {
        return false;
    }

    coin.pos += result.normal * result.penetration;
    coin.vel = reflect_velocity(coin.vel, result.normal) * bounce;
    true
}

/// Bounce the coin off the left, right and top walls
pub fn resolve_wall_collisions(coin: &mut Coin, width: f32, bounce: f32) -> WallHits {
    let mut hits = WallHits::default();
    let r = coin.radius;

    if coin.pos.x + r > width || coin.pos.x - r < 0.0 {
        coin.vel.x *= -bounce;
        coin.pos.x = coin.pos.x.clamp(r, width - r);
        hits.side = true;
    }

    if coin.pos.y - r < 0.0 {
        coin.vel.y *= -bounce;
        coin.pos.y = r;
        hits.top = true;
    }

    hits
}

/// Index of the first gate (in list order) whose span contains `x`
pub fn gate_at(gates: &[Gate], x: f32) -> Option<usize> {
    gates.iter().position(|g| g.spans(x))
}
