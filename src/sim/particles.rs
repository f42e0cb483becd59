//! Score burst particles (cosmetic only)

use glam::Vec2;
use rand::Rng;

use super::state::Particle;
use crate::consts::*;

/// Color of the floating score text
const SCORE_TEXT_COLOR: u32 = 0xffffff;

/// Spawn debris plus a floating "+N" label at `pos`
pub fn spawn_score_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: u32,
    points: u32,
) {
    particles.reserve(DEBRIS_COUNT + 1);
    for _ in 0..DEBRIS_COUNT {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 5.0,
            (rng.random::<f32>() - 0.5) * 5.0 - 2.0,
        );
        particles.push(Particle {
            pos,
            vel,
            life: DEBRIS_LIFE,
            color,
            size: rng.random::<f32>() * 3.0 + 1.0,
            label: None,
        });
    }

    particles.push(Particle {
        pos: pos - Vec2::new(0.0, 10.0),
        vel: Vec2::new(0.0, -1.0),
        life: SCORE_TEXT_LIFE,
        color: SCORE_TEXT_COLOR,
        size: 0.0,
        label: Some(points),
    });
}

/// Advance every particle one tick and drop the expired ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.life = p.life.saturating_sub(1);
        p.pos += p.vel;
        if p.label.is_some() {
            p.vel *= SCORE_TEXT_DRAG;
        }
    }
    particles.retain(|p| p.life > 0);
}
