//! Scene assembly
//!
//! Turns a `GameState` into one triangle list in board coordinates, drawn
//! back to front: board, launch pad, gates, pegs, aim preview, coin,
//! particles.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::rgb_hex;
use crate::settings::Settings;
use crate::sim::{Coin, GamePhase, GameState, Gate, Particle, launch_velocity, predict_trajectory};

const GATE_LABEL_HEIGHT: f32 = 14.0;
const GATE_LABEL_OFFSET: f32 = 30.0;
const SCORE_TEXT_HEIGHT: f32 = 17.0;
const HALO_ALPHA: f32 = 0.2;

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Build the full frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let halos = settings.halos();
    let mut v = Vec::with_capacity(8192);

    v.extend(shapes::rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        colors::BOARD,
    ));

    launch_pad(&mut v, segments, halos);

    for gate in &state.gates {
        gate_shapes(&mut v, gate, settings.effective_flash());
    }

    for peg in &state.pegs {
        if halos {
            v.extend(shapes::circle(
                peg.pos,
                peg.radius + 4.0,
                with_alpha(colors::PEG, HALO_ALPHA),
                segments,
            ));
        }
        v.extend(shapes::circle(peg.pos, peg.radius, colors::PEG, segments));
    }

    if state.phase == GamePhase::Aiming {
        if let Some(aim) = state.aim {
            aim_preview(&mut v, state.coin.pos, aim, settings.show_trajectory);
        }
    }

    if state.coin.active || matches!(state.phase, GamePhase::Ready | GamePhase::Aiming) {
        coin(&mut v, &state.coin, segments, halos);
    }

    for p in state.particles.iter().take(settings.max_particles()) {
        particle(&mut v, p, segments);
    }

    v
}

fn launch_pad(v: &mut Vec<Vertex>, segments: u32, halos: bool) {
    let r = LAUNCH_PAD_RADIUS;
    if halos {
        v.extend(shapes::ring(
            LAUNCH_POS,
            r - 4.0,
            r + 4.0,
            with_alpha(colors::LAUNCH_PAD, HALO_ALPHA),
            segments,
        ));
    }
    v.extend(shapes::ring(LAUNCH_POS, r - 1.0, r + 1.0, colors::LAUNCH_PAD, segments));
    v.extend(shapes::ring(LAUNCH_POS, 4.0, 6.0, colors::LAUNCH_PAD, segments));
}

fn gate_shapes(v: &mut Vec<Vertex>, gate: &Gate, flash_enabled: bool) {
    let min = Vec2::new(gate.x, gate.y);
    let size = Vec2::new(gate.width, gate.height);
    let base = rgb_hex(gate.color, 1.0);
    let flashing = flash_enabled && gate.flash > 0;

    let label_color = if flashing {
        let fade = gate.flash as f32 / GATE_FLASH_FRAMES as f32;
        v.extend(shapes::rect(min, size, with_alpha(colors::FLASH, 0.25 * fade)));
        v.extend(shapes::rect_outline(min, size, 4.0, colors::FLASH));
        colors::FLASH
    } else {
        v.extend(shapes::rect_outline(min, size, 2.0, base));
        base
    };

    v.extend(shapes::text(
        &gate.points.to_string(),
        Vec2::new(gate.center_x(), gate.y + GATE_LABEL_OFFSET),
        GATE_LABEL_HEIGHT,
        label_color,
    ));
}

fn aim_preview(v: &mut Vec<Vertex>, origin: Vec2, aim: Vec2, trajectory: bool) {
    v.extend(shapes::segment(origin, aim, 2.0, colors::AIM_LINE));

    if trajectory {
        let path = predict_trajectory(origin, launch_velocity(origin, aim));
        v.extend(shapes::dashed_polyline(&path, 2.0, 5.0, 2.0, colors::TRAJECTORY));
    }
}

fn coin(v: &mut Vec<Vertex>, coin: &Coin, segments: u32, halos: bool) {
    let r = coin.radius;
    if halos {
        v.extend(shapes::circle(
            coin.pos,
            r + 5.0,
            with_alpha(colors::FLASH, HALO_ALPHA * 0.75),
            segments,
        ));
    }
    v.extend(shapes::circle(coin.pos, r, colors::COIN_FACE, segments));
    v.extend(shapes::ring(coin.pos, r - 1.0, r + 1.0, colors::COIN_RIM, segments));

    // Vertical diameter, turned with the coin
    let (sin, cos) = coin.rotation.sin_cos();
    let half = Vec2::new(r * sin, -r * cos);
    v.extend(shapes::segment(
        coin.pos - half,
        coin.pos + half,
        1.0,
        colors::COIN_STRIPE,
    ));
}

fn particle(v: &mut Vec<Vertex>, p: &Particle, segments: u32) {
    let alpha = (p.life as f32 / DEBRIS_LIFE as f32).min(1.0);
    let color = rgb_hex(p.color, alpha);

    match p.label {
        Some(points) => v.extend(shapes::text(
            &format!("+{}", points),
            p.pos,
            SCORE_TEXT_HEIGHT,
            color,
        )),
        None => v.extend(shapes::circle(p.pos, p.size, color, (segments / 2).max(6))),
    }
}
