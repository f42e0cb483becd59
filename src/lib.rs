//! Coin Drop - A pachinko-style coin drop arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Frame driver gluing input snapshots to the simulation
//! - `input`: Pointer tracking sampled once per frame
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound effects for game events
//! - `settings`: Player preferences
//! - `autoplay`: Headless session runner for the native binary

pub mod audio;
pub mod autoplay;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameOutcome, HudValues, Session};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per tick; the game runs one tick per displayed frame.
pub mod consts {
    use glam::Vec2;

    /// Board dimensions (screen space, y grows downward)
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Downward acceleration added to vy every tick
    pub const GRAVITY: f32 = 0.3;
    /// Air resistance applied to both velocity components every tick
    pub const FRICTION: f32 = 0.995;
    /// Velocity retained after hitting a wall or peg
    pub const BOUNCE_FACTOR: f32 = 0.7;
    /// Coin spin per unit of horizontal velocity
    pub const ROTATION_FACTOR: f32 = 0.1;

    pub const COIN_RADIUS: f32 = 12.0;
    pub const PEG_RADIUS: f32 = 8.0;

    /// Where each new coin waits for launch
    pub const LAUNCH_POS: Vec2 = Vec2::new(CANVAS_WIDTH - 40.0, 60.0);
    /// Radius of the launch pad ring; presses inside it grab the coin
    pub const LAUNCH_PAD_RADIUS: f32 = 25.0;
    /// Drag distance (px) per unit of launch power
    pub const LAUNCH_POWER_DIVISOR: f32 = 10.0;
    pub const MAX_LAUNCH_POWER: f32 = 15.0;
    /// Total width of the random launch multiplier (+/- 5%)
    pub const LAUNCH_VARIANCE: f32 = 0.1;

    pub const MAX_ATTEMPTS: u32 = 10;

    /// Peg layout
    pub const PEG_ROWS: usize = 10;
    pub const PEGS_EVEN_ROW: usize = 7;
    pub const PEGS_ODD_ROW: usize = 6;
    pub const PEG_START_Y: f32 = 200.0;
    pub const PEG_ROW_SPACING: f32 = 55.0;
    /// Wall-to-peg margin: coin diameter + peg radius + 3px buffer
    pub const PEG_MARGIN: f32 = COIN_RADIUS * 2.0 + PEG_RADIUS + 3.0;

    /// Gate band at the bottom of the board
    pub const GATE_Y: f32 = CANVAS_HEIGHT - 50.0;
    pub const GATE_HEIGHT: f32 = 50.0;
    /// Gates are only checked once the coin is this far down
    pub const SCORING_THRESHOLD_Y: f32 = CANVAS_HEIGHT - 80.0;
    /// Frames a gate stays highlighted after scoring
    pub const GATE_FLASH_FRAMES: u32 = 60;

    /// Score burst
    pub const DEBRIS_COUNT: usize = 30;
    pub const DEBRIS_LIFE: u32 = 60;
    pub const SCORE_TEXT_LIFE: u32 = 80;
    /// Velocity kept per tick by the floating score text
    pub const SCORE_TEXT_DRAG: f32 = 0.95;

    /// Aim preview
    pub const TRAJECTORY_STEPS: usize = 150;
    pub const TRAJECTORY_SAMPLE_EVERY: usize = 3;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a 0xRRGGBB color to linear-ish RGBA floats
#[inline]
pub fn rgb_hex(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
