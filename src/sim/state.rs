//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{generate_gates, generate_pegs};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Coin idle on the launch pad, waiting for a press
    Ready,
    /// Press held, pointer defines the aim target
    Aiming,
    /// Coin is in free flight
    Flying,
    /// All attempts used; only a restart leaves this phase
    GameOver,
}

/// Things that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Coin left the launch pad
    Launch,
    /// Coin hit a wall or a peg
    Bounce,
    /// Coin fell into a gate
    Scored { gate: usize, points: u32 },
    /// Coin fell off the bottom without entering a gate
    Miss,
    /// Last attempt resolved
    GameOver { final_score: u64 },
}

/// The coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual spin (radians)
    pub rotation: f32,
    pub radius: f32,
    /// True while in flight
    pub active: bool,
}

impl Coin {
    /// A fresh coin resting on the launch pad
    pub fn at_launch() -> Self {
        Self {
            pos: LAUNCH_POS,
            vel: Vec2::ZERO,
            rotation: 0.0,
            radius: COIN_RADIUS,
            active: false,
        }
    }
}

impl Default for Coin {
    fn default() -> Self {
        Self::at_launch()
    }
}

/// A static peg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

/// A scoring gate at the bottom of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top edge
    pub y: f32,
    pub height: f32,
    pub points: u32,
    /// 0xRRGGBB
    pub color: u32,
    /// Frames left to render highlighted
    pub flash: u32,
}

impl Gate {
    /// Whether `x` lies strictly inside the gate's horizontal span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub size: f32,
    /// Floating "+N" text instead of a debris dot
    pub label: Option<u32>,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    pub attempts: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub coin: Coin,
    pub pegs: Vec<Peg>,
    pub gates: Vec<Gate>,
    /// Aim target while aiming (board coordinates)
    pub aim: Option<Vec2>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let pegs = generate_pegs();
        let gates = generate_gates();
        log::debug!("Board generated: {} pegs, {} gates", pegs.len(), gates.len());

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            attempts: MAX_ATTEMPTS,
            phase: GamePhase::Ready,
            time_ticks: 0,
            coin: Coin::at_launch(),
            pegs,
            gates,
            aim: None,
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Start over: fresh score, attempts, coin and board
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed);
        log::info!("Session restarted with seed {}", seed);
    }

    /// Queue an event for the driver
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
