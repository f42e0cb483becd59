//! Frame driver
//!
//! One `frame()` per animation-frame callback: sample input once, tick once,
//! hand back the events for audio and HUD. The host stops rescheduling when
//! `keep_running` goes false and only `restart` brings the loop back.

use crate::input::PointerTracker;
use crate::sim::{GameEvent, GameState, tick};

/// What a frame produced
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<GameEvent>,
    /// False once the game is over; the host should stop the loop
    pub keep_running: bool,
}

/// Read-only display values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudValues {
    pub score: u64,
    pub attempts: u32,
    /// Set once the game is over
    pub final_score: Option<u64>,
}

/// A running game session
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub pointer: PointerTracker,
    frames: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(seed),
            pointer: PointerTracker::new(),
            frames: 0,
        }
    }

    /// Run exactly one simulation tick
    pub fn frame(&mut self) -> FrameOutcome {
        let input = self.pointer.snapshot();
        tick(&mut self.state, &input);
        self.frames += 1;

        FrameOutcome {
            events: self.state.drain_events(),
            keep_running: !self.state.is_game_over(),
        }
    }

    pub fn hud(&self) -> HudValues {
        HudValues {
            score: self.state.score,
            attempts: self.state.attempts,
            final_score: self.state.is_game_over().then_some(self.state.score),
        }
    }

    /// Frames run since the session (or last restart) began
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Reset everything; only honored once the game is over
    pub fn restart(&mut self, seed: u64) -> bool {
        if !self.state.is_game_over() {
            log::warn!("Restart ignored: game still in progress");
            return false;
        }
        self.state.restart(seed);
        self.pointer = PointerTracker::new();
        self.frames = 0;
        true
    }
}
