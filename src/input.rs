//! Pointer tracking
//!
//! Browser event handlers only record into a `PointerTracker`; the frame loop
//! turns it into one immutable `TickInput` per frame, so the simulation never
//! sees input change mid-tick.

use glam::Vec2;

use crate::sim::TickInput;

/// Accumulates pointer events between frames
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    /// Last known pointer position (board coordinates)
    position: Option<Vec2>,
    /// Edges, cleared by `snapshot`
    press_at: Option<Vec2>,
    released: bool,
    cancelled: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.press_at = Some(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.position = Some(pos);
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.released = true;
    }

    /// The browser took the pointer away mid-gesture
    pub fn pointer_cancel(&mut self) {
        self.cancelled = true;
    }

    /// Sample the input for this frame and clear the one-shot edges
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            pointer: self.position,
            press_at: self.press_at.take(),
            released: std::mem::take(&mut self.released),
            cancelled: std::mem::take(&mut self.cancelled),
        }
    }
}
