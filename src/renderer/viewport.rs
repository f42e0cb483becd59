//! Letterboxed mapping between board and surface coordinates
//!
//! The board keeps its aspect ratio and is centered on the surface. The same
//! mapping runs backwards for pointer events.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in pixels
    pub surface: Vec2,
    /// Top-left corner of the board on the surface
    pub offset: Vec2,
    /// Surface pixels per board unit
    pub scale: f32,
}

impl Viewport {
    /// Fit the board inside a `width` x `height` surface
    pub fn fit(width: f32, height: f32) -> Self {
        let surface = Vec2::new(width.max(1.0), height.max(1.0));
        let board = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let scale = (surface.x / board.x).min(surface.y / board.y);
        let offset = (surface - board * scale) / 2.0;
        Self {
            surface,
            offset,
            scale,
        }
    }

    pub fn board_to_surface(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    pub fn surface_to_board(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }

    /// Board coordinates (y down) to clip space (y up)
    pub fn board_to_ndc(&self, p: Vec2) -> Vec2 {
        let s = self.board_to_surface(p) / self.surface;
        Vec2::new(s.x * 2.0 - 1.0, 1.0 - s.y * 2.0)
    }
}
