//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Letterbox bars around the board
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const BOARD: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const LAUNCH_PAD: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
    pub const PEG: [f32; 4] = [0.6, 0.6, 0.6, 1.0];
    pub const COIN_FACE: [f32; 4] = [0.753, 0.753, 0.753, 1.0];
    pub const COIN_RIM: [f32; 4] = [0.941, 0.941, 0.941, 1.0];
    pub const COIN_STRIPE: [f32; 4] = [0.627, 0.627, 0.627, 1.0];
    pub const AIM_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
    pub const TRAJECTORY: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
