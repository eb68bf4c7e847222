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
    use crate::sim::PipeTheme;

    pub const SKY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const BIRD: [f32; 4] = [0.98, 0.80, 0.18, 1.0];
    pub const BIRD_WING: [f32; 4] = [0.95, 0.55, 0.15, 1.0];
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.05, 0.05, 0.05, 1.0];
    pub const PROGRESS_TRACK: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const PROGRESS_FILL: [f32; 4] = [1.0, 0.85, 0.2, 0.9];
    pub const PAUSE_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.4];
    pub const PAUSE_ICON: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const GAME_OVER_TINT: [f32; 4] = [0.6, 0.05, 0.05, 0.35];

    /// (body, cap) colors for a pipe theme
    pub fn pipe(theme: PipeTheme) -> ([f32; 4], [f32; 4]) {
        match theme {
            PipeTheme::Brick => ([0.70, 0.27, 0.18, 1.0], [0.55, 0.20, 0.13, 1.0]),
            PipeTheme::Bamboo => ([0.45, 0.70, 0.25, 1.0], [0.33, 0.55, 0.17, 1.0]),
            PipeTheme::Wood => ([0.55, 0.38, 0.22, 1.0], [0.42, 0.28, 0.15, 1.0]),
            PipeTheme::Stone => ([0.55, 0.56, 0.58, 1.0], [0.40, 0.41, 0.44, 1.0]),
        }
    }
}
