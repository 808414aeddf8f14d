//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::settings::Theme;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Scene colors for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub ball: [f32; 4],
    /// Ball color while pressed into the ground
    pub ball_contact: [f32; 4],
    pub ground: [f32; 4],
    /// Ground color while being dragged
    pub ground_active: [f32; 4],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: [0.02, 0.02, 0.05, 1.0],
                ball: [0.4, 0.7, 1.0, 1.0],
                ball_contact: [1.0, 0.6, 0.3, 1.0],
                ground: [0.3, 0.3, 0.4, 1.0],
                ground_active: [0.2, 0.8, 0.4, 1.0],
            },
            Theme::HighContrast => Self {
                background: [0.0, 0.0, 0.0, 1.0],
                ball: [1.0, 1.0, 1.0, 1.0],
                ball_contact: [1.0, 1.0, 0.0, 1.0],
                ground: [1.0, 1.0, 1.0, 1.0],
                ground_active: [0.0, 1.0, 1.0, 1.0],
            },
        }
    }
}
