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

/// `0xRRGGBB` plus alpha to an RGBA float color
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(0x0b0f21, 1.0);
    pub const GRID_LINE: [f32; 4] = rgb(0xffffff, 0.04);
    pub const APPLE: [f32; 4] = rgb(0xff4d5a, 1.0);
    pub const SNAKE_HEAD: [f32; 4] = rgb(0x7df7b0, 1.0);
    pub const SNAKE_BODY: [f32; 4] = rgb(0x49d187, 1.0);
    pub const OVERLAY: [f32; 4] = rgb(0x080a14, 0.55);
    pub const OVERLAY_TITLE: [f32; 4] = rgb(0xe9eef7, 1.0);
    pub const OVERLAY_HINT: [f32; 4] = rgb(0xa0b2ff, 1.0);
}
