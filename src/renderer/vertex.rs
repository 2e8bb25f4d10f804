//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (pixels) and straight-alpha color
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

/// `0xRRGGBB` plus alpha to a float color
pub const fn rgb_hex(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color, different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::rgb_hex;

    pub const BACKGROUND: [f32; 4] = rgb_hex(0x020203, 1.0);
    pub const PLAYER_CORE: [f32; 4] = rgb_hex(0xffffff, 1.0);
    pub const PLAYER_HALO: [f32; 4] = rgb_hex(0xb8c6ff, 0.0);
    pub const THOUGHT: [f32; 4] = rgb_hex(0xff6b6b, 1.0);
    pub const BAR_BACK: [f32; 4] = rgb_hex(0x333333, 1.0);
    pub const BAR_FILL: [f32; 4] = rgb_hex(0x7bed9f, 1.0);
    pub const BAR_OUTLINE: [f32; 4] = rgb_hex(0xffffff, 1.0);
    pub const FLASH: [f32; 4] = rgb_hex(0xff0000, 1.0);
    pub const SHADOW: [f32; 4] = rgb_hex(0x000000, 1.0);
    pub const CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb_hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        let c = rgb_hex(0x7bed9f, 0.5);
        assert!((c[0] - 123.0 / 255.0).abs() < 1e-6);
        assert!((c[1] - 237.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 159.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[3], 0.5);
    }

    #[test]
    fn test_vertex_layout_is_tight() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
