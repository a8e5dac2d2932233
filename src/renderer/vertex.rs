//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas pixels with an RGBA color
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
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Palettes for both games
pub mod colors {
    pub mod runner {
        pub const BACKGROUND: [f32; 4] = [0.925, 0.941, 0.945, 1.0];
        pub const BALL: [f32; 4] = [0.204, 0.596, 0.859, 1.0];
        /// Jump and slide obstacles
        pub const OBSTACLE: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
        pub const BREAKABLE: [f32; 4] = [0.906, 0.298, 0.235, 1.0];
        pub const MOVING: [f32; 4] = [0.608, 0.349, 0.714, 1.0];
        pub const RAMP: [f32; 4] = [0.953, 0.612, 0.071, 1.0];
        pub const WALL: [f32; 4] = [0.204, 0.286, 0.369, 1.0];
        pub const BOUNCE_PAD: [f32; 4] = [0.180, 0.8, 0.443, 1.0];
    }

    pub mod paddle {
        pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
        pub const FOREGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    }
}
