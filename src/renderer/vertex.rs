//! Vertex type for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with clip-space position and color
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

    /// Size of one vertex in bytes, for buffer layouts on the host side
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Clear color used by hosts
pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
