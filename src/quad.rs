//! The hard-coded quad drawn by the program.

use glam::Vec2;
use glow::HasContext;

use crate::abs::Vertex;

/// A vertex carrying only a 2D clip-space position, bound to attribute location 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: Vec2,
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }
}

impl Vertex for QuadVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                std::mem::size_of::<QuadVertex>() as i32,
                0,
            );
        }
    }
}

pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new(-0.5, -0.5),
    QuadVertex::new(0.5, -0.5),
    QuadVertex::new(0.5, 0.5),
    QuadVertex::new(-0.5, 0.5),
];

/// Two counter-clockwise triangles covering the quad.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];
