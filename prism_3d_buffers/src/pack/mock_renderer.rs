//! Recording renderer for unit tests (no GPU required)
//!
//! Captures every draw call with owned copies of the pack slices so tests
//! can assert on packed vertex, color, and index contents.

use crate::pack::renderer::{GeometryRenderer, PackDraw};

/// One captured draw call
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub textures: Vec<f32>,
    pub colors: Vec<f32>,
    pub indices: Vec<u16>,
}

impl DrawRecord {
    /// Number of elements in the captured draw
    pub fn element_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Alpha channel of the element at `offset`
    pub fn alpha_at(&self, offset: usize) -> f32 {
        self.colors[offset * 4 + 3]
    }
}

/// Renderer that records draws instead of rendering
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub draws: Vec<DrawRecord>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded draw calls
    pub fn draw_count(&self) -> usize {
        self.draws.len()
    }
}

impl GeometryRenderer for RecordingRenderer {
    fn draw_pack(&mut self, draw: PackDraw<'_>) {
        self.draws.push(DrawRecord {
            vertices: draw.vertices.to_vec(),
            normals: draw.normals.to_vec(),
            textures: draw.textures.to_vec(),
            colors: draw.colors.to_vec(),
            indices: draw.indices.to_vec(),
        });
    }
}
