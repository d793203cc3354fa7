//! Renderer seam for drawing packed buffers.
//!
//! The manager iterates its packs in insertion order and hands each
//! non-empty pack to a [`GeometryRenderer`]. The renderer receives the
//! pack's used slices as one [`PackDraw`] view; what it does with them
//! (GL upload, Vulkan command recording, console output) is its business.

/// One pack's worth of draw data
///
/// All slices are truncated to the pack's used lengths: `vertices` and
/// `normals` hold 3 floats per element, `textures` 2, `colors` 4, and
/// `indices` one 16-bit vertex index per slot.
pub struct PackDraw<'a> {
    pub vertices: &'a [f32],
    pub normals: &'a [f32],
    pub textures: &'a [f32],
    pub colors: &'a [f32],
    pub indices: &'a [u16],
}

impl PackDraw<'_> {
    /// Number of elements in this draw
    pub fn element_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of indices in this draw
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Vertex data as raw bytes, for byte-oriented upload paths
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Index data as raw bytes, for byte-oriented upload paths
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices)
    }
}

/// Draw-call dispatcher trait
///
/// Implemented by backend-specific renderers; the crate ships a recording
/// mock for tests and the demo provides a console implementation.
pub trait GeometryRenderer {
    /// Draw one pack
    ///
    /// # Arguments
    ///
    /// * `draw` - The pack's used buffer slices
    fn draw_pack(&mut self, draw: PackDraw<'_>);
}
