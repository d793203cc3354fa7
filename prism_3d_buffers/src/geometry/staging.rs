//! Staging scratch state for the next placement.
//!
//! The staging setters only populate this session object; no pack or map
//! mutation happens until `set_indices` consumes it. Staged arrays are
//! released after placement so they cannot leak into the next geometry;
//! the staged color persists (visibility restore reads its alpha).

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Which staging slots have been populated since the last placement
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StagedParts: u8 {
        const VERTICES = 1 << 0;
        const NORMALS = 1 << 1;
        const TEXTURES = 1 << 2;
        const COLOR = 1 << 3;
    }
}

/// Scratch state consumed by the next `set_indices` call
#[derive(Debug, Default)]
pub struct GeometryStaging {
    vertices: Vec<f32>,
    vertices_length: usize,
    normals: Vec<f32>,
    normals_length: usize,
    textures: Vec<f32>,
    color: Color,
    one_normal: bool,
    elements_length: usize,
    parts: StagedParts,
}

impl Default for StagedParts {
    fn default() -> Self {
        StagedParts::empty()
    }
}

impl GeometryStaging {
    /// Create empty staging state
    pub fn new() -> Self {
        Self::default()
    }

    // ===== SETTERS =====

    /// Stage vertex data
    ///
    /// # Arguments
    ///
    /// * `data` - Raw coordinates, 3 floats per element
    /// * `length` - Used float count (the array may be larger)
    pub fn set_vertices(&mut self, data: Vec<f32>, length: usize) {
        debug_assert!(length <= data.len());
        self.vertices = data;
        self.vertices_length = length;
        self.elements_length = length / 3;
        self.parts.insert(StagedParts::VERTICES);
    }

    /// Stage normal data
    ///
    /// A used length of exactly 3 means one normal shared by the whole
    /// geometry; the pack expands it across all vertices on commit.
    pub fn set_normals(&mut self, data: Vec<f32>, length: usize) {
        debug_assert!(length <= data.len());
        self.normals = data;
        self.normals_length = length;
        self.one_normal = length == 3;
        self.parts.insert(StagedParts::NORMALS);
    }

    /// Stage texture coordinate data, 2 floats per element
    pub fn set_textures(&mut self, data: Vec<f32>) {
        self.textures = data;
        self.parts.insert(StagedParts::TEXTURES);
    }

    /// Stage the color for the next placement
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.parts.insert(StagedParts::COLOR);
    }

    // ===== ACCESSORS =====

    /// Staged vertex floats, truncated to the used length
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertices[..self.vertices_length]
    }

    /// Staged normal floats, truncated to the used length
    pub fn normal_data(&self) -> &[f32] {
        &self.normals[..self.normals_length]
    }

    /// Staged texture floats, if any were staged
    pub fn texture_data(&self) -> Option<&[f32]> {
        if self.parts.contains(StagedParts::TEXTURES) {
            Some(&self.textures)
        } else {
            None
        }
    }

    /// Staged color (persists across placements)
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether one shared normal covers the whole geometry
    pub fn one_normal(&self) -> bool {
        self.one_normal
    }

    /// Element count of the staged vertex data (raw length / 3)
    pub fn elements_length(&self) -> usize {
        self.elements_length
    }

    /// Whether vertex data has been staged since the last placement
    pub fn has_vertices(&self) -> bool {
        self.parts.contains(StagedParts::VERTICES)
    }

    /// Whether normal data has been staged since the last placement
    pub fn has_normals(&self) -> bool {
        self.parts.contains(StagedParts::NORMALS)
    }

    /// Currently populated staging slots
    pub fn parts(&self) -> StagedParts {
        self.parts
    }

    // ===== LIFECYCLE =====

    /// Release the staged arrays after a placement
    ///
    /// The color and its staged flag survive; everything else is cleared.
    pub fn clear_arrays(&mut self) {
        self.vertices = Vec::new();
        self.vertices_length = 0;
        self.normals = Vec::new();
        self.normals_length = 0;
        self.textures = Vec::new();
        self.one_normal = false;
        self.elements_length = 0;
        self.parts &= StagedParts::COLOR;
    }
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;
