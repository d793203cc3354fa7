//! CPU-backed reference implementation of the pack seam.
//!
//! `ArrayBufferPack` keeps plain `f32`/`u16` slabs sized in element/index
//! slots. Storage grows in place by doubling (always a power of two) up to
//! the 16-bit addressability ceiling; a renderer backend would mirror the
//! same layout in GPU memory behind the same trait.

use crate::color::Color;
use crate::error::Result;
use crate::geometry::segment::BufferSegment;
use crate::geometry::staging::GeometryStaging;
use crate::pack::buffer_pack::{
    BufferPack, PackDesc, PackFactory, MAX_ELEMENTS_CAPACITY,
};
use crate::pack::renderer::{GeometryRenderer, PackDraw};
use crate::prism_debug;

/// Floats per element in the vertex and normal slabs
const VERTEX_STRIDE: usize = 3;
/// Floats per element in the texture slab
const TEXTURE_STRIDE: usize = 2;
/// Floats per element in the color slab
const COLOR_STRIDE: usize = 4;

/// CPU-backed buffer pack
///
/// Holds vertex/normal/texture/color slabs plus a 16-bit index slab, with
/// used-length high-water marks. Capacities are powers of two; the element
/// capacity never exceeds [`MAX_ELEMENTS_CAPACITY`].
pub struct ArrayBufferPack {
    elements_capacity: usize,
    indices_capacity: usize,
    used_elements: usize,
    used_indices: usize,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    textures: Vec<f32>,
    colors: Vec<f32>,
    indices: Vec<u16>,
    reusable: bool,
}

impl ArrayBufferPack {
    /// Create a pack from a validated descriptor
    pub fn new(desc: PackDesc) -> Result<Self> {
        desc.validate()?;
        Ok(Self {
            elements_capacity: desc.elements_capacity,
            indices_capacity: desc.indices_capacity,
            used_elements: 0,
            used_indices: 0,
            vertices: vec![0.0; desc.elements_capacity * VERTEX_STRIDE],
            normals: vec![0.0; desc.elements_capacity * VERTEX_STRIDE],
            textures: vec![0.0; desc.elements_capacity * TEXTURE_STRIDE],
            colors: vec![0.0; desc.elements_capacity * COLOR_STRIDE],
            indices: vec![0; desc.indices_capacity],
            reusable: true,
        })
    }

    /// Current element capacity (power of two)
    pub fn elements_capacity(&self) -> usize {
        self.elements_capacity
    }

    /// Current index capacity (power of two)
    pub fn indices_capacity(&self) -> usize {
        self.indices_capacity
    }

    /// Mark this pack as non-reusable (e.g. after a GPU context loss)
    ///
    /// A non-reusable pack is dropped from the manager's active list on the
    /// next remove/reset instead of being recycled.
    pub fn invalidate(&mut self) {
        self.reusable = false;
    }

    /// Grow the element slabs until `needed` elements fit
    fn ensure_elements_capacity(&mut self, needed: usize) {
        debug_assert!(needed <= MAX_ELEMENTS_CAPACITY);
        if needed <= self.elements_capacity {
            return;
        }
        let mut capacity = self.elements_capacity;
        while capacity < needed {
            capacity *= 2;
        }
        self.vertices.resize(capacity * VERTEX_STRIDE, 0.0);
        self.normals.resize(capacity * VERTEX_STRIDE, 0.0);
        self.textures.resize(capacity * TEXTURE_STRIDE, 0.0);
        self.colors.resize(capacity * COLOR_STRIDE, 0.0);
        self.elements_capacity = capacity;
    }

    /// Grow the index slab until `needed` slots fit
    fn ensure_indices_capacity(&mut self, needed: usize) {
        if needed <= self.indices_capacity {
            return;
        }
        let mut capacity = self.indices_capacity;
        while capacity < needed {
            capacity *= 2;
        }
        self.indices.resize(capacity, 0);
        self.indices_capacity = capacity;
    }
}

impl BufferPack for ArrayBufferPack {
    fn can_add(&self, elements_length: usize, _indices_length: usize) -> bool {
        // Storage grows in place, so only the addressability ceiling binds.
        self.used_elements + elements_length <= MAX_ELEMENTS_CAPACITY
    }

    fn add_to_length(&mut self, elements_length: usize, indices_length: usize) {
        self.ensure_elements_capacity(self.used_elements + elements_length);
        self.ensure_indices_capacity(self.used_indices + indices_length);
        self.used_elements += elements_length;
        self.used_indices += indices_length;
    }

    fn used_elements(&self) -> usize {
        self.used_elements
    }

    fn used_indices(&self) -> usize {
        self.used_indices
    }

    fn set_elements(&mut self, staging: &GeometryStaging, segment: &BufferSegment) {
        let length = segment.elements_length;
        let offset = segment.elements_offset;
        debug_assert!(segment.elements_end() <= self.used_elements);

        let vertex_data = staging.vertex_data();
        let float_count = length * VERTEX_STRIDE;
        self.vertices[offset * VERTEX_STRIDE..offset * VERTEX_STRIDE + float_count]
            .copy_from_slice(&vertex_data[..float_count]);

        let normals = &mut self.normals[offset * VERTEX_STRIDE..offset * VERTEX_STRIDE + float_count];
        if staging.has_normals() {
            let normal_data = staging.normal_data();
            if staging.one_normal() {
                // one shared normal expanded across all vertices
                for chunk in normals.chunks_exact_mut(VERTEX_STRIDE) {
                    chunk.copy_from_slice(&normal_data[..VERTEX_STRIDE]);
                }
            } else {
                normals.copy_from_slice(&normal_data[..float_count]);
            }
        } else {
            normals.fill(0.0);
        }

        let texture_count = length * TEXTURE_STRIDE;
        let textures =
            &mut self.textures[offset * TEXTURE_STRIDE..offset * TEXTURE_STRIDE + texture_count];
        match staging.texture_data() {
            Some(data) if data.len() >= texture_count => {
                textures.copy_from_slice(&data[..texture_count]);
            }
            _ => textures.fill(0.0),
        }

        self.set_color(staging.color(), offset, length);
    }

    fn set_color(&mut self, color: Color, elements_offset: usize, elements_length: usize) {
        let start = elements_offset * COLOR_STRIDE;
        let end = start + elements_length * COLOR_STRIDE;
        for chunk in self.colors[start..end].chunks_exact_mut(COLOR_STRIDE) {
            chunk.copy_from_slice(&color.to_array());
        }
    }

    fn set_alpha(&mut self, alpha: f32, elements_offset: usize, elements_length: usize) {
        let start = elements_offset * COLOR_STRIDE;
        let end = start + elements_length * COLOR_STRIDE;
        for chunk in self.colors[start..end].chunks_exact_mut(COLOR_STRIDE) {
            chunk[3] = alpha;
        }
    }

    fn set_alpha_to_transparent(&mut self, elements_offset: usize, elements_length: usize) {
        self.set_alpha(0.0, elements_offset, elements_length);
    }

    fn put_to_indices(&mut self, index_slot: usize, vertex_index: u16) {
        debug_assert!(index_slot < self.used_indices);
        self.indices[index_slot] = vertex_index;
    }

    fn can_be_reused(&self) -> bool {
        self.reusable
    }

    fn reset(&mut self) {
        self.used_elements = 0;
        self.used_indices = 0;
    }

    fn draw(&self, renderer: &mut dyn GeometryRenderer) {
        renderer.draw_pack(PackDraw {
            vertices: &self.vertices[..self.used_elements * VERTEX_STRIDE],
            normals: &self.normals[..self.used_elements * VERTEX_STRIDE],
            textures: &self.textures[..self.used_elements * TEXTURE_STRIDE],
            colors: &self.colors[..self.used_elements * COLOR_STRIDE],
            indices: &self.indices[..self.used_indices],
        });
    }

    fn vertex_buffer_at(&mut self, float_offset: usize) -> &mut [f32] {
        &mut self.vertices[float_offset..]
    }

    fn normal_buffer_at(&mut self, float_offset: usize) -> &mut [f32] {
        &mut self.normals[float_offset..]
    }

    fn indices_buffer_at(&mut self, index_offset: usize) -> &mut [u16] {
        &mut self.indices[index_offset..]
    }
}

/// Factory producing [`ArrayBufferPack`]s
#[derive(Debug, Default)]
pub struct ArrayPackFactory;

impl ArrayPackFactory {
    /// Create a new factory
    pub fn new() -> Self {
        Self
    }
}

impl PackFactory for ArrayPackFactory {
    fn create_pack(&mut self, desc: PackDesc) -> Result<Box<dyn BufferPack>> {
        let pack = ArrayBufferPack::new(desc)?;
        prism_debug!(
            "prism3d::ArrayPackFactory",
            "created pack (elements {}, indices {})",
            desc.elements_capacity,
            desc.indices_capacity
        );
        Ok(Box::new(pack))
    }
}

#[cfg(test)]
#[path = "array_pack_tests.rs"]
mod tests;
