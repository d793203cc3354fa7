//! BufferPack trait and pack creation seam.
//!
//! A pack is one physically allocated set of buffers (vertices, normals,
//! textures, colors, indices) holding many geometry segments. Backends
//! implement [`BufferPack`] and [`PackFactory`]; the manager only talks to
//! these traits. The reference CPU-backed implementation lives in
//! [`array_pack`](super::array_pack).

use crate::color::Color;
use crate::error::{Error, Result};
use crate::geometry::segment::BufferSegment;
use crate::geometry::staging::GeometryStaging;
use crate::pack::renderer::GeometryRenderer;
use crate::prism_error;

slotmap::new_key_type! {
    /// Stable handle for a pack owned by a manager
    ///
    /// Keys stay valid across removal of other packs, so segments can
    /// reference their owning pack without shared pointers.
    pub struct PackKey;
}

/// Largest vertex index a pack may ever need to address
///
/// Indices are written as 16-bit values, so no pack may hold more elements
/// than a signed 16-bit index can reach.
pub const ELEMENT_INDEX_CEILING: usize = i16::MAX as usize;

/// Largest legal element capacity: the largest power of two within
/// [`ELEMENT_INDEX_CEILING`]
pub const MAX_ELEMENTS_CAPACITY: usize = 1 << 14;

/// Descriptor for creating a buffer pack
///
/// Capacities are element/index slot counts, not raw floats. Both must be
/// powers of two; the element capacity must not exceed
/// [`MAX_ELEMENTS_CAPACITY`].
#[derive(Debug, Clone, Copy)]
pub struct PackDesc {
    /// Initial element capacity (vertex/normal/texture/color slots)
    pub elements_capacity: usize,
    /// Initial index capacity
    pub indices_capacity: usize,
}

impl PackDesc {
    /// Validate the power-of-two and 16-bit ceiling rules
    ///
    /// This is the only fatal misuse in the system: a pack that cannot be
    /// addressed by 16-bit indices is rejected here, at creation time.
    pub fn validate(&self) -> Result<()> {
        if self.elements_capacity == 0 || !self.elements_capacity.is_power_of_two() {
            let msg = format!(
                "element capacity {} is not a power of two",
                self.elements_capacity
            );
            prism_error!("prism3d::PackDesc", "{}", msg);
            return Err(Error::InvalidCapacity(msg));
        }
        if self.elements_capacity > MAX_ELEMENTS_CAPACITY {
            let msg = format!(
                "element capacity {} exceeds the 16-bit index ceiling (max {})",
                self.elements_capacity, MAX_ELEMENTS_CAPACITY
            );
            prism_error!("prism3d::PackDesc", "{}", msg);
            return Err(Error::InvalidCapacity(msg));
        }
        if self.indices_capacity == 0 || !self.indices_capacity.is_power_of_two() {
            let msg = format!(
                "index capacity {} is not a power of two",
                self.indices_capacity
            );
            prism_error!("prism3d::PackDesc", "{}", msg);
            return Err(Error::InvalidCapacity(msg));
        }
        Ok(())
    }
}

/// Factory trait for creating buffer packs
///
/// Implemented by backend-specific factories (the CPU-backed
/// [`ArrayPackFactory`](super::array_pack::ArrayPackFactory), a GPU
/// factory, etc.). Creation is the only fallible operation the manager
/// performs: factories must reject descriptors violating
/// [`PackDesc::validate`].
pub trait PackFactory {
    /// Create a pack
    ///
    /// # Arguments
    ///
    /// * `desc` - Pack descriptor
    fn create_pack(&mut self, desc: PackDesc) -> Result<Box<dyn BufferPack>>;
}

/// Buffer pack trait
///
/// One pack owns many [`BufferSegment`]s. `used_elements`/`used_indices`
/// are high-water allocation marks, monotonically non-decreasing until
/// [`reset`](BufferPack::reset). Packs may grow their storage in place (by
/// doubling, staying a power of two) up to the addressability ceiling;
/// [`can_add`](BufferPack::can_add) answers against that ceiling, not the
/// currently allocated storage.
pub trait BufferPack {
    /// Whether a segment of the given lengths still fits in this pack
    fn can_add(&self, elements_length: usize, indices_length: usize) -> bool;

    /// Advance the high-water marks, growing storage as needed
    fn add_to_length(&mut self, elements_length: usize, indices_length: usize);

    /// Current element high-water mark (next free element offset)
    fn used_elements(&self) -> usize;

    /// Current index high-water mark (next free index slot)
    fn used_indices(&self) -> usize;

    /// Commit staged vertex/normal/texture arrays and the staged color at
    /// the segment's element offset
    ///
    /// When the staging carries a single shared normal, it is expanded
    /// across all of the segment's elements.
    fn set_elements(&mut self, staging: &GeometryStaging, segment: &BufferSegment);

    /// Overwrite the color of an element range
    fn set_color(&mut self, color: Color, elements_offset: usize, elements_length: usize);

    /// Overwrite only the alpha channel of an element range
    ///
    /// Used by visibility updates; [`ALPHA_INVISIBLE`](crate::color::ALPHA_INVISIBLE)
    /// hides a range without touching its geometry.
    fn set_alpha(&mut self, alpha: f32, elements_offset: usize, elements_length: usize);

    /// Zero the alpha of an element range
    ///
    /// Applied to freed segments so stale geometry cannot flash visible
    /// before the segment is reused.
    fn set_alpha_to_transparent(&mut self, elements_offset: usize, elements_length: usize);

    /// Write one 16-bit vertex index at the given index slot
    fn put_to_indices(&mut self, index_slot: usize, vertex_index: u16);

    /// Whether this pack can be rewound and reused
    ///
    /// Packs invalidated by a context loss report `false` and are dropped
    /// from the active list instead of recycled.
    fn can_be_reused(&self) -> bool;

    /// Rewind the high-water marks to empty, keeping the storage
    fn reset(&mut self);

    /// Draw this pack through the given renderer
    fn draw(&self, renderer: &mut dyn GeometryRenderer);

    /// Mutable vertex storage positioned at a raw float offset
    fn vertex_buffer_at(&mut self, float_offset: usize) -> &mut [f32];

    /// Mutable normal storage positioned at a raw float offset
    fn normal_buffer_at(&mut self, float_offset: usize) -> &mut [f32];

    /// Mutable index storage positioned at an index slot offset
    fn indices_buffer_at(&mut self, index_offset: usize) -> &mut [u16];
}
