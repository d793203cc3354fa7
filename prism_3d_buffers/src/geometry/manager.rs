//! Buffer manager: packs many small geometries into few large packs.
//!
//! The manager owns the live geometry→segment map, the size-bucketed free
//! pool, and the active pack list. Callers stage raw arrays and a color,
//! then place the staged geometry with `set_indices`; afterwards the
//! geometry can be recolored, hidden, or removed individually without
//! touching its neighbors.
//!
//! # Placement
//!
//! ```text
//! stage arrays + color
//!   └─ set_indices(size, kind)
//!        ├─ existing segment of identical size  → keep in place
//!        ├─ free-pool segment of identical size → recycle (topology kept)
//!        └─ otherwise → carve from the current pack's high-water marks,
//!           creating a new pack when the 16-bit ceiling is exhausted,
//!           and emit the index topology once
//! ```

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::color::{Color, ALPHA_INVISIBLE};
use crate::error::{Error, Result};
use crate::geometry::free_pool::FreePool;
use crate::geometry::index::{GeometryKey, SizeClass};
use crate::geometry::segment::BufferSegment;
use crate::geometry::staging::GeometryStaging;
use crate::geometry::topology::{ElementKind, IndexWriter, TopologyStrategy};
use crate::pack::buffer_pack::{BufferPack, PackDesc, PackFactory, PackKey};
use crate::pack::renderer::GeometryRenderer;
use crate::{prism_debug, prism_error, prism_info};

/// Manager packing many independently-updatable geometries into few packs
///
/// Single-threaded by design: all placement, update, and draw operations
/// run on the thread owning the rendering context. One manager instance
/// exclusively owns its packs, live map, and free pool.
pub struct BufferManager {
    strategy: Box<dyn TopologyStrategy>,
    factory: Box<dyn PackFactory>,

    packs: SlotMap<PackKey, Box<dyn BufferPack>>,
    /// Pack keys in creation order; draw order is this order
    pack_order: Vec<PackKey>,
    /// Pack the last placement went into; consulted first on allocation
    current_pack: Option<PackKey>,

    /// One entry per currently-drawn geometry
    live: FxHashMap<GeometryKey, BufferSegment>,
    free_pool: FreePool,

    staging: GeometryStaging,
    current_key: GeometryKey,
    current_segment: Option<BufferSegment>,
}

impl BufferManager {
    /// Create a manager for one geometry kind
    ///
    /// # Arguments
    ///
    /// * `strategy` - Topology strategy for this manager's geometry kind
    /// * `factory` - Pack factory (validates capacities on creation)
    pub fn new(strategy: Box<dyn TopologyStrategy>, factory: Box<dyn PackFactory>) -> Self {
        Self {
            strategy,
            factory,
            packs: SlotMap::with_key(),
            pack_order: Vec::new(),
            current_pack: None,
            live: FxHashMap::default(),
            free_pool: FreePool::new(),
            staging: GeometryStaging::new(),
            current_key: GeometryKey::default(),
            current_segment: None,
        }
    }

    // ===== STAGING =====

    /// Set the geometry the next placement applies to
    pub fn set_current_index(&mut self, set_id: u32, ordinal: u32) {
        self.current_key = GeometryKey::new(set_id, ordinal);
    }

    /// Stage vertex data (3 floats per element; `length` used floats)
    pub fn set_vertex_buffer(&mut self, data: Vec<f32>, length: usize) {
        self.staging.set_vertices(data, length);
    }

    /// Stage normal data
    ///
    /// A used length of exactly 3 stages one shared normal for the whole
    /// geometry.
    pub fn set_normal_buffer(&mut self, data: Vec<f32>, length: usize) {
        self.staging.set_normals(data, length);
    }

    /// Stage texture coordinates (2 floats per element)
    pub fn set_texture_buffer(&mut self, data: Vec<f32>) {
        self.staging.set_textures(data);
    }

    /// Stage the color for the next placement
    pub fn set_color_buffer(&mut self, color: Color) {
        self.staging.set_color(color);
    }

    // ===== PLACEMENT =====

    /// Place the staged geometry at the current index
    ///
    /// Finds or allocates a segment sized for the staged data, emits the
    /// index topology for fresh segments, commits the staged arrays, and
    /// releases them. An existing segment whose size no longer matches is
    /// freed and replaced (a resize, not an error).
    ///
    /// # Errors
    ///
    /// Returns an error if no vertex data is staged, or if the factory
    /// rejects a pack the staged geometry would need (16-bit ceiling).
    pub fn set_indices(&mut self, size: usize, kind: ElementKind) -> Result<()> {
        if !self.staging.has_vertices() {
            let msg = format!(
                "set_indices for ({}, {}) without staged vertices",
                self.current_key.set_id, self.current_key.ordinal
            );
            prism_error!("prism3d::BufferManager", "{}", msg);
            return Err(Error::InvalidStaging(msg));
        }

        let elements_length = self.staging.elements_length();
        let indices_length = self.strategy.calculate_indices_length(size, kind);

        // A segment fits only on an exact size match; a shape change
        // releases it and allocates a replacement.
        let existing = match self.live.get(&self.current_key).copied() {
            Some(segment)
                if segment.elements_length == elements_length
                    && segment.indices_length == indices_length =>
            {
                Some(segment)
            }
            Some(segment) => {
                self.release_segment(segment);
                None
            }
            None => None,
        };

        // Topology is reusable when a kept or recycled segment already
        // carries the same tag: identical lengths plus an identical tag
        // means an identical index pattern. A changed tag re-emits into
        // the same range.
        let (mut segment, reuse_topology) = match existing {
            Some(segment) => (segment, segment.kind == kind),
            None => match self.recycle_segment(SizeClass::new(elements_length, indices_length)) {
                Some(segment) => (segment, segment.kind == kind),
                None => (
                    self.allocate_segment(elements_length, indices_length, kind)?,
                    false,
                ),
            },
        };

        segment.kind = kind;
        self.live.insert(self.current_key, segment);
        self.current_pack = Some(segment.pack);

        let pack = self
            .packs
            .get_mut(segment.pack)
            .expect("live segment references a missing pack");
        let mut writer = IndexWriter::new(pack.as_mut(), &segment);
        self.strategy
            .put_indices(&mut writer, size, kind, reuse_topology);
        pack.set_elements(&self.staging, &segment);

        self.staging.clear_arrays();
        self.current_segment = Some(segment);
        Ok(())
    }

    /// Pop a usable free-pool segment of exactly this size class
    fn recycle_segment(&mut self, class: SizeClass) -> Option<BufferSegment> {
        while let Some(segment) = self.free_pool.pop(class) {
            // the owning pack may have been dropped since the free
            if self.packs.contains_key(segment.pack) {
                return Some(segment);
            }
        }
        None
    }

    /// Carve a new segment from the current pack's high-water marks
    fn allocate_segment(
        &mut self,
        elements_length: usize,
        indices_length: usize,
        kind: ElementKind,
    ) -> Result<BufferSegment> {
        let pack_key = match self.current_pack {
            Some(key)
                if self
                    .packs
                    .get(key)
                    .is_some_and(|pack| pack.can_add(elements_length, indices_length)) =>
            {
                key
            }
            _ => self.create_pack(elements_length, indices_length)?,
        };

        let pack = self
            .packs
            .get_mut(pack_key)
            .expect("freshly resolved pack key");
        let segment = BufferSegment::new(
            pack_key,
            pack.used_elements(),
            elements_length,
            pack.used_indices(),
            indices_length,
            kind,
        );
        pack.add_to_length(elements_length, indices_length);
        Ok(segment)
    }

    /// Create a pack sized for the strategy's start sizes and the request
    fn create_pack(&mut self, elements_length: usize, indices_length: usize) -> Result<PackKey> {
        let desc = PackDesc {
            elements_capacity: self
                .strategy
                .element_size_start()
                .max(elements_length.next_power_of_two()),
            indices_capacity: self
                .strategy
                .indices_size_start()
                .max(indices_length.next_power_of_two()),
        };
        let pack = self.factory.create_pack(desc)?;
        let key = self.packs.insert(pack);
        self.pack_order.push(key);
        self.current_pack = Some(key);
        prism_debug!(
            "prism3d::BufferManager",
            "pack {} added (elements {}, indices {})",
            self.pack_order.len(),
            desc.elements_capacity,
            desc.indices_capacity
        );
        Ok(key)
    }

    /// Return a freed segment to the pool, or drop its pack if it cannot
    /// be reused
    fn release_segment(&mut self, segment: BufferSegment) {
        let Some(pack) = self.packs.get_mut(segment.pack) else {
            return;
        };
        if pack.can_be_reused() {
            // zero the alpha so stale geometry cannot flash before reuse
            pack.set_alpha_to_transparent(segment.elements_offset, segment.elements_length);
            self.free_pool.push(segment);
        } else {
            self.drop_pack(segment.pack);
        }
    }

    /// Remove a pack from the active list
    fn drop_pack(&mut self, key: PackKey) {
        self.packs.remove(key);
        self.pack_order.retain(|&k| k != key);
        if self.current_pack == Some(key) {
            self.current_pack = None;
        }
        prism_debug!(
            "prism3d::BufferManager",
            "non-reusable pack dropped, {} remaining",
            self.pack_order.len()
        );
    }

    // ===== COLOR AND VISIBILITY =====

    /// Update the color of geometries `0..geometries_length` of a set
    ///
    /// Geometries without a segment are skipped; this is an expected state
    /// after an undo removed part of the set.
    pub fn update_color(&mut self, set_id: u32, geometries_length: u32, color: Color) {
        for ordinal in 0..geometries_length {
            let key = GeometryKey::new(set_id, ordinal);
            let Some(segment) = self.live.get(&key).copied() else {
                continue;
            };
            if let Some(pack) = self.packs.get_mut(segment.pack) {
                pack.set_color(color, segment.elements_offset, segment.elements_length);
            }
        }
    }

    /// Update the visibility of geometries `start..geometries_length` of a set
    ///
    /// Hiding writes [`ALPHA_INVISIBLE`] over the segments' alpha channel;
    /// showing restores the staged color's alpha. Segments stay allocated
    /// either way. Missing segments are skipped, as for `update_color`.
    pub fn update_visibility(
        &mut self,
        set_id: u32,
        start: u32,
        geometries_length: u32,
        visible: bool,
    ) {
        let alpha = if visible {
            self.staging.color().a
        } else {
            ALPHA_INVISIBLE
        };
        for ordinal in start..geometries_length {
            let key = GeometryKey::new(set_id, ordinal);
            let Some(segment) = self.live.get(&key).copied() else {
                continue;
            };
            if let Some(pack) = self.packs.get_mut(segment.pack) {
                pack.set_alpha(alpha, segment.elements_offset, segment.elements_length);
            }
        }
    }

    // ===== REMOVAL AND RESET =====

    /// Remove geometries `0..geometries_length` of a set
    ///
    /// Freed segments are zero-alpha'd and returned to the free pool; if a
    /// segment's pack is no longer reusable, the whole pack is dropped
    /// from the active list instead.
    pub fn remove(&mut self, set_id: u32, geometries_length: u32) {
        for ordinal in 0..geometries_length {
            let key = GeometryKey::new(set_id, ordinal);
            if let Some(segment) = self.live.remove(&key) {
                self.release_segment(segment);
            }
        }
        self.current_segment = None;
    }

    /// Clear the live map and free pool; rewind or drop the packs
    ///
    /// Reusable packs are rewound to empty and kept, so a full scene
    /// rebuild does not reallocate packs already sized correctly.
    pub fn reset(&mut self) {
        self.live.clear();
        self.free_pool.clear();
        self.current_segment = None;

        let keys: Vec<PackKey> = self.pack_order.clone();
        for key in keys {
            let Some(pack) = self.packs.get_mut(key) else {
                continue;
            };
            if pack.can_be_reused() {
                pack.reset();
            } else {
                self.drop_pack(key);
            }
        }
        if self
            .current_pack
            .is_some_and(|key| !self.packs.contains_key(key))
        {
            self.current_pack = None;
        }
        prism_info!(
            "prism3d::BufferManager",
            "reset, {} packs kept",
            self.pack_order.len()
        );
    }

    // ===== DRAW =====

    /// Draw all non-empty packs, in pack creation order
    ///
    /// Draw order is pack order, not geometry order; callers that need
    /// ordering for transparency must accept pack granularity.
    pub fn draw_buffer_packs(&self, renderer: &mut dyn GeometryRenderer) {
        for &key in &self.pack_order {
            if let Some(pack) = self.packs.get(key) {
                if pack.used_elements() > 0 {
                    pack.draw(renderer);
                }
            }
        }
    }

    // ===== INSPECTION =====

    /// Whether a geometry currently has a segment
    pub fn contains(&self, set_id: u32, ordinal: u32) -> bool {
        self.live.contains_key(&GeometryKey::new(set_id, ordinal))
    }

    /// The segment a geometry currently occupies
    pub fn segment(&self, set_id: u32, ordinal: u32) -> Option<BufferSegment> {
        self.live.get(&GeometryKey::new(set_id, ordinal)).copied()
    }

    /// Number of active packs
    pub fn pack_count(&self) -> usize {
        self.pack_order.len()
    }

    /// Number of live geometries
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total number of segments waiting in the free pool
    pub fn free_segment_count(&self) -> usize {
        self.free_pool.len()
    }

    /// Number of non-empty free-pool size classes
    pub fn free_bucket_count(&self) -> usize {
        self.free_pool.bucket_count()
    }

    /// Number of free-pool segments of exactly this size class
    pub fn free_segments_in(&self, class: SizeClass) -> usize {
        self.free_pool.segments_in(class)
    }

    // ===== CURRENT SEGMENT (direct writers) =====

    /// Re-bind the current segment to the current geometry index
    ///
    /// Lets low-level writers target a previously placed geometry without
    /// going through staging.
    pub fn select_current_segment(&mut self) {
        self.current_segment = self.live.get(&self.current_key).copied();
    }

    /// Element offset of the current segment
    pub fn current_elements_offset(&self) -> Option<usize> {
        self.current_segment.map(|s| s.elements_offset)
    }

    /// Element length of the current segment
    pub fn current_elements_length(&self) -> Option<usize> {
        self.current_segment.map(|s| s.elements_length)
    }

    /// Index offset of the current segment
    pub fn current_indices_offset(&self) -> Option<usize> {
        self.current_segment.map(|s| s.indices_offset)
    }

    /// Index length of the current segment
    pub fn current_indices_length(&self) -> Option<usize> {
        self.current_segment.map(|s| s.indices_length)
    }

    /// Vertex storage positioned at the current segment's offset
    pub fn current_vertex_view(&mut self) -> Option<&mut [f32]> {
        let segment = self.current_segment?;
        let pack = self.packs.get_mut(segment.pack)?;
        Some(pack.vertex_buffer_at(segment.elements_offset * 3))
    }

    /// Normal storage positioned at the current segment's offset
    pub fn current_normal_view(&mut self) -> Option<&mut [f32]> {
        let segment = self.current_segment?;
        let pack = self.packs.get_mut(segment.pack)?;
        Some(pack.normal_buffer_at(segment.elements_offset * 3))
    }

    /// Index storage positioned at the current segment's offset
    pub fn current_index_view(&mut self) -> Option<&mut [u16]> {
        let segment = self.current_segment?;
        let pack = self.packs.get_mut(segment.pack)?;
        Some(pack.indices_buffer_at(segment.indices_offset))
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
