//! Topology strategies: per-kind index counting and emission.
//!
//! The manager is constructed with one [`TopologyStrategy`]; the strategy
//! decides how many indices a geometry of a given size needs and emits the
//! index pattern into a segment through an [`IndexWriter`]. Patterns depend
//! only on the segment lengths and the element kind, which is what allows
//! recycled same-size segments to skip re-emission entirely.

use crate::geometry::segment::BufferSegment;
use crate::pack::buffer_pack::BufferPack;

/// Fixed cross-section resolution of curve tubes
pub const LATITUDES: usize = 8;

/// Tag describing the index pattern baked into a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Tube around a curve, `LATITUDES` vertices per cross section
    Curve,
    /// Triangle fan with the apex at the first element
    TriangleFan,
    /// Plain triangle list over consecutive elements
    Triangles,
    /// One quad sprite (4 elements, 6 indices) per point
    PointSprite,
    /// Caller-supplied pattern stamped once per instance
    Template,
}

/// Segment-relative index emission cursor
///
/// Translates geometry-local vertex indices into pack-absolute 16-bit
/// values and advances through the segment's index range. The segment's
/// element offset never exceeds the 16-bit ceiling, so the cast is lossless.
pub struct IndexWriter<'a> {
    pack: &'a mut dyn BufferPack,
    base: usize,
    cursor: usize,
}

impl<'a> IndexWriter<'a> {
    /// Create a writer positioned at the start of the segment's index range
    pub(crate) fn new(pack: &'a mut dyn BufferPack, segment: &BufferSegment) -> Self {
        Self {
            pack,
            base: segment.elements_offset,
            cursor: segment.indices_offset,
        }
    }

    /// Write one geometry-local vertex index at the cursor
    pub fn put(&mut self, local_index: usize) {
        self.pack
            .put_to_indices(self.cursor, (self.base + local_index) as u16);
        self.cursor += 1;
    }

    /// Current absolute index slot
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Per-geometry-kind index topology
///
/// `size` is strategy-specific (curve segment count, fan perimeter length,
/// point count, instance count). Start sizes seed new packs and must be
/// powers of two within the 16-bit index ceiling.
pub trait TopologyStrategy {
    /// Number of index slots a geometry of this size needs
    fn calculate_indices_length(&self, size: usize, kind: ElementKind) -> usize;

    /// Emit the index pattern for a freshly allocated segment
    ///
    /// `reuse_segment` is true when the segment came back from the free
    /// pool; its pattern is already baked and emission is skipped.
    fn put_indices(
        &self,
        writer: &mut IndexWriter<'_>,
        size: usize,
        kind: ElementKind,
        reuse_segment: bool,
    );

    /// Element capacity for a newly created pack
    fn element_size_start(&self) -> usize;

    /// Index capacity for a newly created pack
    fn indices_size_start(&self) -> usize;
}

// ============================================================================
// CURVE
// ============================================================================

/// Tube topology around curves
///
/// Each curve section contributes a ring of [`LATITUDES`] vertices; every
/// lattice cell between neighboring rings is two triangles.
pub struct CurveTopology {
    element_size_start: usize,
    indices_size_start: usize,
}

impl CurveTopology {
    /// Create with default pack start sizes
    pub fn new() -> Self {
        Self::with_start_sizes(2048, 4096)
    }

    /// Create with explicit pack start sizes (powers of two)
    pub fn with_start_sizes(element_size_start: usize, indices_size_start: usize) -> Self {
        Self {
            element_size_start,
            indices_size_start,
        }
    }

    /// Elements length for a curve of the given section count
    pub fn elements_length_for_curve(size: usize) -> usize {
        (size + 1) * LATITUDES
    }

    /// Indices length for a curve of the given section count
    pub fn indices_length_for_curve(size: usize) -> usize {
        3 * 2 * size * LATITUDES
    }
}

impl Default for CurveTopology {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyStrategy for CurveTopology {
    fn calculate_indices_length(&self, size: usize, _kind: ElementKind) -> usize {
        Self::indices_length_for_curve(size)
    }

    fn put_indices(
        &self,
        writer: &mut IndexWriter<'_>,
        size: usize,
        _kind: ElementKind,
        reuse_segment: bool,
    ) {
        if reuse_segment {
            return;
        }
        for k in 0..size {
            for i in 0..LATITUDES {
                let i_next = (i + 1) % LATITUDES;
                // first triangle
                writer.put(i + k * LATITUDES);
                writer.put(i + (k + 1) * LATITUDES);
                writer.put(i_next + (k + 1) * LATITUDES);
                // second triangle
                writer.put(i + k * LATITUDES);
                writer.put(i_next + (k + 1) * LATITUDES);
                writer.put(i_next + k * LATITUDES);
            }
        }
    }

    fn element_size_start(&self) -> usize {
        self.element_size_start
    }

    fn indices_size_start(&self) -> usize {
        self.indices_size_start
    }
}

// ============================================================================
// POLYGON
// ============================================================================

/// Polygon topology: triangle fans and plain triangle lists
///
/// For [`ElementKind::TriangleFan`], `size` is the perimeter length and the
/// apex is the first element. For [`ElementKind::Triangles`], `size` is the
/// triangle count over consecutive elements.
pub struct PolygonTopology {
    element_size_start: usize,
    indices_size_start: usize,
}

impl PolygonTopology {
    /// Create with default pack start sizes
    pub fn new() -> Self {
        Self::with_start_sizes(4096, 8192)
    }

    /// Create with explicit pack start sizes (powers of two)
    pub fn with_start_sizes(element_size_start: usize, indices_size_start: usize) -> Self {
        Self {
            element_size_start,
            indices_size_start,
        }
    }
}

impl Default for PolygonTopology {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyStrategy for PolygonTopology {
    fn calculate_indices_length(&self, size: usize, kind: ElementKind) -> usize {
        match kind {
            ElementKind::TriangleFan => 3 * size.saturating_sub(2),
            _ => 3 * size,
        }
    }

    fn put_indices(
        &self,
        writer: &mut IndexWriter<'_>,
        size: usize,
        kind: ElementKind,
        reuse_segment: bool,
    ) {
        if reuse_segment {
            return;
        }
        match kind {
            ElementKind::TriangleFan => {
                for i in 1..size.saturating_sub(1) {
                    writer.put(0);
                    writer.put(i);
                    writer.put(i + 1);
                }
            }
            _ => {
                for i in 0..3 * size {
                    writer.put(i);
                }
            }
        }
    }

    fn element_size_start(&self) -> usize {
        self.element_size_start
    }

    fn indices_size_start(&self) -> usize {
        self.indices_size_start
    }
}

// ============================================================================
// POINT
// ============================================================================

/// Point sprite topology: one camera-facing quad per point
///
/// `size` is the point count; each point owns 4 consecutive elements and
/// 6 indices (two triangles).
pub struct PointTopology {
    element_size_start: usize,
    indices_size_start: usize,
}

impl PointTopology {
    /// Elements per sprite quad
    pub const ELEMENTS_PER_POINT: usize = 4;
    /// Indices per sprite quad
    pub const INDICES_PER_POINT: usize = 6;

    /// Create with default pack start sizes
    pub fn new() -> Self {
        Self::with_start_sizes(2048, 4096)
    }

    /// Create with explicit pack start sizes (powers of two)
    pub fn with_start_sizes(element_size_start: usize, indices_size_start: usize) -> Self {
        Self {
            element_size_start,
            indices_size_start,
        }
    }

    /// Elements length for the given point count
    pub fn elements_length_for_points(count: usize) -> usize {
        count * Self::ELEMENTS_PER_POINT
    }
}

impl Default for PointTopology {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyStrategy for PointTopology {
    fn calculate_indices_length(&self, size: usize, _kind: ElementKind) -> usize {
        size * Self::INDICES_PER_POINT
    }

    fn put_indices(
        &self,
        writer: &mut IndexWriter<'_>,
        size: usize,
        _kind: ElementKind,
        reuse_segment: bool,
    ) {
        if reuse_segment {
            return;
        }
        for point in 0..size {
            let base = point * Self::ELEMENTS_PER_POINT;
            writer.put(base);
            writer.put(base + 1);
            writer.put(base + 2);
            writer.put(base);
            writer.put(base + 2);
            writer.put(base + 3);
        }
    }

    fn element_size_start(&self) -> usize {
        self.element_size_start
    }

    fn indices_size_start(&self) -> usize {
        self.indices_size_start
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

/// Stamped-template topology
///
/// Holds a caller-supplied index pattern over a fixed number of elements
/// and stamps it once per instance; `size` is the instance count. Used for
/// geometry that repeats one small mesh many times (e.g. point spheres).
pub struct TemplateTopology {
    template: Vec<u16>,
    elements_per_instance: usize,
    element_size_start: usize,
    indices_size_start: usize,
}

impl TemplateTopology {
    /// Create with default pack start sizes
    ///
    /// # Arguments
    ///
    /// * `template` - Instance-local index pattern
    /// * `elements_per_instance` - Elements consumed by each instance
    pub fn new(template: Vec<u16>, elements_per_instance: usize) -> Self {
        Self::with_start_sizes(template, elements_per_instance, 2048, 4096)
    }

    /// Create with explicit pack start sizes (powers of two)
    pub fn with_start_sizes(
        template: Vec<u16>,
        elements_per_instance: usize,
        element_size_start: usize,
        indices_size_start: usize,
    ) -> Self {
        debug_assert!(
            template
                .iter()
                .all(|&i| (i as usize) < elements_per_instance),
            "template index out of instance range"
        );
        Self {
            template,
            elements_per_instance,
            element_size_start,
            indices_size_start,
        }
    }

    /// Elements length for the given instance count
    pub fn elements_length_for_instances(&self, count: usize) -> usize {
        count * self.elements_per_instance
    }
}

impl TopologyStrategy for TemplateTopology {
    fn calculate_indices_length(&self, size: usize, _kind: ElementKind) -> usize {
        size * self.template.len()
    }

    fn put_indices(
        &self,
        writer: &mut IndexWriter<'_>,
        size: usize,
        _kind: ElementKind,
        reuse_segment: bool,
    ) {
        if reuse_segment {
            return;
        }
        for instance in 0..size {
            let base = instance * self.elements_per_instance;
            for &local in &self.template {
                writer.put(base + local as usize);
            }
        }
    }

    fn element_size_start(&self) -> usize {
        self.element_size_start
    }

    fn indices_size_start(&self) -> usize {
        self.indices_size_start
    }
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod tests;
