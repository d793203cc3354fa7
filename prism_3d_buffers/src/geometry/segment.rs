//! Buffer segments: contiguous sub-ranges of a pack assigned to one geometry.

use crate::geometry::index::SizeClass;
use crate::geometry::topology::ElementKind;
use crate::pack::buffer_pack::PackKey;

/// A contiguous sub-range inside one buffer pack
///
/// Offsets and lengths are in element/index slot units, not raw floats.
/// Segments within a pack never overlap; `offset + length` never exceeds
/// the pack's high-water marks. A segment is owned by exactly one pack at
/// a time, referenced through its [`PackKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSegment {
    /// Owning pack
    pub pack: PackKey,
    /// First element slot
    pub elements_offset: usize,
    /// Number of element slots
    pub elements_length: usize,
    /// First index slot
    pub indices_offset: usize,
    /// Number of index slots
    pub indices_length: usize,
    /// Topology kind currently baked into the pack's index range
    pub kind: ElementKind,
}

impl BufferSegment {
    /// Create a segment
    pub const fn new(
        pack: PackKey,
        elements_offset: usize,
        elements_length: usize,
        indices_offset: usize,
        indices_length: usize,
        kind: ElementKind,
    ) -> Self {
        Self {
            pack,
            elements_offset,
            elements_length,
            indices_offset,
            indices_length,
            kind,
        }
    }

    /// The free-pool bucket key for this segment
    pub const fn size_class(&self) -> SizeClass {
        SizeClass::new(self.elements_length, self.indices_length)
    }

    /// One past the last element slot
    pub const fn elements_end(&self) -> usize {
        self.elements_offset + self.elements_length
    }

    /// One past the last index slot
    pub const fn indices_end(&self) -> usize {
        self.indices_offset + self.indices_length
    }
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
