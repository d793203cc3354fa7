//! Keys for the live-segment map and the free-pool buckets.

/// Identifies one drawable geometry slot: a geometry set and an ordinal
/// within it
///
/// Keys are totally ordered lexicographically (set id first). `Copy`
/// semantics make map insertion aliasing-free by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryKey {
    /// Geometry set id
    pub set_id: u32,
    /// Geometry ordinal within the set
    pub ordinal: u32,
}

impl GeometryKey {
    /// Create a key
    pub const fn new(set_id: u32, ordinal: u32) -> Self {
        Self { set_id, ordinal }
    }
}

/// Free-pool bucket key: the exact (elements, indices) size of a segment
///
/// Reuse requires an exact match on both lengths, never a subset match:
/// same-size allocations of the same kind share an identical index
/// topology, which is what makes re-emission skippable on reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeClass {
    /// Element slot count
    pub elements_length: usize,
    /// Index slot count
    pub indices_length: usize,
}

impl SizeClass {
    /// Create a size class
    pub const fn new(elements_length: usize, indices_length: usize) -> Self {
        Self {
            elements_length,
            indices_length,
        }
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
