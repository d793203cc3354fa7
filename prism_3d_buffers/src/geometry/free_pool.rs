//! Size-bucketed free lists for recycled segments.

use rustc_hash::FxHashMap;

use crate::geometry::index::SizeClass;
use crate::geometry::segment::BufferSegment;

/// Pool of freed segments, bucketed by exact size class
///
/// Each bucket is a LIFO stack: the last-freed segment is recycled first,
/// which keeps rapid create/remove churn on the same hot region of a pack.
/// Lookup is exact-match only; a larger freed segment is never split to
/// satisfy a smaller request.
#[derive(Debug, Default)]
pub struct FreePool {
    buckets: FxHashMap<SizeClass, Vec<BufferSegment>>,
}

impl FreePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a freed segment into its size-class bucket
    pub fn push(&mut self, segment: BufferSegment) {
        self.buckets
            .entry(segment.size_class())
            .or_default()
            .push(segment);
    }

    /// Pop the most recently freed segment of exactly this size class
    pub fn pop(&mut self, class: SizeClass) -> Option<BufferSegment> {
        let bucket = self.buckets.get_mut(&class)?;
        let segment = bucket.pop();
        if bucket.is_empty() {
            self.buckets.remove(&class);
        }
        segment
    }

    /// Drop all pooled segments
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Total number of pooled segments
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether the pool holds no segments
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of non-empty size-class buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of pooled segments of exactly this size class
    pub fn segments_in(&self, class: SizeClass) -> usize {
        self.buckets.get(&class).map_or(0, Vec::len)
    }
}

#[cfg(test)]
#[path = "free_pool_tests.rs"]
mod tests;
