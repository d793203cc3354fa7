use super::*;
use crate::geometry::index::SizeClass;
use crate::geometry::segment::BufferSegment;
use crate::geometry::topology::ElementKind;
use crate::pack::buffer_pack::PackKey;

fn segment(elements_offset: usize, elements_length: usize, indices_length: usize) -> BufferSegment {
    BufferSegment::new(
        PackKey::default(),
        elements_offset,
        elements_length,
        elements_offset * 3,
        indices_length,
        ElementKind::Triangles,
    )
}

// ============================================================================
// Basic push/pop
// ============================================================================

#[test]
fn test_new_is_empty() {
    let pool = FreePool::new();
    assert!(pool.is_empty());
    assert_eq!(pool.len(), 0);
    assert_eq!(pool.bucket_count(), 0);
}

#[test]
fn test_pop_returns_pushed_segment() {
    let mut pool = FreePool::new();
    let seg = segment(4, 8, 24);
    pool.push(seg);

    assert_eq!(pool.len(), 1);
    assert_eq!(pool.pop(SizeClass::new(8, 24)), Some(seg));
    assert!(pool.is_empty());
}

#[test]
fn test_pop_is_exact_match_only() {
    let mut pool = FreePool::new();
    pool.push(segment(0, 16, 48));

    // a larger pooled segment never satisfies a smaller request
    assert_eq!(pool.pop(SizeClass::new(8, 48)), None);
    assert_eq!(pool.pop(SizeClass::new(16, 24)), None);
    assert_eq!(pool.len(), 1);
}

// ============================================================================
// LIFO order
// ============================================================================

#[test]
fn test_lifo_within_bucket() {
    let mut pool = FreePool::new();
    let first = segment(0, 8, 24);
    let second = segment(8, 8, 24);
    pool.push(first);
    pool.push(second);

    let class = SizeClass::new(8, 24);
    assert_eq!(pool.pop(class), Some(second));
    assert_eq!(pool.pop(class), Some(first));
    assert_eq!(pool.pop(class), None);
}

// ============================================================================
// Bucket bookkeeping
// ============================================================================

#[test]
fn test_buckets_by_size_class() {
    let mut pool = FreePool::new();
    pool.push(segment(0, 8, 24));
    pool.push(segment(8, 8, 24));
    pool.push(segment(16, 4, 12));

    assert_eq!(pool.bucket_count(), 2);
    assert_eq!(pool.segments_in(SizeClass::new(8, 24)), 2);
    assert_eq!(pool.segments_in(SizeClass::new(4, 12)), 1);
    assert_eq!(pool.segments_in(SizeClass::new(2, 6)), 0);
}

#[test]
fn test_emptied_bucket_is_removed() {
    let mut pool = FreePool::new();
    pool.push(segment(0, 8, 24));
    pool.pop(SizeClass::new(8, 24));

    assert_eq!(pool.bucket_count(), 0);
}

#[test]
fn test_clear() {
    let mut pool = FreePool::new();
    pool.push(segment(0, 8, 24));
    pool.push(segment(16, 4, 12));
    pool.clear();

    assert!(pool.is_empty());
    assert_eq!(pool.bucket_count(), 0);
}
