use super::*;
use crate::geometry::segment::BufferSegment;
use crate::pack::array_pack::ArrayBufferPack;
use crate::pack::buffer_pack::{BufferPack, PackDesc, PackKey};

/// Pack with room for one segment at the given offsets
fn pack_with_segment(
    elements_offset: usize,
    elements_length: usize,
    indices_offset: usize,
    indices_length: usize,
    kind: ElementKind,
) -> (ArrayBufferPack, BufferSegment) {
    let mut pack = ArrayBufferPack::new(PackDesc {
        elements_capacity: 64,
        indices_capacity: 512,
    })
    .unwrap();
    pack.add_to_length(elements_offset + elements_length, indices_offset + indices_length);
    let segment = BufferSegment::new(
        PackKey::default(),
        elements_offset,
        elements_length,
        indices_offset,
        indices_length,
        kind,
    );
    (pack, segment)
}

fn emitted(pack: &mut ArrayBufferPack, segment: &BufferSegment) -> Vec<u16> {
    pack.indices_buffer_at(segment.indices_offset)[..segment.indices_length].to_vec()
}

// ============================================================================
// Curve sizing helpers
// ============================================================================

#[test]
fn test_curve_lengths() {
    assert_eq!(CurveTopology::elements_length_for_curve(10), 11 * LATITUDES);
    assert_eq!(CurveTopology::indices_length_for_curve(10), 3 * 2 * 10 * LATITUDES);
}

#[test]
fn test_curve_calculate_matches_helper() {
    let curve = CurveTopology::new();
    assert_eq!(
        curve.calculate_indices_length(7, ElementKind::Curve),
        CurveTopology::indices_length_for_curve(7)
    );
}

// ============================================================================
// Curve emission
// ============================================================================

#[test]
fn test_curve_tube_pattern() {
    let curve = CurveTopology::new();
    let size = 1;
    let elements = CurveTopology::elements_length_for_curve(size);
    let indices = CurveTopology::indices_length_for_curve(size);
    let (mut pack, segment) = pack_with_segment(0, elements, 0, indices, ElementKind::Curve);

    let mut writer = IndexWriter::new(&mut pack, &segment);
    curve.put_indices(&mut writer, size, ElementKind::Curve, false);

    let written = emitted(&mut pack, &segment);
    // first lattice cell: two triangles between ring 0 and ring 1
    assert_eq!(&written[..6], &[0, 8, 9, 0, 9, 1]);
    // every index addresses a vertex of the two rings
    assert!(written.iter().all(|&i| (i as usize) < elements));
}

#[test]
fn test_curve_emission_respects_element_offset() {
    let curve = CurveTopology::new();
    let size = 1;
    let elements = CurveTopology::elements_length_for_curve(size);
    let indices = CurveTopology::indices_length_for_curve(size);
    let (mut pack, segment) = pack_with_segment(16, elements, 96, indices, ElementKind::Curve);

    let mut writer = IndexWriter::new(&mut pack, &segment);
    curve.put_indices(&mut writer, size, ElementKind::Curve, false);

    let written = emitted(&mut pack, &segment);
    assert_eq!(&written[..6], &[16, 24, 25, 16, 25, 17]);
}

#[test]
fn test_reused_segment_skips_emission() {
    let curve = CurveTopology::new();
    let size = 1;
    let elements = CurveTopology::elements_length_for_curve(size);
    let indices = CurveTopology::indices_length_for_curve(size);
    let (mut pack, segment) = pack_with_segment(0, elements, 0, indices, ElementKind::Curve);

    // poison the index range, then emit with the reuse flag set
    pack.indices_buffer_at(0)[..indices].fill(777);
    let mut writer = IndexWriter::new(&mut pack, &segment);
    curve.put_indices(&mut writer, size, ElementKind::Curve, true);

    assert!(emitted(&mut pack, &segment).iter().all(|&i| i == 777));
}

// ============================================================================
// Polygon
// ============================================================================

#[test]
fn test_fan_lengths_and_pattern() {
    let polygon = PolygonTopology::new();
    assert_eq!(polygon.calculate_indices_length(5, ElementKind::TriangleFan), 9);

    let (mut pack, segment) = pack_with_segment(0, 5, 0, 9, ElementKind::TriangleFan);
    let mut writer = IndexWriter::new(&mut pack, &segment);
    polygon.put_indices(&mut writer, 5, ElementKind::TriangleFan, false);

    assert_eq!(emitted(&mut pack, &segment), vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
}

#[test]
fn test_triangle_list_pattern() {
    let polygon = PolygonTopology::new();
    assert_eq!(polygon.calculate_indices_length(2, ElementKind::Triangles), 6);

    let (mut pack, segment) = pack_with_segment(0, 6, 0, 6, ElementKind::Triangles);
    let mut writer = IndexWriter::new(&mut pack, &segment);
    polygon.put_indices(&mut writer, 2, ElementKind::Triangles, false);

    assert_eq!(emitted(&mut pack, &segment), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_degenerate_fan_is_empty() {
    let polygon = PolygonTopology::new();
    assert_eq!(polygon.calculate_indices_length(2, ElementKind::TriangleFan), 0);
    assert_eq!(polygon.calculate_indices_length(0, ElementKind::TriangleFan), 0);
}

// ============================================================================
// Point sprites
// ============================================================================

#[test]
fn test_point_sprite_pattern() {
    let points = PointTopology::new();
    assert_eq!(points.calculate_indices_length(2, ElementKind::PointSprite), 12);
    assert_eq!(PointTopology::elements_length_for_points(2), 8);

    let (mut pack, segment) = pack_with_segment(0, 8, 0, 12, ElementKind::PointSprite);
    let mut writer = IndexWriter::new(&mut pack, &segment);
    points.put_indices(&mut writer, 2, ElementKind::PointSprite, false);

    assert_eq!(
        emitted(&mut pack, &segment),
        vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]
    );
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_template_stamping() {
    let template = TemplateTopology::new(vec![0, 2, 1], 3);
    assert_eq!(template.calculate_indices_length(2, ElementKind::Template), 6);
    assert_eq!(template.elements_length_for_instances(2), 6);

    let (mut pack, segment) = pack_with_segment(0, 6, 0, 6, ElementKind::Template);
    let mut writer = IndexWriter::new(&mut pack, &segment);
    template.put_indices(&mut writer, 2, ElementKind::Template, false);

    assert_eq!(emitted(&mut pack, &segment), vec![0, 2, 1, 3, 5, 4]);
}
