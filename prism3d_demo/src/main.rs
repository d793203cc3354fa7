//! Prism3D packing demo
//!
//! Packs a handful of helix tube curves into shared buffer packs, then
//! exercises the update surface: recoloring a set, hiding another,
//! removing curves and re-placing a same-size curve to show free-pool
//! reuse. Draw calls go through a console renderer that reports per-pack
//! statistics.

use prism_3d_buffers::glam::Vec3;
use prism_3d_buffers::prism3d::geometry::{CurveTopology, ElementKind, SizeClass, LATITUDES};
use prism_3d_buffers::prism3d::pack::{ArrayPackFactory, GeometryRenderer, PackDraw};
use prism_3d_buffers::prism3d::{BufferManager, Color, Result};
use prism_3d_buffers::prism_info;

const SOURCE: &str = "prism3d_demo";

/// Renderer that prints per-pack statistics instead of rendering
struct ConsoleRenderer {
    packs_drawn: usize,
}

impl ConsoleRenderer {
    fn new() -> Self {
        Self { packs_drawn: 0 }
    }
}

impl GeometryRenderer for ConsoleRenderer {
    fn draw_pack(&mut self, draw: PackDraw<'_>) {
        self.packs_drawn += 1;
        prism_info!(
            SOURCE,
            "pack {}: {} elements, {} indices, {} vertex bytes",
            self.packs_drawn,
            draw.element_count(),
            draw.index_count(),
            draw.vertex_bytes().len()
        );
    }
}

/// Tube vertices around a helix: `size + 1` rings of `LATITUDES` vertices
fn helix_tube(size: usize, radius: f32, phase: f32) -> Vec<f32> {
    let tube_radius = 0.1;
    let mut data = Vec::with_capacity(CurveTopology::elements_length_for_curve(size) * 3);
    for ring in 0..=size {
        let t = phase + ring as f32 * 0.3;
        let center = Vec3::new(t.cos() * radius, t.sin() * radius, 0.15 * ring as f32);
        for lat in 0..LATITUDES {
            let angle = lat as f32 / LATITUDES as f32 * std::f32::consts::TAU;
            let point = center + Vec3::new(angle.cos(), angle.sin(), 0.0) * tube_radius;
            data.extend_from_slice(&[point.x, point.y, point.z]);
        }
    }
    data
}

/// Stage and place one helix curve
fn place_helix(
    manager: &mut BufferManager,
    set_id: u32,
    ordinal: u32,
    size: usize,
    color: Color,
) -> Result<()> {
    manager.set_current_index(set_id, ordinal);
    let vertices = helix_tube(size, 1.0 + ordinal as f32 * 0.4, set_id as f32);
    let length = vertices.len();
    manager.set_vertex_buffer(vertices, length);
    manager.set_normal_buffer(vec![0.0, 0.0, 1.0], 3);
    manager.set_color_buffer(color);
    manager.set_indices(size, ElementKind::Curve)
}

fn main() -> Result<()> {
    let mut manager = BufferManager::new(
        Box::new(CurveTopology::new()),
        Box::new(ArrayPackFactory::new()),
    );

    // Two sets of helix curves with per-set colors
    let blue = Color::rgba(0.2, 0.4, 0.9, 0.8);
    let orange = Color::rgba(0.9, 0.5, 0.1, 0.8);
    for ordinal in 0..3 {
        place_helix(&mut manager, 0, ordinal, 24, blue)?;
    }
    for ordinal in 0..2 {
        place_helix(&mut manager, 1, ordinal, 24, orange)?;
    }
    prism_info!(
        SOURCE,
        "placed {} curves in {} pack(s)",
        manager.live_count(),
        manager.pack_count()
    );

    // Recolor the first set, hide the second
    manager.update_color(0, 3, Color::rgba(0.9, 0.1, 0.1, 0.8));
    manager.update_visibility(1, 0, 2, false);

    // Remove the first set and re-place one same-size curve: the free
    // pool hands back the most recently freed segment
    manager.remove(0, 3);
    let class = SizeClass::new(
        CurveTopology::elements_length_for_curve(24),
        CurveTopology::indices_length_for_curve(24),
    );
    prism_info!(
        SOURCE,
        "after remove: {} live, {} segment(s) pooled in bucket ({}, {})",
        manager.live_count(),
        manager.free_segments_in(class),
        class.elements_length,
        class.indices_length
    );

    place_helix(&mut manager, 2, 0, 24, Color::rgba(0.1, 0.8, 0.3, 1.0))?;
    prism_info!(
        SOURCE,
        "after reuse: {} live, {} segment(s) pooled, still {} pack(s)",
        manager.live_count(),
        manager.free_segment_count(),
        manager.pack_count()
    );

    let mut renderer = ConsoleRenderer::new();
    manager.draw_buffer_packs(&mut renderer);
    prism_info!(SOURCE, "drew {} pack(s)", renderer.packs_drawn);

    Ok(())
}
