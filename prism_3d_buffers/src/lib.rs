/*!
# Prism3D Buffers

Geometry buffer packing for the Prism 3D rendering engine.

Many small, frequently mutated geometries (curves, polygons, points) are
packed into a small number of large reusable buffer packs, so each can be
recolored, hidden, resized, or removed without rebuilding its neighbors.
Backend concerns stay behind traits: packs implement [`pack::BufferPack`],
draw dispatch implements [`pack::GeometryRenderer`], and per-kind index
topology implements [`geometry::TopologyStrategy`].

## Architecture

- **BufferManager**: orchestrates staging, placement, updates, and draws
- **BufferPack**: one physically allocated buffer set holding many segments
- **BufferSegment**: a geometry's contiguous sub-range inside one pack
- **FreePool**: size-bucketed LIFO free lists for removed geometries
- **TopologyStrategy**: per-kind index counting and emission

Indices are 16-bit values, so no pack ever addresses more than a signed
16-bit index can reach; the pack factory rejects capacities beyond that
ceiling.
*/

// Internal modules
pub mod color;
pub mod error;
pub mod log;
pub mod geometry;
pub mod pack;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Color and visibility sentinel
    pub use crate::color::{Color, ALPHA_INVISIBLE};

    // Core manager
    pub use crate::geometry::manager::BufferManager;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger};
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Pack sub-module
    pub mod pack {
        pub use crate::pack::*;
    }
}

// Re-export math library at crate root
pub use glam;
