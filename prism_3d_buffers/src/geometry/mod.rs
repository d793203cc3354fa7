/// Geometry module - keys, segments, staging, free pool, topology, manager

// Module declarations
pub mod index;
pub mod segment;
pub mod staging;
pub mod free_pool;
pub mod topology;
pub mod manager;

// Re-exports
pub use index::*;
pub use segment::*;
pub use staging::*;
pub use free_pool::*;
pub use topology::*;
pub use manager::*;
