/// Pack module - buffer pack trait, reference implementation, renderer seam

// Module declarations
pub mod buffer_pack;
pub mod array_pack;
pub mod renderer;

#[cfg(test)]
pub mod mock_renderer;

// Re-exports
pub use buffer_pack::*;
pub use array_pack::*;
pub use renderer::*;
