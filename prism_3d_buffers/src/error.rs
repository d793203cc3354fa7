//! Error types for the Prism3D buffer packing crate
//!
//! This module defines the error types used throughout the crate.
//! Most allocator conditions are policy decisions, not errors: missing
//! segments are skipped, size mismatches are resizes, exhausted packs
//! trigger new allocations. The only fallible path is pack creation.

use std::fmt;

/// Result type for Prism3D buffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D buffer packing errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Pack capacity is not a power of two or exceeds the 16-bit index ceiling
    InvalidCapacity(String),

    /// Staged state incomplete or inconsistent for placement
    InvalidStaging(String),

    /// Backend-specific error (GPU upload, device loss, etc.)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(msg) => write!(f, "Invalid capacity: {}", msg),
            Error::InvalidStaging(msg) => write!(f, "Invalid staging: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build a [`BackendError`](Error::BackendError), logging it first
///
/// # Example
///
/// ```no_run
/// # use prism_3d_buffers::{prism_err, error::Error};
/// let err: Error = prism_err!("prism3d::ArrayBufferPack", "upload failed: {}", "oom");
/// ```
#[macro_export]
macro_rules! prism_err {
    ($source:expr, $($arg:tt)*) => {{
        $crate::prism_error!($source, $($arg)*);
        $crate::error::Error::BackendError(format!($($arg)*))
    }};
}

/// Return early with a logged [`BackendError`](Error::BackendError)
///
/// # Example
///
/// ```no_run
/// # use prism_3d_buffers::{prism_bail, error::Result};
/// # fn check(len: usize) -> Result<()> {
/// if len == 0 {
///     prism_bail!("prism3d::ArrayBufferPack", "empty buffer update");
/// }
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! prism_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::prism_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
