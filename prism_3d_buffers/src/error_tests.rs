use super::*;
use crate::{prism_bail, prism_err};

// ============================================================================
// Display tests
// ============================================================================

#[test]
fn test_display_invalid_capacity() {
    let err = Error::InvalidCapacity("capacity 12 is not a power of two".to_string());
    assert_eq!(
        err.to_string(),
        "Invalid capacity: capacity 12 is not a power of two"
    );
}

#[test]
fn test_display_invalid_staging() {
    let err = Error::InvalidStaging("no vertices".to_string());
    assert_eq!(err.to_string(), "Invalid staging: no vertices");
}

#[test]
fn test_display_backend_error() {
    let err = Error::BackendError("upload failed".to_string());
    assert_eq!(err.to_string(), "Backend error: upload failed");
}

#[test]
fn test_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&Error::BackendError("x".to_string()));
}

// ============================================================================
// Macro tests
// ============================================================================

#[test]
fn test_prism_err_builds_backend_error() {
    let err = prism_err!("prism3d::test", "code {}", 7);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "code 7"),
        other => panic!("expected BackendError, got {:?}", other),
    }
}

#[test]
fn test_prism_bail_returns_early() {
    fn checked(n: u32) -> Result<u32> {
        if n == 0 {
            prism_bail!("prism3d::test", "zero is not allowed");
        }
        Ok(n)
    }

    assert!(matches!(checked(3), Ok(3)));
    match checked(0) {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "zero is not allowed"),
        other => panic!("expected BackendError, got {:?}", other),
    }
}
