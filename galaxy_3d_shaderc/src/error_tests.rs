//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_optimizer_diagnostic_display() {
    let err = Error::OptimizerDiagnostic {
        line: 12,
        column: 4,
        message: "0:12(4): error: undeclared identifier".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("Optimizer error"));
    assert!(display.contains("12:4"));
    assert!(display.contains("undeclared identifier"));
}

#[test]
fn test_malformed_declaration_display() {
    let err = Error::MalformedDeclaration("array size 'N' of 'u_bones'".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Malformed declaration"));
    assert!(display.contains("u_bones"));
}

#[test]
fn test_serialization_write_failure_display() {
    let err = Error::SerializationWriteFailure("permission denied".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Serialization failed"));
    assert!(display.contains("permission denied"));
}

#[test]
fn test_invalid_blob_display() {
    let err = Error::InvalidBlob("truncated".to_string());
    assert_eq!(format!("{}", err), "Invalid shader blob: truncated");
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::InvalidBlob("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err1 = Error::MalformedDeclaration("test".to_string());
    assert!(format!("{:?}", err1).contains("MalformedDeclaration"));

    let err2 = Error::OptimizerDiagnostic { line: 1, column: 2, message: "m".to_string() };
    assert!(format!("{:?}", err2).contains("OptimizerDiagnostic"));

    let err3 = Error::SerializationWriteFailure("w".to_string());
    assert!(format!("{:?}", err3).contains("SerializationWriteFailure"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::OptimizerDiagnostic { line: 3, column: 7, message: "bad".to_string() };
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));

    let err3 = Error::SerializationWriteFailure("disk full".to_string());
    let err4 = err3.clone();
    assert_eq!(format!("{}", err3), format!("{}", err4));
}

// ============================================================================
// RESULT TYPE TESTS
// ============================================================================

#[test]
fn test_result_type_ok() {
    fn returns_ok() -> Result<u16> {
        Ok(42)
    }

    assert_eq!(returns_ok().unwrap(), 42);
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<u8> {
        Err(Error::MalformedDeclaration("inner".to_string()))
    }

    fn outer() -> Result<u8> {
        inner()?;
        Ok(1)
    }

    match outer() {
        Err(Error::MalformedDeclaration(msg)) => assert_eq!(msg, "inner"),
        other => panic!("unexpected result: {:?}", other),
    }
}

// ============================================================================
// BAIL MACRO
// ============================================================================

#[test]
fn test_bail_returns_variant_with_formatted_message() {
    fn fails(name: &str) -> Result<()> {
        crate::shaderc_bail!("test::bail", MalformedDeclaration, "bad name '{}'", name);
    }

    match fails("u_x") {
        Err(Error::MalformedDeclaration(msg)) => assert_eq!(msg, "bad name 'u_x'"),
        other => panic!("unexpected result: {:?}", other),
    }
}
