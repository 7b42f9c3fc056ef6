//! Error types for the Galaxy3D shader compiler
//!
//! This module defines the error types surfaced by a single shader
//! compilation: optimizer diagnostics, malformed declarations found while
//! scanning, serialization failures, and invalid blobs on the reader side.

use std::fmt;

/// Result type for shader compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader compiler errors
#[derive(Debug, Clone)]
pub enum Error {
    /// The external optimizer rejected the source
    OptimizerDiagnostic {
        /// Source line reported by the optimizer (0 when unknown)
        line: u32,
        /// Source column reported by the optimizer (0 when unknown)
        column: u32,
        /// Raw optimizer log
        message: String,
    },

    /// A declaration the scanner expected to parse is malformed
    MalformedDeclaration(String),

    /// The blob could not be written to its destination
    SerializationWriteFailure(String),

    /// A blob handed to the reader does not follow the wire layout
    InvalidBlob(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OptimizerDiagnostic { line, column, message } => {
                write!(f, "Optimizer error at {}:{}: {}", line, column, message)
            }
            Error::MalformedDeclaration(msg) => write!(f, "Malformed declaration: {}", msg),
            Error::SerializationWriteFailure(msg) => write!(f, "Serialization failed: {}", msg),
            Error::InvalidBlob(msg) => write!(f, "Invalid shader blob: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error with file:line information and return it
///
/// # Example
///
/// ```ignore
/// shaderc_bail!("galaxy3d::shaderc::Blob", SerializationWriteFailure,
///     "Uniform name '{}' is too long", name);
/// ```
#[macro_export]
macro_rules! shaderc_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::shaderc_error!($source, "{}", message);
        return Err($crate::galaxy3d::Error::$variant(message));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
