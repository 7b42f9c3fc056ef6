//! Declaration scanners
//!
//! Recover the uniform table from optimized shader source by text scanning.
//! There is no parser or AST: each scanner walks a forward-only [`Cursor`]
//! over the source and relies on the narrow, order-dependent shape of the
//! optimizer output.
//!
//! - [`glsl`]: GL-style top-level statements (desktop GL, GLES2, GLES3)
//! - [`metal`]: C-like uniform struct and entry-point parameter list

mod cursor;
pub mod glsl;
pub mod metal;

pub use cursor::Cursor;

use crate::error::{Error, Result};
use crate::uniform::UniformTable;

const LOG_SOURCE: &str = "galaxy3d::shaderc::Scanner";

/// Scanning strategy, selected once per compilation from the target dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanner {
    /// Top-level `uniform` statements
    GlStyle,
    /// Uniform struct fields and annotated entry-point textures
    CLikeStruct,
}

impl Scanner {
    /// Scan `source` and return its uniforms in source order
    pub fn scan(self, source: &str) -> Result<UniformTable> {
        match self {
            Scanner::GlStyle => glsl::scan(source),
            Scanner::CLikeStruct => metal::scan(source),
        }
    }
}

/// Parse the element count of an array declaration
///
/// `text` starts right after the opening `[`. The count must be a decimal
/// integer in `1..=255` closed by `]`.
pub(crate) fn parse_array_size(text: &str, name: &str) -> Result<u8> {
    let close = text.find(']').ok_or_else(|| {
        malformed(format!("unterminated array size for '{}'", name))
    })?;
    let digits = text[..close].trim();

    match digits.parse::<u32>() {
        Ok(num @ 1..=255) => Ok(num as u8),
        Ok(num) => Err(malformed(format!("array size {} of '{}' is out of range", num, name))),
        Err(_) => Err(malformed(format!("array size '{}' of '{}' is not a number", digits, name))),
    }
}

pub(crate) fn malformed(message: String) -> Error {
    crate::shaderc_error!(LOG_SOURCE, "{}", message);
    Error::MalformedDeclaration(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_size() {
        assert_eq!(parse_array_size("4];", "u").unwrap(), 4);
        assert_eq!(parse_array_size(" 32 ];", "u").unwrap(), 32);
        assert_eq!(parse_array_size("255]", "u").unwrap(), 255);
    }

    #[test]
    fn test_parse_array_size_rejects_garbage() {
        for text in ["N];", "];", "4;", "0]", "256]", "-1]"] {
            match parse_array_size(text, "u_bad") {
                Err(Error::MalformedDeclaration(msg)) => assert!(msg.contains("u_bad"), "{}", msg),
                other => panic!("{:?} -> {:?}", text, other),
            }
        }
    }
}
