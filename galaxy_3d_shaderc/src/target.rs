/// Target dialect selection
///
/// The dialect is derived once per compilation from a numeric version code
/// and a four-character platform tag, and never changes afterwards.

use std::fmt;
use crate::scanner::Scanner;

/// High bit marking a GLSL ES version code
pub const GLES_VERSION_BIT: u32 = 0x8000_0000;

/// Lowest GLSL ES version compiled as GLES3
pub const GLES3_MIN_VERSION: u32 = 300;

/// Four-character platform tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Reserved tag selecting the Metal-like dialect
    pub const METAL: FourCc = FourCc(*b"MTL\0");

    /// No platform tag
    pub const NONE: FourCc = FourCc([0; 4]);

    pub const fn new(code: [u8; 4]) -> Self {
        Self(code)
    }

    /// Packed value, first character in the lowest byte
    pub const fn as_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.0.iter().take_while(|&&b| b != 0) {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

/// Output shape produced by the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDialect {
    DesktopGL,
    GLES2,
    GLES3,
    MetalLike,
}

impl TargetDialect {
    /// Select the dialect for a version code and platform tag
    ///
    /// The Metal tag wins outright, whether it is passed as the platform or
    /// packed into the version itself. Versions carrying [`GLES_VERSION_BIT`]
    /// select GLES3 from 300 upwards and GLES2 below; everything else is
    /// desktop GL.
    pub fn select(version: u32, platform: FourCc) -> Self {
        if platform == FourCc::METAL || version == FourCc::METAL.as_u32() {
            return TargetDialect::MetalLike;
        }

        if version & GLES_VERSION_BIT == 0 {
            return TargetDialect::DesktopGL;
        }

        if version & !GLES_VERSION_BIT >= GLES3_MIN_VERSION {
            TargetDialect::GLES3
        } else {
            TargetDialect::GLES2
        }
    }

    pub fn is_metal(self) -> bool {
        self == TargetDialect::MetalLike
    }

    /// Declaration scanner matching this dialect
    pub fn scanner(self) -> Scanner {
        if self.is_metal() {
            Scanner::CLikeStruct
        } else {
            Scanner::GlStyle
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
