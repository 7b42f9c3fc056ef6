/// Compilation options and shader stage

use std::path::{Path, PathBuf};

/// Suffix appended to the output path for the disassembly side file
pub const DISASM_SUFFIX: &str = ".disasm";

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
    /// Compute shader
    Compute,
}

impl ShaderStage {
    /// Map a single-letter stage tag (`'v'`, `'f'`, `'c'`) to a stage
    ///
    /// Anything other than `'f'` or `'c'` is treated as a vertex shader.
    pub fn from_char(tag: char) -> Self {
        match tag {
            'f' => ShaderStage::Fragment,
            'c' => ShaderStage::Compute,
            _ => ShaderStage::Vertex,
        }
    }

    /// Single-letter tag for this stage
    pub fn as_char(self) -> char {
        match self {
            ShaderStage::Vertex => 'v',
            ShaderStage::Fragment => 'f',
            ShaderStage::Compute => 'c',
        }
    }
}

/// Options for one compilation
///
/// Immutable for the duration of a compilation and not retained afterwards.
#[derive(Debug, Clone)]
pub struct Options {
    /// Stage being compiled
    pub stage: ShaderStage,
    /// Destination of the compiled blob
    pub output_path: PathBuf,
    /// Also write the final source next to the blob
    pub disasm: bool,
}

impl Options {
    /// Create options for a stage writing to `output_path` (disassembly off)
    pub fn new(stage: ShaderStage, output_path: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            output_path: output_path.into(),
            disasm: false,
        }
    }

    /// Enable or disable the disassembly side file
    pub fn with_disasm(mut self, disasm: bool) -> Self {
        self.disasm = disasm;
        self
    }

    /// Path of the disassembly side file (`<output_path>.disasm`)
    pub fn disasm_path(&self) -> PathBuf {
        append_suffix(&self.output_path, DISASM_SUFFIX)
    }
}

pub(crate) fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
