/*!
# Galaxy 3D Shader Compiler

Post-processing stage for GLSL-family shader compilation.

Given shader source and an external optimizer, this crate:
- rewrites deprecated extension function names and forces vertex precision,
- scans the optimized source to recover the uniform table (scalars, vectors,
  matrices, samplers and textures) that the optimizer output no longer
  carries as metadata,
- serializes the table and the final source into the blob loaded by the
  runtime.

## Architecture

- **ShaderCompiler**: Driver selecting the dialect and running the pipeline
- **ShaderOptimizer**: Trait implemented by the external optimizer
- **Scanner**: GL-style or C-like struct declaration scanner
- **CompiledBlob**: Wire format writer and reader
*/

// Internal modules
mod error;
mod shaderc;
pub mod log;
pub mod options;
pub mod target;
pub mod optimizer;
pub mod diagnostic;
pub mod rewrite;
pub mod uniform;
pub mod scanner;
pub mod blob;
pub mod compiler;
mod mock_optimizer;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger facade
    pub use crate::shaderc::Shaderc;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Compilation entry points
    pub use crate::compiler::{ShaderCompiler, CompiledShader, CompileState};
    pub use crate::optimizer::ShaderOptimizer;
    pub use crate::options::{Options, ShaderStage, DISASM_SUFFIX};
    pub use crate::target::{FourCc, TargetDialect};
    pub use crate::diagnostic::Diagnostic;

    // Uniform table and blob
    pub use crate::uniform::{Uniform, UniformTable, UniformType};
    pub use crate::blob::CompiledBlob;
    pub use crate::scanner::Scanner;
}
