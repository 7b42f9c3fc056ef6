/// Shader compiler driver
///
/// Runs one compilation through these states:
///
/// ```text
/// Start -> DialectSelected -> Optimized -> Rewritten -> Scanned -> Serialized
/// ```
///
/// Any state after `Start` may move to `Failed`. Failures are terminal for
/// the compilation and reported once. Nothing is retried and no partial
/// output is left behind.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;
use crate::blob::CompiledBlob;
use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};
use crate::optimizer::ShaderOptimizer;
use crate::options::{append_suffix, Options};
use crate::rewrite;
use crate::target::{FourCc, TargetDialect};

const LOG_SOURCE: &str = "galaxy3d::shaderc::Compiler";

/// Suffix of the file written before it is renamed into place
const TEMP_SUFFIX: &str = ".tmp";

/// Compilation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileState {
    Start,
    DialectSelected,
    Optimized,
    Rewritten,
    Scanned,
    Serialized,
    Failed,
}

/// Tracks the state of one compilation
struct StateMachine {
    state: CompileState,
}

impl StateMachine {
    fn new() -> Self {
        Self { state: CompileState::Start }
    }

    fn enter(&mut self, next: CompileState) {
        crate::shaderc_debug!(LOG_SOURCE, "{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Move to `Failed` and hand the error back
    fn fail(&mut self, error: Error) -> Error {
        crate::shaderc_error!(LOG_SOURCE, "Compilation failed after {:?}: {}", self.state, error);
        self.enter(CompileState::Failed);
        error
    }
}

/// Result of a successful compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShader {
    pub dialect: TargetDialect,
    pub blob: CompiledBlob,
}

/// Shader compiler
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_shaderc::galaxy3d::{ShaderCompiler, Options, ShaderStage, TargetDialect, FourCc};
///
/// let optimizer = |_stage: ShaderStage, _dialect: TargetDialect, src: &str| -> Result<String, String> {
///     Ok(src.to_string())
/// };
/// let compiler = ShaderCompiler::new(optimizer);
/// let options = Options::new(ShaderStage::Fragment, "fs_mesh.bin");
///
/// compiler.compile_to_file(&options, 120, FourCc::NONE, "uniform vec4 u_color;", &mut std::io::stderr())?;
/// # Ok::<(), galaxy_3d_shaderc::galaxy3d::Error>(())
/// ```
pub struct ShaderCompiler<O: ShaderOptimizer> {
    optimizer: O,
}

impl<O: ShaderOptimizer> ShaderCompiler<O> {
    pub fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Compile `source` into an in-memory blob
    ///
    /// On optimizer failure a numbered source excerpt around the reported
    /// line and the optimizer log are written to `messages`.
    ///
    /// # Errors
    ///
    /// - `OptimizerDiagnostic` if the optimizer rejects the source
    /// - `MalformedDeclaration` if the declaration scanner cannot parse a token
    pub fn compile<M: Write + ?Sized>(
        &self,
        options: &Options,
        version: u32,
        platform: FourCc,
        source: &str,
        messages: &mut M,
    ) -> Result<CompiledShader> {
        let mut machine = StateMachine::new();

        let dialect = TargetDialect::select(version, platform);
        machine.enter(CompileState::DialectSelected);
        crate::shaderc_debug!(LOG_SOURCE, "{:?} shader, target {:?}", options.stage, dialect);

        let optimized = match self.optimizer.optimize(options.stage, dialect, source) {
            Ok(code) => code,
            Err(log) => {
                let diagnostic = Diagnostic::from_log(&log);
                report_diagnostic(messages, source, &diagnostic, &log);
                return Err(machine.fail(diagnostic.into()));
            }
        };
        machine.enter(CompileState::Optimized);

        let code = rewrite::apply(rewrite::strip_directives(&optimized), options.stage, dialect);
        machine.enter(CompileState::Rewritten);

        let uniforms = dialect
            .scanner()
            .scan(&code)
            .map_err(|e| machine.fail(e))?;
        machine.enter(CompileState::Scanned);

        crate::shaderc_info!(LOG_SOURCE, "{} uniform(s), {} byte(s) of source",
            uniforms.len(), code.len());

        Ok(CompiledShader {
            dialect,
            blob: CompiledBlob::new(uniforms, code),
        })
    }

    /// Compile `source` and write the blob to `options.output_path`
    ///
    /// When `options.disasm` is set, the final source is also written to
    /// `options.disasm_path()`. A failure writing that side file is logged
    /// and does not fail the compilation.
    ///
    /// Both files are written to a `.tmp` sibling first and renamed into
    /// place. When the compilation fails, outputs left by an earlier run are
    /// removed so the output path never holds a stale blob.
    ///
    /// # Errors
    ///
    /// Everything [`ShaderCompiler::compile`] reports, plus
    /// `SerializationWriteFailure` if the blob cannot be encoded or written.
    pub fn compile_to_file<M: Write + ?Sized>(
        &self,
        options: &Options,
        version: u32,
        platform: FourCc,
        source: &str,
        messages: &mut M,
    ) -> Result<CompiledShader> {
        let compiled = match self.compile(options, version, platform, source, messages) {
            Ok(compiled) => compiled,
            Err(e) => {
                discard_outputs(options);
                return Err(e);
            }
        };

        let mut machine = StateMachine { state: CompileState::Scanned };
        let written = compiled
            .blob
            .to_bytes()
            .and_then(|bytes| write_file(&options.output_path, &bytes));
        if let Err(e) = written {
            discard_outputs(options);
            return Err(machine.fail(e));
        }
        machine.enter(CompileState::Serialized);

        if options.disasm {
            let disasm_path = options.disasm_path();
            if let Err(e) = write_file(&disasm_path, compiled.blob.source.as_bytes()) {
                crate::shaderc_warn!(LOG_SOURCE, "Disassembly not written: {}", e);
            }
        }

        Ok(compiled)
    }
}

fn report_diagnostic<M: Write + ?Sized>(messages: &mut M, source: &str, diagnostic: &Diagnostic, log: &str) {
    let result = messages
        .write_all(diagnostic.format_excerpt(source).as_bytes())
        .and_then(|_| writeln!(messages, "Error: {}", log.trim_end()));

    if let Err(e) = result {
        crate::shaderc_warn!(LOG_SOURCE, "Could not print diagnostic: {}", e);
    }
}

/// Write `bytes` to a `.tmp` sibling of `path`, then rename it over `path`
///
/// On failure only the temporary file is removed.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp = append_suffix(path, TEMP_SUFFIX);
    let result = File::create(&temp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp, path));

    result.map_err(|e| {
        let _ = fs::remove_file(&temp);
        Error::SerializationWriteFailure(format!("{}: {}", path.display(), e))
    })
}

/// Remove the blob and disassembly left by an earlier compilation
fn discard_outputs(options: &Options) {
    for path in [options.output_path.clone(), options.disasm_path()] {
        match fs::remove_file(&path) {
            Ok(()) => crate::shaderc_debug!(LOG_SOURCE, "Removed stale {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => crate::shaderc_warn!(LOG_SOURCE, "Could not remove stale {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
