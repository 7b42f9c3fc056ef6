//! Integration tests for the shader compiler logging system
//!
//! Verifies that compilations report through the installed logger.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_shaderc::galaxy3d::{
    Shaderc, ShaderCompiler, Options, ShaderStage, TargetDialect, FourCc,
};
use galaxy_3d_shaderc::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn passthrough(_stage: ShaderStage, _dialect: TargetDialect, src: &str) -> Result<String, String> {
    Ok(src.to_string())
}

fn rejecting(_stage: ShaderStage, _dialect: TargetDialect, _src: &str) -> Result<String, String> {
    Err("0:2(1): error: syntax error".to_string())
}

// ============================================================================
// LOGGER FACADE
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Shaderc::set_logger(test_logger);

    Shaderc::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Shaderc::log_detailed(LogSeverity::Error, "test::error", "Critical".to_string(), "test_file.rs", 42);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].file, Some("test_file.rs"));
        assert_eq!(captured[1].line, Some(42));
    }

    Shaderc::reset_logger();
    Shaderc::log(LogSeverity::Info, "test", "not captured".to_string());
    assert_eq!(entries.lock().unwrap().len(), 2);
}

// ============================================================================
// COMPILER LOGGING
// ============================================================================

#[test]
#[serial]
fn test_integration_compile_traces_uniforms_and_states() {
    let (test_logger, entries) = TestLogger::new();
    Shaderc::set_logger(test_logger);

    let compiler = ShaderCompiler::new(passthrough);
    let options = Options::new(ShaderStage::Fragment, "unused.bin");
    let source = "uniform vec4 u_color;\nuniform float u_time;\nvoid main() {}\n";
    compiler.compile(&options, 120, FourCc::NONE, source, &mut Vec::new()).unwrap();

    Shaderc::reset_logger();

    let captured = entries.lock().unwrap();
    let messages: Vec<&str> = captured.iter().map(|e| e.message.as_str()).collect();

    assert!(messages.iter().any(|m| m.contains("name: u_color")));
    assert!(messages.iter().any(|m| m.contains("dropping 'u_time'")));
    assert!(messages.contains(&"Start -> DialectSelected"));
    assert!(messages.contains(&"Rewritten -> Scanned"));
    assert!(captured.iter().all(|e| e.severity < LogSeverity::Warn));
}

#[test]
#[serial]
fn test_integration_failed_compile_logs_error_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Shaderc::set_logger(test_logger);

    let compiler = ShaderCompiler::new(rejecting);
    let options = Options::new(ShaderStage::Vertex, "unused.bin");
    let result = compiler.compile(&options, 120, FourCc::NONE, "a\nb\n", &mut Vec::new());

    Shaderc::reset_logger();
    assert!(result.is_err());

    let captured = entries.lock().unwrap();
    let error = captured
        .iter()
        .find(|e| e.severity == LogSeverity::Error)
        .expect("an error entry");
    assert_eq!(error.source, "galaxy3d::shaderc::Compiler");
    assert!(error.message.contains("syntax error"));
    assert!(error.file.is_some());
    assert!(error.line.is_some());
    assert!(captured.iter().any(|e| e.message == "DialectSelected -> Failed"));
}
