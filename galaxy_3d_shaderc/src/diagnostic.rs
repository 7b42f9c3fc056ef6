/// Optimizer diagnostics
///
/// The optimizer reports failures as a free-form log. Two location prefixes
/// are recognized:
/// - `"<source>:<line>(<column>):"` (GLSL front end)
/// - `"(<line>,<column>):"`
///
/// The location is used to print a window of source lines around the error.

use std::fmt::Write as _;
use std::ops::RangeInclusive;
use crate::error::Error;

/// Lines shown before the reported line
const CONTEXT_BEFORE: u32 = 10;

/// Total span of the excerpt after its first line
const CONTEXT_SPAN: u32 = 20;

/// Parsed optimizer failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line, 0 when the log carries no location
    pub line: u32,
    /// Column, 0 when the log carries no location
    pub column: u32,
    /// Raw optimizer log
    pub message: String,
}

impl Diagnostic {
    pub fn from_log(log: &str) -> Self {
        let (line, column) = parse_source_line_column(log)
            .or_else(|| parse_line_column(log))
            .unwrap_or((0, 0));

        Self {
            line,
            column,
            message: log.trim_end().to_string(),
        }
    }

    /// Lines to print around the error, `None` to print the whole source
    pub fn excerpt_range(&self) -> Option<RangeInclusive<u32>> {
        if self.line == 0 {
            return None;
        }
        let start = self.line.saturating_sub(CONTEXT_BEFORE).max(1);
        Some(start..=start.saturating_add(CONTEXT_SPAN))
    }

    /// Numbered source excerpt with the reported line and column marked
    pub fn format_excerpt(&self, source: &str) -> String {
        let range = self.excerpt_range().unwrap_or(1..=u32::MAX);
        let mut out = String::from("Code:\n---\n");

        for (line, text) in (1u32..).zip(source.lines()) {
            if line > *range.end() {
                break;
            }
            if line < *range.start() {
                continue;
            }

            if line == self.line {
                let _ = writeln!(out);
                let _ = writeln!(out, ">>> {:3}: {}", line, text);
                // caret never pads past the end of the reported line
                let width = (self.column as usize).min(text.len() + 1);
                let _ = writeln!(out, ">>> {:3}: {:>width$}", self.column, "^", width = width);
                let _ = writeln!(out);
            } else {
                let _ = writeln!(out, "    {:3}: {}", line, text);
            }
        }

        out.push_str("---\n");
        out
    }
}

impl From<Diagnostic> for Error {
    fn from(diagnostic: Diagnostic) -> Self {
        Error::OptimizerDiagnostic {
            line: diagnostic.line,
            column: diagnostic.column,
            message: diagnostic.message,
        }
    }
}

fn number(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// `"<source>:<line>(<column>):"`
fn parse_source_line_column(log: &str) -> Option<(u32, u32)> {
    let (source, rest) = log.split_once(':')?;
    number(source)?;
    let (line, rest) = rest.split_once('(')?;
    let (column, _) = rest.split_once(')')?;
    Some((number(line)?, number(column)?))
}

/// `"(<line>,<column>):"`
fn parse_line_column(log: &str) -> Option<(u32, u32)> {
    let rest = log.trim_start().strip_prefix('(')?;
    let (line, rest) = rest.split_once(',')?;
    let (column, _) = rest.split_once(')')?;
    Some((number(line)?, number(column)?))
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
