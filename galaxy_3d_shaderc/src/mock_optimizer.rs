/// Mock optimizer for unit tests
///
/// Returns a scripted output (or failure log) and records every call so tests
/// can check what the compiler handed to the optimizer.

#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use crate::optimizer::ShaderOptimizer;
#[cfg(test)]
use crate::options::ShaderStage;
#[cfg(test)]
use crate::target::TargetDialect;

/// One recorded optimizer call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub stage: ShaderStage,
    pub dialect: TargetDialect,
    pub source: String,
}

#[cfg(test)]
pub struct MockOptimizer {
    result: std::result::Result<String, String>,
    calls: Mutex<Vec<MockCall>>,
}

#[cfg(test)]
impl MockOptimizer {
    /// Optimizer returning `output` unchanged for every input
    pub fn succeeding(output: &str) -> Self {
        Self {
            result: Ok(output.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Optimizer failing with `log`
    pub fn failing(log: &str) -> Self {
        Self {
            result: Err(log.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ShaderOptimizer for MockOptimizer {
    fn optimize(
        &self,
        stage: ShaderStage,
        dialect: TargetDialect,
        source: &str,
    ) -> std::result::Result<String, String> {
        self.calls.lock().unwrap().push(MockCall {
            stage,
            dialect,
            source: source.to_string(),
        });
        self.result.clone()
    }
}
