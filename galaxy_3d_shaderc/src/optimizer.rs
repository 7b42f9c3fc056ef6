/// External shader optimizer interface
///
/// The optimizer (dead-code elimination, constant folding, dialect
/// translation) is an opaque collaborator. Implementations wrap whatever
/// optimizer the build uses; the compiler only depends on this trait.

use crate::options::ShaderStage;
use crate::target::TargetDialect;

/// Shader optimizer trait
///
/// Implementations must be free of observable side effects: the compiler
/// calls `optimize` exactly once per compilation, never retries, and has no
/// way to cancel a call that does not return.
pub trait ShaderOptimizer {
    /// Optimize `source` for `stage` and `dialect`
    ///
    /// # Returns
    ///
    /// The optimized source, or the optimizer's raw log on failure. The log
    /// is expected to start with a location prefix such as `"0:12(4):"`.
    fn optimize(
        &self,
        stage: ShaderStage,
        dialect: TargetDialect,
        source: &str,
    ) -> std::result::Result<String, String>;
}

impl<F> ShaderOptimizer for F
where
    F: Fn(ShaderStage, TargetDialect, &str) -> std::result::Result<String, String>,
{
    fn optimize(
        &self,
        stage: ShaderStage,
        dialect: TargetDialect,
        source: &str,
    ) -> std::result::Result<String, String> {
        self(stage, dialect, source)
    }
}
