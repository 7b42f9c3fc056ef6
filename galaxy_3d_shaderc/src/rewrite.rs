/// Source rewriting applied to the optimizer output
///
/// - Leading preprocessor directives are stripped (they are meaningless once
///   the optimizer has run and would confuse the declaration scanner).
/// - Deprecated extension-suffixed texture/depth functions are renamed to
///   their canonical forms.
/// - Vertex shaders on GL-style targets are forced to `highp`.
///
/// Every pass is total and idempotent.

use crate::options::ShaderStage;
use crate::target::TargetDialect;

/// Deprecated function names and their canonical replacement
///
/// No replacement contains any of the deprecated names, so applying the
/// table twice yields the same text as applying it once.
pub const LEGACY_REPLACEMENTS: &[(&str, &str)] = &[
    ("gl_FragDepthEXT", "gl_FragDepth"),

    ("textureLodEXT", "texture2DLod"),
    ("textureGradEXT", "texture2DGrad"),

    ("texture2DLodARB", "texture2DLod"),
    ("texture2DLodEXT", "texture2DLod"),
    ("texture2DGradARB", "texture2DGrad"),
    ("texture2DGradEXT", "texture2DGrad"),

    ("textureCubeLodARB", "textureCubeLod"),
    ("textureCubeLodEXT", "textureCubeLod"),
    ("textureCubeGradARB", "textureCubeGrad"),
    ("textureCubeGradEXT", "textureCubeGrad"),

    ("texture2DProjLodARB", "texture2DProjLod"),
    ("texture2DProjLodEXT", "texture2DProjLod"),
    ("texture2DProjGradARB", "texture2DProjGrad"),
    ("texture2DProjGradEXT", "texture2DProjGrad"),

    ("shadow2DARB", "shadow2D"),
    ("shadow2DEXT", "shadow2D"),
    ("shadow2DProjARB", "shadow2DProj"),
    ("shadow2DProjEXT", "shadow2DProj"),
];

/// Precision keywords raised to `highp` in vertex shaders
const REDUCED_PRECISIONS: &[&str] = &["lowp", "mediump"];

/// Drop every leading line that starts with `#`
pub fn strip_directives(source: &str) -> &str {
    let mut rest = source;
    while rest.starts_with('#') {
        rest = match rest.find('\n') {
            Some(eol) => &rest[eol + 1..],
            None => "",
        };
    }
    rest
}

/// Rename deprecated extension functions to their canonical names
pub fn rewrite_legacy_functions(source: &str) -> String {
    LEGACY_REPLACEMENTS
        .iter()
        .fold(source.to_string(), |code, (from, to)| {
            if code.contains(from) {
                code.replace(from, to)
            } else {
                code
            }
        })
}

/// Replace every `lowp` and `mediump` with `highp`
pub fn force_high_precision(source: &str) -> String {
    REDUCED_PRECISIONS
        .iter()
        .fold(source.to_string(), |code, keyword| code.replace(keyword, "highp"))
}

/// Apply the legacy rewrite and, for vertex shaders, the precision forcing
///
/// Metal-like output never contains the legacy forms and has no precision
/// qualifiers, so it is returned untouched.
pub fn apply(source: &str, stage: ShaderStage, dialect: TargetDialect) -> String {
    if dialect.is_metal() {
        return source.to_string();
    }

    let code = rewrite_legacy_functions(source);
    if stage == ShaderStage::Vertex {
        force_high_precision(&code)
    } else {
        code
    }
}

#[cfg(test)]
#[path = "rewrite_tests.rs"]
mod tests;
