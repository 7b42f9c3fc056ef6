/// C-like struct scanner for Metal-like output
///
/// Two independent passes over the same text, appended in this order:
/// 1. fields of the generated uniform struct
/// 2. entry-point parameters annotated with an explicit texture slot

use crate::error::Result;
use crate::uniform::{Uniform, UniformTable, UniformType};
use super::{malformed, parse_array_size, Cursor, LOG_SOURCE};

/// Opening of the generated uniform struct
pub const UNIFORM_STRUCT_MARKER: &str = "struct xlatMtlShaderUniform {";

/// Closing of the generated uniform struct
const UNIFORM_STRUCT_END: &str = "};";

/// Opening of the generated entry-point parameter list
pub const ENTRY_MARKER: &str = "xlatMtlShaderOutput xlatMtlMain (";

/// Texture slot annotation
pub const TEXTURE_MARKER: &str = "[[texture(";

/// Scan Metal-like source
pub fn scan(source: &str) -> Result<UniformTable> {
    let mut table = scan_uniform_struct(source)?;
    table.extend(scan_entry_textures(source)?);
    Ok(table)
}

/// Collect the fields of the uniform struct
///
/// A source without the struct yields an empty table.
pub fn scan_uniform_struct(source: &str) -> Result<UniformTable> {
    let mut table = UniformTable::new();

    let Some(start) = source.find(UNIFORM_STRUCT_MARKER) else {
        return Ok(table);
    };
    let body = &source[start + UNIFORM_STRUCT_MARKER.len()..];
    let end = body.find(UNIFORM_STRUCT_END).ok_or_else(|| {
        malformed("uniform struct is not terminated".to_string())
    })?;
    let body = &body[..end];

    let mut cursor = Cursor::new(body);
    loop {
        cursor.skip_space();
        if cursor.is_empty() {
            break;
        }

        let eol = cursor.find(";").ok_or_else(|| {
            malformed(format!("uniform struct field '{}' has no ';'", cursor.rest().trim()))
        })?;

        let type_name = cursor.next_word();
        let declarator = cursor.slice_to(eol).trim();

        let (name, num) = match declarator.find('[') {
            Some(bracket) => (
                declarator[..bracket].trim_end(),
                parse_array_size(&declarator[bracket + 1..], &declarator[..bracket])?,
            ),
            None => (declarator, 1),
        };

        if type_name.is_empty() || name.is_empty() {
            crate::shaderc_bail!(LOG_SOURCE, MalformedDeclaration,
                "incomplete uniform struct field '{}'", cursor.slice_to(eol).trim());
        }

        table.push(Uniform::struct_field(name, UniformType::from_name(type_name), num));
        cursor.seek(eol + 1);
    }

    Ok(table)
}

/// Collect entry-point parameters bound with `[[texture(N)]]`
///
/// Only the parameter list (up to the first `{`) is searched. Parameters
/// without the annotation are skipped.
pub fn scan_entry_textures(source: &str) -> Result<UniformTable> {
    let mut table = UniformTable::new();

    let Some(start) = source.find(ENTRY_MARKER) else {
        return Ok(table);
    };
    let params = &source[start + ENTRY_MARKER.len()..];
    let params = match params.find('{') {
        Some(end) => &params[..end],
        None => params,
    };

    let mut cursor = Cursor::new(params);
    while let Some(mark) = cursor.find(TEXTURE_MARKER) {
        let name = cursor
            .slice_to(mark)
            .trim_end()
            .rsplit(|c: char| c.is_whitespace() || c == ',')
            .next()
            .unwrap_or("");

        let index_start = mark + TEXTURE_MARKER.len();
        let index_len = params[index_start..].find(')').ok_or_else(|| {
            malformed(format!("texture annotation of '{}' is not closed", name))
        })?;
        let index_text = params[index_start..index_start + index_len].trim();

        if name.is_empty() {
            crate::shaderc_bail!(LOG_SOURCE, MalformedDeclaration,
                "texture({}) annotation without a parameter name", index_text);
        }

        let reg_index = index_text.parse::<u16>().map_err(|_| {
            malformed(format!("texture slot '{}' of '{}' is not a number", index_text, name))
        })?;

        table.push(Uniform::texture(name, reg_index));
        cursor.seek(index_start + index_len + 1);
    }

    Ok(table)
}

#[cfg(test)]
#[path = "metal_tests.rs"]
mod tests;
