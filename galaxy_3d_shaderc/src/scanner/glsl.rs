/// GL-style declaration scanner
///
/// Walks top-level statements (split on `;`) from the start of the source.
/// Declarations are assumed to precede all executable code, so the scan stops
/// at the first statement that is neither skippable nor a `uniform`.

use crate::error::Result;
use crate::uniform::{Uniform, UniformTable, UniformType};
use super::{parse_array_size, Cursor, LOG_SOURCE};

/// Leading words of statements that never declare a bindable resource
const SKIPPED_QUALIFIERS: &[&str] = &[
    "precision",
    // stage inputs/outputs
    "attribute",
    "varying",
    "in",
    "out",
    // interpolation
    "flat",
    "smooth",
    "noperspective",
    "centroid",
];

/// Prefix of optimizer-generated temporaries
const TEMPORARY_PREFIX: &str = "tmpvar";

const PRECISIONS: &[&str] = &["lowp", "mediump", "highp"];

/// Scan the declaration header of GL-style source
pub fn scan(source: &str) -> Result<UniformTable> {
    let mut table = UniformTable::new();
    let mut cursor = Cursor::new(source);

    loop {
        cursor.skip_space();
        if cursor.is_empty() {
            break;
        }

        let Some(eol) = cursor.find(";") else {
            break;
        };

        let statement = &source[cursor.pos()..eol];
        let qualifier = cursor.next_word();

        if SKIPPED_QUALIFIERS.contains(&qualifier)
            || qualifier.starts_with(TEMPORARY_PREFIX)
            || cursor.rest().starts_with(TEMPORARY_PREFIX)
        {
            cursor.seek(eol + 1);
            continue;
        }

        if qualifier != "uniform" {
            crate::shaderc_trace!(LOG_SOURCE,
                "header ends at offset {} ('{}')", cursor.pos(), qualifier);
            break;
        }

        let mut type_name = cursor.next_word();
        if PRECISIONS.contains(&type_name) {
            type_name = cursor.next_word();
        }

        let name = cursor.next_word();
        if type_name.is_empty() || name.is_empty() {
            crate::shaderc_bail!(LOG_SOURCE, MalformedDeclaration,
                "incomplete uniform declaration '{}'", statement);
        }

        let num = if cursor.peek() == Some(b'[') {
            cursor.bump();
            parse_array_size(cursor.slice_to(eol + 1), name)?
        } else {
            1
        };

        table.push(Uniform::declared(name, UniformType::from_name(type_name), num));

        cursor.seek(eol);
        cursor.skip_line();
    }

    Ok(table)
}

#[cfg(test)]
#[path = "glsl_tests.rs"]
mod tests;
