//! Line layout shared by the text providers
//!
//! `[<timestamp>] <level> "<message>" <fields>` where `<fields>` is
//! `{k1=v1 k2=v2}` or empty. String field values are quoted.

use crate::core::Fields;

/// Escape line breaks and tabs so one record always occupies one line
pub(crate) fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// `{k1=v1 k2=v2}`, or an empty string when there are no fields
pub fn format_fields_block(fields: &Fields) -> String {
    if fields.is_empty() {
        return String::new();
    }
    format!("{{{}}}", fields.format_fields())
}

/// Render one record without the trailing newline
pub fn format_line(timestamp: &str, level: &str, message: &str, fields: &Fields) -> String {
    format!(
        "[{}] {} \"{}\" {}",
        timestamp,
        level,
        sanitize_message(message),
        format_fields_block(fields)
    )
}
