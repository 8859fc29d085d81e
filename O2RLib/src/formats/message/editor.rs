//! Cursor-based control code insertion for text editors

use super::control_codes::control_code_by_name;
use super::text::format_control_code;

/// Insert a control code at a character position in editable text.
///
/// `cursor` counts characters, not bytes, and is clamped to the end of the
/// text. Returns the new text and the cursor position just after the
/// inserted code.
#[must_use]
pub fn insert_control_code(text: &str, cursor: usize, code: u8, args: &[u8]) -> (String, usize) {
    let tag = format_control_code(code, args);
    let cursor = cursor.min(text.chars().count());
    let split = text.char_indices().nth(cursor).map_or(text.len(), |(i, _)| i);

    let mut out = String::with_capacity(text.len() + tag.len());
    out.push_str(&text[..split]);
    out.push_str(&tag);
    out.push_str(&text[split..]);

    (out, cursor + tag.chars().count())
}

/// Like [`insert_control_code`] but looks the code up by name.
///
/// Returns `None` for names that are not control codes.
#[must_use]
pub fn insert_named_control_code(
    text: &str,
    cursor: usize,
    name: &str,
    args: &[u8],
) -> Option<(String, usize)> {
    let code = control_code_by_name(name)?;
    Some(insert_control_code(text, cursor, code, args))
}
