//! Message control codes
//!
//! Bytes below `0x20` inside message data are control codes. Some take one
//! to three argument bytes that follow immediately.

use std::collections::HashMap;

/// Control code values and their text names.
pub const CONTROL_CODES: [(u8, &str); 30] = [
    (0x01, "NEWLINE"),
    (0x02, "END"),
    (0x04, "BOX_BREAK"),
    (0x05, "COLOR"),
    (0x06, "SHIFT"),
    (0x07, "TEXTID"),
    (0x08, "QUICKTEXT_ENABLE"),
    (0x09, "QUICKTEXT_DISABLE"),
    (0x0A, "PERSISTENT"),
    (0x0B, "EVENT"),
    (0x0C, "BOX_BREAK_DELAYED"),
    (0x0D, "AWAIT_BUTTON_PRESS"),
    (0x0E, "FADE"),
    (0x0F, "NAME"),
    (0x10, "OCARINA"),
    (0x11, "FADE2"),
    (0x12, "SFX"),
    (0x13, "ITEM_ICON"),
    (0x14, "TEXT_SPEED"),
    (0x15, "BACKGROUND"),
    (0x16, "MARATHON_TIME"),
    (0x17, "RACE_TIME"),
    (0x18, "POINTS"),
    (0x19, "TOKENS"),
    (0x1A, "UNSKIPPABLE"),
    (0x1B, "TWO_CHOICE"),
    (0x1C, "THREE_CHOICE"),
    (0x1D, "FISH_INFO"),
    (0x1E, "HIGHSCORE"),
    (0x1F, "TIME"),
];

pub const NEWLINE: u8 = 0x01;
pub const END: u8 = 0x02;
pub const COLOR: u8 = 0x05;
pub const TEXTID: u8 = 0x07;
pub const SFX: u8 = 0x12;
pub const BACKGROUND: u8 = 0x15;

/// Prefix of the fallback name for control bytes without a table entry.
const RAW_PREFIX: &str = "CTRL_";

lazy_static::lazy_static! {
    static ref CODES_BY_NAME: HashMap<&'static str, u8> =
        CONTROL_CODES.iter().map(|&(code, name)| (name, code)).collect();
}

/// Whether a byte is a control code rather than text.
#[must_use]
pub fn is_control_code(byte: u8) -> bool {
    byte < 0x20
}

/// Number of argument bytes following a control code.
#[must_use]
pub fn extra_bytes(code: u8) -> usize {
    match code {
        0x07 | 0x11 | 0x12 => 2,
        0x15 => 3,
        0x05 | 0x06 | 0x0C | 0x0E | 0x13 | 0x14 | 0x1E => 1,
        _ => 0,
    }
}

/// Table name for a control code, if it has one.
#[must_use]
pub fn control_code_name(code: u8) -> Option<&'static str> {
    CONTROL_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(_, name)| name)
}

/// Name used in editable text: the table name, or `CTRL_HH` for unnamed
/// control bytes.
#[must_use]
pub fn display_name(code: u8) -> String {
    control_code_name(code).map_or_else(|| format!("{RAW_PREFIX}{code:02X}"), str::to_string)
}

/// Resolve a name written in editable text back to its byte.
///
/// Accepts table names and the `CTRL_HH` fallback form.
#[must_use]
pub fn control_code_by_name(name: &str) -> Option<u8> {
    if let Some(&code) = CODES_BY_NAME.get(name) {
        return Some(code);
    }
    let hex = name.strip_prefix(RAW_PREFIX)?;
    if hex.len() != 2 {
        return None;
    }
    u8::from_str_radix(hex, 16).ok().filter(|&b| is_control_code(b))
}

/// Menu grouping of control codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCodeGroup {
    TextFlow,
    Formatting,
    VisualEffects,
    Interactive,
    Content,
    DisplayData,
    Other,
}

impl ControlCodeGroup {
    pub const ALL: [ControlCodeGroup; 7] = [
        ControlCodeGroup::TextFlow,
        ControlCodeGroup::Formatting,
        ControlCodeGroup::VisualEffects,
        ControlCodeGroup::Interactive,
        ControlCodeGroup::Content,
        ControlCodeGroup::DisplayData,
        ControlCodeGroup::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ControlCodeGroup::TextFlow => "Text Flow",
            ControlCodeGroup::Formatting => "Formatting",
            ControlCodeGroup::VisualEffects => "Visual Effects",
            ControlCodeGroup::Interactive => "Interactive",
            ControlCodeGroup::Content => "Content",
            ControlCodeGroup::DisplayData => "Display Data",
            ControlCodeGroup::Other => "Other",
        }
    }

    /// Codes in this group, in menu order.
    #[must_use]
    pub fn codes(self) -> &'static [u8] {
        match self {
            ControlCodeGroup::TextFlow => &[0x01, 0x02, 0x04, 0x0C, 0x0D],
            ControlCodeGroup::Formatting => &[0x05, 0x06, 0x14],
            ControlCodeGroup::VisualEffects => &[0x0E, 0x11, 0x15],
            ControlCodeGroup::Interactive => &[0x1B, 0x1C, 0x08, 0x09, 0x1A],
            ControlCodeGroup::Content => &[0x07, 0x0F, 0x13, 0x10],
            ControlCodeGroup::DisplayData => &[0x16, 0x17, 0x18, 0x19, 0x1D, 0x1E, 0x1F],
            ControlCodeGroup::Other => &[0x12, 0x0B, 0x0A],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique_and_reversible() {
        for &(code, name) in &CONTROL_CODES {
            assert_eq!(control_code_by_name(name), Some(code));
            assert_eq!(control_code_name(code), Some(name));
        }
        assert_eq!(CODES_BY_NAME.len(), CONTROL_CODES.len());
    }

    #[test]
    fn test_unnamed_codes() {
        assert_eq!(display_name(0x00), "CTRL_00");
        assert_eq!(display_name(0x03), "CTRL_03");
        assert_eq!(control_code_by_name("CTRL_03"), Some(0x03));
        assert_eq!(control_code_by_name("CTRL_41"), None);
        assert_eq!(control_code_by_name("CTRL_3"), None);
        assert_eq!(control_code_by_name("BOGUS"), None);
    }

    #[test]
    fn test_extra_bytes() {
        assert_eq!(extra_bytes(TEXTID), 2);
        assert_eq!(extra_bytes(0x11), 2);
        assert_eq!(extra_bytes(SFX), 2);
        assert_eq!(extra_bytes(BACKGROUND), 3);
        for code in [0x05, 0x06, 0x0C, 0x0E, 0x13, 0x14, 0x1E] {
            assert_eq!(extra_bytes(code), 1);
        }
        assert_eq!(extra_bytes(NEWLINE), 0);
        assert_eq!(extra_bytes(0x00), 0);
    }

    #[test]
    fn test_groups_cover_every_named_code() {
        let mut grouped: Vec<u8> = ControlCodeGroup::ALL
            .iter()
            .flat_map(|g| g.codes().iter().copied())
            .collect();
        grouped.sort_unstable();
        let named: Vec<u8> = CONTROL_CODES.iter().map(|&(c, _)| c).collect();
        assert_eq!(grouped, named);
    }
}
