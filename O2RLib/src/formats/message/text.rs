//! Editable text form of message data
//!
//! ```text
//! Hello[NEWLINE]You got [COLOR(0x41)]an item[COLOR(0x40)]![TEXTID(0x12, 0x34)]
//! ```
//!
//! - Control codes render as `[NAME]` or `[NAME(0xHH, ...)]`; unnamed control
//!   bytes use `CTRL_HH`.
//! - Bytes `0x7F` and above, `[` and `\` render as `\xHH`.
//! - Everything else in `0x20..0x7F` is literal.
//!
//! Any byte stream renders to text that parses back to the same bytes.

use super::control_codes::{control_code_by_name, display_name, extra_bytes, is_control_code};
use std::fmt::Write;

/// One run of message data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSegment {
    /// Consecutive text bytes and their rendered form.
    Text { value: String, bytes: Vec<u8> },
    /// A control code with whatever argument bytes were present.
    Control { name: String, code: u8, args: Vec<u8> },
}

impl MessageSegment {
    /// The raw bytes this segment covers.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            MessageSegment::Text { bytes, .. } => bytes.clone(),
            MessageSegment::Control { code, args, .. } => {
                let mut bytes = Vec::with_capacity(1 + args.len());
                bytes.push(*code);
                bytes.extend_from_slice(args);
                bytes
            }
        }
    }
}

fn needs_escape(byte: u8) -> bool {
    byte >= 0x7F || byte == b'[' || byte == b'\\'
}

/// Render one control code with its arguments.
#[must_use]
pub fn format_control_code(code: u8, args: &[u8]) -> String {
    let name = display_name(code);
    if args.is_empty() {
        format!("[{name}]")
    } else {
        let args: Vec<String> = args.iter().map(|b| format!("0x{b:02X}")).collect();
        format!("[{name}({})]", args.join(", "))
    }
}

/// Split message data into text runs and control codes.
///
/// A control code at the end of the data keeps only the argument bytes that
/// are actually present.
#[must_use]
pub fn parse_message_data(data: &[u8]) -> Vec<MessageSegment> {
    let mut segments = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        if is_control_code(byte) {
            let end = (i + 1 + extra_bytes(byte)).min(data.len());
            segments.push(MessageSegment::Control {
                name: display_name(byte),
                code: byte,
                args: data[i + 1..end].to_vec(),
            });
            i = end;
        } else {
            let start = i;
            let mut value = String::new();
            while i < data.len() && !is_control_code(data[i]) {
                let b = data[i];
                if needs_escape(b) {
                    let _ = write!(value, "\\x{b:02X}");
                } else {
                    value.push(char::from(b));
                }
                i += 1;
            }
            segments.push(MessageSegment::Text {
                value,
                bytes: data[start..i].to_vec(),
            });
        }
    }

    segments
}

/// Render message data as editable text.
#[must_use]
pub fn message_data_to_editable_text(data: &[u8]) -> String {
    parse_message_data(data)
        .into_iter()
        .map(|segment| match segment {
            MessageSegment::Text { value, .. } => value,
            MessageSegment::Control { code, args, .. } => format_control_code(code, &args),
        })
        .collect()
}

/// Parse one control code argument: `0x`-prefixed hex or decimal, truncated
/// to a byte.
fn parse_arg(arg: &str) -> Option<u8> {
    let arg = arg.trim();
    let value = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => arg.parse::<i64>().ok()?,
    };
    Some(value as u8)
}

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    match u8::try_from(u32::from(ch)) {
        Ok(byte) => bytes.push(byte),
        Err(_) => {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
    }
}

/// Convert editable text back to message data.
///
/// - `[NAME]` / `[NAME(args)]` become the control byte plus arguments.
///   Unknown names are dropped entirely; arguments that do not parse are
///   skipped.
/// - A `[` with no closing `]` is kept as a literal byte.
/// - `\xHH` becomes the raw byte.
/// - Characters up to U+00FF map to their code point; anything above is
///   written as UTF-8.
#[must_use]
pub fn editable_text_to_message_data(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if ch == '[' {
            let Some(close) = rest.find(']') else {
                bytes.push(b'[');
                rest = &rest[1..];
                continue;
            };

            let inner = &rest[1..close];
            let (name, args) = match inner.find('(') {
                Some(paren) => {
                    let args = &inner[paren + 1..];
                    (&inner[..paren], Some(args.strip_suffix(')').unwrap_or(args)))
                }
                None => (inner, None),
            };

            if let Some(code) = control_code_by_name(name) {
                bytes.push(code);
                if let Some(args) = args {
                    bytes.extend(args.split(',').filter_map(parse_arg));
                }
            } else {
                tracing::debug!("Dropping unknown control code [{}]", inner);
            }
            rest = &rest[close + 1..];
        } else if let Some(byte) = rest
            .strip_prefix("\\x")
            .and_then(|hex| hex.get(..2))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            bytes.push(byte);
            rest = &rest[4..];
        } else {
            push_char(&mut bytes, ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_control_codes() {
        let data = [b'H', b'i', 0x01, 0x07, 0x12, 0x34, 0x15, 1, 2, 3, 0x00, 0xA0];
        assert_eq!(
            message_data_to_editable_text(&data),
            "Hi[NEWLINE][TEXTID(0x12, 0x34)][BACKGROUND(0x01, 0x02, 0x03)][CTRL_00]\\xA0"
        );
    }

    #[test]
    fn test_truncated_arguments() {
        let segments = parse_message_data(&[0x07, 0xAB]);
        assert_eq!(
            segments,
            vec![MessageSegment::Control {
                name: "TEXTID".to_string(),
                code: 0x07,
                args: vec![0xAB],
            }]
        );
        assert_eq!(message_data_to_editable_text(&[0x05]), "[COLOR]");
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            editable_text_to_message_data("A[COLOR(0x41)]B[SFX(10, 0x0F)]\\x7F"),
            vec![b'A', 0x05, 0x41, b'B', 0x12, 10, 0x0F, 0x7F]
        );
    }

    #[test]
    fn test_parse_edge_cases() {
        // Unknown names vanish with their brackets
        assert_eq!(editable_text_to_message_data("a[WHAT]b"), b"ab".to_vec());
        // Unclosed bracket is literal
        assert_eq!(editable_text_to_message_data("a[b"), b"a[b".to_vec());
        // Bad arguments are skipped, large ones truncated
        assert_eq!(editable_text_to_message_data("[COLOR(zz)]"), vec![0x05]);
        assert_eq!(editable_text_to_message_data("[COLOR(0x141)]"), vec![0x05, 0x41]);
        // Escape at the very end of the text
        assert_eq!(editable_text_to_message_data("\\xFF"), vec![0xFF]);
        // Incomplete escape stays literal
        assert_eq!(editable_text_to_message_data("\\xZ"), b"\\xZ".to_vec());
        assert_eq!(editable_text_to_message_data("é"), vec![0xE9]);
    }

    #[test]
    fn test_every_byte_round_trips() {
        let data: Vec<u8> = (0..=255u8).collect();
        let text = message_data_to_editable_text(&data);
        assert_eq!(editable_text_to_message_data(&text), data);

        for a in 0..=255u8 {
            for b in [0x00, 0x07, 0x15, b'[', b'\\', b'x', 0x7F, 0xFF] {
                let data = vec![a, b, a];
                let text = message_data_to_editable_text(&data);
                assert_eq!(editable_text_to_message_data(&text), data, "text: {text}");
            }
        }
    }
}
