//! Message table decoding

use super::control_codes::{extra_bytes, is_control_code};
use super::{MessageEntry, PREVIEW_LENGTH};
use crate::error::Result;
use crate::resource::HEADER_SIZE;
use crate::utils::binary::ByteReader;
use std::fmt::Write;

/// Parse messages from full resource bytes (64-byte header included).
///
/// Parsing stops quietly at the first record that would run past the end of
/// the buffer. Records with an empty payload are dropped. Input too short
/// for the header and count yields no messages.
#[must_use]
pub fn parse_messages(data: &[u8]) -> Vec<MessageEntry> {
    let mut messages = Vec::new();
    if data.len() < HEADER_SIZE + 4 {
        return messages;
    }

    let mut reader = ByteReader::new(&data[HEADER_SIZE..]);
    let Ok(count) = reader.read_u32_le("message count") else {
        return messages;
    };

    for index in 0..count {
        let (id, textbox_type, textbox_y_pos, bytes) = match read_record(&mut reader) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!("Message table ends early at record {} of {}: {}", index, count, err);
                break;
            }
        };

        if bytes.is_empty() {
            continue;
        }
        messages.push(MessageEntry::new(id, textbox_type, textbox_y_pos, bytes.to_vec()));
    }

    messages
}

fn read_record<'a>(reader: &mut ByteReader<'a>) -> Result<(u16, u8, u8, &'a [u8])> {
    let id = reader.read_u16_le("message id")?;
    let textbox_type = reader.read_u8("message textbox type")?;
    let textbox_y_pos = reader.read_u8("message textbox y position")?;
    let len = reader.read_u32_le("message length")? as usize;
    let bytes = reader.take(len, "message data")?;
    Ok((id, textbox_type, textbox_y_pos, bytes))
}

/// Short display string for message data.
///
/// Control codes and their arguments are skipped, printable ASCII is kept and
/// other bytes become `\xHH`. Output stops once it reaches 80 characters and
/// gets a `...` suffix if bytes were left over.
#[must_use]
pub fn generate_preview(data: &[u8]) -> String {
    let mut preview = String::new();
    let mut i = 0;

    while i < data.len() && preview.len() < PREVIEW_LENGTH {
        let byte = data[i];
        if is_control_code(byte) {
            i += extra_bytes(byte);
        } else if byte < 0x7F {
            preview.push(char::from(byte));
        } else {
            let _ = write!(preview, "\\x{byte:02X}");
        }
        i += 1;
    }

    if i < data.len() {
        preview.push_str("...");
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::message::messages_to_bytes;

    fn table_bytes(records: &[(u16, &str)]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data.extend_from_slice(&(records.len() as u32).to_le_bytes());
        for (id, bytes) in records {
            data.extend_from_slice(&id.to_le_bytes());
            data.extend_from_slice(&[0, 0]);
            data.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
            data.extend_from_slice(bytes.as_bytes());
        }
        data
    }

    #[test]
    fn test_parse_drops_empty_records() {
        let data = table_bytes(&[(1, "abc"), (2, ""), (3, "d")]);
        let ids: Vec<_> = parse_messages(&data).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_parse_stops_at_truncated_record() {
        let mut data = table_bytes(&[(1, "abc"), (2, "defgh")]);
        data.truncate(data.len() - 2);
        let messages = parse_messages(&data);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].data(), b"abc");
    }

    #[test]
    fn test_parse_short_input() {
        assert!(parse_messages(&[0u8; 67]).is_empty());
    }

    #[test]
    fn test_parse_encoded_table() {
        let messages = vec![
            MessageEntry::new(0x1000, 1, 2, b"one".to_vec()),
            MessageEntry::new(0x1001, 3, 4, vec![0x07, 0x12, 0x34]),
        ];
        let bytes = messages_to_bytes(&messages).unwrap();
        assert_eq!(parse_messages(&bytes), messages);
    }

    #[test]
    fn test_preview() {
        assert_eq!(generate_preview(b"Hello\x01World"), "HelloWorld");
        // TEXTID args are skipped
        assert_eq!(generate_preview(&[b'a', 0x07, b'X', b'Y', b'b']), "ab");
        assert_eq!(generate_preview(&[0xA0, b'z']), "\\xA0z");

        let long = vec![b'x'; 100];
        let preview = generate_preview(&long);
        assert_eq!(preview.len(), 83);
        assert!(preview.ends_with("..."));

        assert_eq!(generate_preview(&[b'y'; 80]), "y".repeat(80));
    }
}
