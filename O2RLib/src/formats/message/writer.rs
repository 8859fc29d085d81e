//! Message table encoding

use super::MessageEntry;
use crate::error::{Error, Result};
use crate::resource::{HEADER_SIZE, ResourceHeader, ResourceType};
use byteorder::{LittleEndian, WriteBytesExt};

/// Encode messages into full resource bytes.
///
/// The header is always the canonical `OTXT` header (tag at offset 4, the
/// `0xDEADBEEF` pair at offset 12, everything else zero) so the output is
/// byte-identical to what the game's own tooling produces.
///
/// # Errors
///
/// Returns [`Error::ValueOutOfRange`] if the message count or a message
/// length does not fit in a `u32`.
pub fn messages_to_bytes(messages: &[MessageEntry]) -> Result<Vec<u8>> {
    let body_len: usize = messages.iter().map(|m| 8 + m.data().len()).sum();
    let mut buf = Vec::with_capacity(HEADER_SIZE + 4 + body_len);

    buf.extend_from_slice(&ResourceHeader::new(ResourceType::Text).to_bytes());
    buf.write_u32::<LittleEndian>(to_u32(messages.len(), "message count")?)?;

    for msg in messages {
        buf.write_u16::<LittleEndian>(msg.id)?;
        buf.write_u8(msg.textbox_type)?;
        buf.write_u8(msg.textbox_y_pos)?;
        buf.write_u32::<LittleEndian>(to_u32(msg.data().len(), "message length")?)?;
        buf.extend_from_slice(msg.data());
    }

    Ok(buf)
}

fn to_u32(len: usize, field: &'static str) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::ValueOutOfRange {
        value: len.to_string(),
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes_are_fixed() {
        let bytes = messages_to_bytes(&[]).unwrap();
        let mut expected = vec![0u8; HEADER_SIZE + 4];
        expected[4..8].copy_from_slice(b"TXTO");
        expected[12..20].copy_from_slice(&[0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_record_layout() {
        let bytes = messages_to_bytes(&[MessageEntry::new(0x1234, 5, 6, b"ok".to_vec())]).unwrap();
        assert_eq!(&bytes[64..68], &[1, 0, 0, 0]);
        assert_eq!(&bytes[68..], &[0x34, 0x12, 5, 6, 2, 0, 0, 0, b'o', b'k']);
    }
}
