//! Message table resources (`Text` / `OTXT`)
//!
//! Layout after the standard 64-byte resource header:
//!
//! ```text
//! u32 message_count
//! repeat message_count:
//!     u16 id
//!     u8  textbox_type
//!     u8  textbox_y_pos
//!     u32 length
//!     u8[length] data
//! ```
//!
//! Message data mixes text bytes with control codes (see [`control_codes`]).
//! The editable text form renders control codes as `[NAME]` or
//! `[NAME(0xHH, ...)]` (see [`text`]).

pub mod control_codes;
mod editor;
mod reader;
pub mod text;
mod writer;

pub use control_codes::{ControlCodeGroup, control_code_by_name, control_code_name, extra_bytes};
pub use editor::{insert_control_code, insert_named_control_code};
pub use reader::{generate_preview, parse_messages};
pub use text::{
    MessageSegment, editable_text_to_message_data, message_data_to_editable_text,
    parse_message_data,
};
pub use writer::messages_to_bytes;

use crate::error::Result;
use crate::resource::{ResourceEntry, ResourceHeader, ResourceType};
use serde::{Deserialize, Serialize};

/// Maximum number of preview characters before the ellipsis.
pub const PREVIEW_LENGTH: usize = 80;

/// A single message.
///
/// The preview is derived from `data` and regenerated whenever the data is
/// replaced, so there is no way to set it independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub id: u16,
    pub textbox_type: u8,
    pub textbox_y_pos: u8,
    data: Vec<u8>,
    preview: String,
}

impl MessageEntry {
    #[must_use]
    pub fn new(id: u16, textbox_type: u8, textbox_y_pos: u8, data: Vec<u8>) -> Self {
        let preview = generate_preview(&data);
        Self {
            id,
            textbox_type,
            textbox_y_pos,
            data,
            preview,
        }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Replace the message bytes and refresh the preview.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.preview = generate_preview(&data);
        self.data = data;
    }

    /// Copy of this message with different bytes.
    #[must_use]
    pub fn with_data(&self, data: Vec<u8>) -> Self {
        Self::new(self.id, self.textbox_type, self.textbox_y_pos, data)
    }

    /// Editable text form of the message bytes.
    #[must_use]
    pub fn to_editable_text(&self) -> String {
        message_data_to_editable_text(&self.data)
    }
}

/// Editable, serializable view of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageText {
    pub id: u16,
    pub textbox_type: u8,
    pub textbox_y_pos: u8,
    pub text: String,
}

impl From<&MessageEntry> for MessageText {
    fn from(msg: &MessageEntry) -> Self {
        Self {
            id: msg.id,
            textbox_type: msg.textbox_type,
            textbox_y_pos: msg.textbox_y_pos,
            text: msg.to_editable_text(),
        }
    }
}

impl From<&MessageText> for MessageEntry {
    fn from(text: &MessageText) -> Self {
        MessageEntry::new(
            text.id,
            text.textbox_type,
            text.textbox_y_pos,
            editable_text_to_message_data(&text.text),
        )
    }
}

/// All messages of one message table resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    pub messages: Vec<MessageEntry>,
}

impl MessageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse full resource bytes (header included).
    #[must_use]
    pub fn parse(data: &[u8]) -> Self {
        Self {
            messages: parse_messages(data),
        }
    }

    #[must_use]
    pub fn from_resource(resource: &ResourceEntry) -> Self {
        Self::parse(resource.data())
    }

    /// Encode to full resource bytes with the fixed `OTXT` header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueOutOfRange`] if a message or the table is too
    /// large for its `u32` length field.
    ///
    /// [`Error::ValueOutOfRange`]: crate::Error::ValueOutOfRange
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        messages_to_bytes(&self.messages)
    }

    /// Encode into a `Text` resource at `path`.
    ///
    /// # Errors
    ///
    /// See [`MessageTable::to_bytes`].
    pub fn to_resource(&self, path: impl Into<String>) -> Result<ResourceEntry> {
        let bytes = self.to_bytes()?;
        Ok(ResourceEntry::from_parts(
            path,
            ResourceHeader::new(ResourceType::Text),
            &bytes[crate::resource::HEADER_SIZE..],
        ))
    }

    #[must_use]
    pub fn get(&self, id: u16) -> Option<&MessageEntry> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Replace a message's bytes. Returns `false` if the id is unknown.
    pub fn replace_data(&mut self, id: u16, data: Vec<u8>) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(msg) => {
                msg.set_data(data);
                true
            }
            None => false,
        }
    }

    /// Replace a message from its editable text form.
    pub fn set_text(&mut self, id: u16, text: &str) -> bool {
        self.replace_data(id, editable_text_to_message_data(text))
    }

    /// Editable text view of every message.
    #[must_use]
    pub fn to_texts(&self) -> Vec<MessageText> {
        self.messages.iter().map(MessageText::from).collect()
    }

    /// Build a table from editable text. Empty messages are kept here and
    /// dropped again on the next parse.
    #[must_use]
    pub fn from_texts(texts: &[MessageText]) -> Self {
        Self {
            messages: texts.iter().map(MessageEntry::from).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageEntry> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_data_refreshes_preview() {
        let mut msg = MessageEntry::new(1, 0, 0, b"Hello".to_vec());
        assert_eq!(msg.preview(), "Hello");
        msg.set_data(b"Bye".to_vec());
        assert_eq!(msg.preview(), "Bye");
    }

    #[test]
    fn test_table_edit_and_encode() {
        let mut table = MessageTable {
            messages: vec![
                MessageEntry::new(0x0001, 0, 0, b"Hi".to_vec()),
                MessageEntry::new(0x0002, 1, 2, b"There".to_vec()),
            ],
        };

        assert!(table.set_text(0x0002, "Hey[NEWLINE]you"));
        assert!(!table.set_text(0x0099, "nope"));
        assert_eq!(table.get(0x0002).unwrap().data(), b"Hey\x01you");

        let resource = table.to_resource("text/nes_message_data_static").unwrap();
        assert_eq!(resource.resource_type(), ResourceType::Text);
        assert_eq!(MessageTable::from_resource(&resource), table);
    }

    #[test]
    fn test_texts_round_trip() {
        let table = MessageTable {
            messages: vec![MessageEntry::new(7, 3, 4, vec![b'A', 0x05, 0x41, 0xA0])],
        };
        let texts = table.to_texts();
        assert_eq!(texts[0].text, "A[COLOR(0x41)]\\xA0");
        assert_eq!(MessageTable::from_texts(&texts), table);
    }
}
