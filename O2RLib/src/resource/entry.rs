//! Archive resources: header plus payload

use super::header::{HEADER_SIZE, ResourceHeader, build_header, try_parse_header};
use super::types::ResourceType;
use crate::error::{Error, Result};
use crate::utils::path::resource_name;

/// One path-keyed resource inside an archive.
///
/// Only the full byte buffer is stored. The header is parsed from it once at
/// construction and the payload is always the slice after the first 64 bytes,
/// so the header bytes and payload can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    path: String,
    header: ResourceHeader,
    data: Vec<u8>,
}

impl ResourceEntry {
    /// Wrap raw resource bytes read from an archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderTooShort`] or [`Error::UnknownResourceType`] if
    /// the header cannot be parsed.
    pub fn from_bytes(path: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let header = try_parse_header(&data)?;
        Ok(Self {
            path: path.into(),
            header,
            data,
        })
    }

    /// Build a resource from a header and a payload.
    #[must_use]
    pub fn from_parts(path: impl Into<String>, header: ResourceHeader, payload: &[u8]) -> Self {
        let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
        data.extend_from_slice(&header.to_bytes());
        data.extend_from_slice(payload);
        Self {
            path: path.into(),
            header,
            data,
        }
    }

    /// Archive path of this resource.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn header(&self) -> &ResourceHeader {
        &self.header
    }

    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        self.header.resource_type
    }

    /// Full bytes, header included.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes after the 64-byte header.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.data[HEADER_SIZE..]
    }

    /// Consume the entry and return its full bytes.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Resource name: last path component without archive suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        resource_name(&self.path)
    }

    /// Copy of this entry stored under another path.
    #[must_use]
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header: self.header,
            data: self.data.clone(),
        }
    }

    /// Copy of this entry with the payload replaced and the original
    /// 64 header bytes kept verbatim.
    #[must_use]
    pub fn with_payload(&self, payload: &[u8]) -> Self {
        let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
        data.extend_from_slice(&self.data[..HEADER_SIZE]);
        data.extend_from_slice(payload);
        Self {
            path: self.path.clone(),
            header: self.header,
            data,
        }
    }

    /// Short summary such as `"Texture (1.25 KB)"`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn description(&self) -> String {
        format!(
            "{} ({:.2} KB)",
            self.header.resource_type,
            self.data.len() as f64 / 1024.0
        )
    }
}

/// Synthesize a new resource from a type name (or tag) and payload.
///
/// # Errors
///
/// Returns [`Error::UnknownResourceTypeName`] if `type_name` is not registered.
pub fn create_resource(
    path: impl Into<String>,
    type_name: &str,
    payload: &[u8],
    resource_version: u32,
    unique_id: u64,
    is_custom: bool,
    endianness: u8,
) -> Result<ResourceEntry> {
    let header = build_header(type_name, resource_version, unique_id, is_custom, endianness)?;
    let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
    data.extend_from_slice(&header);
    data.extend_from_slice(payload);
    ResourceEntry::from_bytes(path, data).map_err(|err| match err {
        Error::UnknownResourceType(_) => Error::UnknownResourceTypeName(type_name.to_string()),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::header::SENTINEL_UNIQUE_ID;

    #[test]
    fn test_create_resource_views_agree() {
        let entry = create_resource(
            "misc/link_animation/gPlayerAnim_x_Data",
            "Player Animation",
            &[1, 2, 3, 4],
            0,
            SENTINEL_UNIQUE_ID,
            false,
            0,
        )
        .unwrap();

        assert_eq!(entry.data().len(), 68);
        assert_eq!(entry.payload(), &[1, 2, 3, 4]);
        assert_eq!(&entry.data()[..HEADER_SIZE], &entry.header().to_bytes());
        assert_eq!(entry.resource_type(), ResourceType::PlayerAnimation);
        assert_eq!(entry.name(), "gPlayerAnim_x_Data");
    }

    #[test]
    fn test_from_bytes_rejects_short() {
        assert!(matches!(
            ResourceEntry::from_bytes("x", vec![0; 12]),
            Err(Error::HeaderTooShort(12))
        ));
    }

    #[test]
    fn test_with_payload_keeps_header_bytes() {
        let mut raw = ResourceHeader::new(ResourceType::Texture).to_bytes().to_vec();
        // Non-zero reserved bytes survive a payload edit
        raw[40] = 0xAA;
        raw.extend_from_slice(&[9, 9]);
        let entry = ResourceEntry::from_bytes("textures/a", raw).unwrap();
        let edited = entry.with_payload(&[7, 7, 7]);

        assert_eq!(edited.data()[40], 0xAA);
        assert_eq!(edited.payload(), &[7, 7, 7]);
        assert_eq!(entry.payload(), &[9, 9]);
    }

    #[test]
    fn test_description() {
        let entry = ResourceEntry::from_parts(
            "textures/a",
            ResourceHeader::new(ResourceType::Texture),
            &vec![0u8; 1024 - HEADER_SIZE + 256],
        );
        assert_eq!(entry.description(), "Texture (1.25 KB)");
    }
}
