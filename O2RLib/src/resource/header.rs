//! 64-byte resource header codec
//!
//! Layout (all integers little-endian, independent of the `endianness` flag):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | endianness (0 = little) |
//! | 1 | 1 | is custom (bool) |
//! | 2 | 2 | padding |
//! | 4 | 4 | resource type `FourCC` |
//! | 8 | 4 | resource version |
//! | 12 | 8 | unique id |
//! | 20 | 44 | zero padding |

use super::types::ResourceType;
use crate::error::{Error, Result};
use crate::utils::binary::{ByteReader, fourcc_to_string, string_to_fourcc};
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

/// Size of the resource header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Unique id used for synthesized resources that have no real identity.
pub const SENTINEL_UNIQUE_ID: u64 = 0xDEAD_BEEF_DEAD_BEEF;

/// Parsed resource header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHeader {
    /// Payload endianness flag (0 = little-endian).
    pub endianness: u8,
    /// Whether the resource was authored outside the base game.
    pub is_custom: bool,
    /// Resolved resource type.
    pub resource_type: ResourceType,
    /// Resource format version.
    pub resource_version: u32,
    /// 64-bit resource identity.
    pub unique_id: u64,
}

impl ResourceHeader {
    /// Header for a freshly synthesized little-endian resource with the
    /// sentinel unique id.
    #[must_use]
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            endianness: 0,
            is_custom: false,
            resource_type,
            resource_version: 0,
            unique_id: SENTINEL_UNIQUE_ID,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.resource_version = version;
        self
    }

    #[must_use]
    pub fn with_unique_id(mut self, unique_id: u64) -> Self {
        self.unique_id = unique_id;
        self
    }

    #[must_use]
    pub fn with_custom(mut self, is_custom: bool) -> Self {
        self.is_custom = is_custom;
        self
    }

    #[must_use]
    pub fn with_endianness(mut self, endianness: u8) -> Self {
        self.endianness = endianness;
        self
    }

    /// Encode this header into its 64-byte on-disk form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        header[0] = self.endianness;
        header[1] = u8::from(self.is_custom);
        // The registry only holds four-character ASCII tags
        let tag = string_to_fourcc(self.resource_type.tag()).unwrap_or_default();
        LittleEndian::write_u32(&mut header[4..8], tag);
        LittleEndian::write_u32(&mut header[8..12], self.resource_version);
        LittleEndian::write_u64(&mut header[12..20], self.unique_id);
        header
    }
}

/// Parse a resource header, reporting why it could not be parsed.
///
/// # Errors
///
/// Returns [`Error::HeaderTooShort`] if fewer than 64 bytes are available.
/// Returns [`Error::UnknownResourceType`] if the tag is not registered.
pub fn try_parse_header(data: &[u8]) -> Result<ResourceHeader> {
    if data.len() < HEADER_SIZE {
        return Err(Error::HeaderTooShort(data.len()));
    }

    let mut reader = ByteReader::new(data);
    let endianness = reader.read_u8("header endianness")?;
    let is_custom = reader.read_u8("header custom flag")? != 0;
    reader.skip(2, "header padding")?;
    let tag = fourcc_to_string(reader.read_u32_le("header resource type")?);
    let resource_version = reader.read_u32_le("header resource version")?;
    let unique_id = reader.read_u64_le("header unique id")?;

    let resource_type =
        ResourceType::from_tag(&tag).ok_or(Error::UnknownResourceType(tag))?;

    Ok(ResourceHeader {
        endianness,
        is_custom,
        resource_type,
        resource_version,
        unique_id,
    })
}

/// Parse a resource header.
///
/// Returns `None` when the data is shorter than 64 bytes or the type tag is
/// not registered; callers treat that as "skip this entry".
#[must_use]
pub fn parse_header(data: &[u8]) -> Option<ResourceHeader> {
    try_parse_header(data).ok()
}

/// Build a 64-byte header from a type name (or raw tag).
///
/// # Errors
///
/// Returns [`Error::UnknownResourceTypeName`] if the name is not registered.
pub fn build_header(
    type_name: &str,
    resource_version: u32,
    unique_id: u64,
    is_custom: bool,
    endianness: u8,
) -> Result<[u8; HEADER_SIZE]> {
    let resource_type = ResourceType::lookup(type_name)
        .ok_or_else(|| Error::UnknownResourceTypeName(type_name.to_string()))?;

    Ok(ResourceHeader {
        endianness,
        is_custom,
        resource_type,
        resource_version,
        unique_id,
    }
    .to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_then_parse_every_type() {
        for ty in ResourceType::ALL {
            let bytes = build_header(ty.name(), 3, 0x0102_0304_0506_0708, true, 0).unwrap();
            let header = parse_header(&bytes).expect("registered type parses");
            assert_eq!(header.resource_type.name(), ty.name());
            assert_eq!(header.resource_version, 3);
            assert_eq!(header.unique_id, 0x0102_0304_0506_0708);
            assert!(header.is_custom);
        }
    }

    #[test]
    fn test_header_byte_layout() {
        let bytes = build_header("Animation", 0, SENTINEL_UNIQUE_ID, false, 0).unwrap();
        assert_eq!(&bytes[4..8], b"MNAO");
        assert_eq!(&bytes[8..12], &[0, 0, 0, 0]);
        assert_eq!(&bytes[12..20], &[0xEF, 0xBE, 0xAD, 0xDE, 0xEF, 0xBE, 0xAD, 0xDE]);
        assert!(bytes[20..].iter().all(|&b| b == 0));
        assert_eq!(bytes[1], 0);
    }

    #[test]
    fn test_build_accepts_tag() {
        let by_tag = build_header("OPAM", 0, SENTINEL_UNIQUE_ID, false, 0).unwrap();
        let by_name = build_header("Player Animation", 0, SENTINEL_UNIQUE_ID, false, 0).unwrap();
        assert_eq!(by_tag, by_name);
    }

    #[test]
    fn test_build_unknown_name() {
        assert!(matches!(
            build_header("Sound Effect", 0, 0, false, 0),
            Err(Error::UnknownResourceTypeName(_))
        ));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(parse_header(&[0u8; 63]).is_none());
        assert!(matches!(
            try_parse_header(&[0u8; 10]),
            Err(Error::HeaderTooShort(10))
        ));
    }

    #[test]
    fn test_parse_unknown_tag() {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[4..8].copy_from_slice(b"ABCD");
        assert!(parse_header(&bytes).is_none());
        match try_parse_header(&bytes) {
            Err(Error::UnknownResourceType(tag)) => assert_eq!(tag, "DCBA"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_ignores_trailing_payload() {
        let mut data = ResourceHeader::new(ResourceType::Texture).to_bytes().to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        let header = parse_header(&data).unwrap();
        assert_eq!(header, ResourceHeader::new(ResourceType::Texture));
    }
}
