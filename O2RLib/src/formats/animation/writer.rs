//! Binary animation encoding

use super::{ACTOR_ANIMATION_TYPE, ActorAnimation, LINK_ANIMATION_TYPE, LINK_DATA_SUFFIX, LinkAnimation};
use super::reader::parse_link_header;
use crate::error::{Error, Result};
use crate::resource::{ResourceEntry, ResourceHeader, ResourceType};
use crate::utils::path::OTR_PATH_PREFIX;
use byteorder::{LittleEndian, WriteBytesExt};

/// Encode an Actor animation payload (type field included).
///
/// # Errors
///
/// Returns [`Error::EmptyActorAnimation`] if frame data or joint indices are
/// empty.
pub fn encode_actor_payload(anim: &ActorAnimation) -> Result<Vec<u8>> {
    anim.validate()?;

    let mut buf =
        Vec::with_capacity(4 + 2 + 4 + anim.frame_data.len() * 2 + 4 + anim.joint_indices.len() * 6 + 2);
    buf.write_u32::<LittleEndian>(ACTOR_ANIMATION_TYPE)?;
    buf.write_u16::<LittleEndian>(anim.frame_count)?;

    buf.write_u32::<LittleEndian>(count_u32(anim.frame_data.len())?)?;
    for &value in &anim.frame_data {
        buf.write_u16::<LittleEndian>(value as u16)?;
    }

    buf.write_u32::<LittleEndian>(count_u32(anim.joint_indices.len())?)?;
    for joint in &anim.joint_indices {
        buf.write_u16::<LittleEndian>(joint.x)?;
        buf.write_u16::<LittleEndian>(joint.y)?;
        buf.write_u16::<LittleEndian>(joint.z)?;
    }

    buf.write_u16::<LittleEndian>(anim.static_index_max)?;
    Ok(buf)
}

/// Encode a Link data payload: `u32 count` then little-endian `i16` values.
///
/// # Errors
///
/// Returns [`Error::ValueOutOfRange`] if there are more than `u32::MAX`
/// values.
pub fn encode_link_data(values: &[i16]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(4 + values.len() * 2);
    buf.write_u32::<LittleEndian>(count_u32(values.len())?)?;
    for &value in values {
        buf.write_i16::<LittleEndian>(value)?;
    }
    Ok(buf)
}

/// Encode a Link header payload referencing `data_path` verbatim.
///
/// # Errors
///
/// Returns [`Error::ValueOutOfRange`] if the path is longer than 65535 bytes.
pub fn encode_link_header(version: u32, frame_count: u16, data_path: &str) -> Result<Vec<u8>> {
    let path = data_path.as_bytes();
    let path_len = u16::try_from(path.len()).map_err(|_| Error::ValueOutOfRange {
        value: path.len().to_string(),
        field: "link header path length",
    })?;

    let mut buf = Vec::with_capacity(10 + path.len());
    buf.write_u32::<LittleEndian>(version)?;
    buf.write_u16::<LittleEndian>(frame_count)?;
    buf.write_u16::<LittleEndian>(path_len)?;
    buf.write_u16::<LittleEndian>(0)?;
    buf.extend_from_slice(path);
    Ok(buf)
}

fn count_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::ValueOutOfRange {
        value: len.to_string(),
        field: "array length",
    })
}

fn join_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder.trim_end_matches('/'), name)
    }
}

/// Build an `Animation` resource for an Actor animation.
///
/// # Errors
///
/// Returns [`Error::EmptyActorAnimation`] for an animation without frame
/// data or joint indices.
pub fn actor_to_resource(anim: &ActorAnimation, path: impl Into<String>) -> Result<ResourceEntry> {
    let payload = encode_actor_payload(anim)?;
    Ok(ResourceEntry::from_parts(
        path,
        ResourceHeader::new(ResourceType::Animation),
        &payload,
    ))
}

/// The two resources a Link animation is stored as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResources {
    /// `Animation` resource at `<folder>/<name>`.
    pub header: ResourceEntry,
    /// `Player Animation` resource at `<folder>/<name>_Data`.
    pub data: ResourceEntry,
    /// Path embedded in the header, `__OTR__<folder>/<name>_Data`.
    pub data_path: String,
}

/// Split a Link animation into header and data resources under `folder`.
///
/// Both resources get fresh headers with the sentinel unique id.
///
/// # Errors
///
/// Returns [`Error::ValueOutOfRange`] if the data path or array is too long
/// to encode.
pub fn split_link_animation(anim: &LinkAnimation, folder: &str) -> Result<LinkResources> {
    let header_path = join_path(folder, &anim.name);
    let data_resource_path = format!("{header_path}{LINK_DATA_SUFFIX}");
    let data_path = format!("{OTR_PATH_PREFIX}{data_resource_path}");

    let header_payload = encode_link_header(LINK_ANIMATION_TYPE, anim.frame_count, &data_path)?;
    let data_payload = encode_link_data(&anim.data)?;

    Ok(LinkResources {
        header: ResourceEntry::from_parts(
            header_path,
            ResourceHeader::new(ResourceType::Animation),
            &header_payload,
        ),
        data: ResourceEntry::from_parts(
            data_resource_path,
            ResourceHeader::new(ResourceType::PlayerAnimation),
            &data_payload,
        ),
        data_path,
    })
}

/// Rewrite the data path of a Link header resource.
///
/// The original 64 header bytes, version and frame count are kept.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if the existing payload is not a readable
/// Link header.
pub fn update_link_header_path(resource: &ResourceEntry, new_data_path: &str) -> Result<ResourceEntry> {
    let header = parse_link_header(resource.payload())?;
    let payload = encode_link_header(header.version, header.frame_count, new_data_path)?;
    Ok(resource.with_payload(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::animation::{JointIndex, parse_link_data};
    use crate::formats::animation::reader::parse_actor_payload;
    use crate::resource::SENTINEL_UNIQUE_ID;

    #[test]
    fn test_encode_link_header_layout() {
        let payload = encode_link_header(1, 0x0102, "__OTR__x").unwrap();
        assert_eq!(&payload[..10], &[1, 0, 0, 0, 0x02, 0x01, 8, 0, 0, 0]);
        assert_eq!(&payload[10..], b"__OTR__x");
    }

    #[test]
    fn test_encode_actor_round_trip() {
        let anim = ActorAnimation {
            name: "gAnim".to_string(),
            frame_count: 12,
            frame_data: vec![i16::MIN, -1, 0, 1, i16::MAX],
            joint_indices: vec![JointIndex::new(0, 1, 2), JointIndex::new(0xFFFF, 3, 4)],
            static_index_max: 3,
        };
        let payload = encode_actor_payload(&anim).unwrap();
        assert_eq!(&payload[..4], &[0, 0, 0, 0]);
        assert_eq!(parse_actor_payload("gAnim", &payload).unwrap(), anim);
    }

    #[test]
    fn test_split_link_animation() {
        let anim = LinkAnimation {
            name: "gPlayerAnim_link_demo".to_string(),
            frame_count: 3,
            data: vec![1, -2, 3],
        };
        let res = split_link_animation(&anim, "misc/link_animation").unwrap();

        assert_eq!(res.header.path(), "misc/link_animation/gPlayerAnim_link_demo");
        assert_eq!(res.data.path(), "misc/link_animation/gPlayerAnim_link_demo_Data");
        assert_eq!(res.data_path, "__OTR__misc/link_animation/gPlayerAnim_link_demo_Data");
        assert_eq!(res.header.resource_type(), ResourceType::Animation);
        assert_eq!(res.data.resource_type(), ResourceType::PlayerAnimation);
        assert_eq!(res.data.header().unique_id, SENTINEL_UNIQUE_ID);
        assert_eq!(parse_link_data(res.data.payload()).unwrap(), anim.data);
        assert_eq!(parse_link_header(res.header.payload()).unwrap().data_path, res.data_path);
    }

    #[test]
    fn test_update_link_header_path_keeps_header() {
        let anim = LinkAnimation {
            name: "gA".to_string(),
            frame_count: 9,
            data: vec![],
        };
        let res = split_link_animation(&anim, "old").unwrap();
        let updated = update_link_header_path(&res.header, "__OTR__new/place/gA_Data").unwrap();

        assert_eq!(&updated.data()[..64], &res.header.data()[..64]);
        let header = parse_link_header(updated.payload()).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.frame_count, 9);
        assert_eq!(header.data_path, "__OTR__new/place/gA_Data");
        assert_eq!(updated.payload().len(), 10 + header.data_path.len());
    }
}
