//! Binary animation decoding

use super::{
    ActorAnimation, AnimationEntry, JointIndex, LINK_ANIMATION_TYPE, LinkAnimation,
};
use crate::error::{Error, Result};
use crate::resource::ResourceEntry;
use crate::utils::binary::ByteReader;
use crate::utils::path::strip_otr_prefix;

/// Decoded Link animation header payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    pub version: u32,
    pub frame_count: u16,
    /// Data resource path as stored, usually with a `__OTR__` prefix.
    pub data_path: String,
}

/// Parse a Link header payload: `u32 version, u16 frameCount, u16 pathLength,
/// 2 bytes padding, path`.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if the payload ends early, or
/// [`Error::InvalidLinkHeader`] if the path is not UTF-8.
pub fn parse_link_header(payload: &[u8]) -> Result<LinkHeader> {
    let mut reader = ByteReader::new(payload);
    let version = reader.read_u32_le("link header version")?;
    let frame_count = reader.read_u16_le("link header frame count")?;
    let path_len = reader.read_u16_le("link header path length")?;
    reader.skip(2, "link header padding")?;
    let path = reader.take(usize::from(path_len), "link header data path")?;
    let data_path = std::str::from_utf8(path)
        .map_err(|e| Error::InvalidLinkHeader(format!("data path is not UTF-8: {e}")))?
        .to_string();

    Ok(LinkHeader {
        version,
        frame_count,
        data_path,
    })
}

/// Parse a Link data payload: `u32 count` followed by `count` little-endian
/// `i16` values.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if fewer values are present than declared.
pub fn parse_link_data(payload: &[u8]) -> Result<Vec<i16>> {
    let mut reader = ByteReader::new(payload);
    let count = reader.read_u32_le("link data value count")? as usize;
    reader.check_count(count, 2, "link data values")?;

    (0..count)
        .map(|_| reader.read_i16_le("link data value"))
        .collect()
}

/// Parse an Actor payload including its leading type field.
///
/// # Errors
///
/// Returns [`Error::Truncated`] naming the first field that does not fit.
pub fn parse_actor_payload(name: &str, payload: &[u8]) -> Result<ActorAnimation> {
    let mut reader = ByteReader::new(payload);
    reader.skip(4, "animation type")?;
    let frame_count = reader.read_u16_le("actor frame count")?;

    let value_count = reader.read_u32_le("actor rotation value count")? as usize;
    reader.check_count(value_count, 2, "actor rotation values")?;
    let frame_data = (0..value_count)
        .map(|_| reader.read_u16_le("actor rotation value").map(|v| v as i16))
        .collect::<Result<Vec<_>>>()?;

    let joint_count = reader.read_u32_le("actor joint index count")? as usize;
    reader.check_count(joint_count, 6, "actor joint indices")?;
    let joint_indices = (0..joint_count)
        .map(|_| {
            Ok(JointIndex {
                x: reader.read_u16_le("joint index x")?,
                y: reader.read_u16_le("joint index y")?,
                z: reader.read_u16_le("joint index z")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let static_index_max = reader.read_u16_le("actor static index max")?;

    Ok(ActorAnimation {
        name: name.to_string(),
        frame_count,
        frame_data,
        joint_indices,
        static_index_max,
    })
}

/// Whether a payload starts with the Link discriminator.
#[must_use]
pub fn is_link_header(payload: &[u8]) -> bool {
    ByteReader::new(payload)
        .read_u32_le("animation type")
        .is_ok_and(|ty| ty == LINK_ANIMATION_TYPE)
}

/// Find the data resource a Link header points at.
///
/// A leading `__OTR__` is ignored on both sides; otherwise paths must match
/// exactly.
///
/// # Errors
///
/// Returns [`Error::LinkDataNotFound`] carrying the path as written in the
/// header.
pub fn find_link_data<'a>(
    data_path: &str,
    candidates: &'a [ResourceEntry],
) -> Result<&'a ResourceEntry> {
    let wanted = strip_otr_prefix(data_path);
    candidates
        .iter()
        .find(|r| strip_otr_prefix(r.path()) == wanted)
        .ok_or_else(|| Error::LinkDataNotFound {
            path: data_path.to_string(),
        })
}

/// Decode an animation resource.
///
/// Link headers are resolved against `candidates`, which should hold every
/// resource the companion data might live in. Actor resources ignore it.
///
/// # Errors
///
/// Returns [`Error::LinkDataNotFound`] when a Link header's data resource is
/// not among the candidates, and [`Error::Truncated`] for short payloads.
pub fn parse_animation_from_resource(
    resource: &ResourceEntry,
    candidates: &[ResourceEntry],
) -> Result<AnimationEntry> {
    let payload = resource.payload();
    let anim_type = ByteReader::new(payload).read_u32_le("animation type")?;
    let name = resource.name();

    if anim_type == LINK_ANIMATION_TYPE {
        let header = parse_link_header(payload)?;
        let data_resource = find_link_data(&header.data_path, candidates)?;
        tracing::debug!(
            "Resolved Link animation {} -> {}",
            resource.path(),
            data_resource.path()
        );
        let data = parse_link_data(data_resource.payload())?;

        return Ok(AnimationEntry::Link(LinkAnimation {
            name: name.to_string(),
            frame_count: header.frame_count,
            data,
        }));
    }

    parse_actor_payload(name, payload).map(AnimationEntry::Actor)
}
