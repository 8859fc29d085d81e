//! Skeletal animation resources
//!
//! Two on-disk variants exist:
//!
//! - **Link** animations are split across two resources. An `Animation`
//!   resource whose payload starts with `u32 1` holds the frame count and the
//!   archive path of a `Player Animation` resource that carries the `s16`
//!   values.
//! - **Actor** animations are a single `Animation` resource holding frame
//!   data, joint index triples and `staticIndexMax`.
//!
//! Both variants convert to and from the decomp-style C declarations
//! (`LinkAnimationHeader` / `AnimationHeader`) handled by [`c_source`].

pub mod c_source;
mod reader;
mod relocate;
mod writer;

pub use c_source::{
    CSourceOptions, ParseOptions, actor_animation_to_c, animation_to_c, combine_actor_sources,
    combine_actor_sources_with_options, combine_link_sources, combine_sources,
    detect_animation_kind, link_animation_to_c, parse_animation_from_c,
    parse_animation_from_c_with_options,
};
pub use reader::{
    LinkHeader, find_link_data, is_link_header, parse_actor_payload, parse_animation_from_resource,
    parse_link_data, parse_link_header,
};
pub use relocate::relocate_link_animation;
pub use writer::{
    LinkResources, actor_to_resource, encode_actor_payload, encode_link_data, encode_link_header,
    split_link_animation, update_link_header_path,
};

use serde::Serialize;

/// Payload discriminator (and header version) of a Link animation header.
pub const LINK_ANIMATION_TYPE: u32 = 1;

/// Payload discriminator written for Actor animations.
pub const ACTOR_ANIMATION_TYPE: u32 = 0;

/// Suffix appended to a Link animation's name to form its data resource
/// and data array names.
pub const LINK_DATA_SUFFIX: &str = "_Data";

/// One `{x, y, z}` joint index triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JointIndex {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl JointIndex {
    #[must_use]
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }
}

/// A Link animation with its data array resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnimation {
    pub name: String,
    pub frame_count: u16,
    pub data: Vec<i16>,
}

/// A self-contained Actor animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorAnimation {
    pub name: String,
    pub frame_count: u16,
    /// Rotation values. Stored on disk as `u16`, interpreted as signed.
    pub frame_data: Vec<i16>,
    pub joint_indices: Vec<JointIndex>,
    pub static_index_max: u16,
}

impl ActorAnimation {
    /// Check that frame data and joint indices are both present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyActorAnimation`] if either array is empty.
    ///
    /// [`Error::EmptyActorAnimation`]: crate::Error::EmptyActorAnimation
    pub fn validate(&self) -> crate::Result<()> {
        if self.frame_data.is_empty() || self.joint_indices.is_empty() {
            return Err(crate::Error::EmptyActorAnimation);
        }
        Ok(())
    }
}

/// Which animation grammar a piece of data follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Link,
    Actor,
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationKind::Link => f.write_str("Link"),
            AnimationKind::Actor => f.write_str("Actor"),
        }
    }
}

/// A parsed animation of either variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnimationEntry {
    Link(LinkAnimation),
    Actor(ActorAnimation),
}

impl AnimationEntry {
    #[must_use]
    pub fn kind(&self) -> AnimationKind {
        match self {
            AnimationEntry::Link(_) => AnimationKind::Link,
            AnimationEntry::Actor(_) => AnimationKind::Actor,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            AnimationEntry::Link(anim) => &anim.name,
            AnimationEntry::Actor(anim) => &anim.name,
        }
    }

    #[must_use]
    pub fn frame_count(&self) -> u16 {
        match self {
            AnimationEntry::Link(anim) => anim.frame_count,
            AnimationEntry::Actor(anim) => anim.frame_count,
        }
    }

    /// One-line summary, e.g. `gPlayerAnim_x (Link, 20 frames, 1340 values)`.
    #[must_use]
    pub fn preview(&self) -> String {
        match self {
            AnimationEntry::Link(anim) => format!(
                "{} (Link, {} frames, {} values)",
                anim.name,
                anim.frame_count,
                anim.data.len()
            ),
            AnimationEntry::Actor(anim) => format!(
                "{} (Actor, {} frames, {} values, {} joints)",
                anim.name,
                anim.frame_count,
                anim.frame_data.len(),
                anim.joint_indices.len()
            ),
        }
    }
}

impl From<LinkAnimation> for AnimationEntry {
    fn from(anim: LinkAnimation) -> Self {
        AnimationEntry::Link(anim)
    }
}

impl From<ActorAnimation> for AnimationEntry {
    fn from(anim: ActorAnimation) -> Self {
        AnimationEntry::Actor(anim)
    }
}
