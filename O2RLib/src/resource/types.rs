//! Resource type registry
//!
//! Maps the four-character tag stored at offset 4 of every resource header to
//! a human readable type name. Resources whose tag is not listed here are not
//! surfaced by the archive codec.

use serde::{Serialize, Serializer};

/// Known resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Array,
    Animation,
    PlayerAnimation,
    Room,
    CollisionHeader,
    Skeleton,
    SkeletonLimb,
    Path,
    Cutscene,
    Text,
    Audio,
    AudioSample,
    AudioSoundFont,
    AudioSequence,
    Background,
    SceneCommand,
    DisplayList,
    Light,
    Matrix,
    Texture,
    Vertex,
}

impl ResourceType {
    /// Every registered type, in registry order.
    pub const ALL: [ResourceType; 21] = [
        ResourceType::Array,
        ResourceType::Animation,
        ResourceType::PlayerAnimation,
        ResourceType::Room,
        ResourceType::CollisionHeader,
        ResourceType::Skeleton,
        ResourceType::SkeletonLimb,
        ResourceType::Path,
        ResourceType::Cutscene,
        ResourceType::Text,
        ResourceType::Audio,
        ResourceType::AudioSample,
        ResourceType::AudioSoundFont,
        ResourceType::AudioSequence,
        ResourceType::Background,
        ResourceType::SceneCommand,
        ResourceType::DisplayList,
        ResourceType::Light,
        ResourceType::Matrix,
        ResourceType::Texture,
        ResourceType::Vertex,
    ];

    /// The `FourCC` tag for this type.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            ResourceType::Array => "OARR",
            ResourceType::Animation => "OANM",
            ResourceType::PlayerAnimation => "OPAM",
            ResourceType::Room => "OROM",
            ResourceType::CollisionHeader => "OCOL",
            ResourceType::Skeleton => "OSKL",
            ResourceType::SkeletonLimb => "OSLB",
            ResourceType::Path => "OPTH",
            ResourceType::Cutscene => "OCUT",
            ResourceType::Text => "OTXT",
            ResourceType::Audio => "OAUD",
            ResourceType::AudioSample => "OSMP",
            ResourceType::AudioSoundFont => "OSFT",
            ResourceType::AudioSequence => "OSEQ",
            ResourceType::Background => "OBGI",
            ResourceType::SceneCommand => "ORCM",
            ResourceType::DisplayList => "ODLT",
            ResourceType::Light => "LGTS",
            ResourceType::Matrix => "OMTX",
            ResourceType::Texture => "OTEX",
            ResourceType::Vertex => "OVTX",
        }
    }

    /// The human readable name for this type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Array => "Array",
            ResourceType::Animation => "Animation",
            ResourceType::PlayerAnimation => "Player Animation",
            ResourceType::Room => "Room",
            ResourceType::CollisionHeader => "Collision Header",
            ResourceType::Skeleton => "Skeleton",
            ResourceType::SkeletonLimb => "Skeleton Limb",
            ResourceType::Path => "Path",
            ResourceType::Cutscene => "Cutscene",
            ResourceType::Text => "Text",
            ResourceType::Audio => "Audio",
            ResourceType::AudioSample => "Audio Sample",
            ResourceType::AudioSoundFont => "Audio SoundFont",
            ResourceType::AudioSequence => "Audio Sequence",
            ResourceType::Background => "Background",
            ResourceType::SceneCommand => "Scene Command",
            ResourceType::DisplayList => "Display List",
            ResourceType::Light => "Light",
            ResourceType::Matrix => "Matrix",
            ResourceType::Texture => "Texture",
            ResourceType::Vertex => "Vertex",
        }
    }

    /// Resolve a `FourCC` tag string (e.g. `"OANM"`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Resolve a human readable name (e.g. `"Player Animation"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Resolve either a type name or a raw tag.
    #[must_use]
    pub fn lookup(name_or_tag: &str) -> Option<Self> {
        Self::from_name(name_or_tag).or_else(|| Self::from_tag(name_or_tag))
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Get the type name registered for a tag, if any.
#[must_use]
pub fn resource_type_name(tag: &str) -> Option<&'static str> {
    ResourceType::from_tag(tag).map(ResourceType::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_bijective() {
        let tags: HashSet<_> = ResourceType::ALL.iter().map(|t| t.tag()).collect();
        let names: HashSet<_> = ResourceType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(tags.len(), ResourceType::ALL.len());
        assert_eq!(names.len(), ResourceType::ALL.len());

        for ty in ResourceType::ALL {
            assert_eq!(ResourceType::from_tag(ty.tag()), Some(ty));
            assert_eq!(ResourceType::from_name(ty.name()), Some(ty));
            assert_eq!(ty.tag().len(), 4);
        }
    }

    #[test]
    fn test_known_tags() {
        assert_eq!(resource_type_name("OANM"), Some("Animation"));
        assert_eq!(resource_type_name("OPAM"), Some("Player Animation"));
        assert_eq!(resource_type_name("OTXT"), Some("Text"));
        assert_eq!(resource_type_name("OTEX"), Some("Texture"));
        assert_eq!(resource_type_name("XXXX"), None);
    }

    #[test]
    fn test_lookup_accepts_name_or_tag() {
        assert_eq!(ResourceType::lookup("Texture"), Some(ResourceType::Texture));
        assert_eq!(ResourceType::lookup("OTEX"), Some(ResourceType::Texture));
        assert_eq!(ResourceType::lookup("texture"), None);
    }
}
