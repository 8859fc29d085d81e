//! Moving resources to new archive paths

use crate::error::{Error, Result};
use crate::formats::animation::{is_link_header, relocate_link_animation};
use crate::resource::{ResourceEntry, ResourceType};

/// Look up a resource by exact path.
#[must_use]
pub fn find_resource<'a>(resources: &'a [ResourceEntry], path: &str) -> Option<&'a ResourceEntry> {
    resources.iter().find(|r| r.path() == path)
}

/// Return a copy of `resources` with the resource at `old_path` moved to
/// `new_path`, replacing whatever was stored there.
///
/// Link animation headers take their data resource along (see
/// [`relocate_link_animation`]).
///
/// # Errors
///
/// Returns [`Error::ResourceNotFound`] if `old_path` does not exist, or the
/// errors of [`relocate_link_animation`] for Link headers.
pub fn move_resource(
    resources: &[ResourceEntry],
    old_path: &str,
    new_path: &str,
) -> Result<Vec<ResourceEntry>> {
    let resource = find_resource(resources, old_path)
        .ok_or_else(|| Error::ResourceNotFound(old_path.to_string()))?;

    if old_path == new_path {
        return Ok(resources.to_vec());
    }

    if resource.resource_type() == ResourceType::Animation && is_link_header(resource.payload()) {
        return relocate_link_animation(resources, old_path, new_path);
    }

    let mut moved = Vec::with_capacity(resources.len());
    for entry in resources {
        if entry.path() == old_path {
            moved.push(entry.with_path(new_path));
        } else if entry.path() == new_path {
            tracing::warn!("Move replaces existing resource {}", new_path);
        } else {
            moved.push(entry.clone());
        }
    }

    tracing::info!("Moved {} -> {}", old_path, new_path);
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceHeader;

    fn entry(path: &str, byte: u8) -> ResourceEntry {
        ResourceEntry::from_parts(path, ResourceHeader::new(ResourceType::Texture), &[byte])
    }

    #[test]
    fn test_move_plain_resource() {
        let resources = vec![entry("a", 1), entry("b", 2)];
        let moved = move_resource(&resources, "a", "textures/a").unwrap();
        assert_eq!(moved[0].path(), "textures/a");
        assert_eq!(moved[0].payload(), &[1]);
        assert_eq!(resources[0].path(), "a");
    }

    #[test]
    fn test_move_replaces_destination() {
        let resources = vec![entry("a", 1), entry("b", 2)];
        let moved = move_resource(&resources, "a", "b").unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].path(), "b");
        assert_eq!(moved[0].payload(), &[1]);
    }

    #[test]
    fn test_move_missing() {
        assert!(matches!(
            move_resource(&[entry("a", 1)], "zzz", "b"),
            Err(Error::ResourceNotFound(_))
        ));
    }
}
