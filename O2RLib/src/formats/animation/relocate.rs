//! Moving Link animations together with their data resource

use super::LINK_DATA_SUFFIX;
use super::reader::{find_link_data, is_link_header, parse_link_header};
use super::writer::update_link_header_path;
use crate::error::{Error, Result};
use crate::resource::{ResourceEntry, ResourceType};
use crate::utils::path::OTR_PATH_PREFIX;

/// Move the Link header at `header_path` to `new_path`.
///
/// The header's embedded reference becomes `__OTR__<new_path>_Data` and the
/// data resource moves to `<new_path>_Data`. Resources already stored at
/// either destination are replaced. The input slice is never modified; on
/// error nothing has moved.
///
/// # Errors
///
/// - [`Error::ResourceNotFound`] if `header_path` is not in `resources`.
/// - [`Error::NotALinkAnimation`] if it is not a Link animation header.
/// - [`Error::LinkDataNotFound`] if the referenced data resource is missing.
pub fn relocate_link_animation(
    resources: &[ResourceEntry],
    header_path: &str,
    new_path: &str,
) -> Result<Vec<ResourceEntry>> {
    let header = resources
        .iter()
        .find(|r| r.path() == header_path)
        .ok_or_else(|| Error::ResourceNotFound(header_path.to_string()))?;

    if header.resource_type() != ResourceType::Animation || !is_link_header(header.payload()) {
        return Err(Error::NotALinkAnimation(header_path.to_string()));
    }

    let link = parse_link_header(header.payload())?;
    let data = find_link_data(&link.data_path, resources)?;
    let old_data_path = data.path().to_string();

    let new_data_resource_path = format!("{new_path}{LINK_DATA_SUFFIX}");
    let new_header = update_link_header_path(
        header,
        &format!("{OTR_PATH_PREFIX}{new_data_resource_path}"),
    )?
    .with_path(new_path);
    let new_data = data.with_path(new_data_resource_path.as_str());

    let mut moved = Vec::with_capacity(resources.len());
    for resource in resources {
        let path = resource.path();
        if path == header_path {
            moved.push(new_header.clone());
        } else if path == old_data_path {
            moved.push(new_data.clone());
        } else if path == new_path || path == new_data_resource_path {
            tracing::warn!("Move replaces existing resource {}", path);
        } else {
            moved.push(resource.clone());
        }
    }

    tracing::info!(
        "Moved Link animation {} -> {} (data {} -> {})",
        header_path,
        new_path,
        old_data_path,
        new_data_resource_path
    );
    Ok(moved)
}
