//! Path utilities

use std::path::Path;

/// Archive-internal prefix some resources carry in embedded references.
pub const OTR_PATH_PREFIX: &str = "__OTR__";

/// Normalize path separators to forward slashes (for archive paths)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Get relative path and normalize separators
pub fn relative_path<P: AsRef<Path>>(path: P, base: P) -> Option<String> {
    path.as_ref()
        .strip_prefix(base.as_ref())
        .ok()
        .map(normalize_path)
}

/// Remove one leading `__OTR__` marker, if present.
#[must_use]
pub fn strip_otr_prefix(path: &str) -> &str {
    path.strip_prefix(OTR_PATH_PREFIX).unwrap_or(path)
}

/// Folder portion of an archive path (everything before the last `/`).
///
/// Returns an empty string for paths without a folder.
#[must_use]
pub fn parent_folder(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Name of a resource: the final path component without `.o2r`/`.otr`.
#[must_use]
pub fn resource_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".o2r")
        .or_else(|| file.strip_suffix(".otr"))
        .unwrap_or(file)
}
