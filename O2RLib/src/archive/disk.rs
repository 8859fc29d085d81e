//! Unpacking archives to directories and packing them back

use super::reader::decode_entries;
use crate::error::{Error, Result};
use crate::resource::ResourceEntry;
use crate::utils::path::relative_path;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Write every resource under `output_dir`, one file per archive path.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if a resource path would escape the output
/// directory, or [`Error::Io`] on write failure.
pub fn extract_to_dir<P: AsRef<Path>>(entries: &[ResourceEntry], output_dir: P) -> Result<usize> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    for entry in entries {
        let relative = Path::new(entry.path());
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::InvalidPath(entry.path().to_string()));
        }

        let target = output_dir.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, entry.data())?;
        tracing::debug!("Extracted {}", entry.path());
    }

    tracing::info!("Extracted {} resources to {:?}", entries.len(), output_dir);
    Ok(entries.len())
}

/// Collect every file below `source_dir` as a resource keyed by its
/// forward-slash relative path. Files without a valid header are skipped.
///
/// # Errors
///
/// Returns [`Error::WalkDirError`] if the directory cannot be traversed, or
/// [`Error::Io`] if a file cannot be read.
pub fn pack_dir<P: AsRef<Path>>(source_dir: P) -> Result<Vec<ResourceEntry>> {
    let base = source_dir.as_ref();
    tracing::info!("Scanning directory: {:?}", base);

    let mut raw = Vec::new();
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = relative_path(path, base)
            .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;
        raw.push((relative, std::fs::read(path)?));
    }

    let found = raw.len();
    let resources = decode_entries(raw);
    tracing::info!("Found {} files, {} resources", found, resources.len());
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ResourceHeader, ResourceType};

    #[test]
    fn test_extract_then_pack() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            ResourceEntry::from_parts(
                "objects/gameplay_keep/gTex",
                ResourceHeader::new(ResourceType::Texture),
                &[1, 2, 3],
            ),
            ResourceEntry::from_parts("text/nes", ResourceHeader::new(ResourceType::Text), &[]),
        ];

        assert_eq!(extract_to_dir(&entries, dir.path()).unwrap(), 2);
        std::fs::write(dir.path().join("notes.txt"), b"not a resource").unwrap();

        let packed = pack_dir(dir.path()).unwrap();
        assert_eq!(packed, entries);
    }

    #[test]
    fn test_extract_rejects_escaping_path() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![ResourceEntry::from_parts(
            "../outside",
            ResourceHeader::new(ResourceType::Text),
            &[],
        )];
        assert!(matches!(
            extract_to_dir(&entries, dir.path()),
            Err(Error::InvalidPath(_))
        ));
    }
}
