//! Discovery of project-filter files under a build tree.
//!
//! Traversal is unrestricted and read-only. An unreadable subtree is an error,
//! not something to skip: generating half a tree is worse than refusing.

use crate::error::GenerateError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazily yields the absolute path of every file under `root` whose name ends
/// with `extension` (case-insensitive).
pub fn locate_filters(
    root: &Path,
    extension: &str,
) -> Result<impl Iterator<Item = Result<PathBuf, GenerateError>>, GenerateError> {
    if !root.is_dir() {
        return Err(GenerateError::RootNotFound(root.to_path_buf()));
    }
    let root = fs::canonicalize(root).map_err(|_| GenerateError::RootNotFound(root.to_path_buf()))?;
    let suffix = extension.to_lowercase();
    let walk_root = root.clone();

    let found = WalkDir::new(&walk_root)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    return None;
                }
                let name = entry.file_name().to_string_lossy().to_lowercase();
                name.ends_with(&suffix).then(|| Ok(entry.into_path()))
            }
            Err(source) => Some(Err(GenerateError::Traversal {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone()),
                source,
            })),
        });

    Ok(found)
}

/// Collects [`locate_filters`] into a sorted list, failing on the first
/// traversal error.
pub fn collect_filters(root: &Path, extension: &str) -> Result<Vec<PathBuf>, GenerateError> {
    let mut files = locate_filters(root, extension)?.collect::<Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

/// Project name for a filter file: `BansheeCore.vcxproj.filters` -> `BansheeCore`.
pub fn project_name(path: &Path, extension: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let cut = file_name.len().saturating_sub(extension.len());
    let base = if file_name.is_char_boundary(cut)
        && file_name[cut..].eq_ignore_ascii_case(extension)
    {
        &file_name[..cut]
    } else {
        file_name.as_str()
    };

    Path::new(base)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| base.to_string())
}
