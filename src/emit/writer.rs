use crate::error::GenerateError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already held exactly these bytes and was left alone.
    Unchanged,
}

/// True when `path` exists and holds exactly `contents`.
pub fn is_current(path: &Path, contents: &str) -> bool {
    fs::read(path).is_ok_and(|existing| existing == contents.as_bytes())
}

/// Writes `contents` to `path` through a sibling temp file and a rename, so a
/// reader never sees a half-written manifest.
pub fn write_manifest(
    project: &str,
    path: &Path,
    contents: &str,
) -> Result<WriteOutcome, GenerateError> {
    if is_current(path, contents) {
        return Ok(WriteOutcome::Unchanged);
    }

    let fail = |source: std::io::Error| GenerateError::OutputWriteFailure {
        project: project.to_string(),
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, contents).map_err(fail)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(fail(e));
    }

    Ok(WriteOutcome::Written)
}

/// Sibling file a manifest is staged in before the rename.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("manifest"));
    name.push(".tmp");
    path.with_file_name(name)
}
