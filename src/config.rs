use crate::error::GenerateError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional per-tree config file.
pub const CONFIG_FILE: &str = "filtergen.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Suffix that marks a project-filter file, compared case-insensitively.
    pub extension: String,
    /// Directory (relative to the tree root) holding one folder per project.
    pub source_root: PathBuf,
    /// Filename of the generated manifest inside each project folder.
    pub output_file: String,
    /// Directory names that root a project's files, e.g. `Source/` and `Include/`.
    pub root_markers: Vec<String>,
    pub ident_prefix: String,
    /// Worker count. `None` uses the host's available parallelism.
    pub jobs: Option<usize>,
    pub fail_fast: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extension: ".filters".to_string(),
            source_root: PathBuf::from("Source"),
            output_file: "CMakeSources.cmake".to_string(),
            root_markers: vec!["Source".to_string(), "Include".to_string()],
            ident_prefix: "BS_".to_string(),
            jobs: None,
            fail_fast: false,
        }
    }
}

impl GeneratorConfig {
    pub fn jobs(&self) -> usize {
        self.jobs.filter(|&n| n > 0).unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Where the generated manifest for `project` lands under `root`.
    pub fn output_path(&self, root: &Path, project: &str) -> PathBuf {
        root.join(&self.source_root)
            .join(project)
            .join(&self.output_file)
    }

    fn validate(&self, origin: &Path) -> Result<(), GenerateError> {
        let invalid = |reason: &str| GenerateError::InvalidConfig {
            path: origin.to_path_buf(),
            reason: reason.to_string(),
        };

        if self.extension.trim().is_empty() {
            return Err(invalid("'extension' must not be empty"));
        }
        if self.output_file.trim().is_empty() {
            return Err(invalid("'output_file' must not be empty"));
        }
        if self.root_markers.iter().all(|m| m.is_empty()) {
            return Err(invalid("'root_markers' needs at least one directory name"));
        }
        Ok(())
    }
}

/// Loads `filtergen.toml` from `root`, or `explicit` when given.
///
/// A missing file under `root` means defaults. A missing `explicit` file is an
/// error, since the caller asked for it by name.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<GeneratorConfig, GenerateError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => root.join(CONFIG_FILE),
    };

    if !path.is_file() {
        if explicit.is_some() {
            return Err(GenerateError::InvalidConfig {
                path,
                reason: "file not found".to_string(),
            });
        }
        return Ok(GeneratorConfig::default());
    }

    let text = fs::read_to_string(&path).map_err(|e| GenerateError::InvalidConfig {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    let config: GeneratorConfig =
        toml::from_str(&text).map_err(|e| GenerateError::InvalidConfig {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    config.validate(&path)?;

    Ok(config)
}
