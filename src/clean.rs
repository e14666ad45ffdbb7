//! Removal of generated manifests.
//!
//! Only the generated file of each discovered project (and a leftover `.tmp`
//! sibling from an interrupted write) is removed. Hand-maintained CMake files
//! in the same folder are never touched.

use crate::config::GeneratorConfig;
use crate::emit::tmp_path;
use crate::pipeline::plan;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    /// Projects that had nothing generated yet.
    pub absent: usize,
}

pub fn clean_generated(root: &Path, config: &GeneratorConfig) -> Result<CleanReport> {
    let (jobs, _) = plan(root, config)?;
    let mut report = CleanReport::default();

    for job in jobs {
        let tmp = tmp_path(&job.output);
        if tmp.is_file() {
            fs::remove_file(&tmp)
                .with_context(|| format!("Failed to remove {}", tmp.display()))?;
        }

        if job.output.is_file() {
            fs::remove_file(&job.output).with_context(|| {
                format!(
                    "Failed to remove generated manifest for {} ({})",
                    job.project,
                    job.output.display()
                )
            })?;
            report.removed.push(job.output);
        } else {
            report.absent += 1;
        }
    }

    Ok(report)
}
