//! Per-project generation on a worker pool.
//!
//! Discovery runs first and to completion, so a bad root or unreadable subtree
//! aborts before any output is touched. Each project is then parsed, rendered
//! and written independently; failures are collected instead of stopping
//! sibling projects (unless fail-fast is on).

use crate::config::GeneratorConfig;
use crate::emit::{self, IdentScheme, WriteOutcome};
use crate::error::GenerateError;
use crate::filters::{FilterGroups, MergedPath, parse_filters};
use crate::locate::{collect_filters, project_name};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Write,
    /// Render only; nothing is written.
    DryRun,
    /// Fail projects whose manifest on disk differs from what would be written.
    Check,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mode: Mode,
    pub verbose: bool,
    pub quiet: bool,
}

/// One filters file and where its manifest goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectJob {
    pub project: String,
    pub manifest: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Written,
    Unchanged,
    Rendered,
    UpToDate,
}

#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub project: String,
    pub manifest: PathBuf,
    pub output: PathBuf,
    pub files: usize,
    pub groups: usize,
    /// Distinct recorded paths that ended up as one listed path.
    pub merged: Vec<MergedPath>,
    pub status: ProjectStatus,
}

#[derive(Debug)]
pub struct ProjectFailure {
    pub project: String,
    pub manifest: PathBuf,
    pub error: GenerateError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ProjectReport>,
    pub failures: Vec<ProjectFailure>,
    /// Projects never started because fail-fast tripped.
    pub skipped: Vec<ProjectJob>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    pub fn count(&self, status: ProjectStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }
}

/// Discovers filter files under `root` and pairs each with its output path.
///
/// Files are in sorted path order. When two files resolve to the same output,
/// the first keeps it and the second is returned as a failure.
pub fn plan(
    root: &Path,
    config: &GeneratorConfig,
) -> Result<(Vec<ProjectJob>, Vec<ProjectFailure>), GenerateError> {
    let files = collect_filters(root, &config.extension)?;
    // Keyed case-insensitively: on Windows and macOS `core` and `Core` are one folder.
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for manifest in files {
        let project = project_name(&manifest, &config.extension);
        let output = config.output_path(root, &project);
        let owner_key = output.to_string_lossy().to_lowercase();

        if let Some(first) = owners.get(&owner_key) {
            failures.push(ProjectFailure {
                error: GenerateError::DuplicateProject {
                    project: project.clone(),
                    first: first.clone(),
                    second: manifest.clone(),
                },
                project,
                manifest,
            });
            continue;
        }

        owners.insert(owner_key, manifest.clone());
        jobs.push(ProjectJob {
            project,
            manifest,
            output,
        });
    }

    Ok((jobs, failures))
}

/// Parses one filters file and emits (or checks) its manifest.
pub fn process_project(
    job: &ProjectJob,
    config: &GeneratorConfig,
    mode: Mode,
) -> Result<ProjectReport, GenerateError> {
    let xml = fs::read_to_string(&job.manifest).map_err(|source| GenerateError::ReadFailure {
        path: job.manifest.clone(),
        source,
    })?;
    let entries = parse_filters(&job.manifest, &xml)?;
    let groups = FilterGroups::from_entries(&entries, &config.root_markers);

    let scheme = IdentScheme::new(&config.ident_prefix, &job.project);
    let source_name = job
        .manifest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let text = emit::render_manifest(&job.project, &source_name, &groups, &scheme)?;

    let status = match mode {
        Mode::Write => match emit::write_manifest(&job.project, &job.output, &text)? {
            WriteOutcome::Written => ProjectStatus::Written,
            WriteOutcome::Unchanged => ProjectStatus::Unchanged,
        },
        Mode::DryRun => ProjectStatus::Rendered,
        Mode::Check => {
            if !emit::is_current(&job.output, &text) {
                return Err(GenerateError::OutdatedOutput {
                    project: job.project.clone(),
                    path: job.output.clone(),
                });
            }
            ProjectStatus::UpToDate
        }
    };

    Ok(ProjectReport {
        project: job.project.clone(),
        manifest: job.manifest.clone(),
        output: job.output.clone(),
        files: groups.file_count(),
        groups: groups.len(),
        merged: groups.merged().to_vec(),
        status,
    })
}

/// Runs discovery and then every project on a pool of `config.jobs()` workers.
///
/// Root-level problems come back as `Err` (downcastable to [`GenerateError`]);
/// project problems are in [`RunSummary::failures`].
pub fn run(root: &Path, config: &GeneratorConfig, options: &RunOptions) -> Result<RunSummary> {
    let start_time = Instant::now();
    let (jobs, mut failures) = plan(root, config)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs())
        .build()
        .context("Failed to start worker pool")?;

    let pb = if options.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(jobs.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Generating...");

    let stop = AtomicBool::new(false);
    let outcomes: Vec<(ProjectJob, Option<Result<ProjectReport, GenerateError>>)> =
        pool.install(|| {
            jobs.into_par_iter()
                .map(|job| {
                    if config.fail_fast && stop.load(Ordering::SeqCst) {
                        pb.inc(1);
                        return (job, None);
                    }

                    pb.set_message(job.project.clone());
                    let result = process_project(&job, config, options.mode);
                    match &result {
                        Ok(report) if options.verbose => {
                            pb.println(format!(
                                "   {} {} -> {} ({} files, {} groups)",
                                "✓".green(),
                                report.project.bold(),
                                report.output.display(),
                                report.files,
                                report.groups
                            ));
                        }
                        Ok(_) => {}
                        Err(e) => {
                            if config.fail_fast {
                                stop.store(true, Ordering::SeqCst);
                            }
                            pb.println(format!("{} {}", "x".red(), e));
                        }
                    }
                    pb.inc(1);
                    (job, Some(result))
                })
                .collect()
        });

    pb.finish_with_message(format!("Done in {:.2?}", start_time.elapsed()));

    let mut summary = RunSummary::default();
    for (job, outcome) in outcomes {
        match outcome {
            Some(Ok(report)) => summary.reports.push(report),
            Some(Err(error)) => failures.push(ProjectFailure {
                project: job.project,
                manifest: job.manifest,
                error,
            }),
            None => summary.skipped.push(job),
        }
    }
    failures.sort_by(|a, b| a.manifest.cmp(&b.manifest));
    summary.failures = failures;

    Ok(summary)
}
