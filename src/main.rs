//! # filtergen CLI Entry Point
//!
//! Parses CLI arguments using clap and routes commands to the library.
//! Running `filtergen` with no command generates manifests for the current
//! directory.
//!
//! ## Commands
//!
//! - `generate [ROOT]` - write (or `--dry-run` / `--check`) every manifest
//! - `list [ROOT]` - show discovered projects and their outputs
//! - `clean [ROOT]` - delete generated manifests
//! - `completion <SHELL>` - shell completion script

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use filtergen::clean;
use filtergen::config::{self, GeneratorConfig};
use filtergen::pipeline::{self, Mode, ProjectStatus, RunOptions, RunSummary};
use filtergen::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "filtergen")]
#[command(about = "Generate CMake source lists from Visual Studio filters", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CMakeSources.cmake for every project under ROOT
    Generate(GenerateArgs),
    /// List discovered projects and where their manifests go
    List(TreeArgs),
    /// Delete generated manifests
    Clean(TreeArgs),
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Build tree root to scan
    #[arg(default_value = ".")]
    root: PathBuf,
    /// Config file (default: <ROOT>/filtergen.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of worker threads [default: available parallelism]
    #[arg(short, long)]
    jobs: Option<usize>,
    /// Stop starting new projects after the first failure
    #[arg(long)]
    fail_fast: bool,
    /// Render manifests without writing them
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,
    /// Fail if any manifest on disk is missing or out of date
    #[arg(long)]
    check: bool,
    /// Print a line per generated project
    #[arg(short, long)]
    verbose: bool,
    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct TreeArgs {
    /// Build tree root to scan
    #[arg(default_value = ".")]
    root: PathBuf,
    /// Config file (default: <ROOT>/filtergen.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate(args)) => generate_manifests(&args),
        None => generate_manifests(&GenerateArgs {
            root: PathBuf::from("."),
            ..GenerateArgs::default()
        }),
        Some(Commands::List(args)) => list_projects(&args),
        Some(Commands::Clean(args)) => clean_manifests(&args),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn generate_manifests(args: &GenerateArgs) -> Result<()> {
    let mut config = config::load_config(&args.root, args.config.as_deref())?;
    if let Some(jobs) = args.jobs {
        config.jobs = Some(jobs);
    }
    if args.fail_fast {
        config.fail_fast = true;
    }

    let mode = if args.check {
        Mode::Check
    } else if args.dry_run {
        Mode::DryRun
    } else {
        Mode::Write
    };

    if !args.quiet {
        let action = match mode {
            Mode::Write => "Generating",
            Mode::DryRun => "Rendering",
            Mode::Check => "Checking",
        };
        println!(
            "{} {} CMake sources under {} ({} workers)",
            "⚡".yellow(),
            action,
            args.root.display(),
            config.jobs()
        );
    }

    let options = RunOptions {
        mode,
        verbose: args.verbose,
        quiet: args.quiet,
    };
    let summary = pipeline::run(&args.root, &config, &options)?;

    if mode == Mode::DryRun {
        for report in &summary.reports {
            println!(
                "   {} {} -> {}",
                "→".cyan(),
                report.project.bold(),
                report.output.display()
            );
        }
    }

    print_merged_paths(&summary);
    print_summary(&summary, mode);

    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_merged_paths(summary: &RunSummary) {
    for report in &summary.reports {
        for merge in &report.merged {
            println!(
                "{} {}: '{}' and '{}' both list as \"{}\" in {}",
                "!".yellow(),
                report.project.bold(),
                merge.kept,
                merge.dropped,
                merge.normalized,
                merge.filter
            );
        }
    }
}

fn print_summary(summary: &RunSummary, mode: Mode) {
    let total = summary.reports.len() + summary.failures.len() + summary.skipped.len();
    if total == 0 {
        println!("{} No project filter files found.", "!".yellow());
        return;
    }

    let detail = match mode {
        Mode::Write => format!(
            "{} written, {} unchanged",
            summary.count(ProjectStatus::Written),
            summary.count(ProjectStatus::Unchanged)
        ),
        Mode::DryRun => format!("{} rendered", summary.count(ProjectStatus::Rendered)),
        Mode::Check => format!("{} up to date", summary.count(ProjectStatus::UpToDate)),
    };

    if summary.is_success() {
        println!("{} {} projects: {}", "✓".green(), total, detail);
        return;
    }

    println!(
        "{} {} of {} projects failed ({})",
        "x".red(),
        summary.failures.len(),
        total,
        detail
    );

    let mut table = ui::Table::new(&["Project", "File", "Error"]);
    for failure in &summary.failures {
        table.add_row(vec![
            failure.project.bold().to_string(),
            failure.manifest.display().to_string(),
            failure.error.kind().red().to_string(),
        ]);
    }
    if !table.is_empty() {
        table.print();
    }
    for failure in &summary.failures {
        println!("   {} {}", "x".red(), failure.error);
    }

    if !summary.skipped.is_empty() {
        println!(
            "{} {} projects skipped after the first failure (--fail-fast)",
            "!".yellow(),
            summary.skipped.len()
        );
    }
}

fn list_projects(args: &TreeArgs) -> Result<()> {
    let config = config::load_config(&args.root, args.config.as_deref())?;
    let (jobs, duplicates) = pipeline::plan(&args.root, &config)?;

    if jobs.is_empty() {
        println!("{} No project filter files found.", "!".yellow());
        return Ok(());
    }

    let base = fs::canonicalize(&args.root).unwrap_or_else(|_| args.root.clone());
    let mut table = ui::Table::new(&["Project", "Filters", "Output"]);
    for job in &jobs {
        table.add_row(vec![
            job.project.bold().green().to_string(),
            relative_to(&job.manifest, &base),
            relative_to(&job.output, &args.root),
        ]);
    }
    table.print();

    for dup in &duplicates {
        println!("{} {}", "!".yellow(), dup.error);
    }
    Ok(())
}

fn clean_manifests(args: &TreeArgs) -> Result<()> {
    let config: GeneratorConfig = config::load_config(&args.root, args.config.as_deref())?;
    let report = clean::clean_generated(&args.root, &config)?;

    for path in &report.removed {
        println!("{} Removed {}", "🗑️".red(), relative_to(path, &args.root));
    }

    if report.removed.is_empty() {
        println!("{} Nothing to clean", "!".yellow());
    } else {
        println!("{} Clean complete.", "✓".green());
    }
    Ok(())
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
