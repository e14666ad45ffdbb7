//! # filtergen - Visual Studio filters to CMake source lists
//!
//! Visual Studio keeps the folder ("filter") each source and header appears
//! under in a `.vcxproj.filters` file. filtergen reads those files and writes a
//! `CMakeSources.cmake` per project with the same grouping, so a CMake build
//! shows the same tree in IDEs.
//!
//! ## Pipeline
//!
//! ```text
//! locate  ->  filters (parse, group)  ->  emit (render, write)
//! ```
//!
//! Every project runs independently on a worker pool; see [`pipeline`].
//!
//! ## Module Organization
//!
//! - [`locate`] - Recursive discovery of filter files
//! - [`filters`] - Parsing and grouping of filter entries
//! - [`emit`] - Identifier derivation and CMake output
//! - [`pipeline`] - Parallel per-project generation and run summary

/// Removal of generated manifests.
pub mod clean;

/// Configuration (`filtergen.toml`).
pub mod config;

/// CMake manifest rendering and atomic writes.
pub mod emit;

/// Error type for all stages.
pub mod error;

/// Project-filter document parsing.
pub mod filters;

/// Filter file discovery.
pub mod locate;

/// Per-project generation on a worker pool.
pub mod pipeline;

/// Terminal UI utilities (tables).
pub mod ui;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use pipeline::{Mode, RunOptions, RunSummary, run};
