//! Reading project-filter documents.
//!
//! A filters file assigns each compiled source and header to a logical folder
//! ("filter"). This module turns one such document into [`FilterEntry`] values
//! and groups their normalized paths by filter.

mod entry;
mod group;
mod parser;
mod path;

pub use entry::{Category, FilterEntry};
pub use group::{FilterGroups, MergedPath};
pub use parser::parse_filters;
pub use path::normalize_path;
