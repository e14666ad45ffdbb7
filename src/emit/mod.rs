//! Writing CMake source manifests.
//!
//! One manifest per project: a `set()` list per filter, a `source_group()` per
//! filter, and an aggregate list of all of them. Output is a pure function of
//! the project's [`FilterGroups`](crate::filters::FilterGroups).

mod cmake;
mod ident;
mod writer;

pub use cmake::{escape_quoted, render_manifest};
pub use ident::IdentScheme;
pub use writer::{WriteOutcome, is_current, write_manifest};
pub(crate) use writer::tmp_path;
