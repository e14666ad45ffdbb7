use crate::filters::Category;

const SOURCE_TAG: &str = "SRC";
const HEADER_TAG: &str = "INC";
const NO_FILTER: &str = "NOFILTER";

/// Derives CMake variable names for one project's filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentScheme {
    prefix: String,
}

impl IdentScheme {
    /// `BS_` + `BansheeCore` gives the prefix `BS_BANSHEECORE_`.
    pub fn new(ident_prefix: &str, project: &str) -> Self {
        Self {
            prefix: format!("{}{}_", ident_prefix, sanitize(project)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the list that references every per-filter list.
    pub fn aggregate(&self) -> String {
        format!("{}{}", self.prefix, SOURCE_TAG)
    }

    /// `Source Files\Foo` becomes `<prefix>SRC_FOO`; the bare top-level
    /// groups become `<prefix>SRC_NOFILTER` and `<prefix>INC_NOFILTER`.
    pub fn derive(&self, filter_path: &str) -> String {
        let segments: Vec<&str> = filter_path
            .split(['\\', '/'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let mut parts: Vec<String> = segments.iter().map(|s| collapse(s)).collect();
        let only_tag = segments.len() == 1 && tag_for(segments[0]).is_some();
        if only_tag || parts.is_empty() {
            parts.push(NO_FILTER.to_string());
        }

        format!("{}{}", self.prefix, parts.join("_"))
    }
}

fn tag_for(segment: &str) -> Option<&'static str> {
    if segment.eq_ignore_ascii_case(Category::Source.default_filter()) {
        Some(SOURCE_TAG)
    } else if segment.eq_ignore_ascii_case(Category::Header.default_filter()) {
        Some(HEADER_TAG)
    } else {
        None
    }
}

fn collapse(segment: &str) -> String {
    match tag_for(segment) {
        Some(tag) => tag.to_string(),
        None => sanitize(segment),
    }
}

// Upper-cases and replaces anything CMake would not accept in a variable name.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
