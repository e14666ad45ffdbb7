/// Which item list a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `ClCompile`
    Source,
    /// `ClInclude`
    Header,
}

impl Category {
    /// Filter used for entries that carry no filter of their own.
    pub fn default_filter(self) -> &'static str {
        match self {
            Category::Source => "Source Files",
            Category::Header => "Header Files",
        }
    }

    pub(crate) fn from_element(local_name: &[u8]) -> Option<Self> {
        match local_name {
            b"ClCompile" => Some(Category::Source),
            b"ClInclude" => Some(Category::Header),
            _ => None,
        }
    }
}

/// One `ClCompile`/`ClInclude` item as written in the filters file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub recorded_path: String,
    pub category: Category,
    /// `None` when the item has no `Filter` child, or an empty one.
    pub filter_path: Option<String>,
}

impl FilterEntry {
    /// The filter this entry is grouped under, falling back to the
    /// category's top-level group.
    pub fn effective_filter(&self) -> &str {
        self.filter_path
            .as_deref()
            .unwrap_or_else(|| self.category.default_filter())
    }
}
