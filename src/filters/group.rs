use super::entry::FilterEntry;
use super::path::normalize_path;
use std::collections::{BTreeMap, HashMap};

/// Two different recorded paths that normalized to the same listed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPath {
    pub filter: String,
    pub normalized: String,
    pub kept: String,
    pub dropped: String,
}

/// Normalized paths keyed by filter.
///
/// Keys iterate in lexicographic order; paths keep the order they were first
/// seen in, with repeats inside one filter dropped. Repeats that came from a
/// different recorded path are kept in [`FilterGroups::merged`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterGroups {
    groups: BTreeMap<String, Vec<String>>,
    merged: Vec<MergedPath>,
}

impl FilterGroups {
    pub fn from_entries(entries: &[FilterEntry], markers: &[String]) -> Self {
        let mut seen: HashMap<(String, String), &str> = HashMap::new();
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut merged = Vec::new();

        for entry in entries {
            let filter = entry.effective_filter().to_string();
            let local = normalize_path(&entry.recorded_path, markers);
            let key = (filter.clone(), local.clone());

            match seen.get(&key) {
                Some(&kept) if kept != entry.recorded_path => merged.push(MergedPath {
                    filter,
                    normalized: local,
                    kept: kept.to_string(),
                    dropped: entry.recorded_path.clone(),
                }),
                Some(_) => {}
                None => {
                    seen.insert(key, &entry.recorded_path);
                    groups.entry(filter).or_default().push(local);
                }
            }
        }

        Self { groups, merged }
    }

    pub fn merged(&self) -> &[MergedPath] {
        &self.merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
