use super::ident::IdentScheme;
use crate::error::GenerateError;
use crate::filters::FilterGroups;
use std::collections::HashMap;

/// Escapes a value for use inside a quoted CMake argument.
///
/// Filter labels keep their backslashes as hierarchy separators, which
/// `source_group` expects written as `\\`.
pub fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the manifest for `project`.
///
/// `source_name` is the filters file name quoted in the header comment. Two
/// filters deriving the same identifier, or a filter deriving the aggregate
/// name, fail the whole project instead of merging lists.
pub fn render_manifest(
    project: &str,
    source_name: &str,
    groups: &FilterGroups,
    scheme: &IdentScheme,
) -> Result<String, GenerateError> {
    let aggregate = scheme.aggregate();
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut lists: Vec<(&str, String, &[String])> = Vec::with_capacity(groups.len());

    for (filter, paths) in groups.iter() {
        let ident = scheme.derive(filter);
        if ident == aggregate {
            return Err(GenerateError::IdentifierCollision {
                project: project.to_string(),
                first: "(aggregate list)".to_string(),
                second: filter.to_string(),
                identifier: ident,
            });
        }
        if let Some(previous) = owners.insert(ident.clone(), filter) {
            return Err(GenerateError::IdentifierCollision {
                project: project.to_string(),
                first: previous.to_string(),
                second: filter.to_string(),
                identifier: ident,
            });
        }
        lists.push((filter, ident, paths));
    }

    let mut out = format!(
        "# Generated by filtergen from {}. Do not edit.\n\n",
        source_name
    );

    for (_, ident, paths) in &lists {
        out.push_str(&format!("set({}\n", ident));
        for path in paths.iter() {
            out.push_str(&format!("\t\"{}\"\n", escape_quoted(path)));
        }
        out.push_str(")\n\n");
    }

    for (filter, ident, _) in &lists {
        out.push_str(&format!(
            "source_group(\"{}\" FILES ${{{}}})\n",
            escape_quoted(filter),
            ident
        ));
    }
    if !lists.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("set({}\n", aggregate));
    for (_, ident, _) in &lists {
        out.push_str(&format!("\t${{{}}}\n", ident));
    }
    out.push_str(")\n");

    Ok(out)
}
