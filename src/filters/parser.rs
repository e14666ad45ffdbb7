use super::entry::{Category, FilterEntry};
use crate::error::GenerateError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

// An item element whose end tag has not been seen yet.
struct OpenItem {
    category: Category,
    recorded_path: String,
    filter: Option<String>,
    // Stack height at the item's start tag.
    depth: usize,
}

impl OpenItem {
    fn finish(self) -> FilterEntry {
        FilterEntry {
            recorded_path: self.recorded_path,
            category: self.category,
            filter_path: self.filter,
        }
    }
}

/// Extracts every `ClCompile`/`ClInclude` item of an `ItemGroup`.
///
/// Element names are matched by local name, so the MSBuild namespace (or any
/// prefix) does not matter. Anything that is not well-formed XML is reported
/// as [`GenerateError::MalformedManifest`] against `path`.
pub fn parse_filters(path: &Path, xml: &str) -> Result<Vec<FilterEntry>, GenerateError> {
    let malformed = |reason: String| GenerateError::MalformedManifest {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut item: Option<OpenItem> = None;
    let mut filter_text: Option<String> = None;
    let mut seen_root = false;
    let mut entries = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                check_root(&stack, &mut seen_root).map_err(&malformed)?;

                if let Some(category) = item_category(&stack, &item, &name) {
                    let recorded_path = include_attr(&e, &name).map_err(&malformed)?;
                    item = Some(OpenItem {
                        category,
                        recorded_path,
                        filter: None,
                        depth: stack.len(),
                    });
                } else if is_filter_child(&stack, &item, &name) {
                    filter_text = Some(String::new());
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name().as_ref().to_vec();
                check_root(&stack, &mut seen_root).map_err(&malformed)?;

                if let Some(category) = item_category(&stack, &item, &name) {
                    let recorded_path = include_attr(&e, &name).map_err(&malformed)?;
                    entries.push(FilterEntry {
                        recorded_path,
                        category,
                        filter_path: None,
                    });
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name().as_ref().to_vec();
                match stack.pop() {
                    Some(open) if open == name => {}
                    Some(open) => {
                        return Err(malformed(format!(
                            "expected </{}>, found </{}> at byte {}",
                            String::from_utf8_lossy(&open),
                            String::from_utf8_lossy(&name),
                            reader.buffer_position()
                        )));
                    }
                    None => {
                        return Err(malformed(format!(
                            "unmatched </{}> at byte {}",
                            String::from_utf8_lossy(&name),
                            reader.buffer_position()
                        )));
                    }
                }

                let closes_item = match item.as_mut() {
                    Some(open) if name == b"Filter" && stack.len() == open.depth + 1 => {
                        let text = filter_text.take().unwrap_or_default();
                        let text = text.trim();
                        open.filter = (!text.is_empty()).then(|| text.to_string());
                        false
                    }
                    Some(open) => stack.len() == open.depth,
                    None => false,
                };
                if closes_item && let Some(done) = item.take() {
                    entries.push(done.finish());
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(buf) = filter_text.as_mut() {
                    let text = t.unescape().map_err(|e| malformed(e.to_string()))?;
                    buf.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(buf) = filter_text.as_mut() {
                    buf.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(malformed(format!(
                    "{} at byte {}",
                    e,
                    reader.buffer_position()
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!(
            "unexpected end of document, <{}> is not closed",
            String::from_utf8_lossy(open)
        )));
    }
    if !seen_root {
        return Err(malformed("document has no root element".to_string()));
    }

    Ok(entries)
}

fn check_root(stack: &[Vec<u8>], seen_root: &mut bool) -> Result<(), String> {
    if stack.is_empty() {
        if *seen_root {
            return Err("more than one root element".to_string());
        }
        *seen_root = true;
    }
    Ok(())
}

fn item_category(stack: &[Vec<u8>], item: &Option<OpenItem>, name: &[u8]) -> Option<Category> {
    if item.is_some() || stack.last().map(Vec::as_slice) != Some(b"ItemGroup".as_slice()) {
        return None;
    }
    Category::from_element(name)
}

fn is_filter_child(stack: &[Vec<u8>], item: &Option<OpenItem>, name: &[u8]) -> bool {
    match item {
        Some(open) => name == b"Filter" && stack.len() == open.depth + 1,
        None => false,
    }
}

fn include_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<String, String> {
    let attr = e
        .try_get_attribute("Include")
        .map_err(|err| err.to_string())?
        .ok_or_else(|| {
            format!(
                "<{}> without an Include attribute",
                String::from_utf8_lossy(name)
            )
        })?;
    let value = attr.unescape_value().map_err(|err| err.to_string())?;
    if value.trim().is_empty() {
        return Err(format!(
            "<{}> with an empty Include attribute",
            String::from_utf8_lossy(name)
        ));
    }
    Ok(value.into_owned())
}
