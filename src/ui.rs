//! Terminal tables.
//!
//! Columns size to their widest cell and shrink (widest first) when the
//! terminal is too narrow; shrunk cells are cut with an ellipsis.
//!
//! ```text
//! ┌─────────┬──────────────────────┐
//! │ Project │ Output               │
//! ├─────────┼──────────────────────┤
//! │ Core    │ Source/Core/CMake... │
//! └─────────┴──────────────────────┘
//! ```

use colored::*;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        print!("{}", self.render(term_width as usize));
    }

    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(console::measure_text_width(cell));
            }
        }

        // 2 indent + borders + one space of padding each side
        let overhead = 3 + 3 * widths.len();
        let available = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > available {
            let (idx, &widest) = match widths.iter().enumerate().max_by_key(|(_, w)| **w) {
                Some(found) => found,
                None => break,
            };
            if widest <= 8 {
                break;
            }
            widths[idx] -= 1;
        }

        let line = |left: &str, mid: &str, right: &str| {
            let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}\n", left, cells.join(mid), right)
        };
        let row_line = |cells: &[String], bold: bool| {
            let parts: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| {
                    let text = console::truncate_str(cell, w, "...");
                    let pad = w.saturating_sub(console::measure_text_width(&text));
                    let plain: &str = &text;
                    let text = if bold {
                        plain.bold().to_string()
                    } else {
                        plain.to_string()
                    };
                    format!(" {}{} ", text, " ".repeat(pad))
                })
                .collect();
            format!("  │{}│\n", parts.join("│"))
        };

        let mut out = line("┌", "┬", "┐");
        out.push_str(&row_line(&self.headers, true));
        out.push_str(&line("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&row_line(row, false));
        }
        out.push_str(&line("└", "┴", "┘"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fits_content() {
        colored::control::set_override(false);
        let mut table = Table::new(&["Project", "Files"]);
        table.add_row(vec!["Core".to_string(), "12".to_string()]);
        table.add_row(vec!["bad".to_string()]);

        let text = table.render(200);
        assert!(text.contains("│ Core    │ 12    │"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_render_shrinks_wide_columns() {
        colored::control::set_override(false);
        let mut table = Table::new(&["Project", "Output"]);
        table.add_row(vec!["Core".to_string(), "x".repeat(80)]);

        let text = table.render(40);
        assert!(text.contains("..."));
        assert!(text.lines().all(|l| console::measure_text_width(l) <= 40));
    }
}
