//
//  campus-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Table rendering with `comfy_table`, plus small cell formatters.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;

/// A table with the standard preset and dynamic column widths.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Builder over [`comfy_table::Table`].
///
/// ```rust
/// use campus_client::output::TableBuilder;
///
/// let table = TableBuilder::new()
///     .color(false)
///     .headers(["RANK", "USER", "SCORE"])
///     .row(["1", "ada", "100"])
///     .build();
/// assert!(table.to_string().contains("ada"));
/// ```
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table
            .add_row(cells.into_iter().map(Into::into).collect::<Vec<String>>());
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            self.table
                .add_row(row.into_iter().map(Into::into).collect::<Vec<String>>());
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a status or difficulty word by meaning.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    match status.to_lowercase().as_str() {
        "beginner" | "in-progress" | "passed" => style(status).green().to_string(),
        "intermediate" | "draft" => style(status).yellow().to_string(),
        "advanced" | "failed" => style(status).red().to_string(),
        "completed" => style(status).blue().to_string(),
        "archived" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    match (color, value) {
        (false, _) => text.to_string(),
        (true, true) => style(text).green().to_string(),
        (true, false) => style(text).dim().to_string(),
    }
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 8), "a lon...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("héllo wörld", 6), "hél...");
    }

    #[test]
    fn test_plain_formatters() {
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_status("advanced", false), "advanced");
    }
}
