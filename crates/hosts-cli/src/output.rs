//! Tabular, plain and structured output for list commands

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Spaces between table columns.
const COLUMN_GAP: usize = 3;

/// A table whose columns can be cut down per output format.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render the columns at `columns` (indices into the headers), padded
    /// so every column lines up. Trailing spaces are trimmed.
    pub fn render(&self, columns: &[usize], headers: bool) -> String {
        let mut lines: Vec<Vec<&str>> = Vec::new();
        if headers {
            lines.push(columns.iter().map(|&c| self.headers[c]).collect());
        }
        for row in &self.rows {
            lines.push(
                columns
                    .iter()
                    .map(|&c| row.get(c).map_or("", String::as_str))
                    .collect(),
            );
        }

        let widths: Vec<usize> = (0..columns.len())
            .map(|i| {
                lines
                    .iter()
                    .map(|line| line[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for line in lines {
            let mut text = String::new();
            for (i, cell) in line.iter().enumerate() {
                text.push_str(cell);
                if i + 1 < line.len() {
                    let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                    text.extend(std::iter::repeat_n(' ', pad));
                }
            }
            out.push_str(text.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Serialize `value` as pretty JSON or YAML.
pub fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(value)?;
            text.push('\n');
            Ok(Some(text))
        }
        OutputFormat::Yaml => Ok(Some(serde_yaml::to_string(value)?)),
        _ => Ok(None),
    }
}
