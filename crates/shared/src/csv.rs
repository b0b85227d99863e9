//! CSV rendering for dashboard report downloads.
//!
//! Reports are small and generated client-side, so rendering is a plain string
//! build with CRLF line endings rather than a streaming writer.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A single CSV cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Always wrapped in double quotes, inner quotes doubled.
    Text(String),
    Number(i64),
    /// Written as-is.
    Raw(String),
}

impl Field {
    fn render(&self) -> String {
        match self {
            Field::Text(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            Field::Number(n) => n.to_string(),
            Field::Raw(s) => s.clone(),
        }
    }
}

/// Line-oriented CSV document.
#[derive(Debug, Clone, Default)]
pub struct CsvDocument {
    lines: Vec<String>,
}

impl CsvDocument {
    /// Starts a document with a header row. Header names are written unquoted.
    pub fn with_header(columns: &[&str]) -> Self {
        Self {
            lines: vec![columns.join(",")],
        }
    }

    pub fn push_row(&mut self, fields: &[Field]) {
        let line = fields
            .iter()
            .map(Field::render)
            .collect::<Vec<_>>()
            .join(",");
        self.lines.push(line);
    }

    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn push_raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Renders every line terminated by `\r\n`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str("\r\n");
        }
        out
    }
}

/// Download filename for a report, e.g. `laporan_tiket_Jakarta_Culinary_Expo_2025.csv`.
pub fn report_filename(prefix: &str, event_name: &str) -> String {
    format!(
        "{}_{}.csv",
        prefix,
        WHITESPACE_RUN.replace_all(event_name, "_")
    )
}
