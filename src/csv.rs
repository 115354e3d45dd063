//! Minimal CSV/TSV loader that produces a [`MatrixSource`].

use std::path::Path;

use crate::error::{GridError, Result};
use crate::source::MatrixSource;

/// Field delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Pick a delimiter from a file extension (`.tsv`/`.tab` mean tabs)
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("tsv" | "tab") => Delimiter::Tab,
            _ => Delimiter::Comma,
        }
    }

    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

/// Parse CSV/TSV bytes into a matrix, one row per non-empty line.
///
/// # Errors
/// Returns [`GridError::DataSource`] if a quoted field is never closed.
pub fn parse_delimited(data: &[u8], delim: Delimiter) -> Result<MatrixSource> {
    let text = String::from_utf8_lossy(data);
    let sep = delim.as_char();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (line_idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let fields = split_csv_line(line, sep).ok_or_else(|| {
            GridError::DataSource(format!("unterminated quoted field on line {}", line_idx + 1))
        })?;
        rows.push(fields.into_iter().map(|f| f.trim().to_string()).collect());
    }

    Ok(MatrixSource::new(rows))
}

/// Read and parse a delimited file, choosing the delimiter by extension.
///
/// # Errors
/// Returns [`GridError::Io`] if the file cannot be read.
pub fn load_path(path: &Path) -> Result<MatrixSource> {
    let data = std::fs::read(path)?;
    parse_delimited(&data, Delimiter::from_path(path))
}

/// Split a CSV line respecting quoted fields. `None` if a quote is left open.
fn split_csv_line(line: &str, sep: char) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    // Escaped quote
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == sep {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}
