use std::collections::HashMap;
use std::mem::take;

pub const DELIMITER: char = ',';

/// One data line keyed by header name, before any validation or coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value for `column`, or `""` when the header does not exist.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split `text` into header-keyed rows. The first non-blank line is the header and blank
/// lines after it are skipped.
///
/// Purely syntactic: short lines pad missing trailing columns with `""`, extra fields are
/// ignored, and a repeated header name keeps the value of its last occurrence.
pub fn parse_records(text: &str) -> Vec<RawRow> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_fields(header_line, DELIMITER);

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = split_fields(line, DELIMITER).into_iter();
            let mut values = HashMap::with_capacity(headers.len());
            for header in &headers {
                let value = fields.next().unwrap_or_default();
                values.insert(header.clone(), value);
            }
            RawRow { values }
        })
        .collect()
}

/// Quote-aware field split. A `"` toggles quoted mode and is dropped; the delimiter is
/// literal while quoted. Fields are trimmed. An unterminated quote swallows the rest of
/// the line into the current field.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(take(&mut current).trim().to_string());
            }
            c => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
