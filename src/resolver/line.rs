/*!
 * Structural classification of raw property lines.
 */

use crate::errors::ResolveError;

/// One parsed `key=value` line pending translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Trimmed text left of the first unescaped `=`
    pub key: String,
    /// Trimmed text right of the first unescaped `=`
    pub value: String,
    /// 1-based position in the input
    pub line_number: usize,
}

/// Classification of a raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRecord {
    /// Empty or whitespace-only line
    Blank,
    /// A well-formed property
    Entry(Entry),
}

/// Byte offset of the first `=` that is not escaped with a backslash
fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' => return Some(index),
            _ => {}
        }
    }
    None
}

/// Classify one raw line.
///
/// The line may still carry its `\n` or `\r\n` terminator; it is ignored.
pub fn classify_line(raw: &str, line_number: usize) -> Result<LineRecord, ResolveError> {
    let line = raw.trim_end_matches(['\n', '\r']);

    if line.trim().is_empty() {
        return Ok(LineRecord::Blank);
    }

    let malformed = || ResolveError::MalformedLine {
        line_number,
        raw_text: line.to_string(),
    };

    let separator = find_separator(line).ok_or_else(malformed)?;
    let key = line[..separator].trim();
    let value = line[separator + 1..].trim();

    if value.is_empty() {
        return Err(malformed());
    }

    Ok(LineRecord::Entry(Entry {
        key: key.to_string(),
        value: value.to_string(),
        line_number,
    }))
}
