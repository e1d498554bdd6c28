//! Parser for the direct `key=value` input mode.
//!
//! Line grammar:
//! - `done` (any case) ends input
//! - `key=value` splits on the first `=`; key and value are trimmed
//! - a value wrapped in `[` `]` is a list, split on `,` with each item trimmed
//! - anything else is rejected and skipped
//!
//! Commas inside list items cannot be escaped.

use thiserror::Error;

use crate::models::input::{FieldMap, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("invalid format, expected key=value")]
    MissingEquals,
    #[error("empty key")]
    EmptyKey,
}

/// What a single input line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectLine {
    Field { key: String, value: FieldValue },
    Done,
    Blank,
}

pub fn parse_line(line: &str) -> Result<DirectLine, LineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(DirectLine::Blank);
    }
    if line.eq_ignore_ascii_case("done") {
        return Ok(DirectLine::Done);
    }

    let (key, value) = line.split_once('=').ok_or(LineError::MissingEquals)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(LineError::EmptyKey);
    }

    Ok(DirectLine::Field {
        key: key.to_string(),
        value: parse_value(value.trim()),
    })
}

pub fn parse_value(raw: &str) -> FieldValue {
    match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        Some(inner) => FieldValue::Sequence(inner.split(',').map(|s| s.trim().to_string()).collect()),
        None => FieldValue::Scalar(raw.to_string()),
    }
}

/// Outcome of parsing a batch of lines, e.g. from `--input FILE`.
#[derive(Debug, Default)]
pub struct ParsedLines {
    pub fields: FieldMap,
    /// 1-based line number and the reason each rejected line was skipped.
    pub rejected: Vec<(usize, LineError)>,
}

/// Parses lines until `done` or end of input. Invalid lines are collected and skipped.
/// A repeated key replaces the earlier value but keeps its original position.
pub fn parse_lines<'a, I>(lines: I) -> ParsedLines
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed = ParsedLines::default();
    for (idx, line) in lines.into_iter().enumerate() {
        match parse_line(line) {
            Ok(DirectLine::Done) => break,
            Ok(DirectLine::Blank) => {}
            Ok(DirectLine::Field { key, value }) => {
                parsed.fields.insert(key, value);
            }
            Err(e) => parsed.rejected.push((idx + 1, e)),
        }
    }
    parsed
}
