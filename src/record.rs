//! Input record parsing
//!
//! Each input line is `SIZE OWNER PATH`, separated by whitespace. The path is
//! the rest of the line after the owner, so it may contain spaces. Sizes are
//! bytes unless they carry a `K`, `M`, `G` or `T` suffix (powers of 1024).
//! Blank lines and `#` comments are ignored.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ParseErrorKind, Result, UsageError};

static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(\d+(?:\.\d+)?|\.\d+)([bkmgt]?)$").expect("SIZE_PATTERN regex is invalid")
});

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Path segments from the filesystem root, without empty or `.` parts.
    /// `..` is an ordinary segment and is never resolved.
    pub path: Vec<String>,
    pub size: u64,
    pub owner: String,
}

impl Record {
    pub fn new(path: &str, size: u64, owner: impl Into<String>) -> Self {
        Self {
            path: split_path(path),
            size,
            owner: owner.into(),
        }
    }
}

/// Split a path into its segments. `/`, `.` and empty strings have none.
///
/// `..` is kept as a literal segment: listings come from a scanner, and
/// folding it lexically would be wrong across symlinks.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

fn unit_multiplier(unit: &str) -> u64 {
    match unit.to_ascii_uppercase().as_str() {
        "K" => 1 << 10,
        "M" => 1 << 20,
        "G" => 1 << 30,
        "T" => 1 << 40,
        _ => 1,
    }
}

/// Parse a size field like `4096`, `12K` or `1.5G` into whole bytes.
pub fn parse_size(field: &str) -> std::result::Result<u64, ParseErrorKind> {
    let bad = || ParseErrorKind::BadSize(field.to_string());
    let caps = SIZE_PATTERN.captures(field.trim()).ok_or_else(bad)?;
    let number: f64 = caps[1].parse().map_err(|_| bad())?;
    let bytes = (number * unit_multiplier(&caps[2]) as f64).round();
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(bad());
    }
    Ok(bytes as u64)
}

/// Parse one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> std::result::Result<Option<Record>, ParseErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut rest = line;
    let mut fields = [""; 2];
    for (found, slot) in fields.iter_mut().enumerate() {
        let (field, tail) = match rest.split_once(char::is_whitespace) {
            Some(split) => split,
            None => return Err(ParseErrorKind::MissingFields { found: found + 1 }),
        };
        *slot = field;
        rest = tail.trim_start();
    }
    if rest.is_empty() {
        return Err(ParseErrorKind::MissingFields { found: 2 });
    }

    let [size, owner] = fields;
    Ok(Some(Record::new(rest, parse_size(size)?, owner)))
}

/// Iterator over the records of a line-oriented input stream.
///
/// Yields an error for the first malformed line; in lenient mode lines with
/// missing fields are logged and skipped instead. Bad sizes are always fatal.
pub struct RecordReader<R> {
    input: R,
    buf: String,
    line_no: usize,
    lenient: bool,
    skipped: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R, lenient: bool) -> Self {
        Self {
            input,
            buf: String::new(),
            line_no: 0,
            lenient,
            skipped: 0,
        }
    }

    /// Number of lines skipped so far in lenient mode.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.input.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(UsageError::Io(e))),
            }
            self.line_no += 1;

            match parse_line(&self.buf) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(ParseErrorKind::MissingFields { .. }) if self.lenient => {
                    warn!(line = self.line_no, "skipping '{}'", self.buf.trim_end());
                    self.skipped += 1;
                }
                Err(kind) => {
                    return Some(Err(UsageError::Parse {
                        line: self.line_no,
                        kind,
                    }));
                }
            }
        }
    }
}

/// Read every record from `input`, failing on the first malformed line.
pub fn read_records<R: BufRead>(input: R, lenient: bool) -> Result<Vec<Record>> {
    let mut reader = RecordReader::new(input, lenient);
    let records = reader.by_ref().collect::<Result<Vec<_>>>()?;
    debug!(
        records = records.len(),
        skipped = reader.skipped(),
        "finished reading input"
    );
    Ok(records)
}
