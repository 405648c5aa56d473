//! JSON output formatting

use std::io::{self, Write};

use serde::Serialize;

use crate::stats::{UserSummary, UserUsage};

use super::report::{ReportLine, UserLine};

/// A node line with the owner breakdown that followed it.
#[derive(Debug, Clone, Serialize)]
pub struct JsonEntry {
    pub depth: usize,
    pub path: String,
    pub bytes: u64,
    pub percent: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserLine>,
}

/// Whole report as a single JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub total_bytes: u64,
    pub users: Vec<UserUsage>,
    pub entries: Vec<JsonEntry>,
}

impl JsonReport {
    pub fn new(summary: UserSummary, lines: impl IntoIterator<Item = ReportLine>) -> Self {
        let mut entries: Vec<JsonEntry> = Vec::new();
        for line in lines {
            match line {
                ReportLine::Node(node) => entries.push(JsonEntry {
                    depth: node.depth,
                    path: node.path,
                    bytes: node.bytes,
                    percent: node.percent,
                    users: Vec::new(),
                }),
                ReportLine::User(user) => {
                    if let Some(last) = entries.last_mut() {
                        last.users.push(user);
                    }
                }
            }
        }
        Self {
            total_bytes: summary.total_bytes,
            users: summary.users,
            entries,
        }
    }
}

/// Write the report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(out: &mut W, report: &JsonReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()
}
