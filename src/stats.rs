//! Per-user usage totals
//!
//! Collected over the same records that make it into the tree, and printed
//! ahead of the directory breakdown.

use std::collections::HashMap;
use std::io;

use serde::Serialize;
use termcolor::{Color, WriteColor};

use crate::error::{Result, UsageError};
use crate::output::{format_gb, write_colored};
use crate::record::Record;
use crate::tree::RecordFilter;

/// Bytes owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUsage {
    pub owner: String,
    pub bytes: u64,
}

/// Totals for every user, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub total_bytes: u64,
    pub users: Vec<UserUsage>,
}

/// Accumulates per-user totals while records stream past.
#[derive(Debug, Default)]
pub struct SummaryCollector {
    filter: RecordFilter,
    by_owner: HashMap<String, u64>,
    total_bytes: u64,
}

impl SummaryCollector {
    pub fn new(filter: RecordFilter) -> Self {
        Self {
            filter,
            by_owner: HashMap::new(),
            total_bytes: 0,
        }
    }

    /// Count a record if it passes the filter.
    pub fn record(&mut self, record: &Record) -> Result<()> {
        if !self.filter.accepts(record) {
            return Ok(());
        }
        self.total_bytes = self
            .total_bytes
            .checked_add(record.size)
            .ok_or_else(|| UsageError::SizeOverflow(self.filter.root_name()))?;
        // Bounded by the grand total checked above.
        *self.by_owner.entry(record.owner.clone()).or_insert(0) += record.size;
        Ok(())
    }

    pub fn finalize(self) -> UserSummary {
        let mut users: Vec<UserUsage> = self
            .by_owner
            .into_iter()
            .map(|(owner, bytes)| UserUsage { owner, bytes })
            .collect();
        users.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.owner.cmp(&b.owner)));

        UserSummary {
            total_bytes: self.total_bytes,
            users,
        }
    }
}

/// Write the "User totals" header section.
pub fn write_summary<W: WriteColor>(
    out: &mut W,
    summary: &UserSummary,
    precision: usize,
) -> io::Result<()> {
    writeln!(out, "User totals:")?;
    writeln!(out)?;
    for user in &summary.users {
        write_colored(out, &user.owner, Color::Red, false)?;
        writeln!(out, ": {} GB", format_gb(user.bytes, precision))?;
    }
    writeln!(out)?;
    writeln!(out, "Total: {} GB", format_gb(summary.total_bytes, precision))?;
    writeln!(out)?;
    writeln!(out, "Directory breakdown:")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use termcolor::Buffer;

    fn collect(records: &[Record], config: &ReportConfig) -> UserSummary {
        let mut collector = SummaryCollector::new(RecordFilter::new(config));
        for record in records {
            collector.record(record).unwrap();
        }
        collector.finalize()
    }

    #[test]
    fn test_summary_sorted_by_size() {
        let records = vec![
            Record::new("/a", 10, "carol"),
            Record::new("/b", 300, "alice"),
            Record::new("/c", 50, "bob"),
            Record::new("/d", 50, "alice"),
        ];
        let summary = collect(&records, &ReportConfig::default());
        assert_eq!(summary.total_bytes, 410);
        let owners: Vec<_> = summary.users.iter().map(|u| u.owner.as_str()).collect();
        assert_eq!(owners, vec!["alice", "bob", "carol"]);
        assert_eq!(summary.users[0].bytes, 350);
    }

    #[test]
    fn test_summary_respects_filters() {
        let records = vec![
            Record::new("/home/a", 10, "alice"),
            Record::new("/tmp/b", 20, "alice"),
            Record::new("/home/c", 30, "bob"),
        ];
        let config = ReportConfig {
            path_filter: Some("/home".to_string()),
            ..Default::default()
        };
        let summary = collect(&records, &config);
        assert_eq!(summary.total_bytes, 40);
        assert_eq!(summary.users.len(), 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = collect(&[], &ReportConfig::default());
        assert_eq!(summary, UserSummary::default());
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let mut collector = SummaryCollector::new(RecordFilter::default());
        collector.record(&Record::new("/a", u64::MAX, "alice")).unwrap();
        let err = collector.record(&Record::new("/b", 1, "bob")).unwrap_err();
        assert!(matches!(err, UsageError::SizeOverflow(ref root) if root == "/"));

        let summary = collector.finalize();
        assert_eq!(summary.total_bytes, u64::MAX);
        assert_eq!(summary.users.len(), 1);
    }

    #[test]
    fn test_write_summary() {
        let summary = UserSummary {
            total_bytes: 3 << 30,
            users: vec![
                UserUsage {
                    owner: "alice".to_string(),
                    bytes: 2 << 30,
                },
                UserUsage {
                    owner: "bob".to_string(),
                    bytes: 1 << 30,
                },
            ],
        };
        let mut buf = Buffer::no_color();
        write_summary(&mut buf, &summary, 1).unwrap();
        let out = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(
            out,
            "User totals:\n\nalice: 2.0 GB\nbob: 1.0 GB\n\nTotal: 3.0 GB\n\nDirectory breakdown:\n\n"
        );
    }
}
