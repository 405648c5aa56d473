//! file-usage - explore disk usage top-down, by directory and by user

pub mod config;
pub mod error;
pub mod output;
pub mod record;
pub mod stats;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::ReportConfig;
pub use error::{ConfigError, ParseErrorKind, Result, UsageError};
pub use output::{
    JsonReport, OutputConfig, ReportLine, ReportLines, TextFormatter, write_json,
};
pub use record::{Record, RecordReader, parse_line, parse_size, read_records};
pub use stats::{SummaryCollector, UserSummary, UserUsage, write_summary};
pub use tree::{NodeId, RecordFilter, TreeBuilder, UsageTree, aggregate, build_tree};

/// Everything the printers need, computed before any output is written.
#[derive(Debug, Clone)]
pub struct Report {
    pub summary: UserSummary,
    pub lines: Vec<ReportLine>,
}

/// Run the whole pipeline over already-parsed records.
///
/// Fails with `UsageError::SizeOverflow` if the records add up to more
/// than `u64::MAX` bytes anywhere in the tree.
pub fn generate_report(records: &[Record], config: &ReportConfig) -> Result<Report> {
    let mut summary = SummaryCollector::new(RecordFilter::new(config));
    for record in records {
        summary.record(record)?;
    }
    let tree = build_tree(records, config)?;
    let lines = ReportLines::new(&tree, config).collect();
    Ok(Report {
        summary: summary.finalize(),
        lines,
    })
}
