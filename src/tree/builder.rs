//! Path tree construction

use tracing::debug;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::record::Record;

use super::aggregate::aggregate;
use super::arena::{NodeId, UsageTree};
use super::filter::RecordFilter;

/// Builds a `UsageTree` one record at a time.
pub struct TreeBuilder {
    tree: UsageTree,
    filter: RecordFilter,
    accepted: usize,
    rejected: usize,
}

impl TreeBuilder {
    pub fn new(config: &ReportConfig) -> Self {
        let filter = RecordFilter::new(config);
        Self {
            tree: UsageTree::new(&filter.root_name(), config.show_users),
            filter,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Insert a record, creating any missing ancestors.
    ///
    /// Returns `Ok(false)` if the record was dropped by the path or user
    /// filter, and an error if its path's size would overflow.
    pub fn insert(&mut self, record: &Record) -> Result<bool> {
        let Some(segments) = self.filter.relative_path(record) else {
            self.rejected += 1;
            return Ok(false);
        };
        let leaf = segments.iter().fold(NodeId::ROOT, |parent, segment| {
            self.tree.child_or_insert(parent, segment)
        });
        self.tree.add_own(leaf, record.size, &record.owner)?;
        self.accepted += 1;
        Ok(true)
    }

    pub fn extend<'r>(&mut self, records: impl IntoIterator<Item = &'r Record>) -> Result<()> {
        for record in records {
            self.insert(record)?;
        }
        Ok(())
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Return the tree as built, without totals.
    pub fn finish(self) -> UsageTree {
        debug!(
            accepted = self.accepted,
            filtered = self.rejected,
            nodes = self.tree.node_count(),
            "tree built"
        );
        self.tree
    }
}

/// Build and aggregate a tree from `records` in one go.
pub fn build_tree<'r>(
    records: impl IntoIterator<Item = &'r Record>,
    config: &ReportConfig,
) -> Result<UsageTree> {
    let mut builder = TreeBuilder::new(config);
    builder.extend(records)?;
    let mut tree = builder.finish();
    let grand_total = aggregate(&mut tree)?;
    debug!(grand_total, "tree aggregated");
    Ok(tree)
}
