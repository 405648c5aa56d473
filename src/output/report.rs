//! Threshold-filtered, largest-first report traversal
//!
//! `ReportLines` walks an aggregated `UsageTree` in pre-order with an explicit
//! stack. A node whose share of the grand total is below the threshold is
//! pruned together with its whole subtree: no descendant can hold more bytes
//! than its ancestor, so none of them could pass either.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::ReportConfig;
use crate::tree::{NodeId, UsageTree, join_display};

/// One directory or file in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLine {
    pub depth: usize,
    /// Display path; several segments when a chain was collapsed
    pub path: String,
    pub bytes: u64,
    /// Share of the grand total
    pub percent: f64,
}

/// One owner's share of the node line just above it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLine {
    pub depth: usize,
    pub owner: String,
    pub bytes: u64,
    /// Share of the node's own total, not of the grand total
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Node(NodeLine),
    User(UserLine),
}

/// Percentage of `part` in `whole`, defined as 0 for an empty whole.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Lazy, single-pass sequence of report lines.
pub struct ReportLines<'a> {
    tree: &'a UsageTree,
    threshold: f64,
    show_users: bool,
    collapse: bool,
    grand_total: u64,
    stack: Vec<(NodeId, usize)>,
    pending_users: std::vec::IntoIter<UserLine>,
}

impl<'a> ReportLines<'a> {
    /// Start a traversal at the root. `tree` must already be aggregated.
    pub fn new(tree: &'a UsageTree, config: &ReportConfig) -> Self {
        Self {
            tree,
            threshold: config.threshold,
            show_users: config.show_users && tree.tracks_users(),
            collapse: config.collapse,
            grand_total: tree.grand_total(),
            stack: vec![(tree.root(), 0)],
            pending_users: Vec::new().into_iter(),
        }
    }

    /// Largest subtree first, ties by name.
    fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.tree.node(id).children().to_vec();
        children.sort_by(|a, b| {
            let (a, b) = (self.tree.node(*a), self.tree.node(*b));
            b.total_size()
                .cmp(&a.total_size())
                .then_with(|| a.name().cmp(b.name()))
        });
        children
    }

    /// Follow single-child chains of nodes that own nothing themselves.
    fn collapse_chain(&self, id: NodeId) -> (NodeId, String) {
        let mut current = id;
        let mut path = self.tree.node(id).name().to_string();
        if !self.collapse {
            return (current, path);
        }
        loop {
            let node = self.tree.node(current);
            match node.children() {
                [only] if node.own_size() == 0 => {
                    current = *only;
                    path = join_display(&path, self.tree.node(current).name());
                }
                _ => return (current, path),
            }
        }
    }

    fn user_lines(&self, id: NodeId, depth: usize) -> Vec<UserLine> {
        let Some(users) = self.tree.user_totals(id) else {
            return Vec::new();
        };
        let node_total = self.tree.node(id).total_size();
        let mut lines: Vec<UserLine> = users
            .iter()
            .map(|(owner, bytes)| UserLine {
                depth,
                owner: owner.clone(),
                bytes: *bytes,
                percent: percent(*bytes, node_total),
            })
            .filter(|line| line.percent >= self.threshold)
            .collect();
        lines.sort_by(|a, b| match b.bytes.cmp(&a.bytes) {
            Ordering::Equal => a.owner.cmp(&b.owner),
            other => other,
        });
        lines
    }
}

impl Iterator for ReportLines<'_> {
    type Item = ReportLine;

    fn next(&mut self) -> Option<ReportLine> {
        if let Some(user) = self.pending_users.next() {
            return Some(ReportLine::User(user));
        }

        while let Some((id, depth)) = self.stack.pop() {
            let bytes = self.tree.node(id).total_size();
            let pct = percent(bytes, self.grand_total);
            if pct < self.threshold {
                continue;
            }

            let (shown, path) = self.collapse_chain(id);
            // Reverse so the largest child is popped first.
            for child in self.sorted_children(shown).into_iter().rev() {
                self.stack.push((child, depth + 1));
            }
            if self.show_users {
                self.pending_users = self.user_lines(shown, depth).into_iter();
            }

            return Some(ReportLine::Node(NodeLine {
                depth,
                path,
                bytes,
                percent: pct,
            }));
        }
        None
    }
}
