//! Bottom-up size aggregation

use crate::error::{Result, UsageError};

use super::arena::{NodeId, OwnerSizes, UsageTree};

/// Compute `total_size` (and per-owner totals, when tracked) for every node.
///
/// Children always have higher arena indices than their parents, so a
/// reverse sweep visits every child before its parent. Totals are rebuilt
/// from `own_size` each time, which makes repeated calls idempotent.
/// Returns the grand total, or `SizeOverflow` naming the first node whose
/// total does not fit in a `u64`.
pub fn aggregate(tree: &mut UsageTree) -> Result<u64> {
    for i in (0..tree.nodes.len()).rev() {
        let node = &tree.nodes[i];
        let total = node
            .children
            .iter()
            .try_fold(node.own_size, |acc, child| {
                acc.checked_add(tree.nodes[child.index()].total_size)
            })
            .ok_or_else(|| UsageError::SizeOverflow(tree.path_of(NodeId::from_index(i))))?;
        tree.nodes[i].total_size = total;
    }

    // Owner totals partition node totals, which all fit by now.
    let UsageTree { nodes, owners } = tree;
    if let Some(owners) = owners.as_mut() {
        owners.totals.clear();
        for i in (0..nodes.len()).rev() {
            let id = NodeId::from_index(i);
            let mut merged = owners.direct.get(&id).cloned().unwrap_or_default();
            for child in &nodes[i].children {
                if let Some(child_totals) = owners.totals.get(child) {
                    merge_into(&mut merged, child_totals);
                }
            }
            owners.totals.insert(id, merged);
        }
    }

    Ok(nodes[NodeId::ROOT.index()].total_size)
}

fn merge_into(target: &mut OwnerSizes, source: &OwnerSizes) {
    for (owner, size) in source {
        *target.entry(owner.clone()).or_insert(0) += *size;
    }
}
