//! Usage tree construction and aggregation
//!
//! - `arena`: node storage addressed by `NodeId`, with the optional owner side table
//! - `filter`: path prefix and user filters applied before insertion
//! - `builder`: inserts records, creating intermediate directories on demand
//! - `aggregate`: post-order fold computing subtree and per-owner totals

mod aggregate;
mod arena;
mod builder;
mod filter;

pub use aggregate::aggregate;
pub use arena::{Node, NodeId, OwnerSizes, UsageTree, join_display};
pub use builder::{TreeBuilder, build_tree};
pub use filter::RecordFilter;
