//! Arena storage for the usage tree
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`. A node is
//! always pushed after its parent, so every child has a higher index than its
//! parent. The aggregator relies on that ordering.

use std::collections::HashMap;

use crate::error::{Result, UsageError};

/// Bytes per owner at a node.
pub type OwnerSizes = HashMap<String, u64>;

/// Index of a node in a `UsageTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index)
    }
}

/// One path prefix in the tree: a directory or a file.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    lookup: HashMap<String, NodeId>,
    pub(crate) own_size: u64,
    pub(crate) total_size: u64,
}

impl Node {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            lookup: HashMap::new(),
            own_size: 0,
            total_size: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.lookup.get(name).copied()
    }

    /// Bytes recorded against this exact path.
    pub fn own_size(&self) -> u64 {
        self.own_size
    }

    /// Bytes at or below this node. Zero until the tree is aggregated.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Per-owner side table, only allocated when user tracking is enabled.
#[derive(Debug, Clone, Default)]
pub(crate) struct OwnerTable {
    /// Sizes recorded directly at a node, by owner
    pub(crate) direct: HashMap<NodeId, OwnerSizes>,
    /// Sizes at or below a node, by owner; filled in by aggregation
    pub(crate) totals: HashMap<NodeId, OwnerSizes>,
}

/// Directory tree of disk usage keyed by path segment.
#[derive(Debug, Clone)]
pub struct UsageTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) owners: Option<OwnerTable>,
}

impl UsageTree {
    /// Create a tree holding only a root named `root_name`.
    pub fn new(root_name: &str, track_users: bool) -> Self {
        Self {
            nodes: vec![Node::new(root_name, None)],
            owners: track_users.then(OwnerTable::default),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All node ids in arena order (parents before children).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    pub fn tracks_users(&self) -> bool {
        self.owners.is_some()
    }

    /// Owner breakdown at or below `id`, once aggregated.
    pub fn user_totals(&self, id: NodeId) -> Option<&OwnerSizes> {
        self.owners.as_ref()?.totals.get(&id)
    }

    /// Total of the root, the denominator of every percentage.
    pub fn grand_total(&self) -> u64 {
        self.nodes[NodeId::ROOT.index()].total_size
    }

    /// Look up a node by its segments relative to the root.
    pub fn find<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeId> {
        segments
            .iter()
            .try_fold(NodeId::ROOT, |id, seg| self.node(id).child(seg.as_ref()))
    }

    /// Slash-joined path of `id`, starting with the root's name.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names
            .into_iter()
            .rev()
            .fold(String::new(), |acc, name| join_display(&acc, name))
    }

    /// Get the child of `parent` called `name`, creating it if missing.
    pub(crate) fn child_or_insert(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(id) = self.node(parent).child(name) {
            return id;
        }
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent)));
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.push(id);
        parent_node.lookup.insert(name.to_string(), id);
        id
    }

    /// Attribute `size` bytes owned by `owner` directly to `id`.
    ///
    /// Fails without touching the tree if the node's size would overflow.
    pub(crate) fn add_own(&mut self, id: NodeId, size: u64, owner: &str) -> Result<()> {
        let own_size = self.nodes[id.index()]
            .own_size
            .checked_add(size)
            .ok_or_else(|| UsageError::SizeOverflow(self.path_of(id)))?;
        // An owner's share never exceeds the node's own size.
        if let Some(owners) = self.owners.as_mut() {
            *owners
                .direct
                .entry(id)
                .or_default()
                .entry(owner.to_string())
                .or_insert(0) += size;
        }
        self.nodes[id.index()].own_size = own_size;
        Ok(())
    }
}

/// Join a display path and a segment, without doubling the root slash.
pub fn join_display(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}
