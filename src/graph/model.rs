//! In-memory directed graph with per-element highlight state.
//!
//! Nodes and edges are stored in dense arenas and referenced by
//! [`NodeIdx`] / [`EdgeIdx`]. A string index maps external node ids to
//! handles, and per-node adjacency lists give O(degree) access to incoming
//! and outgoing edges.

use std::collections::HashMap;

use crate::error::{LineageError, Result};
use crate::types::{Edge, EdgeIdx, ElementRef, ElementSet, Node, NodeIdx, Position, Tag, TagSet};

/// Owned graph model. Every operation takes it explicitly; there is no
/// shared global instance.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_id: HashMap<String, NodeIdx>,
    outgoing: Vec<Vec<EdgeIdx>>,
    incoming: Vec<Vec<EdgeIdx>>,
}

/// Node and edge counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Add a node. Fails with [`LineageError::DuplicateId`] if `id` exists.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        dummy: bool,
        href: Option<String>,
        position: Position,
    ) -> Result<NodeIdx> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(LineageError::DuplicateId { id });
        }
        let idx = NodeIdx(self.nodes.len());
        self.by_id.insert(id.clone(), idx);
        self.nodes.push(Node {
            id,
            name: name.into(),
            dummy,
            href,
            position,
            tags: TagSet::new(),
            locked: false,
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(idx)
    }

    /// Add a directed edge. Both endpoints are checked before anything is
    /// stored, so a failed call leaves the graph untouched.
    pub fn add_edge(&mut self, source_id: &str, target_id: &str) -> Result<EdgeIdx> {
        let source = self.require(source_id)?;
        let target = self.require(target_id)?;
        let idx = EdgeIdx(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            tags: TagSet::new(),
        });
        self.outgoing[source.0].push(idx);
        self.incoming[target.0].push(idx);
        Ok(idx)
    }

    // -------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------

    pub fn lookup(&self, id: &str) -> Option<NodeIdx> {
        self.by_id.get(id).copied()
    }

    /// Like [`lookup`](Self::lookup) but fails with
    /// [`LineageError::UnknownNode`].
    pub fn require(&self, id: &str) -> Result<NodeIdx> {
        self.lookup(id).ok_or_else(|| LineageError::UnknownNode { id: id.to_string() })
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.0]
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.lookup(id).map(|idx| self.node(idx))
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    pub(crate) fn edge_mut(&mut self, idx: EdgeIdx) -> &mut Edge {
        &mut self.edges[idx.0]
    }

    /// Edges whose source is `node`, in insertion order.
    pub fn outgoing(&self, node: NodeIdx) -> &[EdgeIdx] {
        &self.outgoing[node.0]
    }

    /// Edges whose target is `node`, in insertion order.
    pub fn incoming(&self, node: NodeIdx) -> &[EdgeIdx] {
        &self.incoming[node.0]
    }

    /// The navigation target of a node, unless it is a dummy or has none.
    pub fn nav_target(&self, id: &str) -> Option<&str> {
        self.node_by_id(id)
            .filter(|n| !n.dummy)
            .and_then(|n| n.href.as_deref())
            .filter(|href| !href.is_empty())
    }

    // -------------------------------------------------------------------
    // Bulk access
    // -------------------------------------------------------------------

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> {
        (0..self.nodes.len()).map(NodeIdx)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIdx> {
        (0..self.edges.len()).map(EdgeIdx)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeIdx(i), e))
    }

    /// Every node and edge in the graph.
    pub fn all_elements(&self) -> ElementSet {
        self.node_indices()
            .map(ElementRef::Node)
            .chain(self.edge_indices().map(ElementRef::Edge))
            .collect()
    }

    /// Elements currently carrying `tag`.
    pub fn tagged(&self, tag: Tag) -> ElementSet {
        let nodes = self
            .nodes()
            .filter(|(_, n)| n.tags.contains(tag))
            .map(|(i, _)| ElementRef::Node(i));
        let edges = self
            .edges()
            .filter(|(_, e)| e.tags.contains(tag))
            .map(|(i, _)| ElementRef::Edge(i));
        nodes.chain(edges).collect()
    }

    pub fn tags(&self, element: ElementRef) -> &TagSet {
        match element {
            ElementRef::Node(n) => &self.node(n).tags,
            ElementRef::Edge(e) => &self.edge(e).tags,
        }
    }

    pub(crate) fn tags_mut(&mut self, element: ElementRef) -> &mut TagSet {
        match element {
            ElementRef::Node(n) => &mut self.node_mut(n).tags,
            ElementRef::Edge(e) => &mut self.edge_mut(e).tags,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn add(g: &mut GraphModel, id: &str) -> NodeIdx {
        g.add_node(id, id.to_uppercase(), false, None, Position::default())
            .unwrap()
    }

    #[test]
    fn add_node_assigns_dense_handles() {
        let mut g = GraphModel::new();
        assert_eq!(add(&mut g, "a").index(), 0);
        assert_eq!(add(&mut g, "b").index(), 1);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.node_by_id("b").unwrap().name, "B");
    }

    #[test]
    fn add_node_rejects_duplicate_id() {
        let mut g = GraphModel::new();
        add(&mut g, "a");
        let err = g
            .add_node("a", "again", false, None, Position::default())
            .unwrap_err();
        assert!(matches!(err, LineageError::DuplicateId { ref id } if id == "a"));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn add_edge_rejects_unknown_endpoint_without_mutating() {
        let mut g = GraphModel::new();
        let a = add(&mut g, "a");
        let err = g.add_edge("a", "missing").unwrap_err();
        assert!(matches!(err, LineageError::UnknownNode { ref id } if id == "missing"));
        let err = g.add_edge("ghost", "a").unwrap_err();
        assert!(matches!(err, LineageError::UnknownNode { ref id } if id == "ghost"));
        assert_eq!(g.edge_count(), 0);
        assert!(g.outgoing(a).is_empty());
    }

    #[test]
    fn adjacency_lists_track_direction() {
        let mut g = GraphModel::new();
        let a = add(&mut g, "a");
        let b = add(&mut g, "b");
        let c = add(&mut g, "c");
        let ab = g.add_edge("a", "b").unwrap();
        let cb = g.add_edge("c", "b").unwrap();

        assert_eq!(g.outgoing(a), &[ab]);
        assert_eq!(g.incoming(b), &[ab, cb]);
        assert!(g.outgoing(b).is_empty());
        assert_eq!(g.outgoing(c), &[cb]);
        assert!(g.incoming(a).is_empty());
    }

    #[test]
    fn self_loop_is_legal() {
        let mut g = GraphModel::new();
        let a = add(&mut g, "a");
        let e = g.add_edge("a", "a").unwrap();
        assert!(g.edge(e).is_self_loop());
        assert_eq!(g.outgoing(a), &[e]);
        assert_eq!(g.incoming(a), &[e]);
    }

    #[test]
    fn all_elements_covers_nodes_and_edges() {
        let mut g = GraphModel::new();
        add(&mut g, "a");
        add(&mut g, "b");
        g.add_edge("a", "b").unwrap();
        let all = g.all_elements();
        assert_eq!(all.nodes.len(), 2);
        assert_eq!(all.edges.len(), 1);
    }

    #[test]
    fn nav_target_skips_dummies_and_blank_targets() {
        let mut g = GraphModel::new();
        g.add_node("real", "Real", false, Some("real.html".into()), Position::default())
            .unwrap();
        g.add_node("fake", "", true, Some("fake.html".into()), Position::default())
            .unwrap();
        g.add_node("blank", "Blank", false, Some(String::new()), Position::default())
            .unwrap();
        assert_eq!(g.nav_target("real"), Some("real.html"));
        assert_eq!(g.nav_target("fake"), None);
        assert_eq!(g.nav_target("blank"), None);
        assert_eq!(g.nav_target("nope"), None);
    }

    #[test]
    fn tagged_filters_elements() {
        let mut g = GraphModel::new();
        let a = add(&mut g, "a");
        add(&mut g, "b");
        let e = g.add_edge("a", "b").unwrap();
        g.tags_mut(ElementRef::Node(a)).insert(Tag::Highlighted);
        g.tags_mut(ElementRef::Edge(e)).insert(Tag::Highlighted);

        let hl = g.tagged(Tag::Highlighted);
        assert!(hl.contains(ElementRef::Node(a)));
        assert!(hl.contains(ElementRef::Edge(e)));
        assert_eq!(hl.len(), 2);
        assert!(g.tagged(Tag::Selected).is_empty());
    }
}
