//! Generation-bounded lineage traversal.
//!
//! A level-synchronous breadth-first walk from a focal node, following
//! incoming edges (ancestors) or outgoing edges (descendants). Each level
//! is one *generation*: the nodes first reached at that depth and the edges
//! that were traversed to reach the level.
//!
//! The walk is pure: it borrows the graph immutably and returns a
//! [`Lineage`]. Tagging is done by
//! [`highlight`](crate::graph::highlight). Elements that already carry the
//! `highlighted` tag count as visited, so a walk never pulls an element
//! reached by an earlier walk into a later generation.

use crate::graph::model::GraphModel;
use crate::types::{Direction, EdgeIdx, ElementRef, ElementSet, NodeIdx};

/// Generations at or beyond this index share one highlight bucket.
pub const DEFAULT_GENERATION_CAP: u8 = 9;

/// Saturate a generation index at `cap`.
pub fn saturate(generation: u32, cap: u8) -> u8 {
    generation.min(u32::from(cap)) as u8
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One traversal level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Exact depth, starting at 0 for the focal node's direct neighbors.
    pub index: u32,
    /// `index` saturated at the generation cap; this is what gets tagged.
    pub tag_index: u8,
    /// Nodes first reached at this depth.
    pub nodes: Vec<NodeIdx>,
    /// Edges traversed while expanding the previous frontier.
    pub edges: Vec<EdgeIdx>,
}

/// Every generation reached from a focal node in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    pub focal: NodeIdx,
    pub direction: Direction,
    pub generations: Vec<Generation>,
}

impl Lineage {
    /// All reached nodes and traversed edges, excluding the focal node.
    pub fn elements(&self) -> ElementSet {
        self.generations
            .iter()
            .flat_map(|g| {
                g.nodes
                    .iter()
                    .map(|&n| ElementRef::Node(n))
                    .chain(g.edges.iter().map(|&e| ElementRef::Edge(e)))
            })
            .collect()
    }

    /// [`elements`](Self::elements) plus the focal node.
    pub fn elements_with_focal(&self) -> ElementSet {
        let mut set = self.elements();
        set.insert(ElementRef::Node(self.focal));
        set
    }

    /// Exact depth at which `node` was first reached.
    pub fn depth_of(&self, node: NodeIdx) -> Option<u32> {
        self.generations
            .iter()
            .find(|g| g.nodes.contains(&node))
            .map(|g| g.index)
    }

    pub fn node_count(&self) -> usize {
        self.generations.iter().map(|g| g.nodes.len()).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.generations.iter().map(|g| g.edges.len()).sum()
    }

    /// Whether nothing beyond the focal node was reached.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GraphTraversal
// ---------------------------------------------------------------------------

/// Lineage traversal bound to a graph.
pub struct GraphTraversal<'a> {
    graph: &'a GraphModel,
    generation_cap: u8,
}

impl<'a> GraphTraversal<'a> {
    pub fn new(graph: &'a GraphModel) -> Self {
        Self {
            graph,
            generation_cap: DEFAULT_GENERATION_CAP,
        }
    }

    pub fn with_generation_cap(mut self, cap: u8) -> Self {
        self.generation_cap = cap;
        self
    }

    /// Walk up to `generations` levels from `focal` in `direction`.
    ///
    /// Each node is reached at most once, at its shortest distance from
    /// `focal`, and each edge is traversed at most once. Edges already
    /// tagged `highlighted` are skipped, and nodes already tagged
    /// `highlighted` are treated as reached. An edge whose far end was
    /// already reached still belongs to the generation that traversed it,
    /// but its far end is not queued again. The walk stops early once a
    /// level adds no nodes.
    pub fn walk(&self, focal: NodeIdx, direction: Direction, generations: u32) -> Lineage {
        let mut lineage = Lineage {
            focal,
            direction,
            generations: Vec::new(),
        };

        let mut seen_nodes: Vec<bool> = self
            .graph
            .nodes()
            .map(|(_, n)| n.tags.is_highlighted())
            .collect();
        let mut seen_edges: Vec<bool> = self
            .graph
            .edges()
            .map(|(_, e)| e.tags.is_highlighted())
            .collect();
        seen_nodes[focal.index()] = true;

        let mut frontier = vec![focal];

        for index in 0..generations {
            let mut next = Vec::new();
            let mut traversed = Vec::new();

            for &node in &frontier {
                for &edge in self.connecting(node, direction) {
                    if seen_edges[edge.index()] {
                        continue;
                    }
                    seen_edges[edge.index()] = true;
                    traversed.push(edge);

                    let far = self.graph.edge(edge).far_end(direction);
                    if !seen_nodes[far.index()] {
                        seen_nodes[far.index()] = true;
                        next.push(far);
                    }
                }
            }

            if traversed.is_empty() {
                tracing::debug!(generation = index, "no qualifying edges, lineage exhausted");
                break;
            }

            tracing::debug!(
                generation = index,
                nodes = next.len(),
                edges = traversed.len(),
                "frontier expanded"
            );

            lineage.generations.push(Generation {
                index,
                tag_index: saturate(index, self.generation_cap),
                nodes: next.clone(),
                edges: traversed,
            });

            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        tracing::debug!(
            focal = %self.graph.node(focal).id,
            direction = %direction,
            levels = lineage.generations.len(),
            nodes = lineage.node_count(),
            edges = lineage.edge_count(),
            "lineage walk complete"
        );

        lineage
    }

    fn connecting(&self, node: NodeIdx, direction: Direction) -> &'a [EdgeIdx] {
        match direction {
            Direction::Ancestors => self.graph.incoming(node),
            Direction::Descendants => self.graph.outgoing(node),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
