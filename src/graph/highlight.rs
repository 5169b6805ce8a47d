//! Highlight state: applying and clearing tags on graph elements.
//!
//! The free functions are the building blocks; [`Highlighter`] combines
//! them with a [`LineageConfig`] into the select/highlight/reset flow a UI
//! drives.

use crate::config::LineageConfig;
use crate::error::Result;
use crate::graph::focus::{focus_on, Viewport};
use crate::graph::model::GraphModel;
use crate::graph::traversal::{saturate, GraphTraversal, Lineage, DEFAULT_GENERATION_CAP};
use crate::types::{Direction, ElementRef, ElementSet, NodeIdx, Tag};

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Remove every tag from every element and release all position locks.
///
/// Safe to call on a graph with no highlighting.
pub fn reset_all(graph: &mut GraphModel) {
    let mut cleared = 0usize;
    for element in graph.all_elements().iter() {
        let tags = graph.tags_mut(element);
        if !tags.is_empty() {
            cleared += 1;
            tags.clear();
        }
    }
    for idx in graph.node_indices().collect::<Vec<_>>() {
        graph.node_mut(idx).locked = false;
    }
    tracing::debug!(cleared, "highlight state reset");
}

/// Tag one node `selected`. Other tags are left alone.
pub fn mark_selected(graph: &mut GraphModel, node: NodeIdx) {
    graph.node_mut(node).tags.insert(Tag::Selected);
}

/// Tag `elements` with `highlighted` and the generation tag for `index`
/// saturated at `cap`.
pub fn apply_generation(
    graph: &mut GraphModel,
    elements: &ElementSet,
    direction: Direction,
    index: u32,
    cap: u8,
) {
    let tag = Tag::generation(direction, saturate(index, cap));
    for element in elements.iter() {
        let tags = graph.tags_mut(element);
        tags.insert(Tag::Highlighted);
        tags.insert(tag);
    }
}

/// Tag every generation of a walk, saturating indices at `cap`.
pub fn apply_lineage(graph: &mut GraphModel, lineage: &Lineage, cap: u8) {
    for generation in &lineage.generations {
        let nodes = generation.nodes.iter().map(|&n| ElementRef::Node(n));
        let edges = generation.edges.iter().map(|&e| ElementRef::Edge(e));
        let level: ElementSet = nodes.chain(edges).collect();
        apply_generation(graph, &level, lineage.direction, generation.index, cap);
    }
}

/// Tag every element that is neither selected nor highlighted `dimmed`,
/// and clear `dimmed` from those that are.
pub fn apply_dimming(graph: &mut GraphModel) {
    for element in graph.all_elements().iter() {
        let tags = graph.tags_mut(element);
        if tags.is_selected() || tags.is_highlighted() {
            tags.remove(Tag::Dimmed);
        } else {
            tags.insert(Tag::Dimmed);
        }
    }
}

/// Position-lock the given nodes until the next reset.
pub fn lock_nodes(graph: &mut GraphModel, nodes: impl IntoIterator<Item = NodeIdx>) {
    for node in nodes {
        graph.node_mut(node).locked = true;
    }
}

// ---------------------------------------------------------------------------
// Core operations
// ---------------------------------------------------------------------------

/// Select `node_id` and highlight up to `generations` levels of its lineage
/// in `direction`, using the default generation cap.
///
/// Does not reset first. Fails with
/// [`UnknownNode`](crate::error::LineageError::UnknownNode) before touching
/// any tag if the node does not exist.
pub fn select_and_highlight(
    graph: &mut GraphModel,
    node_id: &str,
    direction: Direction,
    generations: u32,
) -> Result<Lineage> {
    let focal = graph.require(node_id)?;
    mark_selected(graph, focal);
    let lineage = GraphTraversal::new(graph)
        .with_generation_cap(DEFAULT_GENERATION_CAP)
        .walk(focal, direction, generations);
    apply_lineage(graph, &lineage, DEFAULT_GENERATION_CAP);
    Ok(lineage)
}

/// Clear all highlight state. Idempotent.
pub fn reset(graph: &mut GraphModel) {
    reset_all(graph);
}

// ---------------------------------------------------------------------------
// Highlighter
// ---------------------------------------------------------------------------

/// Both directions of a node's lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineagePair {
    pub ancestors: Lineage,
    pub descendants: Lineage,
}

impl LineagePair {
    pub fn elements_with_focal(&self) -> ElementSet {
        self.ancestors
            .elements_with_focal()
            .union(&self.descendants.elements())
    }
}

/// Configured highlight driver.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: LineageConfig,
}

impl Highlighter {
    pub fn new(config: LineageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LineageConfig {
        &self.config
    }

    /// Configured form of [`select_and_highlight`]. Applies dimming and
    /// position locks when enabled.
    pub fn select_and_highlight(
        &self,
        graph: &mut GraphModel,
        node_id: &str,
        direction: Direction,
        generations: u32,
    ) -> Result<Lineage> {
        let focal = graph.require(node_id)?;
        mark_selected(graph, focal);
        let lineage = self.walk_and_apply(graph, focal, direction, generations);
        self.finish(graph, focal);
        tracing::info!(
            node = node_id,
            direction = %direction,
            generations,
            reached = lineage.node_count(),
            "lineage highlighted"
        );
        Ok(lineage)
    }

    /// Highlight ancestors and descendants of `node_id` together.
    pub fn highlight_lineage(
        &self,
        graph: &mut GraphModel,
        node_id: &str,
        generations: u32,
    ) -> Result<LineagePair> {
        let focal = graph.require(node_id)?;
        mark_selected(graph, focal);
        let ancestors = self.walk_and_apply(graph, focal, Direction::Ancestors, generations);
        let descendants = self.walk_and_apply(graph, focal, Direction::Descendants, generations);
        self.finish(graph, focal);
        tracing::info!(
            node = node_id,
            generations,
            ancestors = ancestors.node_count(),
            descendants = descendants.node_count(),
            "full lineage highlighted"
        );
        Ok(LineagePair {
            ancestors,
            descendants,
        })
    }

    /// Reset, highlight, then ask `viewport` to frame the result.
    ///
    /// The node is validated before the reset, so an unknown id leaves the
    /// current highlighting in place.
    pub fn refocus(
        &self,
        graph: &mut GraphModel,
        node_id: &str,
        direction: Direction,
        generations: u32,
        viewport: &mut dyn Viewport,
    ) -> Result<Lineage> {
        graph.require(node_id)?;
        self.reset(graph);
        let lineage = self.select_and_highlight(graph, node_id, direction, generations)?;
        focus_on(
            graph,
            &lineage.elements_with_focal(),
            viewport,
            self.config.focus_padding,
        );
        Ok(lineage)
    }

    pub fn reset(&self, graph: &mut GraphModel) {
        reset_all(graph);
    }

    fn walk_and_apply(
        &self,
        graph: &mut GraphModel,
        focal: NodeIdx,
        direction: Direction,
        generations: u32,
    ) -> Lineage {
        let lineage = GraphTraversal::new(graph)
            .with_generation_cap(self.config.generation_cap)
            .walk(focal, direction, generations);
        apply_lineage(graph, &lineage, self.config.generation_cap);
        lineage
    }

    fn finish(&self, graph: &mut GraphModel, focal: NodeIdx) {
        if self.config.dim_unrelated {
            apply_dimming(graph);
        }
        if self.config.lock_highlighted {
            let highlighted: Vec<NodeIdx> = graph
                .nodes()
                .filter(|(_, n)| n.tags.is_highlighted())
                .map(|(i, _)| i)
                .collect();
            lock_nodes(graph, std::iter::once(focal).chain(highlighted));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
