//! Graph description input.
//!
//! Two JSON shapes are accepted:
//!
//! - flat: `{"nodes": [{"id", "name", "dummy", "href", "x", "y"}], "edges": [{"source", "target"}]}`
//! - element-wrapped: `{"elements": {"nodes": [{"data": {...}, "position": {...}}], "edges": [{"data": {...}}]}}`
//!
//! Both are normalized into a [`GraphDescription`], which [`load_graph`]
//! turns into a [`GraphModel`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LineageError, Result};
use crate::graph::model::GraphModel;
use crate::types::Position;

// ---------------------------------------------------------------------------
// Description types
// ---------------------------------------------------------------------------

/// A node record as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dummy: bool,
    #[serde(default)]
    pub href: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// An edge record referencing node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
}

/// An already-parsed graph description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

// Element-wrapped shape.

#[derive(Debug, Deserialize)]
struct WrappedGraph {
    elements: WrappedElements,
}

#[derive(Debug, Deserialize)]
struct WrappedElements {
    #[serde(default)]
    nodes: Vec<WrappedNode>,
    #[serde(default)]
    edges: Vec<WrappedEdge>,
}

#[derive(Debug, Deserialize)]
struct WrappedNode {
    data: WrappedNodeData,
    #[serde(default)]
    position: Option<Position>,
}

#[derive(Debug, Deserialize)]
struct WrappedNodeData {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dummy: bool,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WrappedEdge {
    data: EdgeRecord,
}

impl WrappedGraph {
    fn into_description(self) -> Result<GraphDescription> {
        let nodes = self
            .elements
            .nodes
            .into_iter()
            .map(|n| {
                let position = match (n.data.x, n.data.y, n.position) {
                    (Some(x), Some(y), _) => Position::new(x, y),
                    (_, _, Some(p)) => p,
                    _ => {
                        return Err(LineageError::MalformedGraph {
                            reason: format!("node '{}' has no position", n.data.id),
                        })
                    }
                };
                Ok(NodeRecord {
                    name: n.data.name.unwrap_or_else(|| n.data.id.clone()),
                    id: n.data.id,
                    dummy: n.data.dummy,
                    href: n.data.href,
                    x: position.x,
                    y: position.y,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let edges = self.elements.edges.into_iter().map(|e| e.data).collect();
        Ok(GraphDescription { nodes, edges })
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse JSON text in either accepted shape.
///
/// Any syntax or structure problem is reported as
/// [`LineageError::MalformedGraph`].
pub fn parse_description(json: &str) -> Result<GraphDescription> {
    let value: Value = serde_json::from_str(json).map_err(malformed)?;
    description_from_value(value)
}

/// Interpret an already-parsed JSON value.
pub fn description_from_value(value: Value) -> Result<GraphDescription> {
    if !value.is_object() {
        return Err(LineageError::MalformedGraph {
            reason: "graph description must be a JSON object".to_string(),
        });
    }
    if value.get("elements").is_some() {
        let wrapped: WrappedGraph = serde_json::from_value(value).map_err(malformed)?;
        wrapped.into_description()
    } else {
        serde_json::from_value(value).map_err(malformed)
    }
}

fn malformed(e: serde_json::Error) -> LineageError {
    LineageError::MalformedGraph {
        reason: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Build a graph from a description.
///
/// Duplicate node ids and edges with unknown endpoints fail the whole load
/// with [`LineageError::MalformedGraph`].
pub fn load_graph(description: &GraphDescription) -> Result<GraphModel> {
    let mut graph = GraphModel::new();
    for node in &description.nodes {
        graph
            .add_node(
                node.id.clone(),
                node.name.clone(),
                node.dummy,
                node.href.clone(),
                Position::new(node.x, node.y),
            )
            .map_err(|e| {
                tracing::warn!(error = %e, "rejecting graph description");
                e.into_malformed()
            })?;
    }
    for edge in &description.edges {
        graph.add_edge(&edge.source, &edge.target).map_err(|e| {
            tracing::warn!(
                source = %edge.source,
                target = %edge.target,
                error = %e,
                "rejecting graph description"
            );
            e.into_malformed()
        })?;
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parse and load in one step.
pub fn load_graph_json(json: &str) -> Result<GraphModel> {
    load_graph(&parse_description(json)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
