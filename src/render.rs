//! Renderer-facing snapshot of a graph's highlight state.
//!
//! The renderer owns styling; it receives raw and scaled positions plus the
//! tag class names of every element and repaints from those.

use serde::Serialize;

use crate::config::LineageConfig;
use crate::error::Result;
use crate::graph::model::GraphModel;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub name: String,
    pub dummy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub position: Position,
    /// `position` multiplied by the configured scale.
    pub rendered_position: Position,
    pub locked: bool,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    pub source: String,
    pub target: String,
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderSnapshot {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Capture every element in insertion order.
pub fn snapshot(graph: &GraphModel, config: &LineageConfig) -> RenderSnapshot {
    let nodes = graph
        .nodes()
        .map(|(_, n)| RenderNode {
            id: n.id.clone(),
            name: n.name.clone(),
            dummy: n.dummy,
            href: n.href.clone(),
            position: n.position,
            rendered_position: n.position.scaled(config.position_scale),
            locked: n.locked,
            classes: n.tags.classes(),
        })
        .collect();
    let edges = graph
        .edges()
        .map(|(_, e)| RenderEdge {
            source: graph.node(e.source).id.clone(),
            target: graph.node(e.target).id.clone(),
            classes: e.tags.classes(),
        })
        .collect();
    RenderSnapshot { nodes, edges }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::highlight::select_and_highlight;
    use crate::types::Direction;

    fn graph() -> GraphModel {
        let mut g = GraphModel::new();
        g.add_node("a", "Alpha", false, Some("a.html".into()), Position::new(1.0, 2.0))
            .unwrap();
        g.add_node("b", "Beta", true, None, Position::new(0.5, 0.0))
            .unwrap();
        g.add_edge("a", "b").unwrap();
        g
    }

    #[test]
    fn snapshot_scales_positions() {
        let g = graph();
        let snap = snapshot(&g, &LineageConfig::default());
        assert_eq!(snap.nodes[0].position, Position::new(1.0, 2.0));
        assert_eq!(snap.nodes[0].rendered_position, Position::new(200.0, 400.0));
        assert!(snap.nodes[1].dummy);
    }

    #[test]
    fn snapshot_reports_classes() {
        let mut g = graph();
        select_and_highlight(&mut g, "a", Direction::Descendants, 1).unwrap();
        let snap = snapshot(&g, &LineageConfig::default());
        assert_eq!(snap.nodes[0].classes, vec!["selected"]);
        assert_eq!(
            snap.nodes[1].classes,
            vec!["highlighted", "generation:descendant:0"]
        );
        assert_eq!(snap.edges[0].source, "a");
        assert_eq!(snap.edges[0].target, "b");
        assert_eq!(
            snap.edges[0].classes,
            vec!["highlighted", "generation:descendant:0"]
        );
    }

    #[test]
    fn to_json_omits_missing_href() {
        let g = graph();
        let json = snapshot(&g, &LineageConfig::default()).to_json().unwrap();
        assert_eq!(json["nodes"][0]["href"], "a.html");
        assert!(json["nodes"][1].get("href").is_none());
        assert_eq!(json["edges"][0]["classes"], serde_json::json!([]));
    }
}
