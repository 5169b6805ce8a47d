//! Viewport focusing.
//!
//! The core never animates or owns a camera. [`focus_on`] computes the
//! bounding box of an element set from raw node positions and hands it to a
//! [`Viewport`] implemented by the renderer.

use serde::Serialize;

use crate::graph::model::GraphModel;
use crate::types::{ElementSet, NodeIdx, Position};

/// Axis-aligned bounding box in raw layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn around(p: Position) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    fn include(&mut self, p: Position) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Renderer-side camera control.
pub trait Viewport {
    /// Adjust the view so that `bounds` is visible with `padding` around it.
    fn fit(&mut self, bounds: Bounds, padding: f64);
}

/// A single fit request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitRequest {
    pub bounds: Bounds,
    pub padding: f64,
}

/// Viewport that only records what it was asked to do. Useful for headless
/// rendering and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    pub requests: Vec<FitRequest>,
}

impl RecordingViewport {
    pub fn last(&self) -> Option<&FitRequest> {
        self.requests.last()
    }
}

impl Viewport for RecordingViewport {
    fn fit(&mut self, bounds: Bounds, padding: f64) {
        self.requests.push(FitRequest { bounds, padding });
    }
}

/// Bounding box of the nodes in `elements` and the endpoints of its edges.
pub fn bounds_of(graph: &GraphModel, elements: &ElementSet) -> Option<Bounds> {
    let endpoints = elements.edges.iter().flat_map(|&e| {
        let edge = graph.edge(e);
        [edge.source, edge.target]
    });
    let mut positions = elements
        .nodes
        .iter()
        .copied()
        .chain(endpoints)
        .map(|n: NodeIdx| graph.node(n).position);

    let first = positions.next()?;
    let mut bounds = Bounds::around(first);
    for p in positions {
        bounds.include(p);
    }
    Some(bounds)
}

/// Ask `viewport` to frame `elements`. An empty set is a no-op; returns
/// whether a request was issued.
pub fn focus_on(
    graph: &GraphModel,
    elements: &ElementSet,
    viewport: &mut dyn Viewport,
    padding: f64,
) -> bool {
    match bounds_of(graph, elements) {
        Some(bounds) => {
            tracing::debug!(
                elements = elements.len(),
                width = bounds.width(),
                height = bounds.height(),
                "focus requested"
            );
            viewport.fit(bounds, padding);
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
