//! Lineage: bounded-depth ancestor/descendant highlighting for directed graphs.
//!
//! Load a node/edge description, select a node, and tag the nodes and edges
//! of its lineage with generation-indexed highlight state for a renderer to
//! paint.

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod observability;
pub mod render;
pub mod types;

pub use config::LineageConfig;
pub use error::{LineageError, Result};
pub use graph::focus::{focus_on, Bounds, FitRequest, RecordingViewport, Viewport};
pub use graph::highlight::{reset, select_and_highlight, Highlighter, LineagePair};
pub use graph::model::GraphModel;
pub use graph::traversal::{GraphTraversal, Generation, Lineage, DEFAULT_GENERATION_CAP};
pub use loader::{load_graph, load_graph_json, parse_description, GraphDescription};
pub use types::{Direction, EdgeIdx, ElementRef, ElementSet, NodeIdx, Tag, TagSet};
