//! Graph layer: model, lineage traversal, highlight state and focusing.

pub mod focus;
pub mod highlight;
pub mod model;
pub mod traversal;
