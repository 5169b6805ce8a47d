//! Highlighting configuration: schema and loading.

pub mod loader;
pub mod schema;

pub use schema::LineageConfig;
