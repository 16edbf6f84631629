//! ERD (Entity-Relationship Diagram) rendering module.
//!
//! Turns an extracted schema and its relationships into text:
//! - DOT (Graphviz) with HTML-like table labels
//! - JSON for programmatic use

pub mod format;

pub use format::{to_dot, to_json, Layout, OutputFormat};
