//! Positioned YAML/JSON tree
//!
//! Every node keeps its 1-based line and column, the document it came from,
//! and a stable identity used to deduplicate schema construction.

mod loader;
mod node;

pub use loader::parse_document;
pub use node::{Node, NodeId, NodeKind, Position, Scalar, ScalarTag};
