//! notegraph - knowledge graph engine for notes, tags and images
//!
//! Turns fetched note/tag/image records into a typed graph and answers
//! filter, search, neighbor and clustering queries over it. Everything here
//! is pure: no I/O happens outside snapshot and config loading.

pub mod config;
pub mod error;
pub mod graph;
pub mod search;
pub mod types;

pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::{Edge, EdgeType, Endpoint, GraphData, Node, NodeRef, NodeType};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
