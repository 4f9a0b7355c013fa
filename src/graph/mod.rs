//! Knowledge graph model and analysis
//!
//! Provides:
//! - Uniform node/edge model over notes, tags and images
//! - Graph construction from fetched records
//! - Facet filtering and neighborhood sub-graphs
//! - Neighbor lookup tolerant of layout-resolved endpoints
//! - Local clustering coefficient and connected components
//! - Graph statistics

pub mod builder;
pub mod clusters;
pub mod filter;
pub mod neighbors;
pub mod stats;

pub use builder::{build_graph, build_graph_with, SizePolicy, NODE_SIZE_FLOOR};
pub use clusters::{clustering_coefficient, detect_clusters, Cluster};
pub use filter::{filter_graph, neighborhood, GraphFilters};
pub use neighbors::neighbors;
pub use stats::GraphStats;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of entity a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Note,
    Tag,
    Image,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Note => "note",
            NodeType::Tag => "tag",
            NodeType::Image => "image",
        }
    }

    /// Graph-wide id for an entity of this type, e.g. `note-7`
    pub fn node_id(&self, source_id: i64) -> String {
        format!("{}-{}", self.as_str(), source_id)
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "note" => Ok(NodeType::Note),
            "tag" => Ok(NodeType::Tag),
            "image" => Ok(NodeType::Image),
            _ => Err(format!("Unknown node type: {}", s)),
        }
    }
}

/// Kind of relationship an edge represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// note -> note reference
    Wikilink,
    /// note -> tag membership
    Tag,
    /// note -> image attachment
    Image,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Wikilink => "wikilink",
            EdgeType::Tag => "tag",
            EdgeType::Image => "image",
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EdgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wikilink" => Ok(EdgeType::Wikilink),
            "tag" => Ok(EdgeType::Tag),
            "image" => Ok(EdgeType::Image),
            _ => Err(format!("Unknown edge type: {}", s)),
        }
    }
}

/// Graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// `{type}-{source_id}`
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display label
    pub name: String,
    /// Visual weight, never below [`NODE_SIZE_FLOOR`]
    pub size: f64,
    /// Id of the record this node was built from
    pub source_id: i64,
}

impl Node {
    pub fn new(node_type: NodeType, source_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: node_type.node_id(source_id),
            node_type,
            name: name.into(),
            size: NODE_SIZE_FLOOR,
            source_id,
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

/// Object form of an edge endpoint, as written back by a layout pass.
///
/// Only `id` matters to the engine; anything else the layout attached
/// (positions, velocities, labels) is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            extra: serde_json::Map::new(),
        }
    }
}

impl From<&Node> for NodeRef {
    fn from(node: &Node) -> Self {
        let mut extra = serde_json::Map::new();
        extra.insert("name".into(), node.name.clone().into());
        extra.insert("type".into(), node.node_type.as_str().into());
        Self {
            id: Some(node.id.clone()),
            extra,
        }
    }
}

/// Edge endpoint: a bare node id, a node reference object, or nothing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    Id(String),
    Ref(NodeRef),
    #[default]
    Missing,
}

impl Endpoint {
    /// Node id this endpoint points at, regardless of its shape
    pub fn id(&self) -> Option<&str> {
        match self {
            Endpoint::Id(id) => Some(id.as_str()),
            Endpoint::Ref(node_ref) => node_ref.id.as_deref(),
            Endpoint::Missing => None,
        }
    }
}

impl From<&str> for Endpoint {
    fn from(id: &str) -> Self {
        Endpoint::Id(id.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(id: String) -> Self {
        Endpoint::Id(id)
    }
}

impl From<NodeRef> for Endpoint {
    fn from(node_ref: NodeRef) -> Self {
        Endpoint::Ref(node_ref)
    }
}

/// Graph edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    pub source: Endpoint,
    #[serde(default)]
    pub target: Endpoint,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl Edge {
    pub fn new(
        source: impl Into<Endpoint>,
        target: impl Into<Endpoint>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type,
        }
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source.id()
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target.id()
    }

    /// Both endpoint ids, or `None` if either cannot be resolved
    pub fn endpoint_ids(&self) -> Option<(&str, &str)> {
        Some((self.source_id()?, self.target_id()?))
    }
}

/// Knowledge graph structure passed between stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

impl GraphData {
    pub fn new(nodes: Vec<Node>, links: Vec<Edge>) -> Self {
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Copy of the graph with every endpoint rewritten into reference form,
    /// the way a force layout leaves it after resolving links.
    pub fn with_node_refs(&self) -> GraphData {
        let to_ref = |endpoint: &Endpoint| match endpoint.id().and_then(|id| self.node(id)) {
            Some(node) => Endpoint::Ref(NodeRef::from(node)),
            None => endpoint.clone(),
        };

        GraphData {
            nodes: self.nodes.clone(),
            links: self
                .links
                .iter()
                .map(|e| Edge {
                    source: to_ref(&e.source),
                    target: to_ref(&e.target),
                    edge_type: e.edge_type,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_id_prefix() {
        assert_eq!(NodeType::Note.node_id(7), "note-7");
        assert_eq!(NodeType::Tag.node_id(3), "tag-3");
        assert_eq!(NodeType::Image.node_id(12), "image-12");
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("Note".parse::<NodeType>(), Ok(NodeType::Note));
        assert_eq!("wikilink".parse::<EdgeType>(), Ok(EdgeType::Wikilink));
        assert!("video".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_endpoint_resolution() {
        assert_eq!(Endpoint::from("note-1").id(), Some("note-1"));
        assert_eq!(Endpoint::from(NodeRef::new("note-1")).id(), Some("note-1"));
        assert_eq!(Endpoint::Ref(NodeRef::default()).id(), None);
        assert_eq!(Endpoint::Missing.id(), None);
    }

    #[test]
    fn test_endpoint_deserializes_both_shapes() {
        let edges: Vec<Edge> = serde_json::from_str(
            r#"[
                {"source": "note-1", "target": "tag-1", "type": "tag"},
                {"source": {"id": "note-1", "x": 10.5, "y": -3}, "target": {"id": "note-2"}, "type": "wikilink"},
                {"source": null, "type": "image"}
            ]"#,
        )
        .unwrap();

        assert_eq!(edges[0].endpoint_ids(), Some(("note-1", "tag-1")));
        assert_eq!(edges[1].endpoint_ids(), Some(("note-1", "note-2")));
        assert_eq!(edges[2].endpoint_ids(), None);

        match &edges[1].source {
            Endpoint::Ref(r) => assert_eq!(r.extra.get("x"), Some(&serde_json::json!(10.5))),
            other => panic!("expected reference endpoint, got {:?}", other),
        }
    }

    #[test]
    fn test_graph_serializes_in_render_shape() {
        let graph = GraphData::new(
            vec![Node::new(NodeType::Note, 1, "One")],
            vec![Edge::new("note-1", "note-1", EdgeType::Wikilink)],
        );
        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [{"id": "note-1", "type": "note", "name": "One", "size": 5.0, "sourceId": 1}],
                "links": [{"source": "note-1", "target": "note-1", "type": "wikilink"}]
            })
        );
    }

    #[test]
    fn test_with_node_refs_preserves_ids() {
        let graph = GraphData::new(
            vec![
                Node::new(NodeType::Note, 1, "One"),
                Node::new(NodeType::Tag, 2, "rust"),
            ],
            vec![
                Edge::new("note-1", "tag-2", EdgeType::Tag),
                Edge::new("note-1", "note-9", EdgeType::Wikilink),
            ],
        );
        let resolved = graph.with_node_refs();

        assert!(matches!(resolved.links[0].source, Endpoint::Ref(_)));
        assert_eq!(resolved.links[0].endpoint_ids(), Some(("note-1", "tag-2")));
        // unknown ids stay bare
        assert_eq!(resolved.links[1].target, Endpoint::from("note-9"));
    }
}
