//! Facet filtering and neighborhood sub-graphs

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use super::{EdgeType, GraphData, NodeType};

/// Per-type visibility flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphFilters {
    pub show_notes: bool,
    pub show_tags: bool,
    pub show_images: bool,
    pub show_wikilinks: bool,
    pub show_tag_links: bool,
    pub show_image_links: bool,
}

impl Default for GraphFilters {
    fn default() -> Self {
        Self {
            show_notes: true,
            show_tags: true,
            show_images: true,
            show_wikilinks: true,
            show_tag_links: true,
            show_image_links: true,
        }
    }
}

impl GraphFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(mut self, show: bool) -> Self {
        self.show_notes = show;
        self
    }

    pub fn with_tags(mut self, show: bool) -> Self {
        self.show_tags = show;
        self
    }

    pub fn with_images(mut self, show: bool) -> Self {
        self.show_images = show;
        self
    }

    pub fn with_wikilinks(mut self, show: bool) -> Self {
        self.show_wikilinks = show;
        self
    }

    pub fn with_tag_links(mut self, show: bool) -> Self {
        self.show_tag_links = show;
        self
    }

    pub fn with_image_links(mut self, show: bool) -> Self {
        self.show_image_links = show;
        self
    }

    pub fn shows_node(&self, node_type: NodeType) -> bool {
        match node_type {
            NodeType::Note => self.show_notes,
            NodeType::Tag => self.show_tags,
            NodeType::Image => self.show_images,
        }
    }

    pub fn shows_edge(&self, edge_type: EdgeType) -> bool {
        match edge_type {
            EdgeType::Wikilink => self.show_wikilinks,
            EdgeType::Tag => self.show_tag_links,
            EdgeType::Image => self.show_image_links,
        }
    }
}

/// Apply visibility flags to create a subgraph.
///
/// An edge survives only if its type is shown and both resolved endpoints
/// survived node filtering. An empty graph is handed back borrowed.
pub fn filter_graph<'a>(graph: &'a GraphData, filters: &GraphFilters) -> Cow<'a, GraphData> {
    if graph.nodes.is_empty() {
        return Cow::Borrowed(graph);
    }

    let nodes: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| filters.shows_node(n.node_type))
        .cloned()
        .collect();

    let valid_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let links: Vec<_> = graph
        .links
        .iter()
        .filter(|e| {
            filters.shows_edge(e.edge_type)
                && e
                    .endpoint_ids()
                    .is_some_and(|(s, t)| valid_ids.contains(s) && valid_ids.contains(t))
        })
        .cloned()
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        links = links.len(),
        removed_nodes = graph.nodes.len() - nodes.len(),
        removed_links = graph.links.len() - links.len(),
        "Filtered knowledge graph"
    );

    Cow::Owned(GraphData { nodes, links })
}

/// Get subgraph centered on a node with given depth.
///
/// Edges are followed in both directions. The result keeps the input order
/// of nodes and every edge whose endpoints were both reached.
pub fn neighborhood(graph: &GraphData, center: &str, depth: usize) -> GraphData {
    if graph.node(center).is_none() {
        return GraphData::default();
    }

    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for (source, target) in graph.links.iter().filter_map(|e| e.endpoint_ids()) {
        adj.entry(source).or_default().push(target);
        adj.entry(target).or_default().push(source);
    }

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(center);
    let mut current_level = vec![center];

    for _ in 0..depth {
        let mut next_level = Vec::new();
        for node in current_level {
            for &neighbor in adj.get(node).into_iter().flatten() {
                if visited.insert(neighbor) {
                    next_level.push(neighbor);
                }
            }
        }
        if next_level.is_empty() {
            break;
        }
        current_level = next_level;
    }

    let nodes = graph
        .nodes
        .iter()
        .filter(|n| visited.contains(n.id.as_str()))
        .cloned()
        .collect();

    let links = graph
        .links
        .iter()
        .filter(|e| {
            e.endpoint_ids()
                .is_some_and(|(s, t)| visited.contains(s) && visited.contains(t))
        })
        .cloned()
        .collect();

    GraphData { nodes, links }
}
