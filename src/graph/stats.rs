//! Graph statistics and metrics

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::clusters::{clustering_coefficient, detect_clusters};
use super::GraphData;

/// Graph statistics and metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Total number of nodes
    pub node_count: usize,
    /// Total number of edges
    pub edge_count: usize,
    /// Nodes by type
    pub nodes_by_type: BTreeMap<String, usize>,
    /// Edges by type
    pub edges_by_type: BTreeMap<String, usize>,
    /// Number of connected components
    pub cluster_count: usize,
    /// Size of largest component
    pub largest_cluster_size: usize,
    /// Nodes with no incident edges
    pub isolated_count: usize,
    /// Mean local clustering coefficient over all nodes
    pub avg_clustering: f64,
}

impl GraphStats {
    /// Calculate graph statistics
    pub fn compute(graph: &GraphData) -> Self {
        let mut nodes_by_type = BTreeMap::new();
        for node in &graph.nodes {
            *nodes_by_type.entry(node.node_type.to_string()).or_insert(0) += 1;
        }

        let mut edges_by_type = BTreeMap::new();
        for edge in &graph.links {
            *edges_by_type.entry(edge.edge_type.to_string()).or_insert(0) += 1;
        }

        let mut degree: HashMap<&str, usize> =
            graph.nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
        for (source, target) in graph.links.iter().filter_map(|e| e.endpoint_ids()) {
            if let Some(d) = degree.get_mut(source) {
                *d += 1;
            }
            if let Some(d) = degree.get_mut(target) {
                *d += 1;
            }
        }
        let isolated_count = degree.values().filter(|&&d| d == 0).count();

        let clusters = detect_clusters(graph);

        let avg_clustering = if graph.nodes.is_empty() {
            0.0
        } else {
            graph
                .nodes
                .iter()
                .map(|n| clustering_coefficient(&n.id, &graph.links))
                .sum::<f64>()
                / graph.nodes.len() as f64
        };

        Self {
            node_count: graph.nodes.len(),
            edge_count: graph.links.len(),
            nodes_by_type,
            edges_by_type,
            cluster_count: clusters.len(),
            largest_cluster_size: clusters.first().map(Vec::len).unwrap_or(0),
            isolated_count,
            avg_clustering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeType, Node, NodeType};

    #[test]
    fn test_graph_stats() {
        let graph = GraphData::new(
            vec![
                Node::new(NodeType::Note, 1, "One"),
                Node::new(NodeType::Note, 2, "Two"),
                Node::new(NodeType::Tag, 1, "rust"),
                Node::new(NodeType::Image, 1, "pic.png"),
            ],
            vec![
                Edge::new("note-1", "note-2", EdgeType::Wikilink),
                Edge::new("note-1", "tag-1", EdgeType::Tag),
                Edge::new("note-2", "tag-1", EdgeType::Tag),
            ],
        );

        let stats = GraphStats::compute(&graph);
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.nodes_by_type.get("note"), Some(&2));
        assert_eq!(stats.edges_by_type.get("tag"), Some(&2));
        assert_eq!(stats.cluster_count, 2);
        assert_eq!(stats.largest_cluster_size, 3);
        assert_eq!(stats.isolated_count, 1);
        // triangle of three nodes plus one isolated node
        assert!((stats.avg_clustering - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stats() {
        let stats = GraphStats::compute(&GraphData::default());
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.cluster_count, 0);
        assert_eq!(stats.largest_cluster_size, 0);
        assert_eq!(stats.avg_clustering, 0.0);
    }
}
