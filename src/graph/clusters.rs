//! Local clustering coefficient and connected-component detection

use std::collections::{HashMap, HashSet, VecDeque};

use super::neighbors::{connected_pairs, neighbors};
use super::{Edge, GraphData};

/// Node ids forming one connected component
pub type Cluster = Vec<String>;

/// Fraction of a node's neighbor pairs that are directly connected.
///
/// Returns 0 for nodes with fewer than two neighbors. Edge direction is
/// ignored. The neighbor set is exactly [`neighbors`], so a self-loop
/// counts the node as one of its own neighbors.
pub fn clustering_coefficient(node_id: &str, links: &[Edge]) -> f64 {
    let adjacent = neighbors(node_id, links);

    let k = adjacent.len();
    if k < 2 {
        return 0.0;
    }

    let pairs = connected_pairs(links);
    let adjacent: Vec<&str> = adjacent.iter().map(String::as_str).collect();

    let mut closed = 0usize;
    for (i, a) in adjacent.iter().enumerate() {
        for b in &adjacent[i + 1..] {
            let key = if a <= b { (*a, *b) } else { (*b, *a) };
            if pairs.contains(&key) {
                closed += 1;
            }
        }
    }

    let possible = k * (k - 1) / 2;
    closed as f64 / possible as f64
}

/// Find connected components using BFS, largest first.
///
/// Every node lands in exactly one cluster; nodes without edges form
/// singletons. Edges touching ids outside the node set are ignored. Equal
/// sized clusters keep the order in which their first node appears.
pub fn detect_clusters(graph: &GraphData) -> Vec<Cluster> {
    // Build adjacency list (undirected)
    let mut adj: HashMap<&str, Vec<&str>> = graph
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), Vec::new()))
        .collect();

    for (source, target) in graph.links.iter().filter_map(Edge::endpoint_ids) {
        if !adj.contains_key(source) || !adj.contains_key(target) {
            continue;
        }
        if let Some(list) = adj.get_mut(source) {
            list.push(target);
        }
        if let Some(list) = adj.get_mut(target) {
            list.push(source);
        }
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(adj.len());
    let mut clusters: Vec<Cluster> = Vec::new();

    for node in &graph.nodes {
        let start = node.id.as_str();
        if !visited.insert(start) {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            component.push(current.to_string());
            for &neighbor in adj.get(current).into_iter().flatten() {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        clusters.push(component);
    }

    // Sort by size (largest first)
    clusters.sort_by(|a, b| b.len().cmp(&a.len()));

    tracing::debug!(
        clusters = clusters.len(),
        largest = clusters.first().map(Vec::len).unwrap_or(0),
        "Detected clusters"
    );

    clusters
}
