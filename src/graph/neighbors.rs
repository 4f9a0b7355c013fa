//! Neighbor lookup over edge lists

use std::collections::HashSet;

use super::Edge;

/// Ids adjacent to `node_id`, following edges in either direction.
///
/// Edges whose endpoints cannot be resolved are skipped. Unknown ids yield
/// an empty set.
pub fn neighbors(node_id: &str, links: &[Edge]) -> HashSet<String> {
    let mut result = HashSet::new();
    for (source, target) in links.iter().filter_map(Edge::endpoint_ids) {
        if source == node_id {
            result.insert(target.to_string());
        }
        if target == node_id {
            result.insert(source.to_string());
        }
    }
    result
}

/// Unordered pairs of directly connected ids
pub(crate) fn connected_pairs(links: &[Edge]) -> HashSet<(&str, &str)> {
    links
        .iter()
        .filter_map(Edge::endpoint_ids)
        .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
        .collect()
}
