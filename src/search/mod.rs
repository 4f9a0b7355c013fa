//! Node name search for highlighting
//!
//! Plain case-insensitive substring matching. Results keep input order;
//! there is no ranking.

use crate::graph::Node;

/// Nodes whose name contains `term`, ignoring case.
///
/// An empty term matches every node.
pub fn search_nodes<'a>(nodes: &'a [Node], term: &str) -> Vec<&'a Node> {
    if term.is_empty() {
        return nodes.iter().collect();
    }

    let needle = term.to_lowercase();
    nodes
        .iter()
        .filter(|n| n.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeType;
    use pretty_assertions::assert_eq;

    fn nodes() -> Vec<Node> {
        vec![
            Node::new(NodeType::Note, 1, "JavaScript Basics"),
            Node::new(NodeType::Tag, 1, "javascript"),
            Node::new(NodeType::Note, 2, "Rust Ownership"),
            Node::new(NodeType::Image, 1, "JAVASCRIPT-logo.png"),
        ]
    }

    fn names<'a>(found: &[&'a Node]) -> Vec<&'a str> {
        found.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_empty_term_returns_all() {
        let nodes = nodes();
        assert_eq!(search_nodes(&nodes, "").len(), nodes.len());
    }

    #[test]
    fn test_case_insensitive_match() {
        let nodes = nodes();
        let found = search_nodes(&nodes, "javascript");
        assert_eq!(
            names(&found),
            vec!["JavaScript Basics", "javascript", "JAVASCRIPT-logo.png"]
        );

        let found = search_nodes(&nodes, "OWNER");
        assert_eq!(names(&found), vec!["Rust Ownership"]);
    }

    #[test]
    fn test_no_match() {
        let nodes = nodes();
        assert!(search_nodes(&nodes, "haskell").is_empty());
    }
}
