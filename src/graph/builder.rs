//! Graph construction from note, tag and image records

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Edge, EdgeType, GraphData, Node, NodeType};
use crate::error::{GraphError, Result};
use crate::types::{Image, Note, Tag};

/// Size of any node with no weighting applied
pub const NODE_SIZE_FLOOR: f64 = 5.0;

/// How note size grows with inbound references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizePolicy {
    /// Backlinks beyond this count add nothing
    pub backlink_cap: usize,
    /// Size added per counted backlink
    pub backlink_weight: f64,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            backlink_cap: 20,
            backlink_weight: 1.0,
        }
    }
}

impl SizePolicy {
    /// Reject policies under which a referenced note could stay at the floor
    pub fn validate(&self) -> Result<()> {
        if self.backlink_cap == 0 {
            return Err(GraphError::Config(
                "backlink_cap must be at least 1".to_string(),
            ));
        }
        if !self.backlink_weight.is_finite() || self.backlink_weight <= 0.0 {
            return Err(GraphError::Config(format!(
                "backlink_weight must be a positive number, got {}",
                self.backlink_weight
            )));
        }
        Ok(())
    }

    /// Node size for a note with `backlinks` inbound references
    pub fn note_size(&self, backlinks: usize) -> f64 {
        NODE_SIZE_FLOOR + backlinks.min(self.backlink_cap) as f64 * self.backlink_weight
    }
}

/// Build a graph with the default size policy
pub fn build_graph(notes: &[Note], tags: &[Tag], images: &[Image]) -> GraphData {
    build_graph_with(notes, tags, images, &SizePolicy::default())
}

/// Build a graph from fetched records.
///
/// Records without an id are skipped, as are later records repeating an id
/// already emitted for the same type. Relations pointing at entities absent
/// from the input are dropped rather than producing dangling edges.
/// Repeated links between the same pair are kept as parallel edges.
pub fn build_graph_with(
    notes: &[Note],
    tags: &[Tag],
    images: &[Image],
    policy: &SizePolicy,
) -> GraphData {
    let mut nodes = Vec::with_capacity(notes.len() + tags.len() + images.len());
    let mut seen: HashSet<String> = HashSet::with_capacity(nodes.capacity());
    let mut skipped = 0usize;

    let note_nodes = notes.iter().map(|note| {
        note.id.map(|id| {
            Node::new(NodeType::Note, id, note.title.clone())
                .with_size(policy.note_size(note.backlinks.len()))
        })
    });
    let tag_nodes = tags
        .iter()
        .map(|tag| tag.id.map(|id| Node::new(NodeType::Tag, id, tag.name.clone())));
    let image_nodes = images.iter().map(|image| {
        image
            .id
            .map(|id| Node::new(NodeType::Image, id, image.filename.clone()))
    });

    for node in note_nodes.chain(tag_nodes).chain(image_nodes) {
        match node {
            Some(node) if seen.insert(node.id.clone()) => nodes.push(node),
            _ => skipped += 1,
        }
    }

    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let mut links = Vec::new();
    let mut dropped = 0usize;

    let mut link = |source: &str, target: String, edge_type: EdgeType, links: &mut Vec<Edge>| {
        if node_ids.contains(target.as_str()) {
            links.push(Edge::new(source, target, edge_type));
        } else {
            dropped += 1;
        }
    };

    for note in notes {
        let Some(id) = note.id else { continue };
        let source = NodeType::Note.node_id(id);

        for &linked in &note.linked_notes {
            link(&source, NodeType::Note.node_id(linked), EdgeType::Wikilink, &mut links);
        }
        for tag_id in note.tags.iter().filter_map(|t| t.id) {
            link(&source, NodeType::Tag.node_id(tag_id), EdgeType::Tag, &mut links);
        }
        for &image_id in &note.image_ids {
            link(&source, NodeType::Image.node_id(image_id), EdgeType::Image, &mut links);
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        links = links.len(),
        skipped_records = skipped,
        dropped_relations = dropped,
        "Built knowledge graph"
    );

    GraphData { nodes, links }
}
