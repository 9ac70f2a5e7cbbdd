//! Edge endpoint resolution.
//!
//! Both endpoint forms are reduced to an identifier plus the index of the
//! first node carrying it. Edges that cannot be resolved are reported and
//! left out; the rest of the graph is unaffected.

use std::collections::HashMap;

use log::warn;

use super::error::{EdgeEnd, GraphError};
use super::types::{EdgeEndpoint, GraphData};

/// An edge whose endpoints are known to exist in the node set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEdge {
	/// Position of the edge in the input.
	pub edge: usize,
	/// Index of the source node in the input node list.
	pub source: usize,
	/// Index of the target node in the input node list.
	pub target: usize,
	/// Source identifier.
	pub source_id: String,
	/// Target identifier.
	pub target_id: String,
	/// Relation type, unchanged.
	pub relation: Option<String>,
}

/// Outcome of normalizing one [`GraphData`] snapshot.
#[derive(Debug, Default)]
pub struct Normalized {
	/// Indices of nodes handed to layout, in input order.
	pub nodes: Vec<usize>,
	/// Edges handed to layout, in input order.
	pub edges: Vec<ResolvedEdge>,
	/// Everything that was rejected, in the order it was found.
	pub diagnostics: Vec<GraphError>,
	index: HashMap<String, usize>,
}

impl Normalized {
	/// Index of the node with this identifier.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Whether every node and edge was accepted.
	pub fn is_clean(&self) -> bool {
		self.diagnostics.is_empty()
	}
}

/// Validate node identifiers and resolve every edge endpoint.
pub fn normalize(data: &GraphData) -> Normalized {
	let mut out = Normalized::default();

	for (i, node) in data.nodes.iter().enumerate() {
		if let Some(&first) = out.index.get(&node.id) {
			let err = GraphError::DuplicateNode {
				id: node.id.clone(),
				index: i,
				first,
			};
			warn!("{err}");
			out.diagnostics.push(err);
			continue;
		}
		out.index.insert(node.id.clone(), i);
		out.nodes.push(i);
	}

	for (i, edge) in data.edges.iter().enumerate() {
		let source = resolve_endpoint(&out.index, &edge.source);
		let target = resolve_endpoint(&out.index, &edge.target);
		match (source, target) {
			(Some(source), Some(target)) => out.edges.push(ResolvedEdge {
				edge: i,
				source,
				target,
				source_id: edge.source.id().to_string(),
				target_id: edge.target.id().to_string(),
				relation: edge.relation.clone(),
			}),
			(source, target) => {
				let ends = [
					(EdgeEnd::Source, &edge.source, source),
					(EdgeEnd::Target, &edge.target, target),
				];
				for (end, endpoint, _) in ends.into_iter().filter(|(_, _, idx)| idx.is_none()) {
					let err = GraphError::DanglingEdge {
						edge: i,
						end,
						missing: endpoint.id().to_string(),
						source_id: edge.source.id().to_string(),
						target_id: edge.target.id().to_string(),
					};
					warn!("{err}");
					out.diagnostics.push(err);
				}
			}
		}
	}

	out
}

/// An embedded node is checked by identifier only; the node set stays authoritative.
fn resolve_endpoint(index: &HashMap<String, usize>, endpoint: &EdgeEndpoint) -> Option<usize> {
	index.get(endpoint.id()).copied()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::types::{GraphEdge, GraphNode, NodeLayer};

	fn node(id: &str) -> GraphNode {
		GraphNode::new(id, id.to_uppercase())
	}

	#[test]
	fn valid_edge_is_retained_unchanged() {
		let data = GraphData {
			nodes: vec![
				node("a").with_layer(NodeLayer::Episodic),
				node("b").with_layer(NodeLayer::Contact),
			],
			edges: vec![GraphEdge::new("a", "b").with_relation("about")],
		};
		let n = normalize(&data);
		assert!(n.is_clean());
		assert_eq!(n.nodes, vec![0, 1]);
		assert_eq!(
			n.edges,
			vec![ResolvedEdge {
				edge: 0,
				source: 0,
				target: 1,
				source_id: "a".into(),
				target_id: "b".into(),
				relation: Some("about".into()),
			}]
		);
	}

	#[test]
	fn dangling_target_rejects_edge_but_keeps_node() {
		let data = GraphData {
			nodes: vec![node("a")],
			edges: vec![GraphEdge::new("a", "zzz")],
		};
		let n = normalize(&data);
		assert!(n.edges.is_empty());
		assert_eq!(n.nodes, vec![0]);
		assert_eq!(n.diagnostics.len(), 1);
		assert!(matches!(
			&n.diagnostics[0],
			GraphError::DanglingEdge { edge: 0, end: EdgeEnd::Target, missing, .. } if missing == "zzz"
		));
	}

	#[test]
	fn embedded_endpoint_must_exist_in_node_set() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			edges: vec![
				GraphEdge::new(node("a"), "b"),
				GraphEdge::new(node("ghost"), "b"),
			],
		};
		let n = normalize(&data);
		assert_eq!(n.edges.len(), 1);
		assert_eq!(n.edges[0].source_id, "a");
		assert!(matches!(
			&n.diagnostics[..],
			[GraphError::DanglingEdge { edge: 1, end: EdgeEnd::Source, missing, .. }] if missing == "ghost"
		));
	}

	#[test]
	fn both_ends_missing_reports_each() {
		let data = GraphData {
			nodes: vec![],
			edges: vec![GraphEdge::new("x", "y")],
		};
		let n = normalize(&data);
		let ends: Vec<_> = n
			.diagnostics
			.iter()
			.filter_map(|d| match d {
				GraphError::DanglingEdge { end, missing, .. } => Some((*end, missing.as_str())),
				_ => None,
			})
			.collect();
		assert_eq!(ends, vec![(EdgeEnd::Source, "x"), (EdgeEnd::Target, "y")]);
	}

	#[test]
	fn duplicate_id_keeps_first_occurrence() {
		let data = GraphData {
			nodes: vec![node("a"), node("b"), GraphNode::new("a", "Second A")],
			edges: vec![GraphEdge::new("b", "a")],
		};
		let n = normalize(&data);
		assert_eq!(n.nodes, vec![0, 1]);
		assert_eq!(n.index_of("a"), Some(0));
		assert_eq!(n.edges[0].target, 0);
		assert!(matches!(
			&n.diagnostics[..],
			[GraphError::DuplicateNode { index: 2, first: 0, .. }]
		));
	}

	#[test]
	fn self_loops_and_multi_edges_pass_through() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			edges: vec![
				GraphEdge::new("a", "a"),
				GraphEdge::new("a", "b"),
				GraphEdge::new("a", "b").with_relation("mentions"),
			],
		};
		let n = normalize(&data);
		assert!(n.is_clean());
		assert_eq!(n.edges.len(), 3);
	}
}
