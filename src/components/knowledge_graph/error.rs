//! Graph diagnostics and configuration errors.

use std::fmt;

use thiserror::Error;

use super::types::NodeLayer;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Which end of an edge a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeEnd {
	/// The `source` endpoint.
	Source,
	/// The `target` endpoint.
	Target,
}

impl fmt::Display for EdgeEnd {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EdgeEnd::Source => f.write_str("source"),
			EdgeEnd::Target => f.write_str("target"),
		}
	}
}

/// Errors raised while installing a color scheme.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemeError {
	#[error("Color scheme has no entry for: {}", format_layers(.0))]
	MissingLayers(Vec<NodeLayer>),

	#[error("Color scheme entry for {layer} has an empty {field}")]
	EmptyField { layer: NodeLayer, field: &'static str },

	#[error("Unknown layer tag: {0}")]
	UnknownLayer(String),
}

/// Errors and diagnostics produced while preparing a graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Edge endpoint with no matching node. The edge is dropped from layout.
	#[error("Edge #{edge} ({source_id} -> {target_id}) has a dangling {end}: no node with id '{missing}'")]
	DanglingEdge {
		edge: usize,
		end: EdgeEnd,
		missing: String,
		source_id: String,
		target_id: String,
	},

	/// Repeated node identifier. Only the first occurrence is laid out.
	#[error("Duplicate node id '{id}' at index {index} (first seen at {first})")]
	DuplicateNode { id: String, index: usize, first: usize },

	#[error("Invalid color scheme: {0}")]
	InvalidColorScheme(#[from] SchemeError),

	#[error("Graph JSON parse error: {0}")]
	Json(#[from] serde_json::Error),
}

fn format_layers(layers: &[NodeLayer]) -> String {
	layers
		.iter()
		.map(|layer| layer.tag())
		.collect::<Vec<_>>()
		.join(", ")
}
