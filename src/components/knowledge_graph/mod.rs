//! Knowledge-graph visualization: data model, color scheme, normalization,
//! click binding and the canvas view.

mod binding;
mod colors;
mod component;
mod config;
mod error;
mod normalize;
mod overlay;
mod render;
mod sample;
mod state;
mod types;

pub use binding::{
	GraphBinding, GraphOptions, LegendEntry, NodeClickHandler, PreparedGraph, PreparedNode,
	legend_entries,
};
pub use colors::{GraphColorScheme, LayerColors, NodeColorConfig};
pub use component::KnowledgeGraphCanvas;
pub use config::LayoutSettings;
pub use error::{EdgeEnd, GraphError, GraphResult, SchemeError};
pub use normalize::{Normalized, ResolvedEdge, normalize};
pub use sample::sample_graph;
pub use state::ForceGraphState;
pub use types::{EdgeEndpoint, GraphData, GraphEdge, GraphNode, NodeLayer};
