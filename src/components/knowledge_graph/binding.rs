//! Glue between consumer data, the color scheme and the layout engine.
//!
//! A [`GraphBinding`] holds configuration only. Every render pass calls
//! [`GraphBinding::prepare`] on the current data and gets a fresh
//! [`PreparedGraph`]; nothing carries over between passes.

use std::rc::Rc;

use log::{debug, warn};

use super::colors::{GraphColorScheme, LayerColors, NodeColorConfig};
use super::config::LayoutSettings;
use super::error::{GraphError, SchemeError};
use super::normalize::{Normalized, ResolvedEdge, normalize};
use super::types::{GraphData, GraphNode, NodeLayer};

/// Consumer callback receiving the full record of a clicked node.
pub type NodeClickHandler = Rc<dyn Fn(&GraphNode)>;

/// Options recognised by the binding layer.
#[derive(Clone)]
pub struct GraphOptions {
	/// Replacement for the built-in scheme. Must cover every layer.
	pub color_scheme: Option<LayerColors>,
	/// Called synchronously when a node is clicked.
	pub on_node_click: Option<NodeClickHandler>,
	/// Show simulation controls.
	pub show_controls: bool,
	/// Show the layer legend.
	pub show_legend: bool,
	/// Layout and interaction tuning.
	pub layout: LayoutSettings,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			color_scheme: None,
			on_node_click: None,
			show_controls: true,
			show_legend: true,
			layout: LayoutSettings::default(),
		}
	}
}

impl GraphOptions {
	/// Install a color scheme override.
	pub fn color_scheme(mut self, table: LayerColors) -> Self {
		self.color_scheme = Some(table);
		self
	}

	/// Install the click callback.
	pub fn on_node_click(mut self, handler: impl Fn(&GraphNode) + 'static) -> Self {
		self.on_node_click = Some(Rc::new(handler));
		self
	}

	/// Toggle the controls overlay.
	pub fn show_controls(mut self, show: bool) -> Self {
		self.show_controls = show;
		self
	}

	/// Toggle the legend overlay.
	pub fn show_legend(mut self, show: bool) -> Self {
		self.show_legend = show;
		self
	}

	/// Replace the layout settings.
	pub fn layout(mut self, layout: LayoutSettings) -> Self {
		self.layout = layout;
		self
	}
}

/// A node ready for layout, with its visual encoding resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedNode {
	/// Index into the input node list.
	pub index: usize,
	/// Node identifier.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Effective layer.
	pub layer: NodeLayer,
	/// Resolved colors.
	pub color: NodeColorConfig,
	/// Drawn radius.
	pub radius: f64,
}

/// One legend row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
	/// Layer the row describes.
	pub layer: NodeLayer,
	/// Human-readable name.
	pub label: String,
	/// Swatch color.
	pub primary: String,
}

/// Output of one render pass.
#[derive(Debug)]
pub struct PreparedGraph {
	/// Nodes to lay out.
	pub nodes: Vec<PreparedNode>,
	/// Edges to lay out.
	pub edges: Vec<ResolvedEdge>,
	/// Rejected nodes and edges.
	pub diagnostics: Vec<GraphError>,
	/// Layers present among the nodes.
	pub legend: Vec<LegendEntry>,
	normalized: Normalized,
}

impl PreparedGraph {
	/// Index into the input node list for an identifier.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.normalized.index_of(id)
	}
}

/// Configuration applied to every render pass.
pub struct GraphBinding {
	scheme: GraphColorScheme,
	scheme_error: Option<SchemeError>,
	on_node_click: Option<NodeClickHandler>,
	show_controls: bool,
	show_legend: bool,
	layout: LayoutSettings,
}

impl GraphBinding {
	/// Install options. An invalid color scheme is rejected here and the
	/// built-in scheme is used instead.
	pub fn new(options: GraphOptions) -> Self {
		let (scheme, scheme_error) = match options.color_scheme {
			None => (GraphColorScheme::builtin(), None),
			Some(table) => match GraphColorScheme::try_from(table) {
				Ok(scheme) => (scheme, None),
				Err(err) => {
					warn!("{}; using built-in color scheme", GraphError::from(err.clone()));
					(GraphColorScheme::builtin(), Some(err))
				}
			},
		};
		Self {
			scheme,
			scheme_error,
			on_node_click: options.on_node_click,
			show_controls: options.show_controls,
			show_legend: options.show_legend,
			layout: options.layout,
		}
	}

	/// The active scheme.
	pub fn scheme(&self) -> &GraphColorScheme {
		&self.scheme
	}

	/// Why the override was rejected, if it was.
	pub fn scheme_error(&self) -> Option<&SchemeError> {
		self.scheme_error.as_ref()
	}

	/// Whether the controls overlay is shown.
	pub fn show_controls(&self) -> bool {
		self.show_controls
	}

	/// Whether the legend overlay is shown.
	pub fn show_legend(&self) -> bool {
		self.show_legend
	}

	/// Layout and interaction tuning.
	pub fn layout(&self) -> &LayoutSettings {
		&self.layout
	}

	/// Colors for a node.
	pub fn node_color(&self, node: &GraphNode) -> &NodeColorConfig {
		self.scheme.resolve(node)
	}

	/// Normalize a snapshot and resolve the visual encoding of every node.
	pub fn prepare(&self, data: &GraphData) -> PreparedGraph {
		let mut normalized = normalize(data);
		let nodes: Vec<PreparedNode> = normalized
			.nodes
			.iter()
			.map(|&index| {
				let node = &data.nodes[index];
				PreparedNode {
					index,
					id: node.id.clone(),
					label: node.label.clone(),
					layer: node.layer_or_default(),
					color: self.scheme.resolve(node).clone(),
					radius: self.layout.radius_for(node.importance),
				}
			})
			.collect();
		let legend = legend_entries(&self.scheme, nodes.iter().map(|n| n.layer));
		let edges = std::mem::take(&mut normalized.edges);
		let diagnostics = std::mem::take(&mut normalized.diagnostics);
		debug!(
			"Prepared graph: {} nodes, {} edges, {} rejected",
			nodes.len(),
			edges.len(),
			diagnostics.len()
		);

		PreparedGraph {
			nodes,
			edges,
			diagnostics,
			legend,
			normalized,
		}
	}

	/// Hand the full node record to the consumer. Returns whether a callback ran.
	pub fn dispatch_node_click(&self, node: &GraphNode) -> bool {
		match &self.on_node_click {
			Some(handler) => {
				handler(node);
				true
			}
			None => false,
		}
	}

	/// Translate an engine click, keyed by identifier, into a full-node callback.
	pub fn dispatch_engine_click(&self, nodes: &[GraphNode], prepared: &PreparedGraph, id: &str) -> bool {
		match prepared.index_of(id).and_then(|i| nodes.get(i)) {
			Some(node) => self.dispatch_node_click(node),
			None => {
				debug!("Click on unknown node '{id}' ignored");
				false
			}
		}
	}
}

/// Legend rows for the layers that occur in `layers`, in canonical order.
pub fn legend_entries(
	scheme: &GraphColorScheme,
	layers: impl IntoIterator<Item = NodeLayer>,
) -> Vec<LegendEntry> {
	let mut present = [false; NodeLayer::COUNT];
	for layer in layers {
		present[layer.index()] = true;
	}
	scheme
		.iter()
		.filter(|(layer, _)| present[layer.index()])
		.map(|(layer, config)| LegendEntry {
			layer,
			label: config.label.clone(),
			primary: config.primary.clone(),
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::knowledge_graph::types::GraphEdge;

	fn two_node_graph() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("a", "A").with_layer(NodeLayer::Episodic),
				GraphNode::new("b", "B").with_layer(NodeLayer::Contact),
			],
			edges: vec![GraphEdge::new("a", "b").with_relation("about")],
		}
	}

	#[test]
	fn prepare_resolves_layer_colors() {
		let binding = GraphBinding::new(GraphOptions::default());
		let prepared = binding.prepare(&two_node_graph());
		assert!(prepared.diagnostics.is_empty());
		assert_eq!(prepared.nodes[0].color.primary, "#7C3AED");
		assert_eq!(prepared.nodes[1].color.primary, "#10B981");
		assert_eq!(prepared.edges.len(), 1);
		assert_eq!(prepared.edges[0].relation.as_deref(), Some("about"));
	}

	#[test]
	fn missing_and_unknown_layers_use_default_entry() {
		let binding = GraphBinding::new(GraphOptions::default());
		let data = GraphData {
			nodes: vec![
				GraphNode::new("plain", "Plain"),
				serde_json::from_str(r#"{"id":"odd","label":"Odd","layer":"spaceship"}"#).unwrap(),
			],
			edges: vec![],
		};
		let default = binding.scheme().get(NodeLayer::Default);
		for node in &data.nodes {
			assert_eq!(binding.node_color(node), default);
		}
		let prepared = binding.prepare(&data);
		assert_eq!(
			prepared.legend,
			vec![LegendEntry {
				layer: NodeLayer::Default,
				label: "Other".into(),
				primary: "#6B7280".into(),
			}]
		);
	}

	#[test]
	fn incomplete_override_falls_back_to_builtin() {
		let mut table: LayerColors = NodeLayer::ALL
			.into_iter()
			.map(|layer| (layer, NodeColorConfig::new("#000000", "#111111", "x")))
			.collect();
		table.remove(&NodeLayer::Deal);

		let binding = GraphBinding::new(GraphOptions::default().color_scheme(table));
		assert_eq!(binding.scheme(), &GraphColorScheme::builtin());
		assert_eq!(
			binding.scheme_error(),
			Some(&SchemeError::MissingLayers(vec![NodeLayer::Deal]))
		);
	}

	#[test]
	fn json_override_with_stray_key_cannot_stand_in_for_default() {
		let mut json = serde_json::to_value(LayerColors::from(GraphColorScheme::builtin())).unwrap();
		let table = json.as_object_mut().unwrap();
		table.remove("default");
		table.insert(
			"widget".into(),
			serde_json::json!({"primary": "#abcdef", "glow": "#ffffff", "label": "Widget"}),
		);
		let err = serde_json::from_value::<LayerColors>(json.clone()).unwrap_err();
		assert!(err.to_string().contains("Unknown layer tag: widget"));

		json.as_object_mut().unwrap().remove("widget");
		let partial: LayerColors = serde_json::from_value(json).unwrap();
		let binding = GraphBinding::new(GraphOptions::default().color_scheme(partial));
		assert_eq!(
			binding.scheme_error(),
			Some(&SchemeError::MissingLayers(vec![NodeLayer::Default]))
		);
		assert_eq!(binding.scheme(), &GraphColorScheme::builtin());
	}

	#[test]
	fn legend_ignores_rejected_duplicate_nodes() {
		let binding = GraphBinding::new(GraphOptions::default());
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A").with_layer(NodeLayer::Episodic),
				GraphNode::new("a", "Shadow").with_layer(NodeLayer::Deal),
			],
			edges: vec![],
		};
		let prepared = binding.prepare(&data);
		let layers: Vec<_> = prepared.legend.iter().map(|e| e.layer).collect();
		assert_eq!(layers, vec![NodeLayer::Episodic]);
	}

	#[test]
	fn complete_override_is_installed() {
		let table: LayerColors = NodeLayer::ALL
			.into_iter()
			.map(|layer| (layer, NodeColorConfig::new("#000000", "#111111", layer.tag())))
			.collect();
		let binding = GraphBinding::new(GraphOptions::default().color_scheme(table));
		assert!(binding.scheme_error().is_none());
		let prepared = binding.prepare(&two_node_graph());
		assert_eq!(prepared.nodes[0].color.primary, "#000000");
		assert_eq!(prepared.legend[1].label, "contact");
	}

	#[test]
	fn legend_lists_present_layers_in_canonical_order() {
		let scheme = GraphColorScheme::builtin();
		let legend = legend_entries(
			&scheme,
			[NodeLayer::Deal, NodeLayer::Episodic, NodeLayer::Deal],
		);
		let layers: Vec<_> = legend.iter().map(|e| e.layer).collect();
		assert_eq!(layers, vec![NodeLayer::Episodic, NodeLayer::Deal]);
		assert_eq!(legend[1].label, "Deal");
	}

	#[test]
	fn dangling_edge_does_not_block_nodes() {
		let binding = GraphBinding::new(GraphOptions::default());
		let data = GraphData {
			nodes: vec![GraphNode::new("a", "A")],
			edges: vec![GraphEdge::new("a", "zzz")],
		};
		let prepared = binding.prepare(&data);
		assert_eq!(prepared.nodes.len(), 1);
		assert!(prepared.edges.is_empty());
		assert!(prepared.diagnostics[0].to_string().contains("zzz"));
	}

	#[test]
	fn engine_click_passes_full_record() {
		let seen: Rc<RefCell<Vec<GraphNode>>> = Rc::default();
		let sink = seen.clone();
		let binding = GraphBinding::new(
			GraphOptions::default().on_node_click(move |node| sink.borrow_mut().push(node.clone())),
		);
		let data = GraphData {
			nodes: vec![
				GraphNode::new("ep-1", "Kickoff").with_layer(NodeLayer::Episodic),
				GraphNode::new("co-1", "Sarah Chen").with_layer(NodeLayer::Contact),
			],
			edges: vec![],
		};
		let prepared = binding.prepare(&data);

		assert!(binding.dispatch_engine_click(&data.nodes, &prepared, "co-1"));
		assert!(!binding.dispatch_engine_click(&data.nodes, &prepared, "nope"));

		let seen = seen.borrow();
		assert_eq!(seen.len(), 1);
		assert_eq!(seen[0].id, "co-1");
		assert_eq!(seen[0].label, "Sarah Chen");
		assert_eq!(seen[0].layer, Some(NodeLayer::Contact));
	}

	#[test]
	fn click_without_callback_is_noop() {
		let binding = GraphBinding::new(GraphOptions::default());
		assert!(!binding.dispatch_node_click(&GraphNode::new("a", "A")));
	}

	#[test]
	fn importance_drives_radius() {
		let binding = GraphBinding::new(GraphOptions::default());
		let data = GraphData {
			nodes: vec![
				GraphNode::new("a", "A"),
				GraphNode::new("b", "B").with_importance(1.0),
			],
			edges: vec![],
		};
		let prepared = binding.prepare(&data);
		assert!(prepared.nodes[1].radius > prepared.nodes[0].radius);
	}
}
