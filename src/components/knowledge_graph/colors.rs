//! Layer to color mapping.
//!
//! A [`GraphColorScheme`] is a fixed table with one slot per [`NodeLayer`].
//! Every constructor checks that the table is complete, so lookups never fail.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::SchemeError;
use super::types::{GraphNode, NodeLayer};

/// Visual encoding of one layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColorConfig {
	/// Fill color.
	pub primary: String,
	/// Halo color used when the node is highlighted.
	pub glow: String,
	/// Human-readable layer name shown in the legend.
	pub label: String,
}

impl NodeColorConfig {
	/// Build a config from its three parts.
	pub fn new(primary: impl Into<String>, glow: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			primary: primary.into(),
			glow: glow.into(),
			label: label.into(),
		}
	}

	fn check(&self, layer: NodeLayer) -> Result<(), SchemeError> {
		let field = if self.primary.trim().is_empty() {
			"primary"
		} else if self.glow.trim().is_empty() {
			"glow"
		} else if self.label.trim().is_empty() {
			"label"
		} else {
			return Ok(());
		};
		Err(SchemeError::EmptyField { layer, field })
	}
}

/// A per-layer table of colors, as a consumer supplies it.
pub type LayerColors = BTreeMap<NodeLayer, NodeColorConfig>;

const BUILTIN: [(&str, &str, &str); NodeLayer::COUNT] = [
	("#7C3AED", "#A78BFA", "Episodic Memory"),
	("#3B82F6", "#93C5FD", "Semantic Memory"),
	("#F59E0B", "#FCD34D", "Procedural Memory"),
	("#EC4899", "#F9A8D4", "Meta Memory"),
	("#10B981", "#6EE7B7", "Contact"),
	("#06B6D4", "#67E8F9", "Company"),
	("#EF4444", "#FCA5A5", "Deal"),
	("#F97316", "#FDBA74", "Project"),
	("#6B7280", "#9CA3AF", "Other"),
];

/// Total mapping from [`NodeLayer`] to [`NodeColorConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, NodeColorConfig>", into = "LayerColors")]
pub struct GraphColorScheme {
	entries: [NodeColorConfig; NodeLayer::COUNT],
}

impl GraphColorScheme {
	/// The canonical scheme used whenever no override is installed.
	pub fn builtin() -> Self {
		Self {
			entries: BUILTIN.map(|(primary, glow, label)| NodeColorConfig::new(primary, glow, label)),
		}
	}

	/// Color for a layer.
	pub fn get(&self, layer: NodeLayer) -> &NodeColorConfig {
		&self.entries[layer.index()]
	}

	/// Color for a node; untagged nodes use the `default` entry.
	pub fn resolve(&self, node: &GraphNode) -> &NodeColorConfig {
		self.get(node.layer_or_default())
	}

	/// `(layer, config)` pairs in legend order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeLayer, &NodeColorConfig)> {
		NodeLayer::ALL.into_iter().zip(self.entries.iter())
	}
}

impl Default for GraphColorScheme {
	fn default() -> Self {
		Self::builtin()
	}
}

impl TryFrom<LayerColors> for GraphColorScheme {
	type Error = SchemeError;

	fn try_from(mut table: LayerColors) -> Result<Self, Self::Error> {
		let missing: Vec<NodeLayer> = NodeLayer::ALL
			.into_iter()
			.filter(|layer| !table.contains_key(layer))
			.collect();
		if !missing.is_empty() {
			return Err(SchemeError::MissingLayers(missing));
		}
		for (layer, config) in &table {
			config.check(*layer)?;
		}

		let mut entries = Self::builtin().entries;
		for layer in NodeLayer::ALL {
			if let Some(config) = table.remove(&layer) {
				entries[layer.index()] = config;
			}
		}
		Ok(Self { entries })
	}
}

impl TryFrom<BTreeMap<String, NodeColorConfig>> for GraphColorScheme {
	type Error = SchemeError;

	fn try_from(raw: BTreeMap<String, NodeColorConfig>) -> Result<Self, Self::Error> {
		let table = raw
			.into_iter()
			.map(|(tag, config)| Ok((tag.parse::<NodeLayer>()?, config)))
			.collect::<Result<LayerColors, SchemeError>>()?;
		Self::try_from(table)
	}
}

impl From<GraphColorScheme> for LayerColors {
	fn from(scheme: GraphColorScheme) -> Self {
		NodeLayer::ALL.into_iter().zip(scheme.entries).collect()
	}
}
