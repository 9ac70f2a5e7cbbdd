use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{GraphResult, SchemeError};

/// Semantic category of a node: a memory layer or a business entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeLayer {
	/// Memory of a specific event or interaction.
	Episodic,
	/// Distilled fact or concept.
	Semantic,
	/// Learned how-to knowledge.
	Procedural,
	/// Memory about other memories.
	Meta,
	/// A person.
	Contact,
	/// An organisation.
	Company,
	/// A sales opportunity.
	Deal,
	/// A body of work.
	Project,
	/// Catch-all for untagged or unrecognised nodes.
	#[default]
	Default,
}

impl NodeLayer {
	/// Number of layers; the size of every color table.
	pub const COUNT: usize = 9;

	/// Every layer, in legend order.
	pub const ALL: [NodeLayer; Self::COUNT] = [
		NodeLayer::Episodic,
		NodeLayer::Semantic,
		NodeLayer::Procedural,
		NodeLayer::Meta,
		NodeLayer::Contact,
		NodeLayer::Company,
		NodeLayer::Deal,
		NodeLayer::Project,
		NodeLayer::Default,
	];

	/// Position of the layer in [`NodeLayer::ALL`] and in color tables.
	pub const fn index(self) -> usize {
		self as usize
	}

	/// The lowercase tag used on the wire.
	pub const fn tag(self) -> &'static str {
		match self {
			NodeLayer::Episodic => "episodic",
			NodeLayer::Semantic => "semantic",
			NodeLayer::Procedural => "procedural",
			NodeLayer::Meta => "meta",
			NodeLayer::Contact => "contact",
			NodeLayer::Company => "company",
			NodeLayer::Deal => "deal",
			NodeLayer::Project => "project",
			NodeLayer::Default => "default",
		}
	}

	/// Lenient parse: anything unrecognised falls back to [`NodeLayer::Default`].
	pub fn from_tag(tag: &str) -> NodeLayer {
		tag.parse().unwrap_or_default()
	}
}

impl fmt::Display for NodeLayer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

impl FromStr for NodeLayer {
	type Err = SchemeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let tag = s.trim().to_ascii_lowercase();
		NodeLayer::ALL
			.into_iter()
			.find(|layer| layer.tag() == tag)
			.ok_or_else(|| SchemeError::UnknownLayer(s.to_string()))
	}
}

impl TryFrom<String> for NodeLayer {
	type Error = SchemeError;

	fn try_from(tag: String) -> Result<Self, Self::Error> {
		tag.parse()
	}
}

impl From<NodeLayer> for String {
	fn from(layer: NodeLayer) -> Self {
		layer.tag().to_string()
	}
}

/// One visualizable unit of knowledge or entity.
///
/// `x`, `y` and `z` are output fields. Only the layout adapter writes them,
/// through [`ForceGraphState::write_positions`](super::state::ForceGraphState::write_positions).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Unique identifier within a node set.
	pub id: String,
	/// Display label.
	pub label: String,
	/// Visual layer; `None` renders as [`NodeLayer::Default`].
	#[serde(
		default,
		deserialize_with = "lenient_layer",
		skip_serializing_if = "Option::is_none"
	)]
	pub layer: Option<NodeLayer>,
	/// Free-form type string.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Importance score, nominally 0.0 to 1.0.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub importance: Option<f64>,
	/// Short summary text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	/// ISO-8601 timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
	/// Participant names, in order.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub participants: Option<Vec<String>>,
	/// Tag strings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tags: Option<Vec<String>>,
	/// Layout output.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	/// Layout output.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
	/// Layout output.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub z: Option<f64>,
}

impl GraphNode {
	/// Create an untagged node.
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			..Default::default()
		}
	}

	/// Set the layer.
	pub fn with_layer(mut self, layer: NodeLayer) -> Self {
		self.layer = Some(layer);
		self
	}

	/// Set the free-form type.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = Some(kind.into());
		self
	}

	/// Set the importance score.
	pub fn with_importance(mut self, importance: f64) -> Self {
		self.importance = Some(importance);
		self
	}

	/// Set the summary.
	pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
		self.summary = Some(summary.into());
		self
	}

	/// Set the timestamp.
	pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
		self.timestamp = Some(timestamp.into());
		self
	}

	/// Set the participants.
	pub fn with_participants<I, S>(mut self, participants: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.participants = Some(participants.into_iter().map(Into::into).collect());
		self
	}

	/// Set the tags.
	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = Some(tags.into_iter().map(Into::into).collect());
		self
	}

	/// The layer used for visual encoding.
	pub fn layer_or_default(&self) -> NodeLayer {
		self.layer.unwrap_or_default()
	}

	/// Whether the layout engine has placed this node yet.
	pub fn has_position(&self) -> bool {
		self.x.is_some() && self.y.is_some()
	}
}

/// Node records accept any layer tag; unknown ones render as `default`.
fn lenient_layer<'de, D>(deserializer: D) -> Result<Option<NodeLayer>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.map(|tag| NodeLayer::from_tag(&tag)))
}

/// Edge endpoint: a node identifier or an embedded node record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeEndpoint {
	/// Refers to a node by identifier.
	ByIdentifier(String),
	/// Embeds the node record; its identifier must still exist in the node set.
	ByReference(Box<GraphNode>),
}

impl EdgeEndpoint {
	/// The canonical identifier of either variant.
	pub fn id(&self) -> &str {
		match self {
			EdgeEndpoint::ByIdentifier(id) => id,
			EdgeEndpoint::ByReference(node) => &node.id,
		}
	}
}

impl From<&str> for EdgeEndpoint {
	fn from(id: &str) -> Self {
		EdgeEndpoint::ByIdentifier(id.to_string())
	}
}

impl From<String> for EdgeEndpoint {
	fn from(id: String) -> Self {
		EdgeEndpoint::ByIdentifier(id)
	}
}

impl From<GraphNode> for EdgeEndpoint {
	fn from(node: GraphNode) -> Self {
		EdgeEndpoint::ByReference(Box::new(node))
	}
}

/// A directed relation between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Tail of the edge.
	pub source: EdgeEndpoint,
	/// Head of the edge.
	pub target: EdgeEndpoint,
	/// Relation type, e.g. `about` or `works_at`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub relation: Option<String>,
}

impl GraphEdge {
	/// Create an untyped edge.
	pub fn new(source: impl Into<EdgeEndpoint>, target: impl Into<EdgeEndpoint>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			relation: None,
		}
	}

	/// Set the relation type.
	pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
		self.relation = Some(relation.into());
		self
	}
}

/// Nodes and edges as supplied by the consumer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// Nodes; identifiers should be unique.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Edges, in input order.
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Parse `{ "nodes": [...], "edges": [...] }`.
	pub fn from_json(json: &str) -> GraphResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn layer_index_matches_canonical_order() {
		for (i, layer) in NodeLayer::ALL.into_iter().enumerate() {
			assert_eq!(layer.index(), i);
		}
	}

	#[test]
	fn strict_parse_rejects_unknown_tag() {
		assert_eq!("Deal".parse::<NodeLayer>().ok(), Some(NodeLayer::Deal));
		assert!(matches!(
			"nonsense".parse::<NodeLayer>(),
			Err(SchemeError::UnknownLayer(tag)) if tag == "nonsense"
		));
	}

	#[test]
	fn lenient_parse_falls_back_to_default() {
		assert_eq!(NodeLayer::from_tag("semantic"), NodeLayer::Semantic);
		assert_eq!(NodeLayer::from_tag("widget"), NodeLayer::Default);
	}

	#[test]
	fn node_with_unknown_layer_deserializes_as_default() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id":"n","label":"N","layer":"widget"}"#).unwrap();
		assert_eq!(node.layer, Some(NodeLayer::Default));

		let node: GraphNode = serde_json::from_str(r#"{"id":"n","label":"N"}"#).unwrap();
		assert_eq!(node.layer, None);
		assert_eq!(node.layer_or_default(), NodeLayer::Default);
	}

	#[test]
	fn bare_layer_value_is_strict() {
		assert_eq!(
			serde_json::from_str::<NodeLayer>("\"meta\"").unwrap(),
			NodeLayer::Meta
		);
		let err = serde_json::from_str::<NodeLayer>("\"widget\"").unwrap_err();
		assert!(err.to_string().contains("Unknown layer tag: widget"));
	}

	#[test]
	fn endpoint_accepts_identifier_or_embedded_node() {
		let edge: GraphEdge = serde_json::from_str(
			r#"{"source":"a","target":{"id":"b","label":"B","layer":"contact"},"type":"about"}"#,
		)
		.unwrap();
		assert!(matches!(edge.source, EdgeEndpoint::ByIdentifier(ref id) if id == "a"));
		assert!(matches!(edge.target, EdgeEndpoint::ByReference(_)));
		assert_eq!(edge.source.id(), "a");
		assert_eq!(edge.target.id(), "b");
		assert_eq!(edge.relation.as_deref(), Some("about"));
	}

	#[test]
	fn node_type_field_maps_to_kind() {
		let node = GraphNode::new("m", "Meeting").with_kind("meeting");
		let json = serde_json::to_value(&node).unwrap();
		assert_eq!(json["type"], "meeting");
		assert!(json.get("x").is_none());
	}

	#[test]
	fn graph_data_accepts_links_alias() {
		let data = GraphData::from_json(
			r#"{"nodes":[{"id":"a","label":"A"}],"links":[{"source":"a","target":"a"}]}"#,
		)
		.unwrap();
		assert_eq!(data.edges.len(), 1);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(GraphData::from_json("{\"nodes\": 3}").is_err());
	}
}
