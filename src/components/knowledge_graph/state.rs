use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::binding::PreparedGraph;
use super::colors::NodeColorConfig;
use super::config::LayoutSettings;
use super::types::{GraphData, GraphNode};

#[derive(Clone, Debug)]
pub(crate) struct NodeInfo {
	pub(crate) id: String,
	pub(crate) index: usize,
	pub(crate) label: String,
	pub(crate) color: NodeColorConfig,
	pub(crate) radius: f64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeInfo {
	pub(crate) relation: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ViewTransform {
	pub(crate) x: f64,
	pub(crate) y: f64,
	pub(crate) k: f64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct DragState {
	pub(crate) active: bool,
	pub(crate) moved: bool,
	pub(crate) node_idx: Option<DefaultNodeIdx>,
	pub(crate) start_x: f64,
	pub(crate) start_y: f64,
	pub(crate) node_start_x: f32,
	pub(crate) node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct PanState {
	pub(crate) active: bool,
	pub(crate) start_x: f64,
	pub(crate) start_y: f64,
	pub(crate) transform_start_x: f64,
	pub(crate) transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct HoverState {
	pub(crate) node: Option<DefaultNodeIdx>,
	pub(crate) neighbors: HashSet<DefaultNodeIdx>,
	pub(crate) highlight_t: f64,
	pub(crate) prev_node: Option<DefaultNodeIdx>,
	pub(crate) prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// Layout engine session for one prepared graph.
///
/// Owns the `force_graph` simulation and a snapshot of the consumer's node
/// records. The simulation is the only writer of `x`, `y` and `z` on those
/// records, through [`ForceGraphState::write_positions`].
pub struct ForceGraphState {
	pub(crate) graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub(crate) transform: ViewTransform,
	pub(crate) drag: DragState,
	pub(crate) pan: PanState,
	pub(crate) hover: HoverState,
	pub(crate) width: f64,
	pub(crate) height: f64,
	pub(crate) animation_running: bool,
	pub(crate) flow_time: f64,
	/// Self-loops, drawn but never simulated.
	pub(crate) loops: Vec<(DefaultNodeIdx, Option<String>)>,
	settings: LayoutSettings,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	records: Vec<GraphNode>,
	prepared: PreparedGraph,
}

impl ForceGraphState {
	/// Register the prepared nodes and edges with a fresh simulation.
	pub fn new(
		data: GraphData,
		prepared: PreparedGraph,
		settings: &LayoutSettings,
		width: f64,
		height: f64,
	) -> Self {
		let mut graph = ForceGraph::new(settings.simulation());
		let mut input_to_idx = HashMap::new();
		let mut edges = Vec::new();
		let mut loops = Vec::new();
		let count = prepared.nodes.len().max(1) as f64;

		for (i, node) in prepared.nodes.iter().enumerate() {
			let placed = &data.nodes[node.index];
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = match (placed.x, placed.y) {
				(Some(x), Some(y)) => (x as f32, y as f32),
				_ => (
					(settings.initial_spread * angle.cos()) as f32,
					(settings.initial_spread * angle.sin()) as f32,
				),
			};

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: settings.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					index: node.index,
					label: node.label.clone(),
					color: node.color.clone(),
					radius: node.radius,
				},
			});
			input_to_idx.insert(node.index, idx);
		}

		for edge in &prepared.edges {
			if let (Some(&src), Some(&tgt)) =
				(input_to_idx.get(&edge.source), input_to_idx.get(&edge.target))
			{
				// force_graph cannot integrate an edge onto its own node
				if src == tgt {
					loops.push((src, edge.relation.clone()));
					continue;
				}
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							relation: edge.relation.clone(),
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			loops,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			settings: settings.clone(),
			records: data.nodes,
			prepared,
		}
	}

	/// The render pass this session was built from.
	pub fn prepared(&self) -> &PreparedGraph {
		&self.prepared
	}

	/// Node records with the latest positions written back.
	pub fn records(&self) -> &[GraphNode] {
		&self.records
	}

	/// Copy simulated positions onto the node records.
	pub fn sync_positions(&mut self) {
		let Self { graph, records, .. } = self;
		Self::write_into(graph, records);
	}

	/// Copy simulated positions onto `nodes`, indexed like the input node list.
	/// The layout is planar, so `z` is always `0.0`.
	pub fn write_positions(&self, nodes: &mut [GraphNode]) {
		Self::write_into(&self.graph, nodes);
	}

	fn write_into(graph: &ForceGraph<NodeInfo, EdgeInfo>, nodes: &mut [GraphNode]) {
		graph.visit_nodes(|node| {
			if let Some(record) = nodes.get_mut(node.data.user_data.index) {
				record.x = Some(node.x() as f64);
				record.y = Some(node.y() as f64);
				record.z = Some(0.0);
			}
		});
	}

	pub(crate) fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub(crate) fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space, scales with zoom like nodes
			let reach = self.settings.hit_radius.max(node.data.user_data.radius);
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	pub(crate) fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Pointer pressed: grab a node, or start panning the background.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag.active = true;
			self.drag.moved = false;
			self.drag.node_idx = Some(idx);
			self.drag.start_x = x;
			self.drag.start_y = y;
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan.active = true;
			self.pan.start_x = x;
			self.pan.start_y = y;
			self.pan.transform_start_x = self.transform.x;
			self.pan.transform_start_y = self.transform.y;
		}
	}

	/// Pointer moved: hover, drag the grabbed node, or pan.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (sdx * sdx + sdy * sdy).sqrt() <= self.settings.click_tolerance {
				return;
			}
			self.drag.moved = true;
			let (nx, ny) = (
				self.drag.node_start_x + (sdx / self.transform.k) as f32,
				self.drag.node_start_y + (sdy / self.transform.k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Pointer released. Returns the identifier of the clicked node when the
	/// press never turned into a drag.
	pub fn release(&mut self) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.moved, self.drag.node_idx) {
			(true, false, Some(idx)) => self.node_id(idx),
			_ => None,
		};
		self.cancel_pointer();
		clicked
	}

	/// Pointer left the surface.
	pub fn leave(&mut self) {
		self.cancel_pointer();
		self.set_hover(None);
	}

	fn cancel_pointer(&mut self) {
		self.drag.active = false;
		self.drag.moved = false;
		self.drag.node_idx = None;
		self.pan.active = false;
	}

	/// Zoom around a screen point.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(self.settings.min_zoom, self.settings.max_zoom);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub(crate) fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the previous highlight around for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub(crate) fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub(crate) fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub(crate) fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Advance the simulation and the highlight animation.
	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Pause or resume the simulation; returns whether it now runs.
	pub fn toggle_running(&mut self) -> bool {
		self.animation_running = !self.animation_running;
		self.animation_running
	}

	/// Unpin every node that was dragged into place.
	pub fn release_pinned(&mut self) {
		self.graph.visit_nodes_mut(|node| node.data.is_anchor = false);
	}

	/// Center the view at zoom 1.
	pub fn reset_view(&mut self) {
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};
	}

	/// Track a new surface size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
