use force_graph::SimulationParameters;
use serde::{Deserialize, Serialize};

/// Tuning for the force layout and for pointer interaction.
///
/// Distances are in world units, so they scale with zoom like nodes do.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Attraction along edges.
	pub force_spring: f32,
	/// Upper bound on any single force.
	pub force_max: f32,
	/// Velocity scaling.
	pub node_speed: f32,
	/// Velocity decay per step.
	pub damping_factor: f32,
	/// Mass given to every node.
	pub node_mass: f32,
	/// Radius of a node with no importance score.
	pub node_radius: f64,
	/// Extra radius a node with importance 1.0 gets.
	pub importance_radius: f64,
	/// Pointer distance within which a node counts as hit.
	pub hit_radius: f64,
	/// Radius of the circle nodes start on.
	pub initial_spread: f64,
	/// Screen pixels the pointer may travel before a press becomes a drag.
	pub click_tolerance: f64,
	/// Zoom bounds.
	pub min_zoom: f64,
	/// Zoom bounds.
	pub max_zoom: f64,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			node_radius: 5.0,
			importance_radius: 5.0,
			hit_radius: 12.0,
			initial_spread: 100.0,
			click_tolerance: 4.0,
			min_zoom: 0.1,
			max_zoom: 10.0,
		}
	}
}

impl LayoutSettings {
	/// Parameters for the force simulation.
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}

	/// Drawn radius for a node with the given importance.
	pub fn radius_for(&self, importance: Option<f64>) -> f64 {
		match importance {
			Some(score) if score.is_finite() => {
				self.node_radius + self.importance_radius * score.clamp(0.0, 1.0)
			}
			_ => self.node_radius,
		}
	}
}
