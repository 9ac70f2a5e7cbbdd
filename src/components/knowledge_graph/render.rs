use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#0f1021";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EdgeShape {
	/// Endpoints coincide; there is no direction to draw.
	Hidden,
	/// Discs overlap or touch; no room for an arrow, so centres are joined.
	Joined,
	Arrow,
}

fn edge_shape(dist: f64, r1: f64, r2: f64, arrow_size: f64) -> EdgeShape {
	if dist < 0.001 {
		EdgeShape::Hidden
	} else if dist < r1 + r2 + arrow_size {
		EdgeShape::Joined
	} else {
		EdgeShape::Arrow
	}
}

/// Centre and radius of the `n`th self-loop ring on a node; rings stack upward.
fn loop_ring(x: f64, y: f64, radius: f64, n: usize) -> (f64, f64, f64) {
	let r = radius * (0.8 + 0.3 * n as f64);
	(x, y - radius - r * 0.6, r)
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.2 / k, 8.0 / k, 4.0 / k, 7.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, edge| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (r1, r2) = (n1.data.user_data.radius, n2.data.user_data.radius);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		let shape = edge_shape(dist, r1, r2, arrow_size);
		if shape == EdgeShape::Hidden {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at base alpha; t=1: highlighted edges brighten, the rest fade
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.45 + 0.45 * t, 0.7 + 0.2 * t, line_width * (1.0 + 0.4 * t))
		} else {
			(0.45 - 0.33 * t, 0.7 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(148, 163, 184, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		if shape == EdgeShape::Joined {
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2, y2);
			ctx.stroke();
			return;
		}
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(148, 163, 184, {})", arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let (true, Some(relation)) = (is_highlighted && t > 0.05, &edge.user_data.relation) {
			ctx.set_fill_style_str(&format!("rgba(226, 232, 240, {})", 0.85 * t));
			ctx.set_font(&format!("{}px sans-serif", 8.0 / k.max(0.5)));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(relation, (x1 + x2) / 2.0, (y1 + y2) / 2.0 - 3.0 / k);
			ctx.set_text_align("start");
		}
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	draw_loops(state, ctx, t);
}

fn draw_loops(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, t: f64) {
	if state.loops.is_empty() {
		return;
	}
	let k = state.transform.k;
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let is_highlighted = state.is_highlighted(idx);
		let alpha = if is_highlighted { 0.45 + 0.45 * t } else { 0.45 - 0.33 * t };
		let radius = node.data.user_data.radius;
		let (x, y) = (node.x() as f64, node.y() as f64);
		for (n, (_, relation)) in state.loops.iter().filter(|(i, _)| *i == idx).enumerate() {
			let (cx, cy, loop_r) = loop_ring(x, y, radius, n);
			ctx.set_stroke_style_str(&format!("rgba(148, 163, 184, {})", alpha));
			ctx.set_line_width(1.2 / k);
			ctx.begin_path();
			let _ = ctx.arc(cx, cy, loop_r, 0.0, 2.0 * PI);
			ctx.stroke();

			if let (true, Some(relation)) = (is_highlighted && t > 0.05, relation) {
				ctx.set_fill_style_str(&format!("rgba(226, 232, 240, {})", 0.85 * t));
				ctx.set_font(&format!("{}px sans-serif", 8.0 / k.max(0.5)));
				ctx.set_text_align("center");
				let _ = ctx.fill_text(relation, cx, cy - loop_r - 3.0 / k);
				ctx.set_text_align("start");
			}
		}
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color.primary);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let base = info.radius;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(base * (1.0 + 0.35 * t), base * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(base * (1.0 + 0.2 * t), base * (1.4 + 0.6 * t))
		} else {
			(base, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, &info.color.glow);
				let _ = gradient.add_color_stop(0.6, &info.color.glow);
				let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
				ctx.set_global_alpha(if is_hovered { 0.55 * t } else { 0.3 * t });
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
				ctx.set_global_alpha(1.0);
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color.primary);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 3.0);
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn touching_nodes_still_get_an_edge() {
		assert_eq!(edge_shape(10.0, 5.0, 5.0, 7.0), EdgeShape::Joined);
		assert_eq!(edge_shape(3.0, 5.0, 5.0, 7.0), EdgeShape::Joined);
		assert_eq!(edge_shape(40.0, 5.0, 5.0, 7.0), EdgeShape::Arrow);
		assert_eq!(edge_shape(0.0, 5.0, 5.0, 7.0), EdgeShape::Hidden);
	}

	#[test]
	fn loop_rings_sit_outside_the_node_and_stack() {
		let (cx, cy, r) = loop_ring(10.0, 20.0, 5.0, 0);
		assert_eq!(cx, 10.0);
		// ring reaches above the node without covering its centre
		assert!(cy + r < 20.0 + 5.0);
		assert!(cy + r > 20.0 - 5.0);
		assert!((20.0 - cy) > r);

		let (_, cy2, r2) = loop_ring(10.0, 20.0, 5.0, 1);
		assert!(r2 > r);
		assert!(cy2 < cy);
	}
}
