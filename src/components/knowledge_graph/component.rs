use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::binding::{GraphBinding, GraphOptions, LegendEntry};
use super::colors::LayerColors;
use super::config::LayoutSettings;
use super::overlay::{GraphControls, GraphLegend};
use super::render;
use super::state::ForceGraphState;
use super::types::{GraphData, GraphNode};

type Shared<T> = Rc<RefCell<Option<T>>>;

/// Force-directed knowledge graph drawn on a canvas.
///
/// The graph is re-prepared every time `data` changes. `color_scheme` must
/// cover every layer; an incomplete table is logged and the built-in scheme
/// is used. `on_node_click` receives the full node record, positions included.
#[component]
pub fn KnowledgeGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional, into)] color_scheme: Option<LayerColors>,
	#[prop(optional, into)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(default = true)] show_controls: bool,
	#[prop(default = true)] show_legend: bool,
	#[prop(optional)] layout: Option<LayoutSettings>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let mut options = GraphOptions {
		color_scheme,
		show_controls,
		show_legend,
		layout: layout.unwrap_or_default(),
		..GraphOptions::default()
	};
	if let Some(callback) = on_node_click {
		options = options.on_node_click(move |node| callback.run(node.clone()));
	}
	let binding = Rc::new(GraphBinding::new(options));

	let legend = RwSignal::new(Vec::<LegendEntry>::new());
	let running = RwSignal::new(true);

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Shared<ForceGraphState> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init, binding_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), binding.clone());

	Effect::new(move |_| {
		let snapshot = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let prepared = binding_init.prepare(&snapshot);
		legend.set(prepared.legend.clone());
		info!(
			"Rendering {} nodes and {} edges",
			prepared.nodes.len(),
			prepared.edges.len()
		);
		let mut next = ForceGraphState::new(snapshot, prepared, binding_init.layout(), w, h);
		next.animation_running = running.get_untracked();
		*state_init.borrow_mut() = Some(next);

		if fullscreen && resize_cb_init.borrow().is_none() {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// one frame loop per canvas; later runs only swap the state
		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("Canvas 2d context unavailable");
			return;
		};
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let (state_mu, binding_mu) = (state.clone(), binding.clone());
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if let Some(id) = s.release() {
				s.sync_positions();
				binding_mu.dispatch_engine_click(s.records(), s.prepared(), &id);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	let legend_view = binding
		.show_legend()
		.then(|| view! { <GraphLegend entries=legend /> });

	let controls_view = binding.show_controls().then(|| {
		let (st_toggle, st_release, st_reset) = (state.clone(), state.clone(), state.clone());
		view! {
			<GraphControls
				running=running
				on_toggle=move || {
					if let Some(ref mut s) = *st_toggle.borrow_mut() {
						running.set(s.toggle_running());
					}
				}
				on_release=move || {
					if let Some(ref mut s) = *st_release.borrow_mut() {
						s.release_pinned();
					}
				}
				on_reset=move || {
					if let Some(ref mut s) = *st_reset.borrow_mut() {
						s.reset_view();
					}
				}
			/>
		}
	});

	view! {
		<div class="knowledge-graph">
			<canvas
				node_ref=canvas_ref
				class="knowledge-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{legend_view}
			{controls_view}
		</div>
	}
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
