use leptos::prelude::*;

use super::binding::LegendEntry;

/// Swatch and name for every layer present in the graph.
#[component]
pub fn GraphLegend(#[prop(into)] entries: Signal<Vec<LegendEntry>>) -> impl IntoView {
	view! {
		<div class="graph-legend">
			{move || {
				entries
					.get()
					.into_iter()
					.map(|entry| {
						let swatch = format!("background-color: {};", entry.primary);
						view! {
							<div class="graph-legend-item" data-layer=entry.layer.tag()>
								<span class="graph-legend-swatch" style=swatch></span>
								<span class="graph-legend-label">{entry.label}</span>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}

/// Simulation controls.
#[component]
pub fn GraphControls(
	#[prop(into)] running: Signal<bool>,
	on_toggle: impl Fn() + 'static,
	on_release: impl Fn() + 'static,
	on_reset: impl Fn() + 'static,
) -> impl IntoView {
	view! {
		<div class="graph-controls">
			<button on:click=move |_| on_toggle()>
				{move || if running.get() { "Pause" } else { "Resume" }}
			</button>
			<button on:click=move |_| on_release()>"Unpin nodes"</button>
			<button on:click=move |_| on_reset()>"Reset view"</button>
		</div>
	}
}
