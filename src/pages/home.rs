use leptos::prelude::*;

use crate::components::knowledge_graph::{GraphNode, KnowledgeGraphCanvas, sample_graph};

fn join(values: &Option<Vec<String>>) -> Option<String> {
	values.as_ref().filter(|v| !v.is_empty()).map(|v| v.join(", "))
}

/// Details of the clicked node.
#[component]
fn NodeDetails(node: GraphNode) -> impl IntoView {
	let rows = [
		("Layer", Some(node.layer_or_default().tag().to_string())),
		("Type", node.kind.clone()),
		("Importance", node.importance.map(|i| format!("{:.2}", i))),
		("Summary", node.summary.clone()),
		("When", node.timestamp.clone()),
		("Participants", join(&node.participants)),
		("Tags", join(&node.tags)),
	];

	view! {
		<aside class="node-details">
			<h2>{node.label.clone()}</h2>
			<dl>
				{rows
					.into_iter()
					.filter_map(|(name, value)| value.map(|v| (name, v)))
					.map(|(name, value)| view! {
						<dt>{name}</dt>
						<dd>{value}</dd>
					})
					.collect_view()}
			</dl>
		</aside>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = Signal::derive(sample_graph);
	let selected = RwSignal::new(None::<GraphNode>);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<KnowledgeGraphCanvas
					data=graph_data
					fullscreen=true
					on_node_click=move |node: GraphNode| selected.set(Some(node))
				/>
				<div class="graph-overlay">
					<h1>"Agent Memory"</h1>
					<p class="subtitle">"Click a node for details. Drag to pin. Scroll to zoom."</p>
				</div>
				{move || selected.get().map(|node| view! { <NodeDetails node=node /> })}
			</div>
		</ErrorBoundary>
	}
}
