use std::cell::RefCell;
use std::rc::Rc;

use knowledge_graph_canvas::{
	EdgeEndpoint, ForceGraphState, GraphBinding, GraphData, GraphError, GraphNode, GraphOptions,
	NodeLayer, sample_graph,
};

const FIXTURE: &str = r#"{
	"nodes": [
		{ "id": "a", "label": "Standup notes", "layer": "episodic", "importance": 0.4 },
		{ "id": "b", "label": "Dana Ruiz", "layer": "contact", "type": "person" },
		{ "id": "c", "label": "Loose thought" },
		{ "id": "d", "label": "Mystery", "layer": "hologram" }
	],
	"edges": [
		{ "source": "a", "target": "b", "type": "about" },
		{ "source": { "id": "b", "label": "Dana Ruiz" }, "target": "c" },
		{ "source": "c", "target": "zzz", "type": "mentions" }
	]
}"#;

#[test]
fn sample_graph_is_clean() {
	let data = sample_graph();
	let prepared = GraphBinding::new(GraphOptions::default()).prepare(&data);

	assert!(prepared.diagnostics.is_empty(), "{:?}", prepared.diagnostics);
	assert_eq!(prepared.nodes.len(), data.nodes.len());
	assert_eq!(prepared.edges.len(), data.edges.len());
	assert!(data
		.edges
		.iter()
		.any(|e| matches!(e.source, EdgeEndpoint::ByReference(_)) || matches!(e.target, EdgeEndpoint::ByReference(_))));
}

#[test]
fn sample_graph_legend_covers_every_layer() {
	let prepared = GraphBinding::new(GraphOptions::default()).prepare(&sample_graph());
	let layers: Vec<NodeLayer> = prepared.legend.iter().map(|e| e.layer).collect();
	assert_eq!(layers, NodeLayer::ALL.to_vec());
}

#[test]
fn clicking_sarah_delivers_her_record() {
	let clicked: Rc<RefCell<Option<GraphNode>>> = Rc::default();
	let sink = clicked.clone();
	let binding = GraphBinding::new(
		GraphOptions::default().on_node_click(move |node| *sink.borrow_mut() = Some(node.clone())),
	);
	let data = sample_graph();
	let prepared = binding.prepare(&data);

	assert!(binding.dispatch_engine_click(&data.nodes, &prepared, "co-1"));
	let node = clicked.borrow().clone().expect("callback ran");
	assert_eq!(node.id, "co-1");
	assert_eq!(node.label, "Sarah Chen");
	assert_eq!(node.layer, Some(NodeLayer::Contact));
	assert!(node.summary.is_some());
}

#[test]
fn json_fixture_rejects_only_the_dangling_edge() {
	let data = GraphData::from_json(FIXTURE).unwrap();
	let binding = GraphBinding::new(GraphOptions::default());
	let prepared = binding.prepare(&data);

	assert_eq!(prepared.nodes.len(), 4);
	assert_eq!(prepared.edges.len(), 2);
	assert_eq!(prepared.edges[1].source_id, "b");
	match &prepared.diagnostics[..] {
		[GraphError::DanglingEdge { edge, missing, .. }] => {
			assert_eq!(*edge, 2);
			assert_eq!(missing, "zzz");
		}
		other => panic!("unexpected diagnostics: {other:?}"),
	}

	let scheme = binding.scheme();
	assert_eq!(prepared.nodes[0].color.primary, "#7C3AED");
	assert_eq!(prepared.nodes[1].color.primary, "#10B981");
	assert_eq!(&prepared.nodes[2].color, scheme.get(NodeLayer::Default));
	assert_eq!(&prepared.nodes[3].color, scheme.get(NodeLayer::Default));
}

#[test]
fn layout_writes_positions_onto_consumer_nodes() {
	let data = GraphData::from_json(FIXTURE).unwrap();
	let binding = GraphBinding::new(GraphOptions::default());
	let prepared = binding.prepare(&data);
	let mut nodes = data.nodes.clone();
	assert!(nodes.iter().all(|n| n.x.is_none()));

	let mut session = ForceGraphState::new(data, prepared, binding.layout(), 640.0, 480.0);
	for _ in 0..10 {
		session.tick(0.016);
	}
	session.write_positions(&mut nodes);
	assert!(nodes.iter().all(|n| n.has_position() && n.z == Some(0.0)));
}
