use super::types::{GraphData, GraphEdge, GraphNode, NodeLayer};

/// Reference graph: an agent's memories about a customer account.
pub fn sample_graph() -> GraphData {
	let sarah = GraphNode::new("co-1", "Sarah Chen")
		.with_layer(NodeLayer::Contact)
		.with_kind("person")
		.with_importance(0.9)
		.with_summary("VP Engineering at Acme, technical decision maker")
		.with_tags(["decision-maker", "technical"]);

	let nodes = vec![
		GraphNode::new("ep-1", "Discovery call with Sarah")
			.with_layer(NodeLayer::Episodic)
			.with_kind("meeting")
			.with_importance(0.8)
			.with_summary("Walked through current data pipeline pain points")
			.with_timestamp("2024-03-04T15:00:00Z")
			.with_participants(["Sarah Chen", "Marcus Webb"])
			.with_tags(["call", "discovery"]),
		GraphNode::new("ep-2", "Pricing email thread")
			.with_layer(NodeLayer::Episodic)
			.with_kind("email")
			.with_importance(0.6)
			.with_summary("Sarah asked for volume tiers above 50 seats")
			.with_timestamp("2024-03-11T09:20:00Z")
			.with_participants(["Sarah Chen"])
			.with_tags(["pricing"]),
		GraphNode::new("ep-3", "Technical deep dive")
			.with_layer(NodeLayer::Episodic)
			.with_kind("meeting")
			.with_importance(0.7)
			.with_summary("Reviewed SSO and audit log requirements with James")
			.with_timestamp("2024-03-18T17:30:00Z")
			.with_participants(["Sarah Chen", "James Park"])
			.with_tags(["security", "call"]),
		GraphNode::new("sem-1", "Acme prefers annual contracts")
			.with_layer(NodeLayer::Semantic)
			.with_kind("fact")
			.with_importance(0.7)
			.with_tags(["pricing", "procurement"]),
		GraphNode::new("sem-2", "Security review required for vendors")
			.with_layer(NodeLayer::Semantic)
			.with_kind("fact")
			.with_importance(0.8)
			.with_tags(["security"]),
		GraphNode::new("sem-3", "Sarah prefers async updates")
			.with_layer(NodeLayer::Semantic)
			.with_kind("preference")
			.with_importance(0.5),
		GraphNode::new("proc-1", "Enterprise onboarding checklist")
			.with_layer(NodeLayer::Procedural)
			.with_kind("playbook")
			.with_importance(0.6)
			.with_summary("SSO setup, data import, admin training"),
		GraphNode::new("proc-2", "Security questionnaire workflow")
			.with_layer(NodeLayer::Procedural)
			.with_kind("playbook")
			.with_importance(0.5),
		GraphNode::new("meta-1", "Confidence: deal timeline")
			.with_layer(NodeLayer::Meta)
			.with_kind("reflection")
			.with_importance(0.4)
			.with_summary("Timeline estimate rests on a single conversation"),
		sarah.clone(),
		GraphNode::new("co-2", "James Park")
			.with_layer(NodeLayer::Contact)
			.with_kind("person")
			.with_importance(0.6)
			.with_summary("Security lead at Acme"),
		GraphNode::new("cmp-1", "Acme Corp")
			.with_layer(NodeLayer::Company)
			.with_kind("customer")
			.with_importance(1.0)
			.with_tags(["enterprise"]),
		GraphNode::new("pr-1", "Pipeline migration")
			.with_layer(NodeLayer::Project)
			.with_kind("implementation")
			.with_importance(0.7),
		GraphNode::new("pr-2", "SSO rollout")
			.with_layer(NodeLayer::Project)
			.with_kind("implementation")
			.with_importance(0.5),
		GraphNode::new("deal-1", "Acme Enterprise, 120 seats")
			.with_layer(NodeLayer::Deal)
			.with_kind("opportunity")
			.with_importance(0.9)
			.with_summary("Annual contract, security review pending")
			.with_timestamp("2024-03-20T00:00:00Z"),
		GraphNode::new("note-1", "Untriaged note").with_importance(0.2),
	];

	let edges = vec![
		GraphEdge::new("ep-1", sarah).with_relation("involves"),
		GraphEdge::new("ep-2", "co-1").with_relation("involves"),
		GraphEdge::new("ep-3", "co-1").with_relation("involves"),
		GraphEdge::new("ep-3", "co-2").with_relation("involves"),
		GraphEdge::new("co-1", "cmp-1").with_relation("works_at"),
		GraphEdge::new("co-2", "cmp-1").with_relation("works_at"),
		GraphEdge::new("sem-1", "cmp-1").with_relation("about"),
		GraphEdge::new("sem-2", "cmp-1").with_relation("about"),
		GraphEdge::new("sem-3", "co-1").with_relation("about"),
		GraphEdge::new("ep-2", "sem-1").with_relation("derived"),
		GraphEdge::new("ep-3", "sem-2").with_relation("derived"),
		GraphEdge::new("proc-2", "sem-2").with_relation("applies_to"),
		GraphEdge::new("proc-1", "pr-2").with_relation("applies_to"),
		GraphEdge::new("pr-1", "cmp-1").with_relation("for"),
		GraphEdge::new("pr-2", "cmp-1").with_relation("for"),
		GraphEdge::new("deal-1", "cmp-1").with_relation("with"),
		GraphEdge::new("deal-1", "co-1").with_relation("champion"),
		GraphEdge::new("meta-1", "deal-1").with_relation("about"),
		GraphEdge::new("note-1", "ep-1").with_relation("mentions"),
	];

	GraphData { nodes, edges }
}
