//! Turns raw mentor and mentee records into one normalized node/edge graph.
//!
//! The mentor reference on a mentee arrives either as a bare id or as a populated
//! summary. Both are collapsed to a canonical mentor id here, so nothing downstream
//! has to care which shape the repository sent.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::model::{Mentee, Mentor, MentorRef, Profile, non_blank};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
	Mentor,
	#[default]
	Mentee,
}

impl NodeKind {
	pub fn label(self) -> &'static str {
		match self {
			Self::Mentor => "Mentor",
			Self::Mentee => "Mentee",
		}
	}
}

/// Mentor and mentee collections have independent ids, so the kind is part of the key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
	pub kind: NodeKind,
	pub id: String,
}

impl NodeKey {
	pub fn mentor(id: impl Into<String>) -> Self {
		Self {
			kind: NodeKind::Mentor,
			id: id.into(),
		}
	}

	pub fn mentee(id: impl Into<String>) -> Self {
		Self {
			kind: NodeKind::Mentee,
			id: id.into(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
	pub id: String,
	pub kind: NodeKind,
	pub name: String,
	pub email: Option<String>,
	pub profile: Profile,
	pub tags: Vec<String>,
	/// Only set on mentees. A populated reference is kept whole for the detail panel.
	pub mentor_ref: Option<MentorRef>,
}

impl GraphNode {
	fn from_mentor(mentor: &Mentor) -> Self {
		Self {
			id: mentor.id.clone(),
			kind: NodeKind::Mentor,
			name: mentor.name.clone(),
			email: Some(mentor.email.trim())
				.filter(|e| !e.is_empty())
				.map(str::to_owned),
			profile: mentor.profile.clone(),
			tags: mentor.tags.clone(),
			mentor_ref: None,
		}
	}

	fn from_mentee(mentee: &Mentee) -> Self {
		Self {
			id: mentee.id.clone(),
			kind: NodeKind::Mentee,
			name: mentee.name.clone(),
			email: non_blank(&mentee.email).map(str::to_owned),
			profile: mentee.profile.clone(),
			tags: mentee.tags.clone(),
			mentor_ref: mentee.mentor.clone(),
		}
	}

	pub fn key(&self) -> NodeKey {
		NodeKey {
			kind: self.kind,
			id: self.id.clone(),
		}
	}

	pub fn mentor_id(&self) -> Option<&str> {
		self.mentor_ref.as_ref().and_then(MentorRef::canonical_id)
	}
}

/// Directed mentor -> mentee relation, by node id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
	pub mentor: String,
	pub mentee: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedGraph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	index: HashMap<NodeKey, usize>,
	mentees_by_mentor: HashMap<String, Vec<usize>>,
	mentor_by_mentee: HashMap<String, usize>,
}

/// Resolve mentor and mentee records into a graph.
///
/// Every record becomes a node. A mentee gets exactly one edge when its mentor
/// reference (either shape) names a known mentor; dangling references leave the
/// mentee isolated. Runs in O(mentors + mentees).
pub fn resolve(mentors: &[Mentor], mentees: &[Mentee]) -> ResolvedGraph {
	let mut nodes = Vec::with_capacity(mentors.len() + mentees.len());
	let mut known = HashSet::with_capacity(mentors.len());

	for mentor in mentors {
		known.insert(mentor.id.as_str());
		nodes.push(GraphNode::from_mentor(mentor));
	}

	let mut edges = Vec::new();
	for mentee in mentees {
		let node = GraphNode::from_mentee(mentee);
		if let Some(mentor_id) = node.mentor_id() {
			if known.contains(mentor_id) {
				edges.push(GraphEdge {
					mentor: mentor_id.to_owned(),
					mentee: node.id.clone(),
				});
			} else {
				debug!("mentee {} references unknown mentor {}", node.id, mentor_id);
			}
		}
		nodes.push(node);
	}

	let graph = ResolvedGraph::from_parts(nodes, edges);
	for mentor in mentors {
		if let Some(embedded) = &mentor.mentees {
			let derived = graph.mentee_count(&mentor.id);
			if embedded.len() != derived {
				debug!(
					"mentor {} embeds {} mentees but {} reference it; using {}",
					mentor.id,
					embedded.len(),
					derived,
					derived
				);
			}
		}
	}
	graph
}

impl ResolvedGraph {
	fn from_parts(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			index.entry(node.key()).or_insert(i);
		}

		let mut mentees_by_mentor: HashMap<String, Vec<usize>> = HashMap::new();
		let mut mentor_by_mentee = HashMap::with_capacity(edges.len());
		for edge in &edges {
			let mentor = index.get(&NodeKey::mentor(edge.mentor.as_str()));
			let mentee = index.get(&NodeKey::mentee(edge.mentee.as_str()));
			if let (Some(&mentor), Some(&mentee)) = (mentor, mentee) {
				mentees_by_mentor
					.entry(edge.mentor.clone())
					.or_default()
					.push(mentee);
				mentor_by_mentee.insert(edge.mentee.clone(), mentor);
			}
		}

		Self {
			nodes,
			edges,
			index,
			mentees_by_mentor,
			mentor_by_mentee,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, key: &NodeKey) -> Option<&GraphNode> {
		self.index.get(key).map(|&i| &self.nodes[i])
	}

	pub fn mentors(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter().filter(|n| n.kind == NodeKind::Mentor)
	}

	pub fn mentees(&self) -> impl Iterator<Item = &GraphNode> {
		self.nodes.iter().filter(|n| n.kind == NodeKind::Mentee)
	}

	/// Mentees whose resolved mentor is `mentor_id`, in input order.
	pub fn mentees_of<'a>(&'a self, mentor_id: &str) -> impl Iterator<Item = &'a GraphNode> + 'a {
		self.mentees_by_mentor
			.get(mentor_id)
			.into_iter()
			.flatten()
			.map(|&i| &self.nodes[i])
	}

	/// Number of mentees derived from edges. The embedded `mentees` array is ignored.
	pub fn mentee_count(&self, mentor_id: &str) -> usize {
		self.mentees_by_mentor.get(mentor_id).map_or(0, Vec::len)
	}

	/// The mentor node this mentee resolved to, if any.
	pub fn mentor_of(&self, mentee_id: &str) -> Option<&GraphNode> {
		self.mentor_by_mentee.get(mentee_id).map(|&i| &self.nodes[i])
	}

	/// Project onto the people carrying `tag`. Edges survive only when both ends do.
	pub fn retain_tagged(&self, tag: &str) -> ResolvedGraph {
		let nodes: Vec<GraphNode> = self
			.nodes
			.iter()
			.filter(|n| n.tags.iter().any(|t| t == tag))
			.cloned()
			.collect();
		let kept: HashSet<NodeKey> = nodes.iter().map(GraphNode::key).collect();
		let edges = self
			.edges
			.iter()
			.filter(|e| {
				kept.contains(&NodeKey::mentor(e.mentor.as_str()))
					&& kept.contains(&NodeKey::mentee(e.mentee.as_str()))
			})
			.cloned()
			.collect();
		Self::from_parts(nodes, edges)
	}
}
