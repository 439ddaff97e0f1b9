//! Flat table projection of the resolved graph.

use super::{GraphNode, ResolvedGraph};
use crate::model::non_blank;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentorRow {
	pub mentor: GraphNode,
	pub mentees: Vec<GraphNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenteeRow {
	pub mentee: GraphNode,
	pub mentor_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableProjection {
	pub mentors: Vec<MentorRow>,
	pub mentees: Vec<MenteeRow>,
}

/// Case-insensitive match on name, email and university, as the listing pages do.
pub fn matches_search(node: &GraphNode, term: &str) -> bool {
	let term = term.trim().to_lowercase();
	if term.is_empty() {
		return true;
	}
	[
		Some(node.name.as_str()),
		node.email.as_deref(),
		non_blank(&node.profile.university),
	]
	.into_iter()
	.flatten()
	.any(|field| field.to_lowercase().contains(&term))
}

impl TableProjection {
	/// Rows come from `shown`, the graph after any tag filter. Mentee lists and
	/// mentor names are looked up in the full `graph`.
	pub fn build(graph: &ResolvedGraph, shown: &ResolvedGraph, term: &str) -> Self {
		let mentors = shown
			.mentors()
			.filter(|m| matches_search(m, term))
			.map(|m| MentorRow {
				mentor: m.clone(),
				mentees: graph.mentees_of(&m.id).cloned().collect(),
			})
			.collect();
		let mentees = shown
			.mentees()
			.filter(|n| matches_search(n, term))
			.map(|n| MenteeRow {
				mentee: n.clone(),
				mentor_name: graph.mentor_of(&n.id).map(|m| m.name.clone()),
			})
			.collect();
		Self { mentors, mentees }
	}
}
