//! What the detail panel shows for a selected node.
//!
//! Contact fields are disclosed only to privileged callers. The node itself always
//! carries them; this projection is where the privilege flag is enforced.

use super::{GraphNode, NodeKey, NodeKind, ResolvedGraph};
use crate::model::{MentorRef, non_blank};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocialLink {
	pub label: &'static str,
	pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contact {
	pub email: Option<String>,
	pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MentorLine {
	Assigned {
		id: String,
		name: String,
		university: Option<String>,
		picture: Option<String>,
	},
	Unassigned,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDetails {
	pub key: NodeKey,
	pub name: String,
	pub kind: NodeKind,
	pub university: Option<String>,
	pub picture: Option<String>,
	pub links: Vec<SocialLink>,
	pub contact: Option<Contact>,
	/// Mentees only.
	pub mentor: Option<MentorLine>,
	/// Mentors only, derived from edges.
	pub mentee_count: Option<usize>,
}

pub fn describe(node: &GraphNode, graph: &ResolvedGraph, privileged: bool) -> NodeDetails {
	let profile = &node.profile;
	let contact = privileged.then(|| Contact {
		email: node.email.clone(),
		phone: non_blank(&profile.phone).map(str::to_owned),
	});
	let (mentor, mentee_count) = match node.kind {
		NodeKind::Mentor => (None, Some(graph.mentee_count(&node.id))),
		NodeKind::Mentee => (Some(enrich_mentor(node, graph)), None),
	};

	NodeDetails {
		key: node.key(),
		name: node.name.clone(),
		kind: node.kind,
		university: non_blank(&profile.university).map(str::to_owned),
		picture: non_blank(&profile.picture).map(str::to_owned),
		links: social_links(node),
		contact,
		mentor,
		mentee_count,
	}
}

/// Details for a node that is currently shown (`shown` is the graph after any tag
/// filter). Enrichment and counts use the full `graph`, so a mentor hidden by the
/// filter still enriches its mentee.
pub fn describe_shown(
	key: &NodeKey,
	shown: &ResolvedGraph,
	graph: &ResolvedGraph,
	privileged: bool,
) -> Option<NodeDetails> {
	shown.node(key)?;
	graph.node(key).map(|node| describe(node, graph, privileged))
}

/// Fill in the mentor line from the populated reference, or from the mentor
/// nodes already in memory when only a bare id is known.
fn enrich_mentor(node: &GraphNode, graph: &ResolvedGraph) -> MentorLine {
	let Some(reference) = &node.mentor_ref else {
		return MentorLine::Unassigned;
	};
	let Some(id) = reference.canonical_id() else {
		return MentorLine::Unassigned;
	};
	let local = graph.node(&NodeKey::mentor(id));

	match reference {
		MentorRef::Expanded(summary) => MentorLine::Assigned {
			id: id.to_owned(),
			name: summary
				.name
				.clone()
				.or_else(|| local.map(|m| m.name.clone()))
				.unwrap_or_default(),
			university: non_blank(&summary.university)
				.or_else(|| local.and_then(|m| non_blank(&m.profile.university)))
				.map(str::to_owned),
			picture: non_blank(&summary.picture)
				.or_else(|| local.and_then(|m| non_blank(&m.profile.picture)))
				.map(str::to_owned),
		},
		MentorRef::Id(_) => match local {
			Some(mentor) => MentorLine::Assigned {
				id: id.to_owned(),
				name: mentor.name.clone(),
				university: non_blank(&mentor.profile.university).map(str::to_owned),
				picture: non_blank(&mentor.profile.picture).map(str::to_owned),
			},
			None => MentorLine::Unassigned,
		},
	}
}

fn social_links(node: &GraphNode) -> Vec<SocialLink> {
	let profile = &node.profile;
	[
		("LinkedIn", &profile.linkedin, "https://www.linkedin.com/in/"),
		("GitHub", &profile.github, "https://github.com/"),
		("LeetCode", &profile.leetcode, "https://leetcode.com/u/"),
	]
	.into_iter()
	.filter_map(|(label, value, prefix)| {
		let value = non_blank(value)?;
		let url = if value.starts_with("http://") || value.starts_with("https://") {
			value.to_owned()
		} else {
			format!("{prefix}{}", value.trim_start_matches('@'))
		};
		Some(SocialLink { label, url })
	})
	.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::resolve;
	use crate::model::{Mentee, Mentor, MentorSummary, Profile};

	fn ann() -> Mentor {
		Mentor {
			id: "m1".into(),
			name: "Ann".into(),
			email: "ann@example.org".into(),
			profile: Profile {
				university: Some("Uni A".into()),
				picture: Some("https://img/ann.png".into()),
				..Profile::default()
			},
			mentees: None,
			tags: Vec::new(),
		}
	}

	fn bo(mentor: Option<MentorRef>) -> Mentee {
		Mentee {
			id: "n1".into(),
			name: "Bo".into(),
			email: Some("bo@example.org".into()),
			profile: Profile {
				phone: Some("555-0100".into()),
				github: Some("bo".into()),
				linkedin: Some("https://linkedin.com/in/bo".into()),
				..Profile::default()
			},
			is_mentor: false,
			mentor,
			tags: Vec::new(),
		}
	}

	#[test]
	fn contact_fields_need_privilege() {
		let graph = resolve(&[ann()], &[bo(Some(MentorRef::Id("m1".into())))]);
		let node = graph.node(&NodeKey::mentee("n1")).unwrap();

		let public = describe(node, &graph, false);
		let admin = describe(node, &graph, true);

		assert_eq!(public.contact, None);
		assert_eq!(
			admin.contact,
			Some(Contact {
				email: Some("bo@example.org".into()),
				phone: Some("555-0100".into()),
			})
		);
		assert_eq!(NodeDetails { contact: None, ..admin }, public);
	}

	#[test]
	fn bare_reference_is_enriched_from_loaded_mentors() {
		let graph = resolve(&[ann()], &[bo(Some(MentorRef::Id("m1".into())))]);
		let node = graph.node(&NodeKey::mentee("n1")).unwrap();

		assert_eq!(
			describe(node, &graph, false).mentor,
			Some(MentorLine::Assigned {
				id: "m1".into(),
				name: "Ann".into(),
				university: Some("Uni A".into()),
				picture: Some("https://img/ann.png".into()),
			})
		);
	}

	#[test]
	fn unknown_bare_reference_reads_as_unassigned() {
		let graph = resolve(&[ann()], &[bo(Some(MentorRef::Id("m404".into())))]);
		let node = graph.node(&NodeKey::mentee("n1")).unwrap();
		assert_eq!(describe(node, &graph, true).mentor, Some(MentorLine::Unassigned));
	}

	#[test]
	fn populated_reference_needs_no_lookup() {
		let summary = MentorSummary {
			id: "m9".into(),
			name: Some("Nia".into()),
			university: Some("X".into()),
			picture: None,
		};
		let graph = resolve(&[], &[bo(Some(MentorRef::Expanded(summary)))]);
		let node = graph.node(&NodeKey::mentee("n1")).unwrap();

		assert_eq!(
			describe(node, &graph, false).mentor,
			Some(MentorLine::Assigned {
				id: "m9".into(),
				name: "Nia".into(),
				university: Some("X".into()),
				picture: None,
			})
		);
	}

	#[test]
	fn mentors_report_edge_derived_counts() {
		let graph = resolve(&[ann()], &[bo(Some(MentorRef::Id("m1".into())))]);
		let node = graph.node(&NodeKey::mentor("m1")).unwrap();
		let details = describe(node, &graph, false);
		assert_eq!(details.mentee_count, Some(1));
		assert_eq!(details.mentor, None);
	}

	#[test]
	fn handles_become_profile_urls() {
		let graph = resolve(&[], &[bo(None)]);
		let node = graph.node(&NodeKey::mentee("n1")).unwrap();
		let links = describe(node, &graph, false).links;
		assert_eq!(
			links,
			vec![
				SocialLink {
					label: "LinkedIn",
					url: "https://linkedin.com/in/bo".into()
				},
				SocialLink {
					label: "GitHub",
					url: "https://github.com/bo".into()
				},
			]
		);
	}

	#[test]
	fn hidden_mentor_still_enriches_a_shown_mentee() {
		let mut ann = ann();
		ann.tags = vec!["web".into()];
		let mut bo = bo(Some(MentorRef::Id("m1".into())));
		bo.tags = vec!["ml".into()];
		let graph = resolve(&[ann], &[bo]);
		let shown = graph.retain_tagged("ml");

		let key = NodeKey::mentee("n1");
		let details = describe_shown(&key, &shown, &graph, true).unwrap();
		assert!(matches!(
			details.mentor,
			Some(MentorLine::Assigned { ref name, .. }) if name == "Ann"
		));

		let ann_key = NodeKey::mentor("m1");
		assert_eq!(describe_shown(&ann_key, &shown, &graph, true), None);
		let ann_details = describe_shown(&ann_key, &graph, &graph, false).unwrap();
		assert_eq!(ann_details.mentee_count, Some(1));
	}
}
