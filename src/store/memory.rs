//! In-memory backend used for demo mode and tests.
//!
//! Every operation runs inside a single `RefCell` borrow with no await point, so
//! cross-record side effects (detaching mentees, moving a mentee between mentor
//! sets) are never observable half-applied.

use std::cell::RefCell;

use async_trait::async_trait;

use super::{Repository, TagAssignment, TagOwner, dedup_tags};
use crate::error::{AppError, AppResult};
use crate::model::{
	Entity, Mentee, MenteeDraft, Mentor, MentorDraft, MentorRef, MentorSummary, Profile, Tag,
	TagDraft, Validate, non_blank,
};

#[derive(Debug, Default)]
struct Collections {
	mentors: Vec<Mentor>,
	mentees: Vec<Mentee>,
	tags: Vec<Tag>,
	next_id: u64,
}

impl Collections {
	fn next_id(&mut self, prefix: &str) -> String {
		loop {
			self.next_id += 1;
			let id = format!("{prefix}{}", self.next_id);
			let taken = self.mentors.iter().any(|m| m.id == id)
				|| self.mentees.iter().any(|m| m.id == id)
				|| self.tags.iter().any(|t| t.id == id);
			if !taken {
				return id;
			}
		}
	}

	fn mentor_mut(&mut self, id: &str) -> Option<&mut Mentor> {
		self.mentors.iter_mut().find(|m| m.id == id)
	}

	fn require_mentor(&self, id: &str) -> AppResult<()> {
		if self.mentors.iter().any(|m| m.id == id) {
			return Ok(());
		}
		Err(AppError::invalid("mentor", format!("unknown mentor `{id}`")))
	}

	fn attach(&mut self, mentor_id: &str, mentee_id: &str) {
		if let Some(mentor) = self.mentor_mut(mentor_id) {
			let set = mentor.mentees.get_or_insert_with(Vec::new);
			if !set.iter().any(|id| id == mentee_id) {
				set.push(mentee_id.to_owned());
			}
		}
	}

	fn detach(&mut self, mentor_id: &str, mentee_id: &str) {
		if let Some(set) = self.mentor_mut(mentor_id).and_then(|m| m.mentees.as_mut()) {
			set.retain(|id| id != mentee_id);
		}
	}

	/// Listings return the mentor reference populated, as the document store does.
	fn populated(&self, mentee: &Mentee) -> Mentee {
		let mut mentee = mentee.clone();
		if let Some(id) = mentee.mentor_id() {
			if let Some(mentor) = self.mentors.iter().find(|m| m.id == id) {
				mentee.mentor = Some(MentorRef::Expanded(MentorSummary {
					id: mentor.id.clone(),
					name: Some(mentor.name.clone()),
					university: mentor.profile.university.clone(),
					picture: mentor.profile.picture.clone(),
				}));
			}
		}
		mentee
	}
}

#[derive(Debug, Default)]
pub struct MemoryDirectory {
	state: RefCell<Collections>,
}

impl MemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed with records as-is. Mentee references are normalized to bare ids.
	pub fn seeded(mentors: Vec<Mentor>, mentees: Vec<Mentee>, tags: Vec<Tag>) -> Self {
		let mentees = mentees
			.into_iter()
			.map(|mut mentee| {
				mentee.mentor = mentee
					.mentor_id()
					.map(|id| MentorRef::Id(id.to_owned()));
				mentee
			})
			.collect();
		Self {
			state: RefCell::new(Collections {
				mentors,
				mentees,
				tags,
				next_id: 0,
			}),
		}
	}

	/// Sample community used when no API is configured.
	pub fn demo() -> Self {
		const UNIVERSITIES: &[&str] = &["North Tech", "City College", "Lakeside University"];
		const TAGS: &[&str] = &["web", "systems", "ml", "design"];
		const MENTORS: usize = 6;
		const MENTEES: usize = 28;

		let tags = TAGS
			.iter()
			.enumerate()
			.map(|(i, name)| Tag {
				id: format!("t{}", i + 1),
				name: (*name).to_owned(),
			})
			.collect();

		let mentors: Vec<Mentor> = (0..MENTORS)
			.map(|i| Mentor {
				id: format!("m{}", i + 1),
				name: format!("Mentor {}", i + 1),
				email: format!("mentor{}@community.dev", i + 1),
				profile: Profile {
					university: Some(UNIVERSITIES[i % UNIVERSITIES.len()].to_owned()),
					github: Some(format!("mentor{}", i + 1)),
					phone: Some(format!("555-01{:02}", i)),
					..Profile::default()
				},
				mentees: Some(Vec::new()),
				tags: vec![format!("t{}", i % TAGS.len() + 1)],
			})
			.collect();

		let mentees = (0..MENTEES)
			.map(|i| {
				// A few mentees point at a mentor that no longer exists, a few have none.
				let mentor = match i % 9 {
					7 => Some("m-retired".to_owned()),
					8 => None,
					_ => Some(format!("m{}", (rand_simple(i) * MENTORS as f64) as usize + 1)),
				};
				Mentee {
					id: format!("n{}", i + 1),
					name: format!("Mentee {}", i + 1),
					email: Some(format!("mentee{}@community.dev", i + 1)),
					profile: Profile {
						university: Some(UNIVERSITIES[(i + 1) % UNIVERSITIES.len()].to_owned()),
						linkedin: (i % 2 == 0).then(|| format!("mentee-{}", i + 1)),
						..Profile::default()
					},
					is_mentor: i == 0,
					mentor: mentor.map(MentorRef::Id),
					tags: vec![format!("t{}", (i / 2) % TAGS.len() + 1)],
				}
			})
			.collect::<Vec<_>>();

		let directory = Self::seeded(mentors, mentees, tags);
		{
			let mut state = directory.state.borrow_mut();
			let links: Vec<(String, String)> = state
				.mentees
				.iter()
				.filter_map(|n| n.mentor_id().map(|m| (m.to_owned(), n.id.clone())))
				.collect();
			for (mentor, mentee) in links {
				state.attach(&mentor, &mentee);
			}
		}
		directory
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

#[async_trait(?Send)]
impl Repository<Mentor> for MemoryDirectory {
	async fn list(&self) -> AppResult<Vec<Mentor>> {
		Ok(self.state.borrow().mentors.clone())
	}

	async fn get_by_id(&self, id: &str) -> AppResult<Mentor> {
		self.state
			.borrow()
			.mentors
			.iter()
			.find(|m| m.id == id)
			.cloned()
			.ok_or_else(|| AppError::not_found(Mentor::KIND, id))
	}

	async fn create(&self, draft: MentorDraft) -> AppResult<Mentor> {
		draft.validate()?;
		let mut state = self.state.borrow_mut();
		let mentor = Mentor::from_draft(state.next_id("m"), draft);
		state.mentors.push(mentor.clone());
		Ok(mentor)
	}

	async fn update(&self, id: &str, draft: MentorDraft) -> AppResult<Mentor> {
		draft.validate()?;
		let mut state = self.state.borrow_mut();
		let mentor = state
			.mentor_mut(id)
			.ok_or_else(|| AppError::not_found(Mentor::KIND, id))?;
		mentor.name = draft.name.trim().to_owned();
		mentor.email = draft.email.trim().to_owned();
		mentor.profile = draft.profile;
		Ok(mentor.clone())
	}

	async fn delete(&self, id: &str) -> AppResult<()> {
		let mut state = self.state.borrow_mut();
		let before = state.mentors.len();
		state.mentors.retain(|m| m.id != id);
		if state.mentors.len() == before {
			return Err(AppError::not_found(Mentor::KIND, id));
		}
		for mentee in state.mentees.iter_mut() {
			if mentee.mentor_id() == Some(id) {
				mentee.mentor = None;
			}
		}
		Ok(())
	}
}

#[async_trait(?Send)]
impl Repository<Mentee> for MemoryDirectory {
	async fn list(&self) -> AppResult<Vec<Mentee>> {
		let state = self.state.borrow();
		Ok(state.mentees.iter().map(|n| state.populated(n)).collect())
	}

	async fn get_by_id(&self, id: &str) -> AppResult<Mentee> {
		let state = self.state.borrow();
		state
			.mentees
			.iter()
			.find(|n| n.id == id)
			.map(|n| state.populated(n))
			.ok_or_else(|| AppError::not_found(Mentee::KIND, id))
	}

	async fn create(&self, draft: MenteeDraft) -> AppResult<Mentee> {
		draft.validate()?;
		let mentor_id = non_blank(&draft.mentor)
			.ok_or_else(|| AppError::invalid("mentor", "is required"))?
			.to_owned();
		let mut state = self.state.borrow_mut();
		state.require_mentor(&mentor_id)?;

		let mentee = Mentee {
			id: state.next_id("n"),
			name: draft.name.trim().to_owned(),
			email: non_blank(&draft.email).map(str::to_owned),
			profile: draft.profile,
			is_mentor: draft.is_mentor,
			mentor: Some(MentorRef::Id(mentor_id.clone())),
			tags: Vec::new(),
		};
		state.attach(&mentor_id, &mentee.id);
		state.mentees.push(mentee.clone());
		Ok(state.populated(&mentee))
	}

	/// Reassignment moves the mentee between mentor sets in the same borrow as the record update.
	async fn update(&self, id: &str, draft: MenteeDraft) -> AppResult<Mentee> {
		draft.validate()?;
		let new_mentor = non_blank(&draft.mentor).map(str::to_owned);
		let mut state = self.state.borrow_mut();
		let position = state
			.mentees
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| AppError::not_found(Mentee::KIND, id))?;
		if let Some(mentor_id) = &new_mentor {
			state.require_mentor(mentor_id)?;
		}
		let old_mentor = state.mentees[position].mentor_id().map(str::to_owned);

		if old_mentor != new_mentor {
			if let Some(old) = &old_mentor {
				state.detach(old, id);
			}
			if let Some(new) = &new_mentor {
				state.attach(new, id);
			}
		}

		let mentee = &mut state.mentees[position];
		mentee.name = draft.name.trim().to_owned();
		mentee.email = non_blank(&draft.email).map(str::to_owned);
		mentee.profile = draft.profile;
		mentee.is_mentor = draft.is_mentor;
		mentee.mentor = new_mentor.map(MentorRef::Id);
		let mentee = mentee.clone();
		Ok(state.populated(&mentee))
	}

	async fn delete(&self, id: &str) -> AppResult<()> {
		let mut state = self.state.borrow_mut();
		let position = state
			.mentees
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| AppError::not_found(Mentee::KIND, id))?;
		let removed = state.mentees.remove(position);
		if let Some(mentor) = removed.mentor_id() {
			state.detach(mentor, id);
		}
		Ok(())
	}
}

#[async_trait(?Send)]
impl Repository<Tag> for MemoryDirectory {
	async fn list(&self) -> AppResult<Vec<Tag>> {
		Ok(self.state.borrow().tags.clone())
	}

	async fn get_by_id(&self, id: &str) -> AppResult<Tag> {
		self.state
			.borrow()
			.tags
			.iter()
			.find(|t| t.id == id)
			.cloned()
			.ok_or_else(|| AppError::not_found(Tag::KIND, id))
	}

	async fn create(&self, draft: TagDraft) -> AppResult<Tag> {
		draft.validate()?;
		let mut state = self.state.borrow_mut();
		let tag = Tag {
			id: state.next_id("t"),
			name: draft.name.trim().to_owned(),
		};
		state.tags.push(tag.clone());
		Ok(tag)
	}

	async fn update(&self, id: &str, draft: TagDraft) -> AppResult<Tag> {
		draft.validate()?;
		let mut state = self.state.borrow_mut();
		let tag = state
			.tags
			.iter_mut()
			.find(|t| t.id == id)
			.ok_or_else(|| AppError::not_found(Tag::KIND, id))?;
		tag.name = draft.name.trim().to_owned();
		Ok(tag.clone())
	}

	async fn delete(&self, id: &str) -> AppResult<()> {
		let mut state = self.state.borrow_mut();
		let before = state.tags.len();
		state.tags.retain(|t| t.id != id);
		if state.tags.len() == before {
			return Err(AppError::not_found(Tag::KIND, id));
		}
		for mentor in state.mentors.iter_mut() {
			mentor.tags.retain(|t| t != id);
		}
		for mentee in state.mentees.iter_mut() {
			mentee.tags.retain(|t| t != id);
		}
		Ok(())
	}
}

#[async_trait(?Send)]
impl TagAssignment for MemoryDirectory {
	async fn assign_tags(&self, owner: &TagOwner, tags: Vec<String>) -> AppResult<Vec<String>> {
		let tags = dedup_tags(tags);
		let mut state = self.state.borrow_mut();
		if let Some(unknown) = tags.iter().find(|id| !state.tags.iter().any(|t| &t.id == *id)) {
			return Err(AppError::invalid("tags", format!("unknown tag `{unknown}`")));
		}

		let slot = match owner {
			TagOwner::Mentor(id) => state
				.mentors
				.iter_mut()
				.find(|m| &m.id == id)
				.map(|m| &mut m.tags)
				.ok_or_else(|| AppError::not_found(Mentor::KIND, id.as_str()))?,
			TagOwner::Mentee(id) => state
				.mentees
				.iter_mut()
				.find(|n| &n.id == id)
				.map(|n| &mut n.tags)
				.ok_or_else(|| AppError::not_found(Mentee::KIND, id.as_str()))?,
		};
		*slot = tags.clone();
		Ok(tags)
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;

	fn mentor_draft(name: &str) -> MentorDraft {
		MentorDraft {
			name: name.into(),
			email: format!("{}@example.org", name.to_lowercase()),
			profile: Profile::default(),
		}
	}

	fn mentee_draft(name: &str, mentor: Option<&str>) -> MenteeDraft {
		MenteeDraft {
			name: name.into(),
			mentor: mentor.map(str::to_owned),
			..MenteeDraft::default()
		}
	}

	fn embedded(directory: &MemoryDirectory, mentor: &str) -> Vec<String> {
		let mentor: Mentor = block_on(directory.get_by_id(mentor)).unwrap();
		mentor.mentees.unwrap_or_default()
	}

	#[test]
	fn mentee_creation_requires_a_known_mentor() {
		let directory = MemoryDirectory::new();
		let missing = block_on(Repository::<Mentee>::create(
			&directory,
			mentee_draft("Bo", None),
		));
		assert_eq!(missing, Err(AppError::invalid("mentor", "is required")));

		let unknown = block_on(Repository::<Mentee>::create(
			&directory,
			mentee_draft("Bo", Some("m404")),
		));
		assert!(matches!(
			unknown,
			Err(AppError::Invalid { field: "mentor", .. })
		));
	}

	#[test]
	fn listings_populate_mentor_references() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		block_on(Repository::<Mentee>::create(&directory, mentee_draft("Bo", Some(&ann.id)))).unwrap();

		let mentees: Vec<Mentee> = block_on(directory.list()).unwrap();
		let summary = mentees[0].mentor.as_ref().and_then(MentorRef::summary).unwrap();
		assert_eq!(summary.name.as_deref(), Some("Ann"));
		assert_eq!(embedded(&directory, &ann.id), vec![mentees[0].id.clone()]);
	}

	#[test]
	fn reassignment_moves_mentee_between_mentor_sets() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let dee = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Dee"))).unwrap();
		let bo = block_on(Repository::<Mentee>::create(&directory, mentee_draft("Bo", Some(&ann.id)))).unwrap();

		let mut draft = bo.to_draft();
		draft.mentor = Some(dee.id.clone());
		let moved: Mentee = block_on(Repository::<Mentee>::update(&directory, &bo.id, draft)).unwrap();

		assert_eq!(moved.mentor_id(), Some(dee.id.as_str()));
		assert!(embedded(&directory, &ann.id).is_empty());
		assert_eq!(embedded(&directory, &dee.id), vec![bo.id.clone()]);
	}

	#[test]
	fn failed_reassignment_changes_nothing() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let bo = block_on(Repository::<Mentee>::create(&directory, mentee_draft("Bo", Some(&ann.id)))).unwrap();

		let mut draft = bo.to_draft();
		draft.mentor = Some("m404".into());
		assert!(block_on(Repository::<Mentee>::update(&directory, &bo.id, draft)).is_err());

		let bo: Mentee = block_on(directory.get_by_id(&bo.id)).unwrap();
		assert_eq!(bo.mentor_id(), Some(ann.id.as_str()));
		assert_eq!(embedded(&directory, &ann.id), vec![bo.id.clone()]);
	}

	#[test]
	fn deleting_a_mentor_detaches_its_mentees() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let bo = block_on(Repository::<Mentee>::create(&directory, mentee_draft("Bo", Some(&ann.id)))).unwrap();

		block_on(Repository::<Mentor>::delete(&directory, &ann.id)).unwrap();

		let bo: Mentee = block_on(directory.get_by_id(&bo.id)).unwrap();
		assert_eq!(bo.mentor, None);
		assert_eq!(
			block_on(Repository::<Mentor>::delete(&directory, &ann.id)),
			Err(AppError::not_found("mentor", ann.id.as_str()))
		);
	}

	#[test]
	fn deleting_a_mentee_leaves_its_mentor_set() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let bo = block_on(Repository::<Mentee>::create(&directory, mentee_draft("Bo", Some(&ann.id)))).unwrap();

		block_on(Repository::<Mentee>::delete(&directory, &bo.id)).unwrap();

		assert!(embedded(&directory, &ann.id).is_empty());
	}

	#[test]
	fn tag_assignment_replaces_the_whole_set() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let rust = block_on(Repository::<Tag>::create(&directory, TagDraft { name: "rust".into() })).unwrap();
		let web = block_on(Repository::<Tag>::create(&directory, TagDraft { name: "web".into() })).unwrap();
		let owner = TagOwner::Mentor(ann.id.clone());

		block_on(directory.assign_tags(&owner, vec![rust.id.clone(), web.id.clone()])).unwrap();
		let stored = block_on(directory.assign_tags(&owner, vec![web.id.clone()])).unwrap();

		assert_eq!(stored, vec![web.id.clone()]);
		let ann: Mentor = block_on(directory.get_by_id(&ann.id)).unwrap();
		assert_eq!(ann.tags, vec![web.id]);
	}

	#[test]
	fn unknown_tags_are_rejected() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let result = block_on(directory.assign_tags(&TagOwner::Mentor(ann.id), vec!["t404".into()]));
		assert!(matches!(result, Err(AppError::Invalid { field: "tags", .. })));
	}

	#[test]
	fn deleting_a_tag_strips_assignments() {
		let directory = MemoryDirectory::new();
		let ann = block_on(Repository::<Mentor>::create(&directory, mentor_draft("Ann"))).unwrap();
		let rust = block_on(Repository::<Tag>::create(&directory, TagDraft { name: "rust".into() })).unwrap();
		block_on(directory.assign_tags(&TagOwner::Mentor(ann.id.clone()), vec![rust.id.clone()]))
			.unwrap();

		block_on(Repository::<Tag>::delete(&directory, &rust.id)).unwrap();

		let ann: Mentor = block_on(directory.get_by_id(&ann.id)).unwrap();
		assert!(ann.tags.is_empty());
	}

	#[test]
	fn demo_data_links_most_mentees() {
		let directory = MemoryDirectory::demo();
		let mentors: Vec<Mentor> = block_on(directory.list()).unwrap();
		let mentees: Vec<Mentee> = block_on(directory.list()).unwrap();
		let graph = crate::graph::resolve(&mentors, &mentees);

		assert_eq!(graph.nodes().len(), mentors.len() + mentees.len());
		assert!(graph.edges().len() < mentees.len());
		for mentor in &mentors {
			assert_eq!(
				mentor.mentees.as_ref().map_or(0, Vec::len),
				graph.mentee_count(&mentor.id)
			);
		}
	}

	#[test]
	fn updating_a_missing_mentee_is_not_found_whatever_the_mentor() {
		let directory = MemoryDirectory::new();
		let result = block_on(Repository::<Mentee>::update(
			&directory,
			"n404",
			mentee_draft("Bo", Some("m404")),
		));
		assert_eq!(result, Err(AppError::not_found("mentee", "n404")));
	}
}
