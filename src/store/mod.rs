//! Repository capability the graph reads from and the admin edits write through.

mod admin;
mod auth;
mod cache;
mod http;
mod media;
mod memory;

pub use admin::{AdminEdit, apply_edit};
pub use auth::{Authorizer, HttpAuthorizer, StaticAuthorizer};
pub use cache::CachedDirectory;
pub use http::HttpDirectory;
pub use media::{HttpImageHost, ImageHost, InlineImageHost, attach_picture};
pub use memory::MemoryDirectory;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::model::{Entity, Mentee, Mentor, Tag};

/// CRUD over one collection. Missing records are `AppError::NotFound`.
#[async_trait(?Send)]
pub trait Repository<E: Entity> {
	async fn list(&self) -> AppResult<Vec<E>>;
	async fn get_by_id(&self, id: &str) -> AppResult<E>;
	async fn create(&self, draft: E::Draft) -> AppResult<E>;
	async fn update(&self, id: &str, draft: E::Draft) -> AppResult<E>;
	async fn delete(&self, id: &str) -> AppResult<()>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagOwner {
	Mentor(String),
	Mentee(String),
}

impl TagOwner {
	pub fn collection(&self) -> &'static str {
		match self {
			Self::Mentor(_) => Mentor::COLLECTION,
			Self::Mentee(_) => Mentee::COLLECTION,
		}
	}

	pub fn id(&self) -> &str {
		match self {
			Self::Mentor(id) | Self::Mentee(id) => id,
		}
	}
}

#[async_trait(?Send)]
pub trait TagAssignment {
	/// Replace the owner's whole tag set. Returns the stored set.
	async fn assign_tags(&self, owner: &TagOwner, tags: Vec<String>) -> AppResult<Vec<String>>;
}

/// Everything the mentorship page needs from a backend.
pub trait Directory: Repository<Mentor> + Repository<Mentee> + Repository<Tag> + TagAssignment {}

impl<T> Directory for T where
	T: Repository<Mentor> + Repository<Mentee> + Repository<Tag> + TagAssignment
{
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
	pub mentors: Vec<Mentor>,
	pub mentees: Vec<Mentee>,
	pub tags: Vec<Tag>,
}

/// Fetch all three collections concurrently. Any failure fails the whole snapshot.
pub async fn fetch_snapshot(directory: &dyn Directory) -> AppResult<Snapshot> {
	let (mentors, mentees, tags) = futures::try_join!(
		Repository::<Mentor>::list(directory),
		Repository::<Mentee>::list(directory),
		Repository::<Tag>::list(directory),
	)?;
	Ok(Snapshot {
		mentors,
		mentees,
		tags,
	})
}

/// Keep first occurrences, drop blanks.
pub(crate) fn dedup_tags(tags: Vec<String>) -> Vec<String> {
	let mut out: Vec<String> = Vec::with_capacity(tags.len());
	for tag in tags {
		let tag = tag.trim().to_owned();
		if !tag.is_empty() && !out.contains(&tag) {
			out.push(tag);
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;

	#[test]
	fn snapshot_reads_every_collection() {
		let directory = MemoryDirectory::demo();
		let snapshot = block_on(fetch_snapshot(&directory)).unwrap();
		assert!(!snapshot.mentors.is_empty());
		assert!(!snapshot.mentees.is_empty());
		assert!(!snapshot.tags.is_empty());
	}

	#[test]
	fn tag_sets_are_deduplicated_in_order() {
		let tags = dedup_tags(vec!["b".into(), "a".into(), " b ".into(), "".into()]);
		assert_eq!(tags, ["b", "a"]);
	}

	#[test]
	fn owners_know_their_collection() {
		assert_eq!(TagOwner::Mentor("m1".into()).collection(), "mentors");
		assert_eq!(TagOwner::Mentee("n1".into()).id(), "n1");
	}
}
