//! Edits a privileged caller can make from the detail panel.

use log::info;

use super::{Directory, ImageHost, Repository, TagAssignment, TagOwner, attach_picture};
use crate::error::{AppError, AppResult};
use crate::graph::{NodeKey, NodeKind};
use crate::model::{Entity, Mentee, Mentor};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminEdit {
	/// `mentor: None` unassigns.
	Reassign {
		mentee: String,
		mentor: Option<String>,
	},
	Picture {
		key: NodeKey,
		bytes: Vec<u8>,
	},
	/// Replaces the node's whole tag set.
	Tags {
		key: NodeKey,
		tags: Vec<String>,
	},
}

/// Run one edit through the directory. Successful edits invalidate cached listings,
/// so the caller's next fetch sees them.
pub async fn apply_edit(
	directory: &dyn Directory,
	images: &dyn ImageHost,
	edit: AdminEdit,
) -> AppResult<()> {
	match edit {
		AdminEdit::Reassign { mentee, mentor } => {
			let record = Repository::<Mentee>::get_by_id(directory, &mentee).await?;
			let mut draft = record.to_draft();
			if draft.mentor == mentor {
				return Ok(());
			}
			if let Some(id) = &mentor {
				// Surfaces a missing mentor as NotFound before anything is written.
				Repository::<Mentor>::get_by_id(directory, id).await?;
			}
			draft.mentor = mentor;
			let updated = Repository::<Mentee>::update(directory, &mentee, draft).await?;
			info!(
				"reassigned mentee {} to {}",
				updated.id,
				updated.mentor_id().unwrap_or("no mentor")
			);
			Ok(())
		}
		AdminEdit::Picture { key, bytes } => {
			if bytes.is_empty() {
				return Err(AppError::invalid("picture", "image is empty"));
			}
			match key.kind {
				NodeKind::Mentor => {
					attach_picture::<Mentor, _>(directory, images, &key.id, bytes).await?;
				}
				NodeKind::Mentee => {
					attach_picture::<Mentee, _>(directory, images, &key.id, bytes).await?;
				}
			}
			Ok(())
		}
		AdminEdit::Tags { key, tags } => {
			let owner = match key.kind {
				NodeKind::Mentor => TagOwner::Mentor(key.id),
				NodeKind::Mentee => TagOwner::Mentee(key.id),
			};
			let stored = directory.assign_tags(&owner, tags).await?;
			info!(
				"{} {} tagged [{}]",
				owner.collection(),
				owner.id(),
				stored.join(", ")
			);
			Ok(())
		}
	}
}
