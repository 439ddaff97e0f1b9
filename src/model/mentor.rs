use serde::{Deserialize, Serialize};

use super::{Entity, Profile, Validate, require};
use crate::error::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
	#[serde(alias = "_id", deserialize_with = "crate::model::record_id")]
	pub id: String,
	pub name: String,
	pub email: String,
	#[serde(flatten)]
	pub profile: Profile,
	/// Mentee ids embedded by the repository. Not authoritative: counts come from the resolved graph.
	#[serde(
		default,
		deserialize_with = "crate::model::optional_id_list",
		skip_serializing_if = "Option::is_none"
	)]
	pub mentees: Option<Vec<String>>,
	#[serde(default, deserialize_with = "crate::model::id_list")]
	pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorDraft {
	pub name: String,
	pub email: String,
	#[serde(flatten)]
	pub profile: Profile,
}

impl Validate for MentorDraft {
	fn validate(&self) -> AppResult<()> {
		require("name", &self.name)?;
		require("email", &self.email)?;
		if !self.email.contains('@') {
			return Err(AppError::invalid("email", "must contain @"));
		}
		Ok(())
	}
}

impl Entity for Mentor {
	type Draft = MentorDraft;

	const COLLECTION: &'static str = "mentors";
	const KIND: &'static str = "mentor";

	fn id(&self) -> &str {
		&self.id
	}

	fn to_draft(&self) -> MentorDraft {
		MentorDraft {
			name: self.name.clone(),
			email: self.email.clone(),
			profile: self.profile.clone(),
		}
	}
}

impl Mentor {
	pub fn from_draft(id: String, draft: MentorDraft) -> Self {
		Self {
			id,
			name: draft.name.trim().to_owned(),
			email: draft.email.trim().to_owned(),
			profile: draft.profile,
			mentees: Some(Vec::new()),
			tags: Vec::new(),
		}
	}
}
