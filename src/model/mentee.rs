use serde::{Deserialize, Serialize};

use super::{Entity, MentorRef, Profile, Validate, require};
use crate::error::AppResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentee {
	#[serde(alias = "_id", deserialize_with = "crate::model::record_id")]
	pub id: String,
	pub name: String,
	#[serde(
		default,
		deserialize_with = "crate::model::optional_text",
		skip_serializing_if = "Option::is_none"
	)]
	pub email: Option<String>,
	#[serde(flatten)]
	pub profile: Profile,
	/// Mentees may also appear in the mentor collection.
	#[serde(default)]
	pub is_mentor: bool,
	#[serde(
		default,
		deserialize_with = "crate::model::optional_mentor_ref",
		skip_serializing_if = "Option::is_none"
	)]
	pub mentor: Option<MentorRef>,
	#[serde(default, deserialize_with = "crate::model::id_list")]
	pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenteeDraft {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(flatten)]
	pub profile: Profile,
	#[serde(default)]
	pub is_mentor: bool,
	/// Mentor id. Required when creating, `None` detaches on update.
	#[serde(default)]
	pub mentor: Option<String>,
}

impl Validate for MenteeDraft {
	fn validate(&self) -> AppResult<()> {
		require("name", &self.name)
	}
}

impl Entity for Mentee {
	type Draft = MenteeDraft;

	const COLLECTION: &'static str = "mentees";
	const KIND: &'static str = "mentee";

	fn id(&self) -> &str {
		&self.id
	}

	fn to_draft(&self) -> MenteeDraft {
		MenteeDraft {
			name: self.name.clone(),
			email: self.email.clone(),
			profile: self.profile.clone(),
			is_mentor: self.is_mentor,
			mentor: self.mentor_id().map(str::to_owned),
		}
	}
}

impl Mentee {
	pub fn mentor_id(&self) -> Option<&str> {
		self.mentor.as_ref().and_then(MentorRef::canonical_id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AppError;

	#[test]
	fn parses_either_mentor_shape() {
		let bare: Mentee =
			serde_json::from_str(r#"{"_id":"n1","name":"Bo","mentor":"m1","isMentor":true}"#)
				.unwrap();
		let populated: Mentee = serde_json::from_str(
			r#"{"_id":"n2","name":"Cy","mentor":{"_id":"m1","name":"Ann","picture":"p.png"}}"#,
		)
		.unwrap();

		assert!(bare.is_mentor);
		assert_eq!(bare.mentor_id(), Some("m1"));
		assert_eq!(populated.mentor_id(), Some("m1"));
		assert!(matches!(populated.mentor, Some(MentorRef::Expanded(_))));
	}

	#[test]
	fn null_mentor_is_unassigned() {
		let mentee: Mentee =
			serde_json::from_str(r#"{"_id":"n1","name":"Bo","mentor":null}"#).unwrap();
		assert_eq!(mentee.mentor, None);
		assert_eq!(mentee.to_draft().mentor, None);
	}

	#[test]
	fn draft_requires_a_name() {
		let draft = MenteeDraft::default();
		assert!(matches!(
			draft.validate(),
			Err(AppError::Invalid { field: "name", .. })
		));
	}
}
