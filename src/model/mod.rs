//! Records exchanged with the repository: mentors, mentees and tags.

mod mentee;
mod mentor;
mod reference;
mod tag;

pub use mentee::{Mentee, MenteeDraft};
pub use mentor::{Mentor, MentorDraft};
pub use reference::{MentorRef, MentorSummary};
pub use tag::{Tag, TagDraft};

use log::warn;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppResult;

/// A persisted record living in one repository collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + 'static {
	/// Editable fields, as submitted by the admin forms.
	type Draft: Clone + Serialize + Validate + 'static;

	/// Collection name, also the REST path segment.
	const COLLECTION: &'static str;
	/// Human label used in errors and logs.
	const KIND: &'static str;

	fn id(&self) -> &str;
	fn to_draft(&self) -> Self::Draft;
}

pub trait Validate {
	fn validate(&self) -> AppResult<()>;
}

/// Contact and profile fields shared by mentors and mentees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub linkedin: Option<String>,
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub github: Option<String>,
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub leetcode: Option<String>,
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub university: Option<String>,
	#[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
	Text(String),
	Number(serde_json::Number),
	Flag(bool),
	Other(IgnoredAny),
}

/// Free-text fields typed in by hand come back as numbers or flags too. Anything
/// else counts as absent.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<Option<String>, D::Error> {
	Ok(match Option::<RawText>::deserialize(deserializer)? {
		Some(RawText::Text(text)) => Some(text),
		Some(RawText::Number(n)) => Some(n.to_string()),
		Some(RawText::Flag(flag)) => Some(flag.to_string()),
		Some(RawText::Other(_)) | None => None,
	})
}

/// Documents serialized with virtuals carry `id` next to `_id`. Keep `_id`, at any depth.
fn strip_virtual_ids(value: &mut Value) {
	match value {
		Value::Object(map) => {
			if map.contains_key("_id") {
				map.remove("id");
			}
			map.values_mut().for_each(strip_virtual_ids);
		}
		Value::Array(items) => items.iter_mut().for_each(strip_virtual_ids),
		_ => {}
	}
}

/// Decode one response body.
pub fn decode<T: DeserializeOwned>(body: &str) -> AppResult<T> {
	let mut value: Value = serde_json::from_str(body)?;
	strip_virtual_ids(&mut value);
	Ok(serde_json::from_value(value)?)
}

/// Decode a listing record by record. A record that still fails is skipped with a
/// warning; only a body that is not a JSON array fails the listing.
pub fn decode_listing<E: Entity>(body: &str) -> AppResult<Vec<E>> {
	let records: Vec<Value> = serde_json::from_str(body)?;
	Ok(records
		.into_iter()
		.enumerate()
		.filter_map(|(index, mut record)| {
			strip_virtual_ids(&mut record);
			serde_json::from_value::<E>(record)
				.inspect_err(|err| warn!("skipping {} record #{index}: {err}", E::KIND))
				.ok()
		})
		.collect())
}

/// Blank strings coming from forms count as absent.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn require(field: &'static str, value: &str) -> AppResult<()> {
	if value.trim().is_empty() {
		return Err(crate::error::AppError::invalid(field, "is required"));
	}
	Ok(())
}

pub(crate) use reference::{id_list, optional_id_list, optional_mentor_ref, record_id};

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::AppError;

	#[test]
	fn numeric_profile_fields_become_text() {
		let mentee: Mentee =
			decode(r#"{"_id":"n1","name":"Bo","phone":5550100,"github":null,"linkedin":{}}"#)
				.unwrap();
		assert_eq!(mentee.profile.phone.as_deref(), Some("5550100"));
		assert_eq!(mentee.profile.github, None);
		assert_eq!(mentee.profile.linkedin, None);
	}

	#[test]
	fn an_empty_populated_mentor_is_no_reference() {
		let mentee: Mentee = decode(r#"{"_id":"n1","name":"Bo","mentor":{}}"#).unwrap();
		assert_eq!(mentee.mentor, None);
	}

	#[test]
	fn virtual_ids_next_to_stored_ids_are_ignored() {
		let mentee: Mentee = decode(
			r#"{"_id":"n1","id":"n1","name":"Bo","mentor":{"_id":"m1","id":"m1","name":"Ann"}}"#,
		)
		.unwrap();
		assert_eq!(mentee.id, "n1");
		assert_eq!(mentee.mentor_id(), Some("m1"));

		let mentor: Mentor = decode(
			r#"{"_id":"m1","id":"m1","name":"Ann","email":"a@x","mentees":[{"_id":"n1","id":"n1"}]}"#,
		)
		.unwrap();
		assert_eq!(mentor.mentees.as_deref(), Some(&["n1".to_owned()][..]));
	}

	#[test]
	fn listings_skip_records_that_cannot_be_decoded() {
		let body = r#"[
			{"_id":"n1","name":"Bo","phone":5550100},
			{"_id":"n2"},
			{"_id":"n3","id":"n3","name":"Cy","mentor":{}}
		]"#;
		let mentees: Vec<Mentee> = decode_listing(body).unwrap();
		let ids: Vec<&str> = mentees.iter().map(|m| m.id.as_str()).collect();
		assert_eq!(ids, ["n1", "n3"]);
	}

	#[test]
	fn a_listing_that_is_not_an_array_is_malformed() {
		let result = decode_listing::<Mentor>(r#"{"error":"nope"}"#);
		assert!(matches!(result, Err(AppError::Malformed(_))));
	}
}
