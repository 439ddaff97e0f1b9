use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Mentor fields a populated mentee record carries along with its reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorSummary {
	#[serde(alias = "_id", deserialize_with = "record_id")]
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub university: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
}

/// A mentee's link to its mentor, either as stored or as populated by the repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MentorRef {
	Id(String),
	Expanded(MentorSummary),
}

impl MentorRef {
	/// The id both shapes point at; `None` for an empty reference.
	pub fn canonical_id(&self) -> Option<&str> {
		let id = match self {
			Self::Id(id) => id.as_str(),
			Self::Expanded(summary) => summary.id.as_str(),
		};
		let id = id.trim();
		(!id.is_empty()).then_some(id)
	}

	pub fn summary(&self) -> Option<&MentorSummary> {
		match self {
			Self::Expanded(summary) => Some(summary),
			Self::Id(_) => None,
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Number(serde_json::Number),
}

impl From<RawId> for String {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Text(text) => text,
			RawId::Number(n) => n.to_string(),
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
	Expanded(MentorSummary),
	Scalar(RawId),
}

impl<'de> Deserialize<'de> for MentorRef {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match RawRef::deserialize(deserializer)? {
			RawRef::Expanded(summary) => Self::Expanded(summary),
			RawRef::Scalar(raw) => Self::Id(raw.into()),
		})
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseRef {
	Known(MentorRef),
	Unknown(IgnoredAny),
}

/// A mentor reference that cannot name a mentor (`{}`, an array) is no reference.
pub(crate) fn optional_mentor_ref<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<Option<MentorRef>, D::Error> {
	Ok(match Option::<LooseRef>::deserialize(deserializer)? {
		Some(LooseRef::Known(reference)) => Some(reference),
		Some(LooseRef::Unknown(_)) | None => None,
	})
}

/// Record ids arrive as strings or numbers; both are kept as strings.
pub(crate) fn record_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	RawId::deserialize(deserializer).map(String::from)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListItem {
	Populated {
		#[serde(alias = "_id")]
		id: RawId,
	},
	Scalar(RawId),
}

impl From<RawListItem> for String {
	fn from(item: RawListItem) -> Self {
		match item {
			RawListItem::Populated { id } | RawListItem::Scalar(id) => id.into(),
		}
	}
}

/// Id lists may be populated too (`[{_id, name}]`); only the ids are kept.
pub(crate) fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
	let items = Option::<Vec<RawListItem>>::deserialize(deserializer)?;
	Ok(items
		.unwrap_or_default()
		.into_iter()
		.map(String::from)
		.collect())
}

pub(crate) fn optional_id_list<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
	let items = Option::<Vec<RawListItem>>::deserialize(deserializer)?;
	Ok(items.map(|items| items.into_iter().map(String::from).collect()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_and_numeric_ids_become_id_refs() {
		let bare: MentorRef = serde_json::from_str(r#""m1""#).unwrap();
		let numeric: MentorRef = serde_json::from_str("42").unwrap();
		assert_eq!(bare, MentorRef::Id("m1".into()));
		assert_eq!(numeric, MentorRef::Id("42".into()));
	}

	#[test]
	fn populated_refs_keep_their_summary() {
		let r: MentorRef =
			serde_json::from_str(r#"{"_id":"m1","name":"Ann","university":"X"}"#).unwrap();
		assert_eq!(r.canonical_id(), Some("m1"));
		assert_eq!(r.summary().and_then(|s| s.university.as_deref()), Some("X"));
	}

	#[test]
	fn both_shapes_share_a_canonical_id() {
		let bare = MentorRef::Id("x".into());
		let expanded = MentorRef::Expanded(MentorSummary {
			id: "x".into(),
			name: Some("Mentor X".into()),
			university: None,
			picture: None,
		});
		assert_eq!(bare.canonical_id(), expanded.canonical_id());
	}

	#[test]
	fn blank_refs_have_no_canonical_id() {
		assert_eq!(MentorRef::Id("  ".into()).canonical_id(), None);
	}
}
