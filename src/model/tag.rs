use serde::{Deserialize, Serialize};

use super::{Entity, Validate, require};
use crate::error::AppResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	#[serde(alias = "_id", deserialize_with = "crate::model::record_id")]
	pub id: String,
	pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
	pub name: String,
}

impl Validate for TagDraft {
	fn validate(&self) -> AppResult<()> {
		require("name", &self.name)
	}
}

impl Entity for Tag {
	type Draft = TagDraft;

	const COLLECTION: &'static str = "tags";
	const KIND: &'static str = "tag";

	fn id(&self) -> &str {
		&self.id
	}

	fn to_draft(&self) -> TagDraft {
		TagDraft {
			name: self.name.clone(),
		}
	}
}
