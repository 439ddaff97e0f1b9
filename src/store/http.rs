//! HTTP/JSON backend talking to the community API.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Repository, TagAssignment, TagOwner, dedup_tags};
use crate::error::{AppError, AppResult};
use crate::model::{Entity, Validate, decode, decode_listing};

#[derive(Clone, Debug)]
pub struct HttpDirectory {
	client: Client,
	base: String,
}

impl HttpDirectory {
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			client: Client::new(),
			base: base.into().trim_end_matches('/').to_owned(),
		}
	}

	fn collection_url(&self, collection: &str) -> String {
		format!("{}/{}", self.base, collection)
	}

	fn record_url(&self, collection: &str, id: &str) -> String {
		format!(
			"{}/{}/{}",
			self.base,
			collection,
			urlencoding::encode(id)
		)
	}
}

/// Map status codes onto `AppError` and hand back the body.
async fn read_body(response: Response, kind: &'static str, id: Option<&str>) -> AppResult<String> {
	let status = response.status();
	if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
		return Err(AppError::not_found(kind, id));
	}
	if !status.is_success() {
		return Err(AppError::Transport(format!("{kind} request returned {status}")));
	}
	Ok(response.text().await?)
}

async fn read_json<T: DeserializeOwned>(
	response: Response,
	kind: &'static str,
	id: Option<&str>,
) -> AppResult<T> {
	decode(&read_body(response, kind, id).await?)
}

fn delete_outcome(status: StatusCode, kind: &'static str, id: &str) -> AppResult<()> {
	match status {
		StatusCode::NOT_FOUND => Err(AppError::not_found(kind, id)),
		status if status.is_success() => Ok(()),
		status => Err(AppError::Transport(format!("{kind} delete returned {status}"))),
	}
}

#[async_trait(?Send)]
impl<E: Entity> Repository<E> for HttpDirectory {
	async fn list(&self) -> AppResult<Vec<E>> {
		let url = self.collection_url(E::COLLECTION);
		debug!("GET {url}");
		let response = self.client.get(url).send().await?;
		decode_listing(&read_body(response, E::KIND, None).await?)
	}

	async fn get_by_id(&self, id: &str) -> AppResult<E> {
		let response = self
			.client
			.get(self.record_url(E::COLLECTION, id))
			.send()
			.await?;
		read_json(response, E::KIND, Some(id)).await
	}

	async fn create(&self, draft: E::Draft) -> AppResult<E> {
		draft.validate()?;
		let response = self
			.client
			.post(self.collection_url(E::COLLECTION))
			.json(&draft)
			.send()
			.await?;
		read_json(response, E::KIND, None).await
	}

	async fn update(&self, id: &str, draft: E::Draft) -> AppResult<E> {
		draft.validate()?;
		let response = self
			.client
			.put(self.record_url(E::COLLECTION, id))
			.json(&draft)
			.send()
			.await?;
		read_json(response, E::KIND, Some(id)).await
	}

	async fn delete(&self, id: &str) -> AppResult<()> {
		let response = self
			.client
			.delete(self.record_url(E::COLLECTION, id))
			.send()
			.await?;
		delete_outcome(response.status(), E::KIND, id)
	}
}

#[derive(Serialize, Deserialize)]
struct TagSet {
	#[serde(deserialize_with = "crate::model::id_list")]
	tags: Vec<String>,
}

#[async_trait(?Send)]
impl TagAssignment for HttpDirectory {
	async fn assign_tags(&self, owner: &TagOwner, tags: Vec<String>) -> AppResult<Vec<String>> {
		let url = format!("{}/tags", self.record_url(owner.collection(), owner.id()));
		let body = TagSet {
			tags: dedup_tags(tags),
		};
		let response = self.client.put(url).json(&body).send().await?;
		let kind = match owner {
			TagOwner::Mentor(_) => "mentor",
			TagOwner::Mentee(_) => "mentee",
		};
		let stored: TagSet = read_json(response, kind, Some(owner.id())).await?;
		Ok(stored.tags)
	}
}
