//! Image hosting: raw bytes in, stable URL out.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::info;
use reqwest::Client;
use serde::Deserialize;

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::model::{Entity, MenteeDraft, MentorDraft};

#[async_trait(?Send)]
pub trait ImageHost {
	async fn upload(&self, bytes: Vec<u8>) -> AppResult<String>;
}

#[derive(Clone, Debug)]
pub struct HttpImageHost {
	client: Client,
	endpoint: String,
}

impl HttpImageHost {
	pub fn new(base: &str) -> Self {
		Self {
			client: Client::new(),
			endpoint: format!("{}/upload", base.trim_end_matches('/')),
		}
	}
}

#[derive(Deserialize)]
struct Uploaded {
	url: String,
}

#[async_trait(?Send)]
impl ImageHost for HttpImageHost {
	async fn upload(&self, bytes: Vec<u8>) -> AppResult<String> {
		ensure_not_empty(&bytes)?;
		let response = self
			.client
			.post(&self.endpoint)
			.header("content-type", "application/octet-stream")
			.body(bytes)
			.send()
			.await?;
		if !response.status().is_success() {
			return Err(AppError::Transport(format!(
				"image upload returned {}",
				response.status()
			)));
		}
		let uploaded: Uploaded = response.json().await?;
		Ok(uploaded.url)
	}
}

/// Demo host: embeds the image as a `data:` URL.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineImageHost;

#[async_trait(?Send)]
impl ImageHost for InlineImageHost {
	async fn upload(&self, bytes: Vec<u8>) -> AppResult<String> {
		ensure_not_empty(&bytes)?;
		Ok(format!(
			"data:{};base64,{}",
			sniff_mime(&bytes),
			STANDARD.encode(&bytes)
		))
	}
}

fn ensure_not_empty(bytes: &[u8]) -> AppResult<()> {
	if bytes.is_empty() {
		return Err(AppError::invalid("picture", "image is empty"));
	}
	Ok(())
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
	match bytes {
		[0x89, b'P', b'N', b'G', ..] => "image/png",
		[0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
		[b'G', b'I', b'F', b'8', ..] => "image/gif",
		[b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
		_ => "application/octet-stream",
	}
}

/// Drafts that carry a profile picture.
pub trait Pictured {
	fn set_picture(&mut self, url: String);
}

impl Pictured for MentorDraft {
	fn set_picture(&mut self, url: String) {
		self.profile.picture = Some(url);
	}
}

impl Pictured for MenteeDraft {
	fn set_picture(&mut self, url: String) {
		self.profile.picture = Some(url);
	}
}

/// Upload an image and point the record's `picture` at it.
pub async fn attach_picture<E, R>(
	repository: &R,
	host: &dyn ImageHost,
	id: &str,
	bytes: Vec<u8>,
) -> AppResult<E>
where
	E: Entity,
	E::Draft: Pictured,
	R: Repository<E> + ?Sized,
{
	let record = repository.get_by_id(id).await?;
	let url = host.upload(bytes).await?;
	let mut draft = record.to_draft();
	draft.set_picture(url);
	let updated = repository.update(id, draft).await?;
	info!("updated picture of {} {}", E::KIND, id);
	Ok(updated)
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::model::{Mentee, Mentor};
	use crate::store::{CachedDirectory, MemoryDirectory};

	const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

	#[test]
	fn inline_host_builds_data_urls() {
		let url = block_on(InlineImageHost.upload(PNG.to_vec())).unwrap();
		assert!(url.starts_with("data:image/png;base64,"));
	}

	#[test]
	fn empty_uploads_are_rejected() {
		let result = block_on(InlineImageHost.upload(Vec::new()));
		assert_eq!(result, Err(AppError::invalid("picture", "image is empty")));
	}

	#[test]
	fn picture_lands_on_the_record_and_in_fresh_listings() {
		let directory = CachedDirectory::new(MemoryDirectory::demo());
		let before: Vec<Mentor> = block_on(directory.list()).unwrap();
		assert!(before[0].profile.picture.is_none());

		let updated: Mentor =
			block_on(attach_picture(&directory, &InlineImageHost, "m1", PNG.to_vec())).unwrap();
		let after: Vec<Mentor> = block_on(directory.list()).unwrap();

		assert!(updated.profile.picture.is_some());
		assert_eq!(after[0].profile.picture, updated.profile.picture);
	}

	#[test]
	fn mentee_pictures_keep_the_mentor_link() {
		let directory = MemoryDirectory::demo();
		let before: Mentee = block_on(directory.get_by_id("n1")).unwrap();
		let after: Mentee =
			block_on(attach_picture(&directory, &InlineImageHost, "n1", PNG.to_vec())).unwrap();
		assert_eq!(before.mentor_id(), after.mentor_id());
	}

	#[test]
	fn missing_records_upload_nothing() {
		let directory = MemoryDirectory::new();
		let result: AppResult<Mentor> =
			block_on(attach_picture(&directory, &InlineImageHost, "m404", PNG.to_vec()));
		assert_eq!(result, Err(AppError::not_found("mentor", "m404")));
	}
}
