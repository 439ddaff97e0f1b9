//! Whether the current caller may see contact details and make admin edits.

use async_trait::async_trait;
use log::warn;
use reqwest::Client;

#[async_trait(?Send)]
pub trait Authorizer {
	async fn is_privileged_caller(&self) -> bool;
}

/// Asks the API to verify the session cookie. Any failure means not privileged.
#[derive(Clone, Debug)]
pub struct HttpAuthorizer {
	client: Client,
	endpoint: String,
}

impl HttpAuthorizer {
	pub fn new(base: &str) -> Self {
		Self {
			client: Client::new(),
			endpoint: format!("{}/auth/verify", base.trim_end_matches('/')),
		}
	}
}

#[async_trait(?Send)]
impl Authorizer for HttpAuthorizer {
	async fn is_privileged_caller(&self) -> bool {
		match self.client.get(&self.endpoint).send().await {
			Ok(response) => response.status().is_success(),
			Err(err) => {
				warn!("authorization check failed: {err}");
				false
			}
		}
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StaticAuthorizer(pub bool);

#[async_trait(?Send)]
impl Authorizer for StaticAuthorizer {
	async fn is_privileged_caller(&self) -> bool {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;

	#[test]
	fn static_authorizer_reports_its_flag() {
		assert!(block_on(StaticAuthorizer(true).is_privileged_caller()));
		assert!(!block_on(StaticAuthorizer::default().is_privileged_caller()));
	}
}
