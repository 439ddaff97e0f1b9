//! Error type shared by the repository, media and fetch paths.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
	#[error("{kind} `{id}` not found")]
	NotFound { kind: &'static str, id: String },

	#[error("invalid {field}: {reason}")]
	Invalid { field: &'static str, reason: String },

	#[error("request failed: {0}")]
	Transport(String),

	#[error("malformed payload: {0}")]
	Malformed(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
	pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
		Self::NotFound {
			kind,
			id: id.into(),
		}
	}

	pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Invalid {
			field,
			reason: reason.into(),
		}
	}
}

impl From<reqwest::Error> for AppError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			return Self::Malformed(err.to_string());
		}
		Self::Transport(err.to_string())
	}
}

impl From<serde_json::Error> for AppError {
	fn from(err: serde_json::Error) -> Self {
		Self::Malformed(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_failure() {
		assert_eq!(
			AppError::not_found("mentor", "m9").to_string(),
			"mentor `m9` not found"
		);
		assert_eq!(
			AppError::invalid("email", "must contain @").to_string(),
			"invalid email: must contain @"
		);
	}

	#[test]
	fn json_errors_are_malformed_payloads() {
		let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
		assert!(matches!(AppError::from(err), AppError::Malformed(_)));
	}
}
