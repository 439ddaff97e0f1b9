//! Build-time configuration.
//!
//! Values come from `option_env!` so a static bundle can be pointed at an API
//! without a runtime config file. Anything unparseable falls back to the default.

use log::warn;

use crate::components::force_graph::LayoutParams;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// `None` runs the page against the in-memory demo directory.
	pub api_base: Option<String>,
	/// Privilege granted to the demo caller.
	pub demo_admin: bool,
	pub layout: LayoutParams,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base: None,
			demo_admin: true,
			layout: LayoutParams::default(),
		}
	}
}

impl AppConfig {
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("MENTORSHIP_API_BASE"),
			option_env!("MENTORSHIP_LINK_DISTANCE"),
			option_env!("MENTORSHIP_DEMO_ADMIN"),
		)
	}

	fn from_values(
		api_base: Option<&str>,
		link_distance: Option<&str>,
		demo_admin: Option<&str>,
	) -> Self {
		let defaults = Self::default();
		let mut layout = defaults.layout;
		if let Some(raw) = link_distance {
			match raw.trim().parse::<f64>() {
				Ok(distance) if distance > 0.0 => layout.link_distance = distance,
				_ => warn!("ignoring MENTORSHIP_LINK_DISTANCE={raw:?}"),
			}
		}
		let demo_admin = match demo_admin.map(|v| v.trim().to_ascii_lowercase()) {
			None => defaults.demo_admin,
			Some(v) if v == "1" || v == "true" => true,
			Some(v) if v == "0" || v == "false" => false,
			Some(v) => {
				warn!("ignoring MENTORSHIP_DEMO_ADMIN={v:?}");
				defaults.demo_admin
			}
		};

		Self {
			api_base: api_base
				.map(|base| base.trim().trim_end_matches('/').to_owned())
				.filter(|base| !base.is_empty()),
			demo_admin,
			layout,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unset_environment_runs_the_demo() {
		let config = AppConfig::from_values(None, None, None);
		assert_eq!(config, AppConfig::default());
	}

	#[test]
	fn values_are_parsed_and_trimmed() {
		let config = AppConfig::from_values(Some("https://api.example.org/ "), Some("120"), Some("0"));
		assert_eq!(config.api_base.as_deref(), Some("https://api.example.org"));
		assert_eq!(config.layout.link_distance, 120.0);
		assert!(!config.demo_admin);
	}

	#[test]
	fn bad_values_fall_back_to_defaults() {
		let config = AppConfig::from_values(Some("  "), Some("far"), Some("maybe"));
		assert_eq!(config.api_base, None);
		assert_eq!(config.layout, LayoutParams::default());
		assert!(config.demo_admin);
	}
}
