use serde::{Deserialize, Deserializer};
use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Configuration {
	pub log_filters: String,
	/// Shown in the title of the overlay.
	pub title: String,
	/// Length of the medium played by the simulated engine.
	#[serde(with = "humantime_serde")]
	pub media_length: Duration,
	/// How often the simulated engine reports progress.
	#[serde(with = "humantime_serde")]
	pub progress_interval: Duration,
	/// Seconds a progress report may deviate from a seek target and still confirm the seek.
	#[serde(
		default = "default_seek_confirmation_tolerance",
		deserialize_with = "deserialize_seek_confirmation_tolerance"
	)]
	pub seek_confirmation_tolerance: f64,
}

fn default_seek_confirmation_tolerance() -> f64 {
	crate::relay::DEFAULT_SEEK_CONFIRMATION_TOLERANCE
}

fn deserialize_seek_confirmation_tolerance<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	let tolerance = f64::deserialize(deserializer)?;
	if tolerance.is_finite() && tolerance >= 0.0 {
		Ok(tolerance)
	} else {
		Err(serde::de::Error::custom(format!(
			"seek_confirmation_tolerance must be a non-negative number of seconds, got {tolerance}"
		)))
	}
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;

		Ok(Configuration::try_from(text.as_str())?)
	}
}

impl TryFrom<&str> for Configuration {
	type Error = toml::de::Error;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		toml::from_str(text)
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
}
