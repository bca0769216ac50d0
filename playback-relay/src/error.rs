use crate::configuration::ConfigurationError;
use crate::relay::error::RelayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlaybackRelayError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Failed to initialize logging: {0}")]
	Logging(#[from] tracing_subscriber::util::TryInitError),
	#[error("Playback failed: {0}")]
	Relay(#[from] RelayError),
}
