use crate::engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
	#[error("Relay is already attached to an engine.")]
	AlreadyAttached,
	#[error("Relay is not attached to an engine.")]
	NotAttached,
	#[error("Seek target {fraction} is outside of [0, 1].")]
	OutOfRange { fraction: f64 },
	#[error("Duration changed from {previous}s to {new}s for the same medium.")]
	DurationChanged { previous: f64, new: f64 },
	#[error("Engine error: {0}")]
	Engine(#[from] EngineError),
}
