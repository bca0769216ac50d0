use crate::relay::error::RelayError;
use static_assertions::assert_obj_safe;
use std::sync::Arc;
use thiserror::Error;

pub mod simulated;

/// Handle to whatever the engine renders into. The relay never looks inside,
/// it only hands it back to the presentation layer so it can be placed beneath the overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceHandle {
	pub id: u64,
	pub source_url: String,
}

/// Callbacks delivered by a [`MediaEngine`], possibly from another thread.
pub trait EngineDelegate: Send + Sync {
	/// Elapsed playback time in seconds.
	fn on_progress(&self, elapsed: f64);
	/// Total length of the loaded medium in seconds.
	///
	/// Fails if a different length was already reported for the same medium.
	fn on_duration(&self, total: f64) -> Result<(), RelayError>;
	/// Fraction of the medium that has been loaded so far.
	fn on_buffering(&self, fraction: f64);
	fn on_completion(&self);
}

/// The media engine doing the actual decoding and playback.
///
/// Commands are fire and forget. Their effects are reported back through the
/// [`EngineDelegate`] that was registered with [`MediaEngine::setup`].
pub trait MediaEngine: Send + Sync {
	fn setup(&self, source_url: &str, delegate: Arc<dyn EngineDelegate>) -> Result<SurfaceHandle, EngineError>;
	fn play(&self);
	fn pause(&self);
	/// Jumps to the given fraction of the medium's length.
	fn seek(&self, fraction: f64);
	/// Stops playback and drops the registered delegate.
	fn remove(&self);
}

assert_obj_safe!(EngineDelegate);
assert_obj_safe!(MediaEngine);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
	#[error("Failed to set up '{source_url}': {reason}")]
	Setup { source_url: String, reason: String },
	#[error("Engine is not available.")]
	Unavailable,
}
