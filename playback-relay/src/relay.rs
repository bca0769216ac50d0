//! Turns the asynchronous callbacks of a media engine into one consistent [`PlaybackState`].
//!
//! There is at most one engine registration at a time. Callbacks of a registration
//! that was detached or replaced in the meantime are ignored.

use crate::engine::{EngineDelegate, MediaEngine};
use crate::relay::error::RelayError;
use crate::relay::pending_seek::PendingSeek;
use crate::relay::playback_state::PlaybackState;
use crate::relay::subscription::RelaySubscription;
use crate::relay::subscription_id::SubscriptionId;
use crate::relay::subscription_id_sequence::SubscriptionIdSequence;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub mod error;
mod pending_seek;
pub mod playback_state;
pub mod subscription;
pub mod subscription_id;
mod subscription_id_sequence;

/// How far (in seconds) a progress report may be away from a seek target and still confirm it.
pub const DEFAULT_SEEK_CONFIRMATION_TOLERANCE: f64 = 1.0;

/// Mediates between a [`MediaEngine`] and the presentation layer.
///
/// Engine callbacks are the only writers of the reported times. Commands are
/// forwarded to the engine and only `play`/`pause` touch the state directly by
/// setting `is_playing` to the requested value.
pub struct PlaybackRelay {
	core: Arc<RelayCore>,
}

struct RelayCore {
	seek_confirmation_tolerance: f64,
	shared: Mutex<Shared>,
}

struct Shared {
	subscription_id_sequence: SubscriptionIdSequence,
	registration: Registration,
	state: PlaybackState,
	pending_seek: Option<PendingSeek>,
	state_sender: watch::Sender<PlaybackState>,
}

#[derive(Default)]
enum Registration {
	#[default]
	Detached,
	Active(Attachment),
	/// The engine reported completion. Commands are rejected until the next attach.
	Finished(Attachment),
}

struct Attachment {
	subscription_id: SubscriptionId,
	engine: Arc<dyn MediaEngine>,
}

/// The part of the relay that is handed to the engine.
/// Holds the relay weakly so that an engine outliving the relay doesn't keep it alive.
struct RelayDelegate {
	subscription_id: SubscriptionId,
	core: Weak<RelayCore>,
}

impl Default for PlaybackRelay {
	fn default() -> Self {
		Self::new(DEFAULT_SEEK_CONFIRMATION_TOLERANCE)
	}
}

impl PlaybackRelay {
	/// Falls back to [`DEFAULT_SEEK_CONFIRMATION_TOLERANCE`] if the tolerance isn't a finite, non-negative number.
	pub fn new(seek_confirmation_tolerance: f64) -> Self {
		let seek_confirmation_tolerance = if seek_confirmation_tolerance.is_finite() && seek_confirmation_tolerance >= 0.0 {
			seek_confirmation_tolerance
		} else {
			warn!(
				"Invalid seek confirmation tolerance of {}s, using {}s instead.",
				seek_confirmation_tolerance, DEFAULT_SEEK_CONFIRMATION_TOLERANCE
			);
			DEFAULT_SEEK_CONFIRMATION_TOLERANCE
		};
		let (state_sender, _) = watch::channel(PlaybackState::default());
		let shared = Shared {
			subscription_id_sequence: Default::default(),
			registration: Registration::Detached,
			state: PlaybackState::default(),
			pending_seek: None,
			state_sender,
		};

		Self {
			core: Arc::new(RelayCore {
				seek_confirmation_tolerance,
				shared: Mutex::new(shared),
			}),
		}
	}

	/// Registers with the engine, loads `source_url` and starts playing it.
	pub fn attach(&self, source_url: &str, engine: Arc<dyn MediaEngine>) -> Result<RelaySubscription, RelayError> {
		let (subscription_id, finished_attachment) = {
			let mut shared = self.core.shared.lock();
			if matches!(shared.registration, Registration::Active(_)) {
				return Err(RelayError::AlreadyAttached);
			}

			let finished_attachment = shared.release();
			let subscription_id = shared.subscription_id_sequence.next();
			shared.registration = Registration::Active(Attachment {
				subscription_id,
				engine: engine.clone(),
			});
			(subscription_id, finished_attachment)
		};

		if let Some(Attachment {
			subscription_id: finished_id,
			engine: finished_engine,
		}) = finished_attachment
		{
			debug!("Releasing finished {}.", finished_id);
			finished_engine.remove();
		}

		let delegate = Arc::new(RelayDelegate {
			subscription_id,
			core: Arc::downgrade(&self.core),
		});
		let surface = match engine.setup(source_url, delegate) {
			Ok(surface) => surface,
			Err(error) => {
				let mut shared = self.core.shared.lock();
				if shared.is_active(subscription_id) {
					let _ = shared.release();
				}
				warn!("Failed to attach to '{}': {}", source_url, error);
				return Err(error.into());
			}
		};

		let still_active = {
			let mut shared = self.core.shared.lock();
			let still_active = shared.is_active(subscription_id);
			if still_active {
				shared.update_state(|state| state.set_playing(true));
			}
			still_active
		};
		if still_active {
			engine.play();
		}

		info!("Attached {} to '{}'.", subscription_id, source_url);
		Ok(RelaySubscription::new(subscription_id, surface))
	}

	pub fn play(&self) -> Result<(), RelayError> {
		self.request_playing(true)
	}

	pub fn pause(&self) -> Result<(), RelayError> {
		self.request_playing(false)
	}

	/// Asks the engine to jump to `fraction` of the medium.
	///
	/// The state only follows once the engine reports progress near the target.
	/// A newer seek supersedes one that is still pending.
	pub fn seek(&self, fraction: f64) -> Result<(), RelayError> {
		if !(0.0..=1.0).contains(&fraction) {
			return Err(RelayError::OutOfRange { fraction });
		}

		let engine = {
			let mut shared = self.core.shared.lock();
			let engine = shared.active_engine()?;
			let pending_seek = PendingSeek::new(fraction, shared.state.total_time_seconds());
			if let Some(superseded) = shared.pending_seek.replace(pending_seek) {
				debug!(
					"Seek to {:?}s superseded by seek to {:?}s.",
					superseded.target_seconds(),
					pending_seek.target_seconds()
				);
			}
			engine
		};
		engine.seek(fraction);
		Ok(())
	}

	/// Unregisters from the engine and resets the state. Does nothing if already detached.
	///
	/// Once this returns, no engine callback will change the state anymore.
	pub fn detach(&self) {
		let attachment = {
			let mut shared = self.core.shared.lock();
			if matches!(shared.registration, Registration::Detached) {
				return;
			}
			shared.release()
		};

		if let Some(Attachment { subscription_id, engine }) = attachment {
			info!("Detached {}.", subscription_id);
			engine.remove();
		}
	}

	pub fn is_attached(&self) -> bool {
		matches!(self.core.shared.lock().registration, Registration::Active(_))
	}

	pub fn state(&self) -> PlaybackState {
		self.core.shared.lock().state
	}

	/// Receives every change of the [`PlaybackState`].
	pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
		self.core.shared.lock().state_sender.subscribe()
	}

	fn request_playing(&self, is_playing: bool) -> Result<(), RelayError> {
		let engine = {
			let mut shared = self.core.shared.lock();
			let engine = shared.active_engine()?;
			if shared.state.is_playing() == is_playing {
				return Ok(());
			}
			shared.update_state(|state| state.set_playing(is_playing));
			engine
		};

		if is_playing {
			engine.play();
		} else {
			engine.pause();
		}
		Ok(())
	}
}

impl Drop for PlaybackRelay {
	fn drop(&mut self) {
		self.detach();
	}
}

impl Shared {
	fn is_active(&self, subscription_id: SubscriptionId) -> bool {
		matches!(&self.registration, Registration::Active(attachment) if attachment.subscription_id == subscription_id)
	}

	fn active_engine(&self) -> Result<Arc<dyn MediaEngine>, RelayError> {
		match &self.registration {
			Registration::Active(attachment) => Ok(attachment.engine.clone()),
			Registration::Detached | Registration::Finished(_) => Err(RelayError::NotAttached),
		}
	}

	/// Resets everything to the detached defaults and hands out the previous registration.
	#[must_use = "the engine of the returned attachment must be removed"]
	fn release(&mut self) -> Option<Attachment> {
		self.pending_seek = None;
		self.update_state(|state| *state = PlaybackState::default());
		match std::mem::take(&mut self.registration) {
			Registration::Detached => None,
			Registration::Active(attachment) | Registration::Finished(attachment) => Some(attachment),
		}
	}

	fn update_state(&mut self, update: impl FnOnce(&mut PlaybackState)) {
		let mut state = self.state;
		update(&mut state);
		if state != self.state {
			self.state = state;
			self.state_sender.send_replace(state);
		}
	}
}

impl RelayCore {
	fn progress(&self, subscription_id: SubscriptionId, elapsed: f64) {
		let mut shared = self.shared.lock();
		if !shared.is_active(subscription_id) {
			debug!("Ignoring progress for inactive {}.", subscription_id);
			return;
		}
		if !elapsed.is_finite() || elapsed < 0.0 {
			warn!("Ignoring invalid progress of {}s.", elapsed);
			return;
		}

		let current_seconds = shared.state.current_time_seconds();
		let confirms_seek = shared
			.pending_seek
			.is_some_and(|seek| seek.is_confirmed_by(elapsed, current_seconds, self.seek_confirmation_tolerance));
		if confirms_seek {
			debug!("Seek confirmed at {}s.", elapsed);
			shared.pending_seek = None;
		} else if elapsed < current_seconds {
			debug!("Ignoring stale progress of {}s, already at {}s.", elapsed, current_seconds);
			return;
		}

		shared.update_state(|state| state.advance_to(elapsed));
	}

	fn duration(&self, subscription_id: SubscriptionId, total: f64) -> Result<(), RelayError> {
		let mut shared = self.shared.lock();
		if !shared.is_active(subscription_id) {
			debug!("Ignoring duration for inactive {}.", subscription_id);
			return Ok(());
		}
		if !total.is_finite() || total < 0.0 {
			warn!("Ignoring invalid duration of {}s.", total);
			return Ok(());
		}

		let previous = shared.state.total_time_seconds();
		if previous > 0.0 {
			if (previous - total).abs() > f64::EPSILON {
				warn!("Duration changed from {}s to {}s.", previous, total);
				return Err(RelayError::DurationChanged { previous, new: total });
			}
			return Ok(());
		}

		shared.update_state(|state| state.set_total_time(total));
		Ok(())
	}

	fn buffering(&self, subscription_id: SubscriptionId, fraction: f64) {
		let mut shared = self.shared.lock();
		if !shared.is_active(subscription_id) || fraction.is_nan() {
			return;
		}

		shared.update_state(|state| state.set_buffered_fraction(fraction));
	}

	fn completion(&self, subscription_id: SubscriptionId) {
		let mut shared = self.shared.lock();
		if !shared.is_active(subscription_id) {
			debug!("Ignoring completion for inactive {}.", subscription_id);
			return;
		}

		if let Registration::Active(attachment) = std::mem::take(&mut shared.registration) {
			shared.registration = Registration::Finished(attachment);
		}
		shared.pending_seek = None;
		shared.update_state(PlaybackState::finish);
		info!("Playback of {} finished.", subscription_id);
	}
}

impl EngineDelegate for RelayDelegate {
	fn on_progress(&self, elapsed: f64) {
		if let Some(core) = self.core.upgrade() {
			core.progress(self.subscription_id, elapsed);
		}
	}

	fn on_duration(&self, total: f64) -> Result<(), RelayError> {
		match self.core.upgrade() {
			Some(core) => core.duration(self.subscription_id, total),
			None => Ok(()),
		}
	}

	fn on_buffering(&self, fraction: f64) {
		if let Some(core) = self.core.upgrade() {
			core.buffering(self.subscription_id, fraction);
		}
	}

	fn on_completion(&self) {
		if let Some(core) = self.core.upgrade() {
			core.completion(self.subscription_id);
		}
	}
}
