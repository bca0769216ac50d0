use crate::relay::PlaybackRelay;
use crate::relay::error::RelayError;
use crate::relay::playback_state::PlaybackState;
use crate::time_format::format_time;
use std::fmt::{Display, Formatter};

/// Everything the playback chrome on top of the video surface displays.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayModel {
	pub title: String,
	pub current_time_label: String,
	pub total_time_label: String,
	/// Position of the scrubber.
	pub played_fraction: f64,
	/// Filled part of the progress bar underneath the scrubber.
	pub buffered_fraction: f64,
	pub is_playing: bool,
	pub is_finished: bool,
	pub controls_visible: bool,
}

impl Display for OverlayModel {
	fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
		let symbol = if self.is_finished {
			"■"
		} else if self.is_playing {
			"▶"
		} else {
			"⏸"
		};
		write!(
			formatter,
			"{symbol} {title} {current} / {total} ({played:.0}% played, {buffered:.0}% buffered)",
			title = self.title,
			current = self.current_time_label,
			total = self.total_time_label,
			played = self.played_fraction * 100.0,
			buffered = self.buffered_fraction * 100.0,
		)
	}
}

/// Presentation side of a [`PlaybackRelay`]: renders its state and turns gestures into commands.
#[derive(Debug)]
pub struct Overlay {
	title: String,
	controls_visible: bool,
}

impl Overlay {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			controls_visible: true,
		}
	}

	pub fn model(&self, state: &PlaybackState) -> OverlayModel {
		OverlayModel {
			title: self.title.clone(),
			current_time_label: format_time(state.current_time_seconds()),
			total_time_label: format_time(state.total_time_seconds()),
			played_fraction: state.fraction_complete(),
			buffered_fraction: state.buffered_fraction(),
			is_playing: state.is_playing(),
			is_finished: state.is_finished(),
			controls_visible: self.controls_visible,
		}
	}

	/// Shows or hides the controls. Returns whether they are visible now.
	pub fn toggle_controls(&mut self) -> bool {
		self.controls_visible = !self.controls_visible;
		self.controls_visible
	}

	/// Tap on the play/pause button.
	pub fn toggle_playback(&self, relay: &PlaybackRelay) -> Result<(), RelayError> {
		if relay.state().is_playing() {
			relay.pause()
		} else {
			relay.play()
		}
	}

	/// Drag of the scrubber to `fraction` of the medium.
	pub fn scrub(&self, relay: &PlaybackRelay, fraction: f64) -> Result<(), RelayError> {
		relay.seek(fraction)
	}
}
