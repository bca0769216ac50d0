/// Last known playback state as reported by the engine.
///
/// `fraction_complete` is always derived from the two times, and the current time
/// never exceeds the total time once the total time is known.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlaybackState {
	current_time_seconds: f64,
	total_time_seconds: f64,
	fraction_complete: f64,
	buffered_fraction: f64,
	is_playing: bool,
	is_finished: bool,
}

impl PlaybackState {
	pub fn current_time_seconds(&self) -> f64 {
		self.current_time_seconds
	}

	pub fn total_time_seconds(&self) -> f64 {
		self.total_time_seconds
	}

	pub fn fraction_complete(&self) -> f64 {
		self.fraction_complete
	}

	pub fn buffered_fraction(&self) -> f64 {
		self.buffered_fraction
	}

	pub fn is_playing(&self) -> bool {
		self.is_playing
	}

	pub fn is_finished(&self) -> bool {
		self.is_finished
	}

	pub(super) fn advance_to(&mut self, elapsed: f64) {
		self.current_time_seconds = if self.total_time_seconds > 0.0 {
			elapsed.clamp(0.0, self.total_time_seconds)
		} else {
			elapsed.max(0.0)
		};
		self.update_fraction_complete();
	}

	pub(super) fn set_total_time(&mut self, total: f64) {
		self.total_time_seconds = total.max(0.0);
		if self.total_time_seconds > 0.0 {
			self.current_time_seconds = self.current_time_seconds.min(self.total_time_seconds);
		}
		self.update_fraction_complete();
	}

	pub(super) fn set_buffered_fraction(&mut self, fraction: f64) {
		self.buffered_fraction = fraction.clamp(0.0, 1.0);
	}

	pub(super) fn set_playing(&mut self, is_playing: bool) {
		self.is_playing = is_playing;
	}

	pub(super) fn finish(&mut self) {
		self.is_playing = false;
		self.is_finished = true;
	}

	fn update_fraction_complete(&mut self) {
		self.fraction_complete = if self.total_time_seconds > 0.0 {
			(self.current_time_seconds / self.total_time_seconds).clamp(0.0, 1.0)
		} else {
			0.0
		};
	}
}
