/// A seek that was forwarded to the engine but not yet confirmed by a progress report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingSeek {
	/// `None` if the total time was still unknown when seeking.
	target_seconds: Option<f64>,
}

impl PendingSeek {
	pub fn new(fraction: f64, total_time_seconds: f64) -> Self {
		let target_seconds = (total_time_seconds > 0.0).then(|| fraction * total_time_seconds);
		Self { target_seconds }
	}

	pub fn target_seconds(&self) -> Option<f64> {
		self.target_seconds
	}

	/// Whether the engine landed the seek with a report of `elapsed` while the state is at `current_seconds`.
	///
	/// Engines may land anywhere from `tolerance` before the target onwards (e.g. on the next keyframe).
	/// A backward seek is only confirmed by a report that actually went back, so reports from before the
	/// seek don't count. Without a known target any progress report counts as confirmation.
	pub fn is_confirmed_by(&self, elapsed: f64, current_seconds: f64, tolerance: f64) -> bool {
		let Some(target_seconds) = self.target_seconds else {
			return true;
		};

		let has_reached_target = elapsed >= target_seconds - tolerance;
		if target_seconds < current_seconds {
			has_reached_target && elapsed < current_seconds
		} else {
			has_reached_target
		}
	}
}
