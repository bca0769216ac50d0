const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Formats seconds as `HH:MM:SS`, or `MM:SS` below one hour.
///
/// Fractions of a second are truncated. Negative and non-finite values are shown as `00:00`.
pub fn format_time(seconds: f64) -> String {
	let whole_seconds = whole_seconds(seconds);
	let hours = whole_seconds / SECONDS_PER_HOUR;
	let minutes = (whole_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
	let seconds = whole_seconds % SECONDS_PER_MINUTE;

	if hours > 0 {
		format!("{hours:02}:{minutes:02}:{seconds:02}")
	} else {
		format!("{minutes:02}:{seconds:02}")
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(seconds: f64) -> u64 {
	if !seconds.is_finite() || seconds <= 0.0 {
		return 0;
	}

	// saturates for values beyond u64::MAX
	seconds.floor() as u64
}
