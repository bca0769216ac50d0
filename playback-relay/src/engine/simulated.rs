use crate::engine::{EngineDelegate, EngineError, MediaEngine, SurfaceHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

const MINIMUM_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Pretends to play a medium of a fixed length, reporting progress once per `tick_interval`.
///
/// Needs to be set up from within a tokio runtime.
pub struct SimulatedEngine {
	length: Duration,
	tick_interval: Duration,
	surface_id_sequence: AtomicU64,
	playback: Mutex<Option<Playback>>,
}

struct Playback {
	command_sender: mpsc::UnboundedSender<Command>,
	task: JoinHandle<()>,
}

#[derive(Debug)]
enum Command {
	Play,
	Pause,
	Seek(f64),
}

impl SimulatedEngine {
	pub fn new(length: Duration, tick_interval: Duration) -> Self {
		Self {
			length,
			tick_interval: tick_interval.max(MINIMUM_TICK_INTERVAL),
			surface_id_sequence: AtomicU64::new(0),
			playback: Mutex::new(None),
		}
	}

	fn send(&self, command: Command) {
		match self.playback.lock().as_ref() {
			// the task is gone once the medium has ended, nothing left to control then
			Some(playback) => {
				let _ = playback.command_sender.send(command);
			}
			None => debug!("Ignoring {:?}, no medium is set up.", command),
		}
	}
}

impl MediaEngine for SimulatedEngine {
	fn setup(&self, source_url: &str, delegate: Arc<dyn EngineDelegate>) -> Result<SurfaceHandle, EngineError> {
		let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::Unavailable)?;
		let (command_sender, command_receiver) = mpsc::unbounded_channel();
		let task = runtime.spawn(simulate_playback(
			self.length,
			self.tick_interval,
			delegate,
			command_receiver,
		));

		if let Some(previous) = self.playback.lock().replace(Playback { command_sender, task }) {
			debug!("Replacing previously set up medium.");
			previous.task.abort();
		}

		Ok(SurfaceHandle {
			id: self.surface_id_sequence.fetch_add(1, Relaxed),
			source_url: source_url.to_string(),
		})
	}

	fn play(&self) {
		self.send(Command::Play);
	}

	fn pause(&self) {
		self.send(Command::Pause);
	}

	fn seek(&self, fraction: f64) {
		self.send(Command::Seek(fraction));
	}

	fn remove(&self) {
		if let Some(playback) = self.playback.lock().take() {
			playback.task.abort();
		}
	}
}

impl Drop for SimulatedEngine {
	fn drop(&mut self) {
		self.remove();
	}
}

async fn simulate_playback(
	length: Duration,
	tick_interval: Duration,
	delegate: Arc<dyn EngineDelegate>,
	mut commands: mpsc::UnboundedReceiver<Command>,
) {
	if let Err(error) = delegate.on_duration(length.as_secs_f64()) {
		warn!("Duration was rejected: {}", error);
	}
	delegate.on_buffering(1.0);

	let mut position = Duration::ZERO;
	let mut is_playing = false;
	let mut ticker = interval(tick_interval);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		tokio::select! {
			command = commands.recv() => match command {
				None => return,
				Some(Command::Play) => {
					if !is_playing {
						is_playing = true;
						ticker.reset();
					}
				}
				Some(Command::Pause) => is_playing = false,
				Some(Command::Seek(fraction)) => {
					if (0.0..=1.0).contains(&fraction) {
						position = length.mul_f64(fraction);
						delegate.on_progress(position.as_secs_f64());
					} else {
						warn!("Ignoring seek to invalid fraction {}.", fraction);
					}
				}
			},
			_ = ticker.tick(), if is_playing => {
				position = (position + tick_interval).min(length);
				delegate.on_progress(position.as_secs_f64());
				if position >= length {
					delegate.on_completion();
					return;
				}
			}
		}
	}
}
