use crate::engine::{EngineDelegate, EngineError, MediaEngine, SurfaceHandle};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum EngineCommand {
	Setup(String),
	Play,
	Pause,
	Seek(f64),
	Remove,
}

/// Records every command and keeps the registered delegate so tests can play the engine's part.
#[derive(Default)]
pub struct FakeEngine {
	commands: Mutex<Vec<EngineCommand>>,
	delegate: Mutex<Option<Arc<dyn EngineDelegate>>>,
	setup_error: Option<EngineError>,
}

impl FakeEngine {
	pub fn failing_with(error: EngineError) -> Self {
		Self {
			setup_error: Some(error),
			..Default::default()
		}
	}

	pub fn commands(&self) -> Vec<EngineCommand> {
		self.commands.lock().clone()
	}

	pub fn count(&self, command: &EngineCommand) -> usize {
		self.commands.lock().iter().filter(|recorded| *recorded == command).count()
	}

	pub fn delegate(&self) -> Arc<dyn EngineDelegate> {
		self.delegate
			.lock()
			.clone()
			.expect("No delegate registered, engine was never set up or already removed.")
	}
}

impl MediaEngine for FakeEngine {
	fn setup(&self, source_url: &str, delegate: Arc<dyn EngineDelegate>) -> Result<SurfaceHandle, EngineError> {
		self.commands.lock().push(EngineCommand::Setup(source_url.to_string()));
		if let Some(error) = &self.setup_error {
			return Err(error.clone());
		}

		*self.delegate.lock() = Some(delegate);
		Ok(SurfaceHandle {
			id: 42,
			source_url: source_url.to_string(),
		})
	}

	fn play(&self) {
		self.commands.lock().push(EngineCommand::Play);
	}

	fn pause(&self) {
		self.commands.lock().push(EngineCommand::Pause);
	}

	fn seek(&self, fraction: f64) {
		self.commands.lock().push(EngineCommand::Seek(fraction));
	}

	fn remove(&self) {
		self.commands.lock().push(EngineCommand::Remove);
		self.delegate.lock().take();
	}
}
