use crate::configuration::Configuration;
use crate::engine::simulated::SimulatedEngine;
use crate::error::PlaybackRelayError;
use crate::overlay::Overlay;
use crate::relay::PlaybackRelay;
use crate::relay::error::RelayError;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SOURCE_URL: &str = "simulated://sample";

#[derive(clap::Parser)]
pub struct Commandline {
	#[clap(short = 'c', long = "config-file", default_value = "configuration.toml")]
	pub configuration_file_path: String,
	#[clap(subcommand)]
	pub command: Option<BaseCommand>,
}

#[derive(clap::Subcommand)]
pub enum BaseCommand {
	/// Play a medium with the simulated engine, printing the overlay whenever it changes
	Play {
		#[clap(default_value = DEFAULT_SOURCE_URL)]
		source_url: String,
	},
	/// Print the configuration
	Configuration,
}

impl Default for BaseCommand {
	fn default() -> Self {
		Self::Play {
			source_url: DEFAULT_SOURCE_URL.to_string(),
		}
	}
}

impl Commandline {
	pub async fn run(self) -> Result<(), PlaybackRelayError> {
		let configuration = Configuration::from_file(&self.configuration_file_path)?;

		tracing_subscriber::registry()
			.with(EnvFilter::new(&configuration.log_filters))
			.with(tracing_subscriber::fmt::layer())
			.try_init()?;

		let base_command = self.command.unwrap_or_default();
		match base_command {
			BaseCommand::Play { source_url } => play(&configuration, &source_url).await?,
			BaseCommand::Configuration => println!("{configuration:?}"),
		}
		Ok(())
	}
}

async fn play(configuration: &Configuration, source_url: &str) -> Result<(), RelayError> {
	let relay = PlaybackRelay::new(configuration.seek_confirmation_tolerance);
	let engine = Arc::new(SimulatedEngine::new(
		configuration.media_length,
		configuration.progress_interval,
	));
	let overlay = Overlay::new(configuration.title.clone());
	let mut state_receiver = relay.subscribe();

	let subscription = relay.attach(source_url, engine)?;
	info!(
		"Playing '{}' on surface {} ({}).",
		source_url,
		subscription.surface().id,
		subscription.id()
	);

	while state_receiver.changed().await.is_ok() {
		let state = *state_receiver.borrow_and_update();
		println!("{}", overlay.model(&state));
		if state.is_finished() {
			break;
		}
	}

	relay.detach();
	Ok(())
}
