use clap::Parser;
use playback_relay::commandline::Commandline;
use playback_relay::error::PlaybackRelayError;

#[tokio::main]
async fn main() -> Result<(), PlaybackRelayError> {
	Commandline::parse().run().await
}
