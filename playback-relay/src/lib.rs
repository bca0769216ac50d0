pub mod commandline;
pub mod configuration;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod relay;
pub mod time_format;
#[cfg(test)]
mod utils;
