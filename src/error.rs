use crate::configuration::ConfigurationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
	#[error("Failed to load configuration: {0}")]
	Configuration(#[from] ConfigurationError),
	#[error("Invalid log filter configuration: {0}")]
	LogFilter(#[from] tracing_subscriber::filter::ParseError),
	#[error("Failed to parse commandline: {0}")]
	Commandline(#[from] clap::Error),
	#[error("Failed to initialize application context: {0}")]
	Context(#[from] anyhow::Error),
	#[error("IO error while serving requests: {0}")]
	Server(#[from] std::io::Error),
}
