use crate::commandline::Commandline;
use crate::error::RosterError;
use clap::Parser;

mod commandline;
mod configuration;
mod context;
mod error;
mod server;
mod user;

#[tokio::main]
async fn main() -> Result<(), RosterError> {
	let commandline = Commandline::try_parse()?;
	commandline.run().await
}
