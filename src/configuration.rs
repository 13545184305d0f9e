use serde::Deserialize;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Configuration {
	#[serde(with = "socket_addr_deserializer")]
	pub address: SocketAddr,
	pub log_filters: String,
	#[serde(with = "humantime_serde")]
	pub shutdown_timeout: Duration,
	/// Overrides for the error policy's category to status mapping.
	#[serde(default)]
	pub status_codes: HashMap<String, u16>,
}

impl Configuration {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
		let text = read_to_string(path)?;

		Ok(Configuration::try_from(text.as_str())?)
	}
}

impl TryFrom<&str> for Configuration {
	type Error = toml::de::Error;

	fn try_from(text: &str) -> Result<Self, Self::Error> {
		toml::from_str(text)
	}
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
	#[error("Failed to deserialize with error: {0}")]
	DeserializationError(#[from] toml::de::Error),
	#[error("IO operation failed: {0}")]
	IoError(#[from] std::io::Error),
}

// See https://serde.rs/custom-date-format.html
mod socket_addr_deserializer {
	use serde::{self, Deserialize, Deserializer};
	use std::net::SocketAddr;
	use std::str::FromStr;

	pub fn deserialize<'deserializer, D>(deserializer: D) -> Result<SocketAddr, D::Error>
	where
		D: Deserializer<'deserializer>,
	{
		let string = String::deserialize(deserializer)?;
		SocketAddr::from_str(string.as_str()).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::str::FromStr;

	#[test]
	fn should_deserialize_configuration() {
		const TEST_FILE_PATH: &str = "test/files/test-configuration.toml";

		let Configuration {
			address,
			log_filters,
			shutdown_timeout,
			status_codes,
		} = Configuration::from_file(TEST_FILE_PATH).unwrap();

		assert_eq!(SocketAddr::from_str("127.0.0.1:8000").unwrap(), address);
		assert_eq!("info", log_filters);
		assert_eq!(Duration::from_secs(5), shutdown_timeout);
		assert_eq!(HashMap::from([("DUPLICATE_EMAIL".to_string(), 409)]), status_codes);
	}

	#[test]
	fn should_default_to_no_status_code_overrides() {
		let configuration = Configuration::try_from(
			r#"
			address = "127.0.0.1:8000"
			log_filters = "info"
			shutdown_timeout = "10s"
			"#,
		)
		.unwrap();

		assert!(configuration.status_codes.is_empty());
	}
}
