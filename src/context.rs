use crate::configuration::Configuration;
use crate::server::rest_api::error::StatusCodeTable;
use crate::user::UserRepository;
use axum::extract::FromRef;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationContext {
	pub configuration: Configuration,
	pub status_codes: Arc<StatusCodeTable>,
	pub user_repository: Arc<Mutex<UserRepository>>,
}

impl ApplicationContext {
	pub fn new(configuration: Configuration) -> anyhow::Result<ApplicationContext> {
		let status_codes = Arc::new(StatusCodeTable::with_overrides(&configuration.status_codes)?);

		Ok(Self {
			configuration,
			status_codes,
			user_repository: Arc::new(Mutex::new(UserRepository::default())),
		})
	}
}
