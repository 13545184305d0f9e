use crate::context::ApplicationContext;
use crate::error::RosterError;
use crate::server::rest_api::empty_body::reject_empty_body;
use axum::Router;
use axum::middleware;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod rest_api;

pub async fn run_server(application_context: ApplicationContext) -> Result<(), RosterError> {
	let address = application_context.configuration.address;
	let shutdown_timeout = application_context.configuration.shutdown_timeout;
	let router = build_router(application_context);

	let handle = axum_server::Handle::new();
	tokio::spawn(shutdown_on_ctrl_c(handle.clone(), shutdown_timeout));

	axum_server::bind(address).handle(handle).serve(router.into_make_service()).await?;

	Ok(())
}

/// The empty-body guard is layered over the whole router so it runs
/// before route dispatch; the fallback only answers once no route (and
/// no guard) has produced a response.
pub fn build_router(application_context: ApplicationContext) -> Router {
	Router::new()
		.nest("/api/v1", rest_api::router())
		.fallback(rest_api::error::not_found)
		.layer(middleware::from_fn_with_state(application_context.clone(), reject_empty_body))
		.layer(TraceLayer::new_for_http())
		.with_state(application_context)
}

async fn shutdown_on_ctrl_c(handle: axum_server::Handle<std::net::SocketAddr>, timeout: Duration) {
	if tokio::signal::ctrl_c().await.is_err() {
		return;
	}

	info!("Shutdown signal received, stopping server");
	handle.graceful_shutdown(Some(timeout));
}
