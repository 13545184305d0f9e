use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

mod user_creation;

/// Error categories the application classifies failures into, as they
/// appear on the wire. The status-code table maps a subset of these to
/// response statuses; anything unmapped falls back to 500.
pub mod category {
	pub const NOT_FOUND_ERROR: &str = "NOT_FOUND_ERROR";
	pub const INVALID_PAYLOAD: &str = "INVALID_PAYLOAD";
	pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
	pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
	pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
	pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
	pub const AUTHENTICATION_ERROR: &str = "AUTHENTICATION_ERROR";
}

/// A failure reaching the end of the request pipeline, reduced to the
/// categories the error policy distinguishes. Each variant carries only
/// what its response needs.
#[derive(Debug)]
pub enum ApiError {
	/// No route matched the request.
	RouteNotFound,
	/// A JSON PUT/POST/PATCH request carried no content.
	EmptyBody,
	/// Request deserialization failed before the handler ran.
	MalformedBody { status: StatusCode, detail: String },
	/// Unclassified internal failure.
	Internal(anyhow::Error),
	/// Classified application or validation failure.
	Application { category: &'static str, message: String },
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::MalformedBody {
			status: rejection.status(),
			detail: rejection.body_text(),
		}
	}
}

impl From<anyhow::Error> for ApiError {
	fn from(error: anyhow::Error) -> Self {
		Self::Internal(error)
	}
}

/// Type-erased error response: the resolved status plus the envelope
/// every failure path answers with.
#[derive(Debug)]
pub struct ApiErrorResponse {
	status: StatusCode,
	body: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
	code: ErrorCode,
	message: String,
}

/// `code` is either an application error category or a bare HTTP
/// status, depending on which failure path produced the response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorCode {
	Category(&'static str),
	Status(u16),
}

impl ApiErrorResponse {
	fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
		Self {
			status,
			body: ErrorBody {
				error: ErrorDetail {
					code,
					message: message.into(),
				},
			},
		}
	}

	#[cfg(test)]
	pub fn status(&self) -> StatusCode {
		self.status
	}
}

impl IntoResponse for ApiErrorResponse {
	fn into_response(self) -> Response {
		(self.status, Json(self.body)).into_response()
	}
}

/// Terminal 404 for requests no route matched. Registered as the
/// router's fallback.
pub async fn not_found(State(status_codes): State<Arc<StatusCodeTable>>) -> ApiErrorResponse {
	status_codes.respond(ApiError::RouteNotFound)
}

/// Read-only mapping from application error category to response
/// status. Built once at startup and shared via `Arc`; request handling
/// never mutates it.
pub struct StatusCodeTable {
	codes: HashMap<String, StatusCode>,
}

impl StatusCodeTable {
	/// Compiled-in defaults merged with configuration overrides.
	/// Overrides outside the 4xx/5xx range are rejected so that every
	/// response this policy produces stays an error status.
	pub fn with_overrides(overrides: &HashMap<String, u16>) -> anyhow::Result<Self> {
		let mut codes: HashMap<String, StatusCode> = [
			(category::INVALID_PAYLOAD, StatusCode::BAD_REQUEST),
			(category::VALIDATION_ERROR, StatusCode::BAD_REQUEST),
			(category::DUPLICATE_EMAIL, StatusCode::CONFLICT),
			(category::USER_NOT_FOUND, StatusCode::NOT_FOUND),
			(category::AUTHENTICATION_ERROR, StatusCode::UNAUTHORIZED),
		]
		.into_iter()
		.map(|(category, status)| (category.to_string(), status))
		.collect();

		for (category, &code) in overrides {
			let status = StatusCode::from_u16(code)
				.ok()
				.filter(|status| status.is_client_error() || status.is_server_error())
				.ok_or_else(|| anyhow!("Status code override for '{category}' must be a 4xx/5xx status, got {code}"))?;
			codes.insert(category.clone(), status);
		}

		Ok(Self { codes })
	}

	pub fn status_for(&self, category: &str) -> StatusCode {
		self.codes.get(category).copied().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
	}

	/// Terminal classification: resolves the response status, performs
	/// the per-category logging and shapes the envelope. Expected client
	/// mistakes log at debug, everything else at error.
	pub fn respond(&self, error: ApiError) -> ApiErrorResponse {
		use ApiError::*;
		match error {
			RouteNotFound => {
				debug!("No route matched the request");
				ApiErrorResponse::new(
					StatusCode::NOT_FOUND,
					ErrorCode::Category(category::NOT_FOUND_ERROR),
					StatusCode::NOT_FOUND.canonical_reason().unwrap_or("Not Found"),
				)
			}
			EmptyBody => {
				error!("Empty JSON request body");
				ApiErrorResponse::new(
					StatusCode::BAD_REQUEST,
					ErrorCode::Category(category::INVALID_PAYLOAD),
					"Payload is invalid.",
				)
			}
			MalformedBody { status, detail } => {
				error!("Failed to deserialize request: {detail}");
				ApiErrorResponse::new(
					status,
					ErrorCode::Status(status.as_u16()),
					status.canonical_reason().unwrap_or("Bad Request"),
				)
			}
			Internal(error) => {
				error!("Internal error: {error:#}");
				ApiErrorResponse::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorCode::Category(category::INTERNAL_ERROR),
					StatusCode::INTERNAL_SERVER_ERROR.canonical_reason().unwrap_or("Internal Server Error"),
				)
			}
			Application { category, message } => {
				debug!("Rejected request: {category}: {message}");
				ApiErrorResponse::new(self.status_for(category), ErrorCode::Category(category), message)
			}
		}
	}
}
