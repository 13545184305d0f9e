use crate::server::rest_api::error::{ApiError, StatusCodeTable};
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

/// Mirrors the framework's default body limit so buffering the body for
/// the emptiness check cannot exhaust memory.
const BODY_BUFFER_LIMIT: usize = 2 * 1024 * 1024;

/// Rejects JSON PUT/POST/PATCH requests that carry no content before
/// they reach any handler. Other methods and content types pass through
/// untouched, regardless of body emptiness.
pub async fn reject_empty_body(
	State(status_codes): State<Arc<StatusCodeTable>>,
	request: Request,
	next: Next,
) -> Response {
	const GUARDED_METHODS: [Method; 3] = [Method::PUT, Method::POST, Method::PATCH];

	if !GUARDED_METHODS.contains(request.method()) || !has_json_content_type(&request) {
		return next.run(request).await;
	}

	let (parts, body) = request.into_parts();
	let bytes = match to_bytes(body, BODY_BUFFER_LIMIT).await {
		Ok(bytes) => bytes,
		Err(error) => {
			return status_codes
				.respond(ApiError::MalformedBody {
					status: StatusCode::PAYLOAD_TOO_LARGE,
					detail: error.to_string(),
				})
				.into_response();
		}
	};

	if is_empty_json(&bytes) {
		return status_codes.respond(ApiError::EmptyBody).into_response();
	}

	next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn has_json_content_type(request: &Request) -> bool {
	let Some(content_type) = request
		.headers()
		.get(header::CONTENT_TYPE)
		.and_then(|value| value.to_str().ok())
	else {
		return false;
	};

	content_type
		.parse::<mime::Mime>()
		.is_ok_and(|mime| mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

/// A body counts as empty when it contains nothing but whitespace or
/// deserializes to an empty JSON object or array.
fn is_empty_json(bytes: &[u8]) -> bool {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return true;
	}

	match serde_json::from_slice(bytes) {
		Ok(Value::Object(object)) => object.is_empty(),
		Ok(Value::Array(array)) => array.is_empty(),
		_ => false,
	}
}
