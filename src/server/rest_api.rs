use crate::context::ApplicationContext;
use crate::server::rest_api::error::{ApiError, ApiErrorResponse, StatusCodeTable, category};
use crate::server::rest_api::models::{UserRegistrationRequest, UserResponse};
use crate::user::UserRepository;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

pub mod empty_body;
pub mod error;
pub mod models;

pub fn router() -> Router<ApplicationContext> {
	Router::new()
		.route("/users", post(create_user))
		.route("/users/{uuid}", get(get_user))
}

async fn create_user(
	State(status_codes): State<Arc<StatusCodeTable>>,
	State(user_repository): State<Arc<Mutex<UserRepository>>>,
	request: Result<Json<UserRegistrationRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiErrorResponse> {
	let Json(request) = request.map_err(|rejection| status_codes.respond(rejection.into()))?;

	let user = user_repository
		.lock()
		.create_user(&request.name, &request.email, &request.password)
		.map_err(|error| status_codes.respond(error.into()))?;

	Ok(Json(UserResponse::from(user)))
}

async fn get_user(
	State(status_codes): State<Arc<StatusCodeTable>>,
	State(user_repository): State<Arc<Mutex<UserRepository>>>,
	uuid: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserResponse>, ApiErrorResponse> {
	let Path(uuid) = uuid.map_err(|rejection| {
		status_codes.respond(ApiError::MalformedBody {
			status: rejection.status(),
			detail: rejection.body_text(),
		})
	})?;

	let user = user_repository.lock().get(uuid).ok_or_else(|| {
		status_codes.respond(ApiError::Application {
			category: category::USER_NOT_FOUND,
			message: "User not found.".to_string(),
		})
	})?;

	Ok(Json(UserResponse::from(user)))
}
