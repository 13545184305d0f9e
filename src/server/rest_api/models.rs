use crate::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct UserRegistrationRequest {
	pub name: String,
	pub email: String,
	pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
	pub uuid: Uuid,
	pub name: String,
	pub email: String,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			uuid: user.uuid(),
			name: user.name().to_string(),
			email: user.email().to_string(),
		}
	}
}
