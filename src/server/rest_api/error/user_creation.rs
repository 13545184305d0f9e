use crate::server::rest_api::error::{ApiError, category};
use crate::user::UserCreationError;

impl From<UserCreationError> for ApiError {
	fn from(error: UserCreationError) -> Self {
		use UserCreationError::*;
		let category = match error {
			NameEmpty | NameTooLong | EmailInvalid | PasswordTooShort => category::VALIDATION_ERROR,
			EmailAlreadyInUse => category::DUPLICATE_EMAIL,
		};

		ApiError::Application {
			category,
			message: error.to_string(),
		}
	}
}
