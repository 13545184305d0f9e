use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;
use unicode_skeleton::UnicodeSkeleton;
use uuid::Uuid;

#[derive(Default)]
pub struct UserRepository {
	users: HashMap<String, User>,
}

impl UserRepository {
	pub fn create_user(&mut self, name: &str, email: &str, password: &str) -> Result<User, UserCreationError> {
		if name.trim().is_empty() {
			return Err(UserCreationError::NameEmpty);
		}

		const MAX_NAME_LENGTH: usize = 256;
		if name.len() > MAX_NAME_LENGTH {
			return Err(UserCreationError::NameTooLong);
		}

		let Some((local_part, domain)) = email.split_once('@') else {
			return Err(UserCreationError::EmailInvalid);
		};
		if local_part.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
			return Err(UserCreationError::EmailInvalid);
		}

		const MIN_PASSWORD_LENGTH: usize = 8;
		if password.len() < MIN_PASSWORD_LENGTH {
			return Err(UserCreationError::PasswordTooShort);
		}

		use Entry::*;
		let Vacant(entry) = self.users.entry(normalized_email(email)) else {
			return Err(UserCreationError::EmailAlreadyInUse);
		};

		let user = User {
			uuid: Uuid::new_v4(),
			name: name.to_owned(),
			email: email.to_owned(),
			password_hash: hash_password(password),
		};
		entry.insert(user.clone());
		Ok(user)
	}

	pub fn get(&self, uuid: Uuid) -> Option<User> {
		self.users.values().find(|user| user.uuid == uuid).cloned()
	}

	pub fn remove(&mut self, user: &User) {
		self.users.remove(&normalized_email(user.email()));
	}
}

/// Ensure that unicode characters get correctly decomposed,
/// normalized and some homograph attacks are hindered, so that
/// confusable spellings of the same address collide.
fn normalized_email(email: &str) -> String {
	email
		.split_whitespace()
		.flat_map(UnicodeSkeleton::skeleton_chars)
		.collect::<String>()
		.to_lowercase()
}

fn hash_password(password: &str) -> String {
	hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UserCreationError {
	#[error("Name was empty or whitespace-only.")]
	NameEmpty,
	#[error("Name is too long. (>256 bytes UTF-8)")]
	NameTooLong,
	#[error("Email address is not valid.")]
	EmailInvalid,
	#[error("Email address is already in use.")]
	EmailAlreadyInUse,
	#[error("Password is too short. (<8 characters)")]
	PasswordTooShort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
	uuid: Uuid,
	name: String,
	email: String,
	password_hash: String,
}

impl User {
	pub fn uuid(&self) -> Uuid {
		self.uuid
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn email(&self) -> &str {
		&self.email
	}
}
