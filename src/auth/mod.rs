pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Role;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Phone numbers: optional leading +, then digits, spaces, dashes, dots or parentheses
    static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9 ().-]{6,20}$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name: a person's name for job seekers, the company name for companies.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
    /// Fixed at registration; there is no way to change it later.
    pub role: Role,
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Phone may contain digits, spaces, dashes, dots, parentheses and a leading +"
    ))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT to send back as `Authorization: Bearer <token>`.
    pub token: String,
    pub user_id: i32,
    pub role: Role,
}
