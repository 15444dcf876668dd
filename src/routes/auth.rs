use crate::{
    auth::{
        generate_token, hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest,
    },
    error::AppError,
    models::NewUser,
    services::{IdentityDirectory, ServiceError},
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a job seeker or company account and returns an authentication token.
/// The role chosen here is permanent.
///
/// ## Responses:
/// - `201 Created`: `{token, user_id, role}`.
/// - `400 Bad Request`: If the email is already registered or the body is not valid JSON.
/// - `422 Unprocessable Entity`: If validation fails (bad email, short password, bad phone).
#[post("/register")]
pub async fn register(
    identity: web::Data<IdentityDirectory>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    if identity.exists_by_email(&register_data.email).await? {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    let register_data = register_data.into_inner();
    let password_hash = hash_password(&register_data.password)?;

    let user = identity
        .create_user(NewUser {
            email: register_data.email,
            password_hash,
            name: register_data.name,
            role: register_data.role,
            phone: register_data.phone,
            location: register_data.location,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration for the same email.
            ServiceError::Conflict(_) => AppError::BadRequest("Email already registered".into()),
            other => other.into(),
        })?;

    let token = generate_token(user.id, &user.email)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
        role: user.role,
    }))
}

/// Login user
///
/// Authenticates a user by email and password and returns an authentication token.
///
/// ## Responses:
/// - `200 OK`: `{token, user_id, role}`.
/// - `401 Unauthorized`: Unknown email or wrong password. The two are not distinguished.
/// - `422 Unprocessable Entity`: If validation fails.
#[post("/login")]
pub async fn login(
    identity: web::Data<IdentityDirectory>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    match identity.credentials(&login_data.email).await? {
        Some(credentials) => {
            if verify_password(&login_data.password, &credentials.password_hash)? {
                let user = credentials.user;
                let token = generate_token(user.id, &user.email)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    user_id: user.id,
                    role: user.role,
                }))
            } else {
                log::info!("Failed login for user {}", credentials.user.id);
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
