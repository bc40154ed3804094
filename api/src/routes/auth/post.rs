//! Registration and login routes.
//!
//! Provides the `POST /api/auth/register` and `POST /api/auth/login`
//! endpoints. Both are public and both respond with a signed JWT on success,
//! so a fresh registration does not need a follow-up login call.

use axum::{Json, extract::State, http::StatusCode};
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use util::validation::format_validation_errors;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use db::models::user::{Model as UserModel, Role};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Defaults to `student` when omitted.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Default, Serialize)]
pub struct AuthUserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
    pub expires_at: String,
}

impl AuthUserResponse {
    fn new(user: UserModel, token: String, expires_at: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            token,
            expires_at,
        }
    }
}

/// POST /api/auth/register
///
/// Registers a new account and signs the caller in.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Alice Mokoena",
///   "email": "alice@example.com",
///   "password": "password123",
///   "role": "student"
/// }
/// ```
///
/// ### Validation Rules
/// * `name`: required, non-empty
/// * `email`: required, valid email format, unique
/// * `password`: required, at least 8 characters
/// * `role`: optional, one of `student`, `instructor`, `admin`; defaults to `student`
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "name": "Alice Mokoena",
///     "email": "alice@example.com",
///     "role": "student",
///     "token": "<jwt>",
///     "expires_at": "2025-05-23T18:00:00+00:00"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `409 Conflict` (duplicate email)
/// ```json
/// {
///   "success": false,
///   "message": "A user with this email already exists"
/// }
/// ```
///
/// - `422 Unprocessable Entity` (validation failure)
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<ApiResponse<AuthUserResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let role = req.role.unwrap_or(Role::Student);

    match UserModel::create(app_state.db(), &req.name, &req.email, &req.password, role).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    AuthUserResponse::new(user, token, expires_at),
                    "User registered successfully",
                )),
            )
        }
        Err(e) => {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::error("A user with this email already exists")),
                );
            }
            tracing::error!(error = %e, "failed to create user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}

/// POST /api/auth/login
///
/// Verifies credentials and returns a fresh token.
///
/// ### Request Body
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "password123"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` (same payload shape as `register`)
/// - `401 Unauthorized` (unknown email or wrong password; the two cases are
///   deliberately indistinguishable)
/// ```json
/// {
///   "success": false,
///   "message": "Invalid email or password"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<AuthUserResponse>>) {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    match UserModel::get_by_email(app_state.db(), &req.email).await {
        Ok(Some(user)) if user.verify_password(&req.password) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthUserResponse::new(user, token, expires_at),
                    "Login successful",
                )),
            )
        }
        Ok(_) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid email or password")),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to look up user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(format!("Database error: {}", e))),
            )
        }
    }
}
