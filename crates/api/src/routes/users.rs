//! User registration and login routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use sea_orm::SqlErr;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::routes::error_response;
use tally_core::auth::{hash_password, validate_credentials, verify_password};
use tally_db::UserRepository;
use tally_shared::AppError;
use tally_shared::auth::{LoginRequest, LoginResponse, RegisterRequest};

/// Creates the user auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// POST /api/users/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    if let Err(e) = validate_credentials(&payload.username, &payload.password) {
        return error_response(&AppError::Validation(e.to_string()));
    }

    let user_repo = UserRepository::new((*state.db).clone());

    // Check if username is taken
    match user_repo.username_exists(&payload.username).await {
        Ok(true) => {
            return error_response(&AppError::Conflict("Username already exists".to_string()));
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking username");
            return error_response(&AppError::Database(e.to_string()));
        }
    }

    // Hash password
    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return error_response(&AppError::Internal(e.to_string()));
        }
    };

    // Create user; the unique index catches a register race on the same
    // username between the existence check and the insert
    match user_repo.create(&payload.username, &password_hash).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "New user registered");
            (
                StatusCode::OK,
                Json(json!({
                    "msg": "Registered",
                    "user": { "username": user.username }
                })),
            )
                .into_response()
        }
        // Only a unique-constraint violation means the race was lost to a
        // duplicate; anything else is a server-side failure
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                info!(username = %payload.username, "Registration lost race for username");
                error_response(&AppError::Conflict("Username already exists".to_string()))
            }
            _ => {
                error!(error = %e, "Failed to create user");
                error_response(&AppError::Database(e.to_string()))
            }
        },
    }
}

/// POST /api/users/login - Verify credentials and issue a token.
///
/// An unknown username and a wrong password produce the identical error
/// body, so callers cannot tell which usernames exist.
async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_username(&payload.username).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for unknown username");
            return error_response(&AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return error_response(&AppError::Database(e.to_string()));
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return error_response(&AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return error_response(&AppError::Internal(e.to_string()));
        }
    }

    let token = match state.jwt_service.generate_token(user.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return error_response(&AppError::Internal(e.to_string()));
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    (
        StatusCode::OK,
        Json(LoginResponse {
            token,
            username: user.username,
        }),
    )
        .into_response()
}
