//! Token verification middleware for ledger routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::routes::error_response;
use tally_shared::{AppError, Claims};

/// Token verification middleware in front of every ledger operation.
///
/// The token is the raw value of the Authorization header (no scheme
/// prefix). A missing header and a failed verification are reported as
/// distinct messages but the same 401 status; the decoded claims are
/// stored in request extensions for handlers to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = token else {
        return error_response(&AppError::Unauthorized("No token".to_string()));
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            // Cause is only distinguished in diagnostics, never in the response
            debug!(error = %e, "Token verification failed");
            error_response(&AppError::Unauthorized("Invalid token".to_string()))
        }
    }
}

/// Extractor for the authenticated user's claims.
///
/// Use this in handlers behind `auth_middleware` to get the identity the
/// request is scoped to:
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the user ID from the claims.
    #[must_use]
    pub const fn user_id(&self) -> uuid::Uuid {
        self.0.user_id()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| error_response(&AppError::Unauthorized("No token".to_string())))
    }
}
