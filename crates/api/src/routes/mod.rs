//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use tally_shared::AppError;

pub mod health;
pub mod transactions;
pub mod users;

/// Creates the API router, wiring the token verifier in front of the
/// ledger routes while the auth routes stay public.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = transactions::routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    Router::new().merge(users::routes()).merge(protected_routes)
}

/// Translates an `AppError` into the `{ "error": ... }` response body.
///
/// Server-side failures are masked with a generic sentence; their detail
/// only reaches the logs.
pub(crate) fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(json!({ "error": err.public_message() }))).into_response()
}
