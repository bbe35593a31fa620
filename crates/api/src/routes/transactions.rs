//! Ledger transaction routes.
//!
//! All routes here sit behind the token verification middleware; every
//! operation is scoped to the identity the verifier resolved.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::routes::error_response;
use crate::{AppState, middleware::AuthUser};
use tally_core::ledger::validate_new_transaction;
use tally_db::TransactionRepository;
use tally_db::entities::transactions;
use tally_db::repositories::transaction::{CreateTransactionInput, TransactionFilter};
use tally_shared::{AppError, TransactionKind};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by transaction kind ("income" or "expense").
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Inclusive lower bound on date (RFC 3339 or YYYY-MM-DD).
    pub start: Option<String>,
    /// Inclusive upper bound on date (RFC 3339 or YYYY-MM-DD).
    pub end: Option<String>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Free-form label.
    pub text: Option<String>,
    /// Amount; sign unconstrained.
    pub amount: Option<f64>,
    /// Transaction kind ("income" or "expense").
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Label.
    pub text: String,
    /// Amount.
    pub amount: f64,
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Entry timestamp (RFC 3339).
    pub date: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            text: model.text,
            amount: model.amount,
            kind: model.kind,
            date: model.date.to_rfc3339(),
        }
    }
}

/// Parses a date filter value: RFC 3339 first, then a plain calendar
/// date taken as midnight UTC.
fn parse_date_param(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = value.parse::<NaiveDate>().ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/transactions - List the caller's transactions with filters.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    // Resolve filters up front so a bad value never reaches the store
    let kind = match query.kind.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TransactionKind>() {
            Ok(k) => Some(k),
            Err(_) => {
                return error_response(&AppError::Validation(
                    "Type must be income or expense".to_string(),
                ));
            }
        },
    };

    let start = match query.start.as_deref() {
        None => None,
        Some(raw) => match parse_date_param(raw) {
            Some(d) => Some(d),
            None => {
                return error_response(&AppError::Validation(
                    "Start date is not a valid timestamp".to_string(),
                ));
            }
        },
    };

    let end = match query.end.as_deref() {
        None => None,
        Some(raw) => match parse_date_param(raw) {
            Some(d) => Some(d),
            None => {
                return error_response(&AppError::Validation(
                    "End date is not a valid timestamp".to_string(),
                ));
            }
        },
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let filter = TransactionFilter { kind, start, end };

    match repo.list(auth.user_id(), filter).await {
        Ok(records) => {
            let items: Vec<TransactionResponse> =
                records.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// POST /api/transactions - Create a transaction owned by the caller.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> Response {
    let kind = match validate_new_transaction(
        payload.text.as_deref(),
        payload.amount,
        payload.kind.as_deref(),
    ) {
        Ok(kind) => kind,
        Err(e) => return error_response(&AppError::Validation(e.to_string())),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        user_id: auth.user_id(),
        // text and amount are known present after validation
        text: payload.text.unwrap_or_default(),
        amount: payload.amount.unwrap_or_default(),
        kind,
        date: None,
    };

    match repo.create(input).await {
        Ok(record) => {
            info!(transaction_id = %record.id, user_id = %record.user_id, "Transaction created");
            (StatusCode::OK, Json(TransactionResponse::from(record))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}

/// DELETE /api/transactions/{id} - Delete one of the caller's transactions.
///
/// Always acknowledges with 200: deleting a nonexistent id, or an id
/// owned by another user, removes nothing but is still reported as
/// success.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete_for_owner(auth.user_id(), id).await {
        Ok(removed) => {
            debug!(transaction_id = %id, user_id = %auth.user_id(), removed, "Delete acknowledged");
            (StatusCode::OK, Json(json!({ "msg": "Deleted" }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            error_response(&AppError::Database(e.to_string()))
        }
    }
}
