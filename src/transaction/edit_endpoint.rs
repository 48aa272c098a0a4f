use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;
use utoipa::ToSchema;

use crate::{
    AppState, Error, ErrorResponse,
    database_id::TransactionId,
    extract::{Json, Path},
    transaction::{
        Category, Note, Transaction, TransactionPatch, TransactionResponse, TransactionType,
        core::{update_transaction, validate_amount},
    },
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for updating a transaction. Missing fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(example = json!({"amount": 52.10, "note": "Weekly shop and snacks"}))]
pub struct UpdateTransactionRequest {
    /// The new amount, must be greater than zero.
    amount: Option<f64>,
    /// The new category, 1 to 50 characters.
    category: Option<String>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    #[schema(value_type = Option<TransactionType>)]
    kind: Option<String>,
    /// The new date. The month and year of the transaction follow it.
    #[schema(value_type = Option<String>, format = Date)]
    date: Option<Date>,
    /// The new note, at most 255 characters.
    note: Option<String>,
}

impl TryFrom<UpdateTransactionRequest> for TransactionPatch {
    type Error = Error;

    fn try_from(request: UpdateTransactionRequest) -> Result<Self, Self::Error> {
        Ok(TransactionPatch {
            amount: request.amount.map(validate_amount).transpose()?,
            category: request
                .category
                .as_deref()
                .map(Category::new)
                .transpose()?,
            kind: request
                .kind
                .as_deref()
                .map(str::parse::<TransactionType>)
                .transpose()?,
            date: request.date,
            note: request.note.as_deref().map(Note::new).transpose()?,
        })
    }
}

/// A route handler for updating some or all fields of a transaction.
///
/// Responds with the updated transaction.
#[utoipa::path(
    put,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "The ID of the transaction")),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "The updated transaction", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 422, description = "Invalid field values", body = ErrorResponse)
    ),
    tag = "Transactions"
)]
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, Error> {
    let patch = TransactionPatch::try_from(request)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction =
        update_transaction(transaction_id, patch, &connection).inspect_err(|error| {
            tracing::debug!("Could not update transaction {transaction_id}: {error}")
        })?;

    Ok(Json(transaction))
}
