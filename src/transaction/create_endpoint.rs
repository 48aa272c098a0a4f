//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;
use utoipa::ToSchema;

use crate::{
    AppState, Error, ErrorResponse,
    endpoints::{self, format_endpoint},
    extract::Json,
    timezone::today_in,
    transaction::{
        Category, NewTransaction, Note, Transaction, TransactionResponse, TransactionType,
        core::create_transaction,
    },
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The request body for creating a transaction.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "amount": 45.90,
    "category": "Groceries",
    "type": "expense",
    "date": "2025-03-15",
    "note": "Weekly shop"
}))]
pub struct CreateTransactionRequest {
    /// The value of the transaction, must be greater than zero.
    pub amount: f64,
    /// The category name, 1 to 50 characters, e.g. "Groceries".
    pub category: String,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    #[schema(value_type = TransactionType)]
    pub kind: String,
    /// When the transaction occurred. Defaults to today in the server's timezone.
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<Date>,
    /// Free text about the transaction, at most 255 characters.
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateTransactionRequest {
    /// Validate the request and turn it into a [NewTransaction].
    ///
    /// `today` is used when the request has no date.
    fn into_new_transaction(
        self,
        today: impl FnOnce() -> Result<Date, Error>,
    ) -> Result<NewTransaction, Error> {
        let category = Category::new(&self.category)?;
        let kind = self.kind.parse::<TransactionType>()?;
        let note = match self.note {
            Some(text) => Note::new(&text)?,
            None => Note::default(),
        };
        let date = match self.date {
            Some(date) => date,
            None => today()?,
        };

        Ok(Transaction::build(self.amount, category, kind)
            .date(date)
            .note(note))
    }
}

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created`, the new transaction as JSON and its location.
#[utoipa::path(
    post,
    path = "/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 422, description = "Invalid transaction", body = ErrorResponse)
    ),
    tag = "Transactions"
)]
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Response, Error> {
    let new_transaction = request.into_new_transaction(|| today_in(&state.local_timezone))?;

    let transaction = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        create_transaction(new_transaction, &connection)?
    };

    tracing::debug!("Created transaction {}", transaction.id);

    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(transaction),
    )
        .into_response())
}
