//! Budget Tracker is a small REST API for keeping track of personal income and
//! expenses.
//!
//! Transactions are stored in a SQLite database and served as JSON. Besides the
//! usual create, read, update and delete operations, the API can summarise the
//! transactions for a month or year: total income, total expenses, the balance
//! and a breakdown of where the money went by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;
use utoipa::ToSchema;

mod api_docs;
mod app_state;
mod database_id;
mod db;
mod endpoints;
mod extract;
mod logging;
mod routing;
mod summary;
mod timezone;
mod transaction;

pub use api_docs::ApiDoc;
pub use app_state::AppState;
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{CategoryTotal, Summary, SummaryFilter, get_summary, summarize};
pub use timezone::{get_local_offset, today_in};
pub use transaction::{
    Category, MAX_AMOUNT, MAX_CATEGORY_LENGTH, MAX_NOTE_LENGTH, NewTransaction, Note, Transaction,
    TransactionFilter, TransactionPatch, TransactionResponse, TransactionType, count_transactions,
    create_transaction, delete_transaction, get_transaction, list_transactions, update_transaction,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was zero, negative or not a number.
    ///
    /// Whether money came in or went out is recorded by the transaction type,
    /// so amounts are always strictly positive.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// A transaction amount was larger than [MAX_AMOUNT].
    #[error("amount must be at most {max}, got {0}", max = MAX_AMOUNT)]
    AmountTooLarge(f64),

    /// An empty (or whitespace only) string was used as a category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The category is longer than [MAX_CATEGORY_LENGTH] characters.
    #[error(
        "category must be at most {max} characters long, got {0} characters",
        max = MAX_CATEGORY_LENGTH
    )]
    CategoryTooLong(usize),

    /// The note is longer than [MAX_NOTE_LENGTH] characters.
    #[error(
        "note must be at most {max} characters long, got {0} characters",
        max = MAX_NOTE_LENGTH
    )]
    NoteTooLong(usize),

    /// The transaction type was neither "income" nor "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// A month filter outside of 1-12.
    #[error("{0} is not a valid month, expected a number from 1 to 12")]
    InvalidMonth(i64),

    /// The request body, query string or path could not be parsed, e.g. a
    /// required field is missing or a number was given as text.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that best describes the error to a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NonPositiveAmount(_)
            | Error::AmountTooLarge(_)
            | Error::EmptyCategory
            | Error::CategoryTooLong(_)
            | Error::NoteTooLong(_)
            | Error::InvalidTransactionType(_)
            | Error::InvalidMonth(_)
            | Error::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                StatusCode::NOT_FOUND
            }
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// A description of what went wrong.
    #[schema(example = "the requested resource could not be found")]
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
