use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, ErrorResponse, database_id::TransactionId, extract::Path,
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with `204 No Content`.
#[utoipa::path(
    delete,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "The ID of the transaction")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "Transactions"
)]
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| {
        tracing::debug!("Could not delete transaction {transaction_id}: {error}")
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        extract::Path,
        initialize_db,
        transaction::{Transaction, TransactionType, create_transaction, get_transaction},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn must_create_test_state() -> DeleteTransactionState {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = must_create_test_state();
        let transaction = create_transaction(
            Transaction::build(1.23, "Test".parse().unwrap(), TransactionType::Expense)
                .date(date!(2025 - 10 - 26)),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let status = delete_transaction_endpoint(State(state.clone()), Path(transaction.id)).await;

        assert_eq!(status, Ok(StatusCode::NO_CONTENT));
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        )
    }

    #[tokio::test]
    async fn deleting_twice_fails() {
        let state = must_create_test_state();
        let transaction = create_transaction(
            Transaction::build(1.23, "Test".parse().unwrap(), TransactionType::Income),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();
        delete_transaction_endpoint(State(state.clone()), Path(transaction.id))
            .await
            .unwrap();

        let status = delete_transaction_endpoint(State(state), Path(transaction.id)).await;

        assert_eq!(status, Err(Error::DeleteMissingTransaction));
    }
}
