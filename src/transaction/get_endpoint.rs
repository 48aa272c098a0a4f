use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;

use crate::{
    AppState, Error, ErrorResponse,
    database_id::TransactionId,
    extract::{Json, Path},
    transaction::{Transaction, TransactionResponse, core::get_transaction},
};

/// The state needed to get a single transaction.
#[derive(Debug, Clone)]
pub struct GetTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for getting a transaction by its ID.
#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(("transaction_id" = i64, Path, description = "The ID of the transaction")),
    responses(
        (status = 200, description = "The transaction", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    tag = "Transactions"
)]
pub async fn get_transaction_endpoint(
    State(state): State<GetTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transaction(transaction_id, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        extract::Path,
        initialize_db,
        transaction::{Transaction, TransactionType, create_transaction},
    };

    use super::{GetTransactionState, get_transaction_endpoint};

    fn must_create_test_state() -> GetTransactionState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize_db(&connection).expect("could not initialize test DB");

        GetTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn returns_transaction() {
        let state = must_create_test_state();
        let want = create_transaction(
            Transaction::build(5.0, "Coffee".parse().unwrap(), TransactionType::Expense)
                .date(date!(2025 - 06 - 01)),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let got = get_transaction_endpoint(State(state), Path(want.id)).await;

        assert_eq!(got.map(|json| json.0), Ok(want));
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = must_create_test_state();

        let got = get_transaction_endpoint(State(state), Path(123)).await;

        assert_eq!(got.map(|json| json.0), Err(Error::NotFound));
    }
}
