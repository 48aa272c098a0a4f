//! Defines the endpoint for listing transactions.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    AppState, Error, ErrorResponse,
    extract::{Json, Query},
    transaction::{
        Transaction, TransactionResponse, TransactionType,
        query::{TransactionFilter, list_transactions, parse_month},
    },
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for filtering the transaction list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTransactionsQuery {
    /// Filter by category.
    category: Option<String>,
    /// Filter by type, "income" or "expense".
    #[serde(rename = "type")]
    #[param(value_type = Option<TransactionType>)]
    kind: Option<String>,
    /// Filter by month (1-12).
    #[param(minimum = 1, maximum = 12)]
    month: Option<i64>,
    /// Filter by year.
    year: Option<i32>,
}

impl TryFrom<ListTransactionsQuery> for TransactionFilter {
    type Error = Error;

    fn try_from(query: ListTransactionsQuery) -> Result<Self, Self::Error> {
        Ok(TransactionFilter {
            category: query.category,
            kind: query
                .kind
                .as_deref()
                .map(str::parse::<TransactionType>)
                .transpose()?,
            month: query.month.map(parse_month).transpose()?,
            year: query.year,
        })
    }
}

/// A route handler for listing transactions, most recent first.
#[utoipa::path(
    get,
    path = "/transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "The matching transactions", body = Vec<TransactionResponse>),
        (status = 422, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "Transactions"
)]
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let filter = TransactionFilter::try_from(query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    list_transactions(&filter, &connection)
        .inspect_err(|error| tracing::error!("Could not list transactions: {error}"))
        .map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        extract::Query,
        initialize_db,
        transaction::{Transaction, TransactionFilter, TransactionType, create_transaction},
    };

    use super::{ListTransactionsQuery, ListTransactionsState, list_transactions_endpoint};

    #[test]
    fn query_converts_to_filter() {
        let query = ListTransactionsQuery {
            category: Some("Rent".to_owned()),
            kind: Some("expense".to_owned()),
            month: Some(2),
            year: Some(2025),
        };

        let filter = TransactionFilter::try_from(query);

        assert_eq!(
            filter,
            Ok(TransactionFilter {
                category: Some("Rent".to_owned()),
                kind: Some(TransactionType::Expense),
                month: Some(2),
                year: Some(2025),
            })
        );
    }

    #[test]
    fn query_rejects_invalid_month() {
        let query = ListTransactionsQuery {
            month: Some(13),
            ..Default::default()
        };

        assert_eq!(
            TransactionFilter::try_from(query),
            Err(Error::InvalidMonth(13))
        );
    }

    #[test]
    fn query_rejects_invalid_type() {
        let query = ListTransactionsQuery {
            kind: Some("both".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            TransactionFilter::try_from(query),
            Err(Error::InvalidTransactionType("both".to_owned()))
        );
    }

    #[tokio::test]
    async fn lists_only_income_newest_first() {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        let mut want = Vec::new();
        for (day, kind) in [
            (1, TransactionType::Income),
            (2, TransactionType::Expense),
            (3, TransactionType::Income),
        ] {
            let transaction = create_transaction(
                Transaction::build(10.0, "Misc".parse().unwrap(), kind)
                    .date(date!(2025 - 05 - 01).replace_day(day).unwrap()),
                &connection,
            )
            .unwrap();

            if kind == TransactionType::Income {
                want.push(transaction);
            }
        }
        want.reverse();
        let state = ListTransactionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let got = list_transactions_endpoint(
            State(state),
            Query(ListTransactionsQuery {
                kind: Some("income".to_owned()),
                ..Default::default()
            }),
        )
        .await;

        assert_eq!(got.map(|json| json.0), Ok(want));
    }
}
