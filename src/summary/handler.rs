//! Computing summaries from the database and serving them over HTTP.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    AppState, Error, ErrorResponse,
    extract::{Json, Query},
    summary::aggregation::{Summary, summarize},
    transaction::{SortOrder, TransactionFilter, parse_month, query_transactions},
};

/// Narrows down which transactions are included in a [Summary].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryFilter {
    /// Only include transactions dated in this month (1-12) of any year.
    pub month: Option<u8>,
    /// Only include transactions dated in this year.
    pub year: Option<i32>,
}

/// Summarise the transactions that match `filter`.
///
/// # Errors
/// Returns [Error::SqlError] if the transactions could not be read from the database.
pub fn get_summary(filter: SummaryFilter, connection: &Connection) -> Result<Summary, Error> {
    let filter = TransactionFilter {
        month: filter.month,
        year: filter.year,
        ..Default::default()
    };

    // Insertion order decides which of two equal categories is listed first.
    let transactions = query_transactions(&filter, SortOrder::Insertion, connection)?;

    Ok(summarize(&transactions))
}

/// The state needed to get a summary.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters for the summary endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Only summarise transactions in this month (1-12).
    #[param(minimum = 1, maximum = 12)]
    month: Option<i64>,
    /// Only summarise transactions in this year.
    year: Option<i32>,
}

impl TryFrom<SummaryQuery> for SummaryFilter {
    type Error = Error;

    fn try_from(query: SummaryQuery) -> Result<Self, Self::Error> {
        Ok(SummaryFilter {
            month: query.month.map(parse_month).transpose()?,
            year: query.year,
        })
    }
}

/// A route handler for summarising the transactions in a month and/or year.
#[utoipa::path(
    get,
    path = "/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Totals for the period", body = Summary),
        (status = 422, description = "Invalid period", body = ErrorResponse)
    ),
    tag = "Summary"
)]
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, Error> {
    let filter = SummaryFilter::try_from(query)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_summary(filter, &connection)
        .inspect_err(|error| tracing::error!("Could not compute summary for {filter:?}: {error}"))
        .map(Json)
}
