//! Filtered queries over the transaction table.

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    transaction::{
        Transaction, TransactionType,
        core::{TRANSACTION_COLUMNS, map_transaction_row},
    },
};

/// Narrows down which transactions are returned by [list_transactions].
///
/// Every filter that is set must match (logical AND). A filter set to `None`
/// matches every transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only include transactions in this category. An empty string is ignored.
    pub category: Option<String>,
    /// Only include income or only include expenses.
    pub kind: Option<TransactionType>,
    /// Only include transactions dated in this month (1-12) of any year.
    pub month: Option<u8>,
    /// Only include transactions dated in this year.
    pub year: Option<i32>,
}

/// The order to return transactions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    /// Most recent date first. Transactions on the same date keep the order
    /// they were created in.
    NewestFirst,
    /// The order the transactions were created in.
    Insertion,
}

/// Check that `month` is a calendar month.
///
/// # Errors
/// Returns an [Error::InvalidMonth] if `month` is not in 1-12.
pub(crate) fn parse_month(month: i64) -> Result<u8, Error> {
    match u8::try_from(month) {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err(Error::InvalidMonth(month)),
    }
}

/// Get the transactions that match `filter`, most recent first.
///
/// Transactions on the same date are ordered by ID so that the order is stable.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails or a row could not be mapped
/// to a transaction.
pub fn list_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    query_transactions(filter, SortOrder::NewestFirst, connection)
}

/// Get the transactions that match `filter` in the order `sort_order`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails or a row could not be mapped
/// to a transaction.
pub(crate) fn query_transactions(
    filter: &TransactionFilter,
    sort_order: SortOrder,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut where_clause_parts = vec![];
    let mut query_parameters = vec![];

    if let Some(category) = filter
        .category
        .as_deref()
        .map(str::trim)
        .filter(|category| !category.is_empty())
    {
        query_parameters.push(Value::Text(category.to_owned()));
        where_clause_parts.push(format!("category = ?{}", query_parameters.len()));
    }

    if let Some(kind) = filter.kind {
        query_parameters.push(Value::Text(kind.as_str().to_owned()));
        where_clause_parts.push(format!("type = ?{}", query_parameters.len()));
    }

    // Dates are stored as ISO 8601 text, so SQLite can pull out the month and year.
    if let Some(month) = filter.month {
        query_parameters.push(Value::Integer(month.into()));
        where_clause_parts.push(format!(
            "CAST(strftime('%m', date) AS INTEGER) = ?{}",
            query_parameters.len()
        ));
    }

    if let Some(year) = filter.year {
        query_parameters.push(Value::Integer(year.into()));
        where_clause_parts.push(format!(
            "CAST(strftime('%Y', date) AS INTEGER) = ?{}",
            query_parameters.len()
        ));
    }

    let mut query_string_parts = vec![format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\""
    )];

    if !where_clause_parts.is_empty() {
        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
    }

    query_string_parts.push(
        match sort_order {
            SortOrder::NewestFirst => "ORDER BY date DESC, id ASC",
            SortOrder::Insertion => "ORDER BY id ASC",
        }
        .to_owned(),
    );

    let query_string = query_string_parts.join(" ");

    connection
        .prepare(&query_string)?
        .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}
