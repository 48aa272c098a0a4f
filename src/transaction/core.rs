//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Serialize, Serializer};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// The maximum number of characters in a [Category].
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// The maximum number of characters in a [Note].
pub const MAX_NOTE_LENGTH: usize = 255;

/// The largest amount a single transaction may have.
pub const MAX_AMOUNT: f64 = 1e15;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name used for the type in the API and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// A validated, non-empty category name of at most [MAX_CATEGORY_LENGTH]
/// characters, e.g. "Groceries" or "Rent".
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Category(String);

impl Category {
    /// Create a category, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an:
    /// - [Error::EmptyCategory] if `name` is empty or only whitespace,
    /// - or [Error::CategoryTooLong] if `name` has more than [MAX_CATEGORY_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let length = name.chars().count();

        if name.is_empty() {
            Err(Error::EmptyCategory)
        } else if length > MAX_CATEGORY_LENGTH {
            Err(Error::CategoryTooLong(length))
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category without validation.
    ///
    /// The caller should ensure that the string is not empty and not too long.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the invariants
    /// are violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::new(s)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free text attached to a transaction, at most [MAX_NOTE_LENGTH] characters.
///
/// The default note is the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Note(String);

impl Note {
    /// Create a note.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::NoteTooLong] if `text` has more than
    /// [MAX_NOTE_LENGTH] characters.
    pub fn new(text: &str) -> Result<Self, Error> {
        let length = text.chars().count();

        if length > MAX_NOTE_LENGTH {
            Err(Error::NoteTooLong(length))
        } else {
            Ok(Self(text.to_owned()))
        }
    }

    /// Create a note without checking its length.
    pub fn new_unchecked(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl AsRef<str> for Note {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Note {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::new(s)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
///
/// The month and year of a transaction are always derived from its date, see
/// [Transaction::month] and [Transaction::year].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction, always positive.
    pub amount: f64,
    /// What the money was spent on or where it came from.
    pub category: Category,
    /// Whether the money was earned or spent.
    pub kind: TransactionType,
    /// When the transaction happened.
    pub date: Date,
    /// Optional free text about the transaction.
    pub note: Note,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(amount: f64, category: Category, kind: TransactionType) -> NewTransaction {
        NewTransaction {
            amount,
            category,
            kind,
            date: OffsetDateTime::now_utc().date(),
            note: Note::default(),
        }
    }

    /// The calendar month of the transaction date, from 1 to 12.
    pub fn month(&self) -> u8 {
        self.date.month().into()
    }

    /// The calendar year of the transaction date.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TransactionResponse::from(self).serialize(serializer)
    }
}

/// The JSON representation of a [Transaction], including the month and year
/// derived from its date.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TransactionResponse {
    /// The ID of the transaction.
    #[schema(example = 1)]
    pub id: TransactionId,
    /// The amount of money spent or earned, always positive.
    #[schema(example = 45.9)]
    pub amount: f64,
    /// What the money was spent on or where it came from.
    #[schema(example = "Groceries")]
    pub category: String,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction happened.
    #[schema(value_type = String, format = Date, example = "2025-03-15")]
    pub date: Date,
    /// Free text about the transaction, empty if there is none.
    #[schema(example = "Weekly shop")]
    pub note: String,
    /// The calendar month of `date`, from 1 to 12.
    #[schema(example = 3)]
    pub month: u8,
    /// The calendar year of `date`.
    #[schema(example = 2025)]
    pub year: i32,
}

impl From<&Transaction> for TransactionResponse {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            category: transaction.category.to_string(),
            kind: transaction.kind,
            date: transaction.date,
            note: transaction.note.as_ref().to_owned(),
            month: transaction.month(),
            year: transaction.year(),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The date defaults to today (UTC) and the note defaults to an empty string.
/// Callers that know the user's timezone should set the date explicitly.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// use crate::transaction::{Transaction, TransactionType};
///
/// let new_transaction = Transaction::build(
///         45.90,
///         "Groceries".parse().unwrap(),
///         TransactionType::Expense,
///     )
///     .date(date!(2025-03-15))
///     .note("Weekly shop".parse().unwrap());
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct NewTransaction {
    /// The monetary amount of the transaction, must be greater than zero.
    pub amount: f64,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Salary".
    pub category: Category,

    /// Whether the money was earned or spent.
    pub kind: TransactionType,

    /// The date when the transaction occurred.
    pub date: Date,

    /// Free text about the transaction.
    pub note: Note,
}

impl NewTransaction {
    /// Set the date for the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: Note) -> Self {
        self.note = note;
        self
    }
}

/// A partial update to a transaction. Fields set to `None` are left unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionPatch {
    /// The new amount, must be greater than zero.
    pub amount: Option<f64>,
    /// The new category.
    pub category: Option<Category>,
    /// The new transaction type.
    pub kind: Option<TransactionType>,
    /// The new date. The month and year of the transaction follow the date.
    pub date: Option<Date>,
    /// The new note.
    pub note: Option<Note>,
}

impl TransactionPatch {
    /// Whether applying the patch would leave a transaction unchanged.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply(self, transaction: Transaction) -> Transaction {
        Transaction {
            id: transaction.id,
            amount: self.amount.unwrap_or(transaction.amount),
            category: self.category.unwrap_or(transaction.category),
            kind: self.kind.unwrap_or(transaction.kind),
            date: self.date.unwrap_or(transaction.date),
            note: self.note.unwrap_or(transaction.note),
        }
    }
}

/// Check that `amount` can be used for a transaction.
///
/// # Errors
/// This function will return an:
/// - [Error::NonPositiveAmount] if `amount` is zero, negative or NaN,
/// - or [Error::AmountTooLarge] if `amount` is greater than [MAX_AMOUNT].
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_nan() || amount <= 0.0 {
        Err(Error::NonPositiveAmount(amount))
    } else if amount > MAX_AMOUNT {
        Err(Error::AmountTooLarge(amount))
    } else {
        Ok(amount)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected for mapping rows with [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str = "id, amount, category, type, date, note";

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NonPositiveAmount] if the amount is not greater than zero,
/// - [Error::AmountTooLarge] if the amount is greater than [MAX_AMOUNT],
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let amount = validate_amount(builder.amount)?;

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (amount, category, type, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                amount,
                builder.category.as_ref(),
                builder.kind,
                builder.date,
                builder.note.as_ref(),
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Apply `patch` to the transaction `id` and return the updated transaction.
///
/// The read and the write happen in one database transaction, so either every
/// field in the patch is saved or none are.
///
/// # Errors
/// This function will return a:
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
/// - [Error::NonPositiveAmount] if the patched amount is not greater than zero,
/// - [Error::AmountTooLarge] if the patched amount is greater than [MAX_AMOUNT],
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    patch: TransactionPatch,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if let Some(amount) = patch.amount {
        validate_amount(amount)?;
    }

    let sql_transaction = connection.unchecked_transaction()?;

    let current = match get_transaction(id, &sql_transaction) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => return Err(Error::UpdateMissingTransaction),
        Err(error) => return Err(error),
    };

    if patch.is_empty() {
        return Ok(current);
    }

    let updated = patch.apply(current);

    sql_transaction.execute(
        "UPDATE \"transaction\"
        SET \
            amount = ?1, \
            category = ?2, \
            type = ?3, \
            date = ?4, \
            note = ?5 \
        WHERE id = ?6;",
        params![
            updated.amount,
            updated.category.as_ref(),
            updated.kind,
            updated.date,
            updated.note.as_ref(),
            id,
        ],
    )?;

    sql_transaction.commit()?;

    Ok(updated)
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// Month and year are not stored, they are computed from `date` when needed.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL CHECK (amount > 0 AND amount <= 1e15),
            category TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            date TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);
        CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category);",
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order of [TRANSACTION_COLUMNS].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let raw_category: String = row.get(2)?;
    let kind = row.get(3)?;
    let date = row.get(4)?;
    let raw_note: String = row.get(5)?;

    Ok(Transaction {
        id,
        amount,
        category: Category::new_unchecked(&raw_category),
        kind,
        date,
        note: Note::new_unchecked(&raw_note),
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{
            Category, MAX_AMOUNT, Note, Transaction, TransactionPatch, TransactionType,
            count_transactions, create_transaction, delete_transaction, get_transaction,
            update_transaction,
        },
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn must_create_expense(amount: f64, category: &str, conn: &Connection) -> Transaction {
        create_transaction(
            Transaction::build(
                amount,
                category.parse().unwrap(),
                TransactionType::Expense,
            )
            .date(date!(2025 - 03 - 15)),
            conn,
        )
        .expect("Could not create transaction")
    }

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(
                45.90,
                "Groceries".parse().unwrap(),
                TransactionType::Expense,
            )
            .date(date!(2025 - 03 - 15))
            .note("Weekly shop".parse().unwrap()),
            &conn,
        );

        let want = Transaction {
            id: 1,
            amount: 45.90,
            category: Category::new_unchecked("Groceries"),
            kind: TransactionType::Expense,
            date: date!(2025 - 03 - 15),
            note: Note::new_unchecked("Weekly shop"),
        };
        assert_eq!(result, Ok(want));
    }

    #[test]
    fn create_derives_month_and_year_from_date() {
        let conn = get_test_connection();
        let dates = [
            date!(2025 - 01 - 01),
            date!(2024 - 02 - 29),
            date!(1999 - 12 - 31),
        ];

        for date in dates {
            let transaction = create_transaction(
                Transaction::build(1.0, "Food".parse().unwrap(), TransactionType::Income)
                    .date(date),
                &conn,
            )
            .unwrap();

            assert_eq!(transaction.month(), u8::from(date.month()));
            assert_eq!(transaction.year(), date.year());
        }
    }

    #[test]
    fn create_defaults_note_to_empty() {
        let conn = get_test_connection();

        let transaction = must_create_expense(3.5, "Coffee", &conn);

        assert_eq!(transaction.note.as_ref(), "");
    }

    #[test]
    fn create_fails_on_non_positive_amount() {
        let conn = get_test_connection();

        for amount in [0.0, -0.01, -100.0, f64::NEG_INFINITY] {
            let result = create_transaction(
                Transaction::build(amount, "Food".parse().unwrap(), TransactionType::Expense),
                &conn,
            );

            assert_eq!(result, Err(Error::NonPositiveAmount(amount)));
        }

        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn create_fails_on_amount_above_maximum() {
        let conn = get_test_connection();

        for amount in [MAX_AMOUNT * 10.0, 1e307, f64::INFINITY] {
            let result = create_transaction(
                Transaction::build(amount, "Big".parse().unwrap(), TransactionType::Income),
                &conn,
            );

            assert_eq!(result, Err(Error::AmountTooLarge(amount)));
        }

        assert_eq!(count_transactions(&conn), Ok(0));
    }

    #[test]
    fn create_accepts_maximum_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(MAX_AMOUNT, "Big".parse().unwrap(), TransactionType::Income),
            &conn,
        );

        assert_eq!(result.map(|transaction| transaction.amount), Ok(MAX_AMOUNT));
    }

    #[test]
    fn update_fails_on_amount_above_maximum() {
        let conn = get_test_connection();
        let existing = must_create_expense(10.0, "Food", &conn);

        let result = update_transaction(
            existing.id,
            TransactionPatch {
                amount: Some(1e307),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::AmountTooLarge(1e307)));
        assert_eq!(get_transaction(existing.id, &conn), Ok(existing));
    }

    #[test]
    fn create_fails_on_nan_amount() {
        let conn = get_test_connection();

        let result = create_transaction(
            Transaction::build(f64::NAN, "Food".parse().unwrap(), TransactionType::Expense),
            &conn,
        );

        assert!(matches!(result, Err(Error::NonPositiveAmount(_))));
    }

    #[test]
    fn get_returns_created_transaction() {
        let conn = get_test_connection();
        let want = must_create_expense(12.3, "Transport", &conn);

        let got = get_transaction(want.id, &conn);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_fails_on_missing_id() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(42, &conn), Err(Error::NotFound));
    }

    #[test]
    fn update_only_changes_supplied_fields() {
        let conn = get_test_connection();
        let original = must_create_expense(10.0, "Food", &conn);

        let updated = update_transaction(
            original.id,
            TransactionPatch {
                amount: Some(25.5),
                ..Default::default()
            },
            &conn,
        )
        .expect("could not update transaction");

        let want = Transaction {
            amount: 25.5,
            ..original
        };
        assert_eq!(updated, want);
        assert_eq!(get_transaction(want.id, &conn), Ok(want));
    }

    #[test]
    fn update_date_moves_month_and_year() {
        let conn = get_test_connection();
        let original = must_create_expense(10.0, "Food", &conn);

        let updated = update_transaction(
            original.id,
            TransactionPatch {
                date: Some(date!(2026 - 07 - 04)),
                ..Default::default()
            },
            &conn,
        )
        .expect("could not update transaction");

        assert_eq!(updated.month(), 7);
        assert_eq!(updated.year(), 2026);
        let stored = get_transaction(original.id, &conn).unwrap();
        assert_eq!(stored.month(), 7);
        assert_eq!(stored.year(), 2026);
    }

    #[test]
    fn update_can_change_every_field() {
        let conn = get_test_connection();
        let original = must_create_expense(10.0, "Food", &conn);
        let want = Transaction {
            id: original.id,
            amount: 3000.0,
            category: Category::new_unchecked("Salary"),
            kind: TransactionType::Income,
            date: date!(2025 - 04 - 01),
            note: Note::new_unchecked("April pay"),
        };

        let updated = update_transaction(
            original.id,
            TransactionPatch {
                amount: Some(want.amount),
                category: Some(want.category.clone()),
                kind: Some(want.kind),
                date: Some(want.date),
                note: Some(want.note.clone()),
            },
            &conn,
        );

        assert_eq!(updated, Ok(want.clone()));
        assert_eq!(get_transaction(original.id, &conn), Ok(want));
    }

    #[test]
    fn update_fails_on_missing_id_and_leaves_store_unchanged() {
        let conn = get_test_connection();
        let existing = must_create_expense(10.0, "Food", &conn);

        let result = update_transaction(
            existing.id + 1,
            TransactionPatch {
                amount: Some(99.0),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
        assert_eq!(count_transactions(&conn), Ok(1));
        assert_eq!(get_transaction(existing.id, &conn), Ok(existing));
    }

    #[test]
    fn update_fails_on_non_positive_amount_and_leaves_record_unchanged() {
        let conn = get_test_connection();
        let existing = must_create_expense(10.0, "Food", &conn);

        let result = update_transaction(
            existing.id,
            TransactionPatch {
                amount: Some(0.0),
                category: Some(Category::new_unchecked("Rent")),
                ..Default::default()
            },
            &conn,
        );

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
        assert_eq!(get_transaction(existing.id, &conn), Ok(existing));
    }

    #[test]
    fn empty_update_returns_transaction_unchanged() {
        let conn = get_test_connection();
        let existing = must_create_expense(10.0, "Food", &conn);

        let result = update_transaction(existing.id, TransactionPatch::default(), &conn);

        assert_eq!(result, Ok(existing));
    }

    #[test]
    fn delete_then_get_fails_with_not_found() {
        let conn = get_test_connection();
        let transaction = must_create_expense(1.23, "Food", &conn);

        delete_transaction(transaction.id, &conn).expect("could not delete transaction");

        assert_eq!(
            get_transaction(transaction.id, &conn),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_fails_on_missing_id() {
        let conn = get_test_connection();

        assert_eq!(
            delete_transaction(1, &conn),
            Err(Error::DeleteMissingTransaction)
        );
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let conn = get_test_connection();
        let first = must_create_expense(1.0, "Food", &conn);
        delete_transaction(first.id, &conn).unwrap();

        let second = must_create_expense(2.0, "Food", &conn);

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            must_create_expense(i as f64, "Food", &conn);
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }
}
