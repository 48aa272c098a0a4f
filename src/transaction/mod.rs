//! Transaction management for the budget tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` builder for creating transactions
//! - Database functions for storing, querying, and managing transactions
//! - Route handlers for the transaction endpoints

mod core;
pub(crate) mod create_endpoint;
pub(crate) mod delete_endpoint;
pub(crate) mod edit_endpoint;
pub(crate) mod get_endpoint;
pub(crate) mod list_endpoint;
mod query;

pub use core::{
    Category, MAX_AMOUNT, MAX_CATEGORY_LENGTH, MAX_NOTE_LENGTH, NewTransaction, Note, Transaction,
    TransactionPatch, TransactionResponse, TransactionType, count_transactions, create_transaction,
    create_transaction_table, delete_transaction, get_transaction, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use query::{TransactionFilter, list_transactions};
pub(crate) use query::{SortOrder, parse_month, query_transactions};
