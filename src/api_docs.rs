//! The OpenAPI description of the API, served as JSON and through Swagger UI.

use utoipa::OpenApi;

use crate::{
    ErrorResponse,
    summary::{CategoryTotal, Summary},
    transaction::{
        TransactionResponse, TransactionType, create_endpoint::CreateTransactionRequest,
        edit_endpoint::UpdateTransactionRequest,
    },
};

/// The OpenAPI document for every route except the root, coffee and docs routes.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::transaction::create_endpoint::create_transaction_endpoint,
        crate::transaction::list_endpoint::list_transactions_endpoint,
        crate::transaction::get_endpoint::get_transaction_endpoint,
        crate::transaction::edit_endpoint::edit_transaction_endpoint,
        crate::transaction::delete_endpoint::delete_transaction_endpoint,
        crate::summary::handler::get_summary_endpoint
    ),
    components(schemas(
        TransactionResponse,
        TransactionType,
        CreateTransactionRequest,
        UpdateTransactionRequest,
        Summary,
        CategoryTotal,
        ErrorResponse
    )),
    tags(
        (name = "Transactions", description = "Record, list, edit and delete income and expenses"),
        (name = "Summary", description = "Totals and category breakdowns over a period")
    ),
    info(
        title = "Budget Tracker API",
        description = "A personal budget tracker to record and analyse income and expenses.",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
