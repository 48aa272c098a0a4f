//! Aggregation of transactions into a [Summary].

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::transaction::{Transaction, TransactionType};

/// The total spent in a single category.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryTotal {
    /// The name of the category.
    #[schema(example = "Groceries")]
    pub category: String,
    /// The sum of the expenses in the category, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 45.9)]
    pub total: Decimal,
}

/// Aggregated totals over a set of transactions.
///
/// Totals are exact decimals and are written to JSON as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    /// The sum of all income, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2500.0)]
    pub total_income: Decimal,
    /// The sum of all expenses, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 45.9)]
    pub total_expenses: Decimal,
    /// Income minus expenses, rounded to cents.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 2454.1)]
    pub balance: Decimal,
    /// The number of transactions that were summarised.
    pub transaction_count: usize,
    /// Expense totals per category, largest first.
    pub categories: Vec<CategoryTotal>,
}

/// Summarise `transactions`.
///
/// Only expenses contribute to the category breakdown. Categories with equal
/// totals keep the order in which they first appear in `transactions`.
/// Amounts are summed exactly and rounded to cents at the end.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut category_indices: HashMap<&str, usize> = HashMap::new();
    let mut category_totals: Vec<(&str, Decimal)> = Vec::new();

    for transaction in transactions {
        let amount = to_decimal(transaction.amount);

        match transaction.kind {
            TransactionType::Income => total_income = total_income.saturating_add(amount),
            TransactionType::Expense => {
                total_expenses = total_expenses.saturating_add(amount);

                let category = transaction.category.as_ref();
                let index = *category_indices.entry(category).or_insert_with(|| {
                    category_totals.push((category, Decimal::ZERO));
                    category_totals.len() - 1
                });
                let total = &mut category_totals[index].1;
                *total = total.saturating_add(amount);
            }
        }
    }

    // `sort_by` is stable, so ties stay in first-encountered order.
    category_totals.sort_by(|a, b| b.1.cmp(&a.1));

    Summary {
        total_income: round_to_cents(total_income),
        total_expenses: round_to_cents(total_expenses),
        balance: round_to_cents(total_income.saturating_sub(total_expenses)),
        transaction_count: transactions.len(),
        categories: category_totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_owned(),
                total: round_to_cents(total),
            })
            .collect(),
    }
}

/// The exact value of a stored amount.
///
/// Amounts are validated to lie in `(0, MAX_AMOUNT]`, which always fits in a
/// [Decimal].
fn to_decimal(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount).unwrap_or(Decimal::MAX)
}

/// Round to two decimal places, with halves rounded to the nearest even cent.
fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
