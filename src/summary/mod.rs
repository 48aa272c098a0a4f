//! Totals of income and expenses over a month or year, with a breakdown of
//! expenses by category.

mod aggregation;
pub(crate) mod handler;

pub use aggregation::{CategoryTotal, Summary, summarize};
pub use handler::{SummaryFilter, get_summary, get_summary_endpoint};
