//! Finance domain: income/expense transactions and their aggregation.
//!
//! Amounts are fixed-point (`rust_decimal`) with two decimal places; no float
//! ever touches money here.

pub mod report;
pub mod transaction;

pub use report::{CategoryStat, DashboardTotals, DateWindow, SummaryReport, dashboard_totals, summarize};
pub use transaction::{Amount, MAX_AMOUNT, NewTransaction, Transaction, TransactionType};
