//! Dashboard totals and the date-range summary report.
//!
//! Both operate on a transaction set that has already been scoped to what the
//! caller may see.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use workhub_core::{DomainError, DomainResult};

use crate::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`; negative when spending exceeds income.
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub expense_by_category: Vec<CategoryStat>,
    pub income_by_category: Vec<CategoryStat>,
}

/// Inclusive calendar-day window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation("start_date must not be after end_date"));
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds.
    pub fn parse(start: &str, end: &str) -> DomainResult<Self> {
        let parse = |field: &str, value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| DomainError::validation(format!("{field} must be formatted YYYY-MM-DD")))
        };
        Self::new(parse("start_date", start)?, parse("end_date", end)?)
    }

    /// First instant of the window.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// First instant after the window (exclusive upper bound).
    pub fn ends_before(&self) -> DateTime<Utc> {
        self.end
            .succ_opt()
            .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.start <= day && day <= self.end
    }
}

fn add(acc: Decimal, amount: Decimal) -> DomainResult<Decimal> {
    acc.checked_add(amount)
        .ok_or_else(|| DomainError::validation("transaction totals exceed the supported range"))
}

fn balance(total_income: Decimal, total_expense: Decimal) -> DomainResult<Decimal> {
    total_income
        .checked_sub(total_expense)
        .ok_or_else(|| DomainError::validation("transaction totals exceed the supported range"))
}

pub fn dashboard_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> DomainResult<DashboardTotals> {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TransactionType::Income => total_income = add(total_income, t.amount.value())?,
            TransactionType::Expense => total_expense = add(total_expense, t.amount.value())?,
        }
    }
    Ok(DashboardTotals {
        total_income,
        total_expense,
        balance: balance(total_income, total_expense)?,
    })
}

/// Group by `(type, category)` and total each side.
///
/// Categories are listed alphabetically.
pub fn summarize<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> DomainResult<SummaryReport> {
    let mut income: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut expense: BTreeMap<&str, Decimal> = BTreeMap::new();

    for t in transactions {
        let bucket = match t.kind {
            TransactionType::Income => &mut income,
            TransactionType::Expense => &mut expense,
        };
        let slot = bucket.entry(t.category.as_str()).or_insert(Decimal::ZERO);
        *slot = add(*slot, t.amount.value())?;
    }

    let total_income = income.values().try_fold(Decimal::ZERO, |acc, v| add(acc, *v))?;
    let total_expense = expense.values().try_fold(Decimal::ZERO, |acc, v| add(acc, *v))?;

    let stats = |m: BTreeMap<&str, Decimal>| {
        m.into_iter()
            .map(|(category, total)| CategoryStat {
                category: category.to_string(),
                total,
            })
            .collect::<Vec<_>>()
    };

    Ok(SummaryReport {
        total_income,
        total_expense,
        balance: balance(total_income, total_expense)?,
        expense_by_category: stats(expense),
        income_by_category: stats(income),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;
    use workhub_core::{CompanyId, UserId};

    use super::*;
    use crate::{Amount, NewTransaction};

    fn tx(kind: &str, category: &str, cents: i64) -> Transaction {
        NewTransaction::new(Decimal::new(cents, 2), kind, category, Utc::now(), None)
            .unwrap()
            .into_transaction(CompanyId::new(), UserId::new())
    }

    #[test]
    fn summary_groups_by_type_and_category() {
        let txs = vec![
            tx("income", "Salary", 500_000),
            tx("expense", "Food", 1_250),
            tx("expense", "Food", 750),
            tx("expense", "Rent", 100_000),
            tx("income", "Food", 300), // same label, other side
        ];

        let report = summarize(&txs).unwrap();
        assert_eq!(report.total_income, Decimal::new(500_300, 2));
        assert_eq!(report.total_expense, Decimal::new(102_000, 2));
        assert_eq!(report.balance, Decimal::new(398_300, 2));
        assert_eq!(
            report.expense_by_category,
            vec![
                CategoryStat { category: "Food".into(), total: Decimal::new(2_000, 2) },
                CategoryStat { category: "Rent".into(), total: Decimal::new(100_000, 2) },
            ]
        );
        assert_eq!(report.income_by_category.len(), 2);
    }

    #[test]
    fn balance_can_be_negative() {
        let txs = vec![tx("income", "Sales", 100), tx("expense", "Tools", 250)];
        assert_eq!(dashboard_totals(&txs).unwrap().balance, Decimal::new(-150, 2));
    }

    #[test]
    fn totals_past_decimal_range_are_an_error_not_a_panic() {
        // Rows loaded from storage skip the per-amount cap.
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let mut a = tx("income", "Sales", 100);
        a.amount = Amount::from_stored(huge);
        let b = a.clone();
        let txs = vec![a, b];

        assert!(matches!(dashboard_totals(&txs), Err(DomainError::Validation(_))));
        assert!(matches!(summarize(&txs), Err(DomainError::Validation(_))));
    }

    #[test]
    fn capped_amounts_aggregate_exactly() {
        let txs: Vec<Transaction> = (0..1_000)
            .map(|_| {
                NewTransaction::new(crate::MAX_AMOUNT, "expense", "Capex", Utc::now(), None)
                    .unwrap()
                    .into_transaction(CompanyId::new(), UserId::new())
            })
            .collect();
        let dash = dashboard_totals(&txs).unwrap();
        assert_eq!(dash.total_expense, crate::MAX_AMOUNT * Decimal::from(1_000));
        assert_eq!(dash.balance, -dash.total_expense);
    }

    #[test]
    fn empty_set_reports_zeroes() {
        let report = summarize(&Vec::new()).unwrap();
        assert_eq!(report.total_income, Decimal::ZERO);
        assert!(report.income_by_category.is_empty());
    }

    #[test]
    fn window_includes_both_end_days() {
        let w = DateWindow::parse("2024-03-01", "2024-03-31").unwrap();
        assert!(w.contains(&Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
        assert!(w.contains(&Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()));
        assert!(!w.contains(&Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()));
        assert!(!w.contains(&Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap()));
        assert_eq!(w.ends_before(), Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn inverted_or_malformed_windows_are_rejected() {
        assert!(DateWindow::parse("2024-03-31", "2024-03-01").is_err());
        assert!(DateWindow::parse("03/01/2024", "2024-03-31").is_err());
    }

    proptest! {
        /// Per-category totals always add up to the side totals, and the
        /// balance is their difference, whatever the category partition.
        #[test]
        fn category_totals_sum_to_side_totals(
            rows in prop::collection::vec((any::<bool>(), 0usize..5, 1i64..10_000_000), 0..60)
        ) {
            let categories = ["Food", "Rent", "Salary", "Travel", "Misc"];
            let txs: Vec<Transaction> = rows
                .iter()
                .map(|(income, cat, cents)| Transaction {
                    id: workhub_core::TransactionId::new(),
                    amount: Amount::new(Decimal::new(*cents, 2)).unwrap(),
                    kind: if *income { TransactionType::Income } else { TransactionType::Expense },
                    category: categories[*cat].to_string(),
                    date: Utc::now(),
                    notes: None,
                    user_id: UserId::new(),
                    company_id: CompanyId::new(),
                })
                .collect();

            let report = summarize(&txs).unwrap();
            let inc: Decimal = report.income_by_category.iter().map(|c| c.total).sum();
            let exp: Decimal = report.expense_by_category.iter().map(|c| c.total).sum();

            prop_assert_eq!(inc, report.total_income);
            prop_assert_eq!(exp, report.total_expense);
            prop_assert_eq!(report.balance, report.total_income - report.total_expense);

            let dash = dashboard_totals(&txs).unwrap();
            prop_assert_eq!(dash.total_income, report.total_income);
            prop_assert_eq!(dash.total_expense, report.total_expense);
        }
    }
}
