use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use workhub_core::{CompanyId, DomainError, DomainResult, TransactionId, UserId, require_text};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(DomainError::validation("type must be one of: income, expense")),
        }
    }
}

/// Largest storable amount: the `NUMERIC(14, 2)` column limit.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x107A_3FFF, 0x5AF3, 0, false, 2);

/// A positive currency amount with exactly two decimal places.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Round half away from zero to cents; zero, negative and oversized
    /// amounts are rejected.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if cents <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be greater than zero"));
        }
        if cents > MAX_AMOUNT {
            return Err(DomainError::validation(format!("amount must not exceed {MAX_AMOUNT}")));
        }
        cents.rescale(2);
        Ok(Self(cents))
    }

    /// Wrap a value loaded from storage (already NUMERIC(14,2)).
    pub fn from_stored(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// A recorded income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Who recorded it.
    pub user_id: UserId,
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub amount: Amount,
    pub kind: TransactionType,
    pub category: String,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(
        amount: Decimal,
        kind: &str,
        category: &str,
        date: DateTime<Utc>,
        notes: Option<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            amount: Amount::new(amount)?,
            kind: kind.parse()?,
            category: require_text("category", category)?,
            date,
            notes,
        })
    }

    pub fn into_transaction(self, company_id: CompanyId, user_id: UserId) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
            notes: self.notes,
            user_id,
            company_id,
        }
    }
}
