//! The expense, income and budget records.
//!
//! Dates are kept as the `YYYY-MM-DD` text handed over by storage. Records
//! are validated when created through their constructors, but aggregation
//! tolerates malformed dates in records that arrive from elsewhere.

use std::hash::Hash;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    category::{ExpenseCategory, IncomeSource},
    month::parse_date,
    validation::{
        ValidationError, validate_budget_limit, validate_expense_data, validate_income_data,
    },
};

/// Identifier assigned to a record when it is stored.
pub type RecordId = i64;

/// Behaviour shared by expenses and income so they can be aggregated alike.
pub trait Record {
    /// What the record is grouped by: a category for expenses, a source for income.
    type Key: Copy + Eq + Hash;

    /// The record date as stored, normally `YYYY-MM-DD`.
    fn date(&self) -> &str;

    /// The category or source of the record.
    fn key(&self) -> Self::Key;

    /// The amount of money spent or received.
    fn amount(&self) -> Decimal;

    /// The `YYYY-MM` part of the date used to group records by month.
    ///
    /// Dates shorter than seven characters are returned whole.
    fn month_key(&self) -> &str {
        let date = self.date();
        date.get(..7).unwrap_or(date)
    }

    /// Whether the record happened on or after `days` days before `today`.
    ///
    /// Records with malformed dates are never recent. A window reaching past
    /// the earliest representable date includes every valid date.
    fn is_recent(&self, days: i64, today: Date) -> bool {
        let cutoff = i64::from(today.to_julian_day()).saturating_sub(days);
        parse_date(self.date()).is_some_and(|date| i64::from(date.to_julian_day()) >= cutoff)
    }
}

/// Money that was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Assigned when the record is stored.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// When the money was spent, as `YYYY-MM-DD`.
    pub date: String,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    /// When the record was stored.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl ExpenseRecord {
    /// Create an unsaved expense from user input.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [validate_expense_data].
    pub fn new(
        date: &str,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<Self, ValidationError> {
        validate_expense_data(date, category, amount, description)?;

        let category =
            ExpenseCategory::from_name(category).ok_or(ValidationError::InvalidCategory)?;

        Ok(Self {
            id: None,
            date: date.to_owned(),
            category,
            amount,
            description: description.to_owned(),
            created_at: None,
        })
    }

    /// The chart colour of the expense's category.
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}

impl Record for ExpenseRecord {
    type Key = ExpenseCategory;

    fn date(&self) -> &str {
        &self.date
    }

    fn key(&self) -> Self::Key {
        self.category
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Money that was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Assigned when the record is stored.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// When the money was received, as `YYYY-MM-DD`.
    pub date: String,
    pub source: IncomeSource,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    /// When the record was stored.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl IncomeRecord {
    /// Create an unsaved income record from user input.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [validate_income_data].
    pub fn new(
        date: &str,
        source: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<Self, ValidationError> {
        validate_income_data(date, source, amount, description)?;

        let source = IncomeSource::from_name(source).ok_or(ValidationError::InvalidSource)?;

        Ok(Self {
            id: None,
            date: date.to_owned(),
            source,
            amount,
            description: description.to_owned(),
            created_at: None,
        })
    }

    /// The chart colour of the income's source.
    pub fn color(&self) -> &'static str {
        self.source.color()
    }
}

impl Record for IncomeRecord {
    type Key = IncomeSource;

    fn date(&self) -> &str {
        &self.date
    }

    fn key(&self) -> Self::Key {
        self.source
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// A monthly spending limit for one expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub category: ExpenseCategory,
    pub monthly_limit: Decimal,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl BudgetRecord {
    /// Create an unsaved budget.
    ///
    /// # Errors
    ///
    /// Returns the problem found by [validate_budget_limit].
    pub fn new(category: ExpenseCategory, monthly_limit: Decimal) -> Result<Self, ValidationError> {
        validate_budget_limit(monthly_limit)?;

        Ok(Self {
            id: None,
            category,
            monthly_limit,
            created_at: None,
        })
    }
}
