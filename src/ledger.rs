//! An in-memory book of expense, income and budget records.
//!
//! The ledger enforces the lifecycle of each record: records are validated on
//! creation, replaced wholesale on update and removed by ID. Budgets are keyed
//! by category, so setting a budget for a category that already has one
//! replaces its limit.
//!
//! A ledger can be saved to and loaded from a JSON snapshot.

use std::{cmp::Reverse, fs, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    analysis::{calculate_total, filter_by_date_range},
    category::ExpenseCategory,
    record::{BudgetRecord, ExpenseRecord, IncomeRecord, RecordId},
};

/// Counts and the date span of the records in a [Ledger].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerStats {
    pub total_expenses: usize,
    pub total_income: usize,
    pub total_budgets: usize,
    /// The earliest expense date, if there are any expenses.
    pub earliest_date: Option<String>,
    /// The latest expense date, if there are any expenses.
    pub latest_date: Option<String>,
}

/// The stored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    income: Vec<IncomeRecord>,
    #[serde(default)]
    budgets: Vec<BudgetRecord>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger from the JSON snapshot at `path`.
    ///
    /// A missing file is treated as an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Io] if the file cannot be read, an
    /// [Error::JSONSerializationError] if it is not a valid snapshot, or an
    /// [Error::DuplicateBudget] if it holds two budgets for one category.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            tracing::info!("No ledger at {}, starting with an empty one", path.display());
            return Ok(Self::new());
        }

        let text = fs::read_to_string(path)?;
        let ledger: Ledger = serde_json::from_str(&text)?;

        for (index, budget) in ledger.budgets.iter().enumerate() {
            if ledger.budgets[..index]
                .iter()
                .any(|other| other.category == budget.category)
            {
                return Err(Error::DuplicateBudget(budget.category));
            }
        }

        tracing::debug!(
            "Loaded {} expenses, {} income records and {} budgets from {}",
            ledger.expenses.len(),
            ledger.income.len(),
            ledger.budgets.len(),
            path.display()
        );

        Ok(ledger)
    }

    /// Write the ledger to `path` as a JSON snapshot, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Io] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        tracing::debug!("Saved ledger to {}", path.display());

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------------

    /// All expenses in the order they were added.
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    /// All expenses, most recent first.
    pub fn expenses_newest_first(&self) -> Vec<ExpenseRecord> {
        let mut expenses = self.expenses.clone();
        expenses.sort_by_key(|expense| {
            (
                Reverse(expense.date.clone()),
                Reverse(expense.created_at),
                Reverse(expense.id),
            )
        });
        expenses
    }

    /// Record a new expense.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the input fails validation. An
    /// [Error::IdsExhausted] is returned if the largest ID is already taken.
    pub fn add_expense(
        &mut self,
        date: &str,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<ExpenseRecord, Error> {
        let mut expense = ExpenseRecord::new(date, category, amount, description)?;
        expense.id = Some(next_id(self.expenses.iter().map(|expense| expense.id))?);
        expense.created_at = Some(OffsetDateTime::now_utc());

        tracing::info!("Created expense {:?} for {}", expense.id, expense.amount);
        self.expenses.push(expense.clone());

        Ok(expense)
    }

    /// Get an expense by its ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no expense with `id`.
    pub fn expense(&self, id: RecordId) -> Result<&ExpenseRecord, Error> {
        self.expenses
            .iter()
            .find(|expense| expense.id == Some(id))
            .ok_or(Error::NotFound)
    }

    /// Expenses in `category`, most recent first.
    pub fn expenses_by_category(&self, category: ExpenseCategory) -> Vec<ExpenseRecord> {
        self.expenses_newest_first()
            .into_iter()
            .filter(|expense| expense.category == category)
            .collect()
    }

    /// Expenses dated between `start` and `end` inclusive, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateRange] if `start` is after `end`.
    pub fn expenses_in_range(&self, start: Date, end: Date) -> Result<Vec<ExpenseRecord>, Error> {
        filter_by_date_range(&self.expenses_newest_first(), start, end)
    }

    /// Replace every field of the expense with `id`.
    ///
    /// The ID and creation time are kept.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the input fails validation, or an
    /// [Error::UpdateMissingExpense] if there is no expense with `id`.
    pub fn update_expense(
        &mut self,
        id: RecordId,
        date: &str,
        category: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<ExpenseRecord, Error> {
        let mut replacement = ExpenseRecord::new(date, category, amount, description)?;

        let existing = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == Some(id))
            .ok_or(Error::UpdateMissingExpense(id))?;

        replacement.id = existing.id;
        replacement.created_at = existing.created_at;
        *existing = replacement.clone();

        tracing::info!("Updated expense {id}");

        Ok(replacement)
    }

    /// Remove the expense with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DeleteMissingExpense] if there is no expense with `id`.
    pub fn delete_expense(&mut self, id: RecordId) -> Result<ExpenseRecord, Error> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == Some(id))
            .ok_or(Error::DeleteMissingExpense(id))?;

        tracing::info!("Deleted expense {id}");

        Ok(self.expenses.remove(index))
    }

    // ------------------------------------------------------------------------
    // Income
    // ------------------------------------------------------------------------

    /// All income records in the order they were added.
    pub fn income(&self) -> &[IncomeRecord] {
        &self.income
    }

    /// All income records, most recent first.
    pub fn income_newest_first(&self) -> Vec<IncomeRecord> {
        let mut income = self.income.clone();
        income.sort_by_key(|record| (Reverse(record.date.clone()), Reverse(record.id)));
        income
    }

    /// Record new income.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the input fails validation. An
    /// [Error::IdsExhausted] is returned if the largest ID is already taken.
    pub fn add_income(
        &mut self,
        date: &str,
        source: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<IncomeRecord, Error> {
        let mut income = IncomeRecord::new(date, source, amount, description)?;
        income.id = Some(next_id(self.income.iter().map(|record| record.id))?);
        income.created_at = Some(OffsetDateTime::now_utc());

        tracing::info!("Created income {:?} for {}", income.id, income.amount);
        self.income.push(income.clone());

        Ok(income)
    }

    /// Get an income record by its ID.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if there is no income record with `id`.
    pub fn income_record(&self, id: RecordId) -> Result<&IncomeRecord, Error> {
        self.income
            .iter()
            .find(|record| record.id == Some(id))
            .ok_or(Error::NotFound)
    }

    /// Income dated between `start` and `end` inclusive, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateRange] if `start` is after `end`.
    pub fn income_in_range(&self, start: Date, end: Date) -> Result<Vec<IncomeRecord>, Error> {
        filter_by_date_range(&self.income_newest_first(), start, end)
    }

    /// Total income, optionally limited to the dates in `range` (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDateRange] if the range starts after it ends.
    pub fn total_income(&self, range: Option<(Date, Date)>) -> Result<Decimal, Error> {
        match range {
            Some((start, end)) => Ok(calculate_total(&self.income_in_range(start, end)?)),
            None => Ok(calculate_total(&self.income)),
        }
    }

    /// Replace every field of the income record with `id`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the input fails validation, or an
    /// [Error::UpdateMissingIncome] if there is no income record with `id`.
    pub fn update_income(
        &mut self,
        id: RecordId,
        date: &str,
        source: &str,
        amount: Decimal,
        description: &str,
    ) -> Result<IncomeRecord, Error> {
        let mut replacement = IncomeRecord::new(date, source, amount, description)?;

        let existing = self
            .income
            .iter_mut()
            .find(|record| record.id == Some(id))
            .ok_or(Error::UpdateMissingIncome(id))?;

        replacement.id = existing.id;
        replacement.created_at = existing.created_at;
        *existing = replacement.clone();

        tracing::info!("Updated income {id}");

        Ok(replacement)
    }

    /// Remove the income record with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DeleteMissingIncome] if there is no income record with `id`.
    pub fn delete_income(&mut self, id: RecordId) -> Result<IncomeRecord, Error> {
        let index = self
            .income
            .iter()
            .position(|record| record.id == Some(id))
            .ok_or(Error::DeleteMissingIncome(id))?;

        tracing::info!("Deleted income {id}");

        Ok(self.income.remove(index))
    }

    // ------------------------------------------------------------------------
    // Budgets
    // ------------------------------------------------------------------------

    /// All budgets, ordered by category name.
    pub fn budgets(&self) -> Vec<BudgetRecord> {
        let mut budgets = self.budgets.clone();
        budgets.sort_by_key(|budget| budget.category.display_name());
        budgets
    }

    /// The budget for `category`, if one is set.
    pub fn budget(&self, category: ExpenseCategory) -> Option<&BudgetRecord> {
        self.budgets
            .iter()
            .find(|budget| budget.category == category)
    }

    /// Set the monthly limit for `category`, replacing any existing limit.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if `monthly_limit` is not positive or
    /// is unreasonably large.
    /// A new budget fails with [Error::IdsExhausted] if the largest ID is
    /// already taken.
    pub fn set_budget(
        &mut self,
        category: ExpenseCategory,
        monthly_limit: Decimal,
    ) -> Result<BudgetRecord, Error> {
        let mut budget = BudgetRecord::new(category, monthly_limit)?;

        match self
            .budgets
            .iter_mut()
            .find(|existing| existing.category == category)
        {
            Some(existing) => {
                existing.monthly_limit = monthly_limit;
                budget = existing.clone();
                tracing::info!("Updated budget for {category} to {monthly_limit}");
            }
            None => {
                budget.id = Some(next_id(self.budgets.iter().map(|budget| budget.id))?);
                budget.created_at = Some(OffsetDateTime::now_utc());
                self.budgets.push(budget.clone());
                tracing::info!("Created budget for {category} of {monthly_limit}");
            }
        }

        Ok(budget)
    }

    /// Remove the budget for `category`, returning it.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DeleteMissingBudget] if no budget is set for `category`.
    pub fn delete_budget(&mut self, category: ExpenseCategory) -> Result<BudgetRecord, Error> {
        let index = self
            .budgets
            .iter()
            .position(|budget| budget.category == category)
            .ok_or(Error::DeleteMissingBudget(category))?;

        tracing::info!("Deleted budget for {category}");

        Ok(self.budgets.remove(index))
    }

    /// Record counts and the span of expense dates.
    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            total_expenses: self.expenses.len(),
            total_income: self.income.len(),
            total_budgets: self.budgets.len(),
            earliest_date: self.expenses.iter().map(|e| e.date.clone()).min(),
            latest_date: self.expenses.iter().map(|e| e.date.clone()).max(),
        }
    }
}

/// One more than the largest ID in use, starting from 1.
fn next_id(ids: impl Iterator<Item = Option<RecordId>>) -> Result<RecordId, Error> {
    ids.flatten()
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(Error::IdsExhausted)
}
