//! Aggregation of expense and income records into totals, category
//! breakdowns, monthly trends and budget status.
//!
//! Every function here is a pure transformation of the records it is given.
//! Records are assumed to have passed [validation](crate::validation) already,
//! so amounts and categories are not checked again.
//!
//! Malformed dates are never an error. A record whose date cannot be parsed is
//! left out of date-based aggregates (monthly totals, trends, date ranges) and
//! the rest of the batch is still reported.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    category::ExpenseCategory,
    month::{YearMonth, months_before, parse_date},
    record::{BudgetRecord, ExpenseRecord, IncomeRecord, Record},
};

/// A small map that iterates in the order keys were first inserted.
///
/// Used for per-category results, so it never holds more than a handful of
/// entries and lookups are a linear scan.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K: PartialEq, V> OrderedMap<K, V> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Get the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.entries.iter().position(|(entry_key, _)| *entry_key == key) {
            Some(index) => index,
            None => {
                self.entries.push((key, default()));
                self.entries.len() - 1
            }
        };

        &mut self.entries[index].1
    }

    /// Set the value for `key`, keeping the key's original position if it was
    /// already present.
    fn insert(&mut self, key: K, value: V) {
        match self.entries.iter_mut().find(|(entry_key, _)| *entry_key == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, value)| (key, value)))
    }
}

/// Sum of the record amounts, zero for no records.
pub fn calculate_total<R: Record>(records: &[R]) -> Decimal {
    records.iter().map(R::amount).sum()
}

/// Mean record amount, zero for no records.
pub fn calculate_average<R: Record>(records: &[R]) -> Decimal {
    if records.is_empty() {
        return Decimal::ZERO;
    }

    calculate_total(records) / Decimal::from(records.len())
}

/// Partition records by category (or source for income).
///
/// Records keep their relative order within each group. Only categories that
/// appear in `records` are present in the result.
pub fn group_by_category<R: Record + Clone>(records: &[R]) -> OrderedMap<R::Key, Vec<R>> {
    let mut grouped = OrderedMap::new();

    for record in records {
        grouped
            .get_or_insert_with(record.key(), Vec::new)
            .push(record.clone());
    }

    grouped
}

/// Total amount per category (or source for income).
///
/// Categories are ordered by their first appearance in `records`.
pub fn get_category_totals<R: Record>(records: &[R]) -> OrderedMap<R::Key, Decimal> {
    let mut totals = OrderedMap::new();

    for record in records {
        *totals.get_or_insert_with(record.key(), || Decimal::ZERO) += record.amount();
    }

    totals
}

/// Total amount of the records dated in `month` of `year`.
///
/// Matching is done on the zero-padded `YYYY-MM` date prefix, so malformed
/// dates simply do not match.
pub fn get_monthly_total<R: Record>(records: &[R], year: i32, month: u8) -> Decimal {
    let prefix = format!("{year:04}-{month:02}");

    records
        .iter()
        .filter(|record| record.date().starts_with(&prefix))
        .map(R::amount)
        .sum()
}

/// How spending in one category compares to its monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    /// The monthly limit.
    pub budget: Decimal,
    pub spent: Decimal,
    /// The budget left over, negative when overspent.
    pub remaining: Decimal,
    /// `spent` as a percentage of `budget`, rounded to one decimal place.
    pub percentage: Decimal,
    pub over_budget: bool,
}

/// Compare spending in `month` of `year` against each budget.
///
/// The result has one entry per budget, in the order of `budgets`. Categories
/// without a budget are left out even if money was spent on them.
pub fn get_budget_status(
    expenses: &[ExpenseRecord],
    budgets: &[BudgetRecord],
    year: i32,
    month: u8,
) -> OrderedMap<ExpenseCategory, BudgetStatus> {
    let prefix = format!("{year:04}-{month:02}");
    let month_expenses: Vec<ExpenseRecord> = expenses
        .iter()
        .filter(|expense| expense.date.starts_with(&prefix))
        .cloned()
        .collect();
    let category_totals = get_category_totals(&month_expenses);

    let mut status = OrderedMap::new();

    for budget in budgets {
        let spent = category_totals
            .get(&budget.category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let percentage = if budget.monthly_limit > Decimal::ZERO {
            (spent / budget.monthly_limit * Decimal::ONE_HUNDRED).round_dp(1)
        } else {
            Decimal::ZERO
        };

        status.insert(
            budget.category,
            BudgetStatus {
                budget: budget.monthly_limit,
                spent,
                remaining: budget.monthly_limit - spent,
                percentage,
                over_budget: spent > budget.monthly_limit,
            },
        );
    }

    status
}

/// Monthly totals over the last `months` calendar months, up to today (UTC).
///
/// See [get_spending_trend_on].
pub fn get_spending_trend<R: Record>(records: &[R], months: u32) -> BTreeMap<YearMonth, Decimal> {
    get_spending_trend_on(records, months, OffsetDateTime::now_utc().date())
}

/// Monthly totals for records dated between `months` calendar months before
/// `today` and `today`, both inclusive.
///
/// Keys are in ascending order and months without records are absent. Records
/// with malformed dates are skipped.
pub fn get_spending_trend_on<R: Record>(
    records: &[R],
    months: u32,
    today: Date,
) -> BTreeMap<YearMonth, Decimal> {
    let start = months_before(today, months);
    let mut trend = BTreeMap::new();

    for record in records {
        let Some(date) = parse_date(record.date()) else {
            tracing::debug!("Skipping record with malformed date {:?}", record.date());
            continue;
        };

        if (start..=today).contains(&date) {
            *trend.entry(YearMonth::of(date)).or_insert(Decimal::ZERO) += record.amount();
        }
    }

    trend
}

/// Records dated between `start` and `end`, both inclusive.
///
/// Records with malformed dates are skipped.
///
/// # Errors
///
/// Returns [Error::InvalidDateRange] if `start` is after `end`.
pub fn filter_by_date_range<R: Record + Clone>(
    records: &[R],
    start: Date,
    end: Date,
) -> Result<Vec<R>, Error> {
    if start > end {
        return Err(Error::InvalidDateRange { start, end });
    }

    Ok(records
        .iter()
        .filter(|record| {
            parse_date(record.date()).is_some_and(|date| (start..=end).contains(&date))
        })
        .cloned()
        .collect())
}

/// Money in against money out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialOverview {
    pub expense_count: usize,
    pub total_expenses: Decimal,
    pub income_count: usize,
    pub total_income: Decimal,
    /// Income minus expenses.
    pub net_savings: Decimal,
    /// Net savings as a percentage of income, zero when there is no income.
    pub savings_rate: Decimal,
    /// Whether more was spent than earned. Always false when there is no income.
    pub is_deficit: bool,
}

/// Summarise income against expenses.
pub fn financial_overview(expenses: &[ExpenseRecord], income: &[IncomeRecord]) -> FinancialOverview {
    let total_expenses = calculate_total(expenses);
    let total_income = calculate_total(income);
    let net_savings = total_income - total_expenses;

    let (savings_rate, is_deficit) = if total_income > Decimal::ZERO {
        (
            net_savings / total_income * Decimal::ONE_HUNDRED,
            net_savings < Decimal::ZERO,
        )
    } else {
        (Decimal::ZERO, false)
    };

    FinancialOverview {
        expense_count: expenses.len(),
        total_expenses,
        income_count: income.len(),
        total_income,
        net_savings,
        savings_rate,
        is_deficit,
    }
}
