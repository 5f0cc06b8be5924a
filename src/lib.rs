//! Pocketbook is a personal finance tracker for recording expenses and income,
//! setting monthly budgets per category and reporting on where the money went.
//!
//! This library holds the record types, the validation applied to user input,
//! the aggregation engine that turns records into totals, trends and budget
//! status, and an in-memory [Ledger] used to keep the records.

use time::Date;

mod analysis;
mod category;
mod format;
mod ledger;
mod month;
mod record;
mod report;
mod timezone;
mod validation;

pub use analysis::{
    BudgetStatus, FinancialOverview, OrderedMap, calculate_average, calculate_total,
    filter_by_date_range, financial_overview, get_budget_status, get_category_totals,
    get_monthly_total, get_spending_trend, get_spending_trend_on, group_by_category,
};
pub use category::{ExpenseCategory, IncomeSource};
pub use format::{date_range_description, format_currency};
pub use ledger::{Ledger, LedgerStats};
pub use month::{DATE_FORMAT, YearMonth, format_date, months_before, parse_date};
pub use record::{BudgetRecord, ExpenseRecord, IncomeRecord, Record, RecordId};
pub use report::{Summary, render_budget_status, render_summary, render_trend};
pub use timezone::{get_local_offset, today_in};
pub use validation::{
    MAX_AMOUNT, MAX_BUDGET_LIMIT, MAX_DESCRIPTION_LENGTH, ValidationError, parse_amount,
    validate_budget_limit, validate_expense_data, validate_income_data,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// User input failed validation.
    ///
    /// The message is intended to be shown to the user.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A category or income source name that is not in the catalogue.
    #[error("\"{0}\" is not a known category or income source")]
    UnknownCategory(String),

    /// A month key that is not in the form `YYYY-MM`.
    #[error("\"{0}\" is not a valid month, expected YYYY-MM")]
    InvalidMonth(String),

    /// A date range where the start comes after the end.
    #[error("Start date {start} must be before or equal to end date {end}")]
    InvalidDateRange {
        /// The first day of the range.
        start: Date,
        /// The last day of the range.
        end: Date,
    },

    /// The requested record was not found.
    #[error("the requested record could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("Expense {0} not found")]
    UpdateMissingExpense(RecordId),

    /// Tried to delete an expense that does not exist
    #[error("Expense {0} not found")]
    DeleteMissingExpense(RecordId),

    /// Tried to update an income record that does not exist
    #[error("Income record {0} not found")]
    UpdateMissingIncome(RecordId),

    /// Tried to delete an income record that does not exist
    #[error("Income record {0} not found")]
    DeleteMissingIncome(RecordId),

    /// Tried to delete a budget that does not exist
    #[error("No budget is set for {0}")]
    DeleteMissingBudget(ExpenseCategory),

    /// Every record ID up to the largest possible one is taken.
    #[error("no record IDs are left to assign")]
    IdsExhausted,

    /// A snapshot contained more than one budget for the same category.
    #[error("more than one budget is set for {0}")]
    DuplicateBudget(ExpenseCategory),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// A snapshot could not be parsed or serialized as JSON.
    #[error("could not read or write JSON: {0}")]
    JSONSerializationError(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        tracing::error!("an I/O error occurred: {}", value);
        Error::Io(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}
