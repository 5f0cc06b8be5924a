//! Checks applied to user input before a record is stored.
//!
//! Each check returns the first problem found as a [ValidationError] whose
//! message can be shown to the user as-is. Input is never trimmed or
//! case-folded.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    category::{ExpenseCategory, IncomeSource},
    month::parse_date,
};

/// Expense and income amounts must be strictly less than this.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Budget limits must be strictly less than this.
pub const MAX_BUDGET_LIMIT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// The maximum number of characters allowed in a description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Why a record was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date format. Use YYYY-MM-DD (e.g., 2025-10-01)")]
    InvalidDate,

    #[error("Invalid category. Must be one of: {}", expense_category_names())]
    InvalidCategory,

    #[error("Source is required")]
    MissingSource,

    #[error("Invalid source. Must be one of: {}", income_source_names())]
    InvalidSource,

    #[error("Amount must be greater than 0")]
    NonPositiveAmount,

    #[error("Amount seems unreasonably large (>= $1,000,000). Please verify.")]
    AmountTooLarge,

    #[error("Amount must be a valid number")]
    InvalidAmount,

    #[error("Description too long. Maximum 500 characters.")]
    DescriptionTooLong,

    #[error("Monthly limit must be greater than 0")]
    NonPositiveLimit,

    #[error("Budget limit seems unreasonably large (>= $10,000,000). Please verify.")]
    LimitTooLarge,
}

fn expense_category_names() -> String {
    ExpenseCategory::ALL.map(ExpenseCategory::display_name).join(", ")
}

fn income_source_names() -> String {
    IncomeSource::ALL.map(IncomeSource::display_name).join(", ")
}

/// Check the fields of an expense, in order: date, category, amount and then
/// description.
///
/// Future dates are accepted.
pub fn validate_expense_data(
    date: &str,
    category: &str,
    amount: Decimal,
    description: &str,
) -> Result<(), ValidationError> {
    validate_date(date)?;

    if ExpenseCategory::from_name(category).is_none() {
        return Err(ValidationError::InvalidCategory);
    }

    validate_amount(amount)?;
    validate_description(description)
}

/// Check the fields of an income record, in order: date, source, amount and
/// then description.
pub fn validate_income_data(
    date: &str,
    source: &str,
    amount: Decimal,
    description: &str,
) -> Result<(), ValidationError> {
    validate_date(date)?;

    if source.is_empty() {
        return Err(ValidationError::MissingSource);
    }

    if IncomeSource::from_name(source).is_none() {
        return Err(ValidationError::InvalidSource);
    }

    validate_amount(amount)?;
    validate_description(description)
}

/// Check that a monthly budget limit is positive and below [MAX_BUDGET_LIMIT].
pub fn validate_budget_limit(limit: Decimal) -> Result<(), ValidationError> {
    if limit <= Decimal::ZERO {
        Err(ValidationError::NonPositiveLimit)
    } else if limit >= MAX_BUDGET_LIMIT {
        Err(ValidationError::LimitTooLarge)
    } else {
        Ok(())
    }
}

/// Parse an amount typed into a form, e.g. "25.50".
///
/// Only checks that the text is a number, the value itself is checked by the
/// `validate_*` functions.
pub fn parse_amount(text: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(text).map_err(|_| ValidationError::InvalidAmount)
}

fn validate_date(date: &str) -> Result<(), ValidationError> {
    parse_date(date)
        .map(|_| ())
        .ok_or(ValidationError::InvalidDate)
}

fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        Err(ValidationError::NonPositiveAmount)
    } else if amount >= MAX_AMOUNT {
        Err(ValidationError::AmountTooLarge)
    } else {
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        Err(ValidationError::DescriptionTooLong)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::validation::{
        MAX_AMOUNT, MAX_BUDGET_LIMIT, ValidationError, parse_amount, validate_budget_limit,
        validate_expense_data, validate_income_data,
    };

    fn validate_amount_only(amount: Decimal) -> Result<(), ValidationError> {
        validate_expense_data("2025-10-01", "Food & Dining", amount, "Test")
    }

    #[test]
    fn constants_have_expected_values() {
        assert_eq!(MAX_AMOUNT, dec!(1000000));
        assert_eq!(MAX_BUDGET_LIMIT, dec!(10000000));
    }

    #[test]
    fn accepts_valid_expense() {
        let got = validate_expense_data("2025-10-01", "Food & Dining", dec!(25.50), "Lunch");

        assert_eq!(got, Ok(()));
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        for amount in [dec!(0), dec!(-50.00), dec!(-0.01)] {
            let got = validate_amount_only(amount);

            assert_eq!(got, Err(ValidationError::NonPositiveAmount));
            assert!(got.unwrap_err().to_string().contains("greater than 0"));
        }
    }

    #[test]
    fn amount_boundaries() {
        assert_eq!(validate_amount_only(dec!(0.01)), Ok(()));
        assert_eq!(validate_amount_only(dec!(999999)), Ok(()));
        assert_eq!(validate_amount_only(dec!(999999.99)), Ok(()));
        assert_eq!(
            validate_amount_only(dec!(1000000)),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            validate_amount_only(dec!(1000001)),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            validate_amount_only(dec!(5000000)),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            validate_amount_only(dec!(10000000)),
            Err(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn too_large_message_mentions_unreasonably_large() {
        let error = validate_amount_only(dec!(2000000)).unwrap_err();

        assert!(error.to_string().contains("unreasonably large"));
    }

    #[test]
    fn rejects_malformed_dates() {
        for date in ["10/01/2025", "2025-10-32", "", "2025/10/01"] {
            let got = validate_expense_data(date, "Food & Dining", dec!(25.50), "Test");

            assert_eq!(got, Err(ValidationError::InvalidDate), "{date:?}");
        }
    }

    #[test]
    fn accepts_past_and_future_dates() {
        assert_eq!(
            validate_expense_data("2020-01-01", "Food & Dining", dec!(25.50), "Old"),
            Ok(())
        );
        assert_eq!(
            validate_expense_data("2099-12-31", "Food & Dining", dec!(25.50), "Future"),
            Ok(())
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let got = validate_expense_data("2025-10-01", "InvalidCategory", dec!(25.50), "Test");

        assert_eq!(got, Err(ValidationError::InvalidCategory));
        let message = got.unwrap_err().to_string();
        assert!(message.starts_with("Invalid category. Must be one of: Food & Dining, "));
        assert!(message.ends_with("Healthcare, Other"));
    }

    #[test]
    fn category_is_not_trimmed_or_case_folded() {
        for category in ["food & dining", " Food & Dining", "Food & Dining "] {
            let got = validate_expense_data("2025-10-01", category, dec!(1), "");

            assert_eq!(got, Err(ValidationError::InvalidCategory));
        }
    }

    #[test]
    fn description_length_boundary() {
        let at_limit = "A".repeat(500);
        let over_limit = "A".repeat(501);

        assert_eq!(
            validate_expense_data("2025-10-01", "Shopping", dec!(1), &at_limit),
            Ok(())
        );
        let got = validate_expense_data("2025-10-01", "Shopping", dec!(1), &over_limit);
        assert_eq!(got, Err(ValidationError::DescriptionTooLong));
        assert!(got.unwrap_err().to_string().contains("500 characters"));
    }

    #[test]
    fn description_length_counts_characters_not_bytes() {
        let description = "é".repeat(500);

        assert_eq!(
            validate_expense_data("2025-10-01", "Shopping", dec!(1), &description),
            Ok(())
        );
    }

    #[test]
    fn accepts_empty_and_special_character_descriptions() {
        assert_eq!(
            validate_expense_data("2025-10-01", "Food & Dining", dec!(25.50), ""),
            Ok(())
        );
        assert_eq!(
            validate_expense_data(
                "2025-10-01",
                "Food & Dining",
                dec!(25.50),
                "Café with <script>alert('XSS')</script> & friends 😀"
            ),
            Ok(())
        );
    }

    #[test]
    fn checks_run_in_order() {
        // Bad date wins over every other problem.
        let got = validate_expense_data("bad", "Nope", dec!(-1), &"A".repeat(600));
        assert_eq!(got, Err(ValidationError::InvalidDate));

        // Bad category wins over a bad amount.
        let got = validate_expense_data("2025-10-01", "Nope", dec!(-1), "");
        assert_eq!(got, Err(ValidationError::InvalidCategory));

        // Bad amount wins over a long description.
        let got = validate_expense_data("2025-10-01", "Other", dec!(0), &"A".repeat(600));
        assert_eq!(got, Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn accepts_valid_income() {
        let got = validate_income_data("2025-10-01", "Salary", dec!(5000.00), "Test");

        assert_eq!(got, Ok(()));
    }

    #[test]
    fn income_requires_source() {
        let got = validate_income_data("2025-10-01", "", dec!(5000.00), "Test");

        assert_eq!(got, Err(ValidationError::MissingSource));
        assert_eq!(got.unwrap_err().to_string(), "Source is required");
    }

    #[test]
    fn income_rejects_unknown_source() {
        let got = validate_income_data("2025-10-01", "InvalidSource", dec!(5000.00), "Test");

        assert_eq!(got, Err(ValidationError::InvalidSource));
        assert!(got.unwrap_err().to_string().starts_with("Invalid source."));
    }

    #[test]
    fn income_rejects_expense_category_names() {
        let got = validate_income_data("2025-10-01", "Food & Dining", dec!(10), "");

        assert_eq!(got, Err(ValidationError::InvalidSource));
    }

    #[test]
    fn income_applies_amount_and_description_rules() {
        assert_eq!(
            validate_income_data("2025-10-01", "Salary", dec!(1000000), ""),
            Err(ValidationError::AmountTooLarge)
        );
        assert_eq!(
            validate_income_data("2025-10-01", "Salary", dec!(5000), &"A".repeat(501)),
            Err(ValidationError::DescriptionTooLong)
        );
    }

    #[test]
    fn budget_limit_bounds() {
        assert_eq!(validate_budget_limit(dec!(0.01)), Ok(()));
        assert_eq!(validate_budget_limit(dec!(9999999.99)), Ok(()));
        assert_eq!(
            validate_budget_limit(dec!(0)),
            Err(ValidationError::NonPositiveLimit)
        );
        assert_eq!(
            validate_budget_limit(dec!(10000000)),
            Err(ValidationError::LimitTooLarge)
        );
    }

    #[test]
    fn parse_amount_reads_numbers() {
        assert_eq!(parse_amount("25.50"), Ok(dec!(25.50)));
        assert_eq!(parse_amount("-3"), Ok(dec!(-3)));
        assert_eq!(parse_amount("abc"), Err(ValidationError::InvalidAmount));
        assert_eq!(parse_amount(""), Err(ValidationError::InvalidAmount));
    }
}
