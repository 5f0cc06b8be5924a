//! Plain-text and JSON reports built from a [Ledger].

use std::{collections::BTreeMap, fmt::Write};

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    analysis::{
        BudgetStatus, FinancialOverview, OrderedMap, calculate_average, financial_overview,
        get_category_totals, get_monthly_total,
    },
    category::{ExpenseCategory, IncomeSource},
    format::{date_range_description, format_currency},
    ledger::{Ledger, LedgerStats},
    month::YearMonth,
};

/// Everything shown on the summary report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub overview: FinancialOverview,
    /// Spending per category, in order of first appearance.
    pub expense_categories: OrderedMap<ExpenseCategory, Decimal>,
    /// Income per source, in order of first appearance.
    pub income_sources: OrderedMap<IncomeSource, Decimal>,
    pub average_expense: Decimal,
    /// The month containing the date the summary was built for.
    pub current_month: YearMonth,
    pub current_month_total: Decimal,
    pub stats: LedgerStats,
}

impl Summary {
    /// Build the summary of `ledger` as of `today`.
    pub fn build(ledger: &Ledger, today: Date) -> Self {
        let expenses = ledger.expenses();
        let income = ledger.income();
        let current_month = YearMonth::of(today);

        Self {
            overview: financial_overview(expenses, income),
            expense_categories: get_category_totals(expenses),
            income_sources: get_category_totals(income),
            average_expense: calculate_average(expenses),
            current_month,
            current_month_total: get_monthly_total(
                expenses,
                current_month.year(),
                current_month.month(),
            ),
            stats: ledger.stats(),
        }
    }
}

/// Render the summary as text.
pub fn render_summary(summary: &Summary) -> String {
    let overview = &summary.overview;
    let mut text = String::new();

    _ = writeln!(text, "Financial Summary");
    if let (Some(start), Some(end)) = (&summary.stats.earliest_date, &summary.stats.latest_date) {
        _ = writeln!(text, "Period: {}", date_range_description(start, end));
    }
    _ = writeln!(text);
    _ = writeln!(
        text,
        "Total income:    {} ({} records)",
        format_currency(overview.total_income),
        overview.income_count
    );
    _ = writeln!(
        text,
        "Total expenses:  {} ({} records)",
        format_currency(overview.total_expenses),
        overview.expense_count
    );
    _ = writeln!(
        text,
        "Net savings:     {}",
        format_currency(overview.net_savings)
    );
    _ = writeln!(
        text,
        "Savings rate:    {:.1}%",
        overview.savings_rate.round_dp(1)
    );
    if overview.is_deficit {
        _ = writeln!(text, "Warning: you spent more than you earned.");
    }
    _ = writeln!(
        text,
        "Average expense: {}",
        format_currency(summary.average_expense)
    );
    _ = writeln!(
        text,
        "Spent in {}:  {}",
        summary.current_month,
        format_currency(summary.current_month_total)
    );

    if !summary.expense_categories.is_empty() {
        _ = writeln!(text);
        _ = writeln!(text, "Expenses by category");
        for (category, total) in summary.expense_categories.iter() {
            _ = writeln!(text, "  {:<20} {}", category, format_currency(*total));
        }
    }

    if !summary.income_sources.is_empty() {
        _ = writeln!(text);
        _ = writeln!(text, "Income by source");
        for (source, total) in summary.income_sources.iter() {
            _ = writeln!(text, "  {:<20} {}", source, format_currency(*total));
        }
    }

    text
}

/// Render the budget status for `month` as text.
pub fn render_budget_status(
    month: YearMonth,
    status: &OrderedMap<ExpenseCategory, BudgetStatus>,
) -> String {
    let mut text = String::new();

    _ = writeln!(text, "Budgets for {month}");

    if status.is_empty() {
        _ = writeln!(text, "No budgets set.");
        return text;
    }

    for (category, budget) in status.iter() {
        let flag = if budget.over_budget { "  OVER BUDGET" } else { "" };
        _ = writeln!(
            text,
            "  {:<20} {} of {} ({:.1}%), {} left{}",
            category,
            format_currency(budget.spent),
            format_currency(budget.budget),
            budget.percentage,
            format_currency(budget.remaining),
            flag
        );
    }

    text
}

/// Render monthly spending totals as text, oldest month first.
pub fn render_trend(trend: &BTreeMap<YearMonth, Decimal>) -> String {
    let mut text = String::new();

    _ = writeln!(text, "Spending trend");

    if trend.is_empty() {
        _ = writeln!(text, "No expenses in this period.");
        return text;
    }

    for (month, total) in trend {
        _ = writeln!(text, "  {month}  {}", format_currency(*total));
    }

    text
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        ExpenseCategory, IncomeSource, Ledger, YearMonth, get_budget_status,
        report::{Summary, render_budget_status, render_summary, render_trend},
    };

    fn get_test_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_expense("2025-10-01", "Food & Dining", dec!(10), "")
            .unwrap();
        ledger
            .add_expense("2025-10-15", "Food & Dining", dec!(10), "")
            .unwrap();
        ledger
            .add_expense("2025-09-30", "Shopping", dec!(40), "")
            .unwrap();
        ledger
            .add_income("2025-10-01", "Salary", dec!(200), "")
            .unwrap();
        ledger
    }

    #[test]
    fn summary_collects_totals() {
        let ledger = get_test_ledger();

        let summary = Summary::build(&ledger, date!(2025 - 10 - 20));

        assert_eq!(summary.overview.total_expenses, dec!(60));
        assert_eq!(summary.overview.total_income, dec!(200));
        assert_eq!(summary.overview.net_savings, dec!(140));
        assert_eq!(summary.average_expense, dec!(20));
        assert_eq!(summary.current_month, YearMonth::new(2025, 10).unwrap());
        assert_eq!(summary.current_month_total, dec!(20));
        assert_eq!(
            summary.expense_categories.get(&ExpenseCategory::FoodDining),
            Some(&dec!(20))
        );
        assert_eq!(
            summary.income_sources.get(&IncomeSource::Salary),
            Some(&dec!(200))
        );
    }

    #[test]
    fn summary_text_lists_totals_and_categories() {
        let ledger = get_test_ledger();
        let summary = Summary::build(&ledger, date!(2025 - 10 - 20));

        let text = render_summary(&summary);

        assert!(text.contains("Period: September - October 2025"), "{text}");
        assert!(text.contains("Total income:    $200.00 (1 records)"), "{text}");
        assert!(text.contains("Total expenses:  $60.00 (3 records)"), "{text}");
        assert!(text.contains("Savings rate:    70.0%"), "{text}");
        assert!(text.contains("Spent in 2025-10:  $20.00"), "{text}");
        assert!(text.contains("Food & Dining"), "{text}");
        assert!(text.contains("Salary"), "{text}");
        assert!(!text.contains("Warning"), "{text}");
    }

    #[test]
    fn summary_text_warns_on_deficit() {
        let mut ledger = get_test_ledger();
        ledger
            .add_expense("2025-10-16", "Shopping", dec!(500), "")
            .unwrap();
        let summary = Summary::build(&ledger, date!(2025 - 10 - 20));

        let text = render_summary(&summary);

        assert!(text.contains("Warning: you spent more than you earned."));
    }

    #[test]
    fn summary_of_empty_ledger() {
        let summary = Summary::build(&Ledger::new(), date!(2025 - 10 - 20));

        let text = render_summary(&summary);

        assert_eq!(summary.overview.savings_rate, Decimal::ZERO);
        assert!(!text.contains("Period"));
        assert!(!text.contains("Expenses by category"));
        assert!(text.contains("Total expenses:  $0.00 (0 records)"));
    }

    #[test]
    fn summary_serializes_to_json() {
        let ledger = get_test_ledger();
        let summary = Summary::build(&ledger, date!(2025 - 10 - 20));

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["current_month"], "2025-10");
        assert_eq!(json["expense_categories"]["Food & Dining"], 20.0);
        assert_eq!(json["stats"]["total_expenses"], 3);
    }

    #[test]
    fn budget_status_text_flags_overspending() {
        let mut ledger = get_test_ledger();
        ledger.set_budget(ExpenseCategory::FoodDining, dec!(15)).unwrap();
        ledger.set_budget(ExpenseCategory::Shopping, dec!(100)).unwrap();
        let status = get_budget_status(ledger.expenses(), &ledger.budgets(), 2025, 10);

        let text = render_budget_status(YearMonth::new(2025, 10).unwrap(), &status);

        assert!(text.starts_with("Budgets for 2025-10"), "{text}");
        assert!(
            text.contains("$20.00 of $15.00 (133.3%), -$5.00 left  OVER BUDGET"),
            "{text}"
        );
        assert!(text.contains("$0.00 of $100.00 (0.0%), $100.00 left\n"), "{text}");
        assert!(
            text.contains("\n  Shopping             $0.00 of $100.00"),
            "{text}"
        );
    }

    #[test]
    fn budget_status_text_without_budgets() {
        let ledger = get_test_ledger();
        let status = get_budget_status(ledger.expenses(), &ledger.budgets(), 2025, 10);

        let text = render_budget_status(YearMonth::new(2025, 10).unwrap(), &status);

        assert!(text.contains("No budgets set."));
    }

    #[test]
    fn trend_text_lists_months_in_order() {
        let trend = BTreeMap::from([
            (YearMonth::new(2025, 10).unwrap(), dec!(20)),
            (YearMonth::new(2025, 9).unwrap(), dec!(40)),
        ]);

        let text = render_trend(&trend);

        assert_eq!(
            text,
            "Spending trend\n  2025-09  $40.00\n  2025-10  $20.00\n"
        );
    }

    #[test]
    fn empty_trend_text() {
        let text = render_trend(&BTreeMap::new());

        assert!(text.contains("No expenses in this period."));
    }
}
