//! The fixed catalogue of expense categories and income sources.
//!
//! Both lists are closed: each entry pairs the name shown to users with the
//! colour used for it in charts. Records store the entry itself, and the
//! display name is the wire form used by serde.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Other")]
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [ExpenseCategory; 7] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Other,
    ];

    /// The name shown to users, e.g. "Food & Dining".
    pub fn display_name(self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// The hex colour code used for this category in charts.
    pub fn color(self) -> &'static str {
        match self {
            Self::FoodDining => "#FF6B6B",
            Self::Transportation => "#4ECDC4",
            Self::Shopping => "#45B7D1",
            Self::Entertainment => "#FFA07A",
            Self::BillsUtilities => "#98D8C8",
            Self::Healthcare => "#F7DC6F",
            Self::Other => "#BDC3C7",
        }
    }

    /// Find a category by its exact display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.display_name() == name)
    }

    /// All categories as `(display name, colour)` pairs.
    pub fn all_categories() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|category| (category.display_name(), category.color()))
            .collect()
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

/// Where a piece of income came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeSource {
    Salary,
    Freelance,
    Business,
    Investment,
    Gift,
    Refund,
    Bonus,
    Other,
}

impl IncomeSource {
    /// Every income source, in display order.
    pub const ALL: [IncomeSource; 8] = [
        Self::Salary,
        Self::Freelance,
        Self::Business,
        Self::Investment,
        Self::Gift,
        Self::Refund,
        Self::Bonus,
        Self::Other,
    ];

    /// The name shown to users, e.g. "Salary".
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Business => "Business",
            Self::Investment => "Investment",
            Self::Gift => "Gift",
            Self::Refund => "Refund",
            Self::Bonus => "Bonus",
            Self::Other => "Other",
        }
    }

    /// The hex colour code used for this source in charts.
    pub fn color(self) -> &'static str {
        match self {
            Self::Salary => "#10B981",
            Self::Freelance => "#3B82F6",
            Self::Business => "#8B5CF6",
            Self::Investment => "#F59E0B",
            Self::Gift => "#EC4899",
            Self::Refund => "#6366F1",
            Self::Bonus => "#14B8A6",
            Self::Other => "#94A3B8",
        }
    }

    /// Find an income source by its exact display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.display_name() == name)
    }

    /// All sources as `(display name, colour)` pairs.
    pub fn all_sources() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|source| (source.display_name(), source.color()))
            .collect()
    }
}

impl Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}

impl FromStr for IncomeSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        category::{ExpenseCategory, IncomeSource},
    };

    #[test]
    fn catalogue_sizes() {
        assert_eq!(ExpenseCategory::all_categories().len(), 7);
        assert_eq!(IncomeSource::all_sources().len(), 8);
    }

    #[test]
    fn from_name_matches_display_name_exactly() {
        assert_eq!(
            ExpenseCategory::from_name("Food & Dining"),
            Some(ExpenseCategory::FoodDining)
        );
        assert_eq!(ExpenseCategory::from_name("food & dining"), None);
        assert_eq!(ExpenseCategory::from_name(" Shopping"), None);
        assert_eq!(IncomeSource::from_name("Bonus"), Some(IncomeSource::Bonus));
    }

    #[test]
    fn parse_fails_on_unknown_name() {
        let got = "Groceries".parse::<ExpenseCategory>();

        assert_eq!(got, Err(Error::UnknownCategory("Groceries".to_owned())));
    }

    #[test]
    fn other_has_distinct_colours_per_list() {
        assert_eq!(ExpenseCategory::Other.color(), "#BDC3C7");
        assert_eq!(IncomeSource::Other.color(), "#94A3B8");
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&ExpenseCategory::BillsUtilities).unwrap();
        assert_eq!(json, "\"Bills & Utilities\"");

        let source: IncomeSource = serde_json::from_str("\"Investment\"").unwrap();
        assert_eq!(source, IncomeSource::Investment);
    }

    #[test]
    fn display_respects_width() {
        assert_eq!(
            format!("[{:<20}]", ExpenseCategory::Other),
            "[Other               ]"
        );
        assert_eq!(format!("[{:>8}]", IncomeSource::Gift), "[    Gift]");
    }

    #[test]
    fn display_names_round_trip_through_from_name() {
        for category in ExpenseCategory::ALL {
            assert_eq!(
                ExpenseCategory::from_name(category.display_name()),
                Some(category)
            );
        }
        for source in IncomeSource::ALL {
            assert_eq!(IncomeSource::from_name(source.display_name()), Some(source));
        }
    }
}
