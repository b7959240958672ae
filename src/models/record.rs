use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ExpenseItem, IncomeItem, ItemId, MonthKey};

/// Which of the two income lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IncomeKind {
    Projected,
    Actual,
}

impl IncomeKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Projected => "projected",
            Self::Actual => "actual",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "projected" | "proj" | "p" => Some(Self::Projected),
            "actual" | "act" | "a" => Some(Self::Actual),
            _ => None,
        }
    }
}

impl std::fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IncomeBook {
    #[serde(default)]
    pub(crate) projected: Vec<IncomeItem>,
    #[serde(default)]
    pub(crate) actual: Vec<IncomeItem>,
}

impl IncomeBook {
    pub(crate) fn list(&self, kind: IncomeKind) -> &[IncomeItem] {
        match kind {
            IncomeKind::Projected => &self.projected,
            IncomeKind::Actual => &self.actual,
        }
    }

    pub(crate) fn list_mut(&mut self, kind: IncomeKind) -> &mut Vec<IncomeItem> {
        match kind {
            IncomeKind::Projected => &mut self.projected,
            IncomeKind::Actual => &mut self.actual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ExpenseCategory {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) items: Vec<ExpenseItem>,
}

impl ExpenseCategory {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub(crate) fn find_item_mut(&mut self, id: ItemId) -> Option<&mut ExpenseItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

/// Everything budgeted and recorded for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MonthRecord {
    #[serde(default)]
    pub(crate) income: IncomeBook,
    #[serde(default)]
    pub(crate) expenses: Vec<ExpenseCategory>,
}

impl Default for MonthRecord {
    /// Empty income lists and the three starter categories.
    fn default() -> Self {
        Self {
            income: IncomeBook::default(),
            expenses: vec![
                ExpenseCategory::new("cat_housing", "Housing"),
                ExpenseCategory::new("cat_food", "Food"),
                ExpenseCategory::new("cat_transport", "Transport"),
            ],
        }
    }
}

impl MonthRecord {
    pub(crate) fn category(&self, id: &str) -> Option<&ExpenseCategory> {
        self.expenses.iter().find(|c| c.id == id)
    }

    pub(crate) fn category_mut(&mut self, id: &str) -> Option<&mut ExpenseCategory> {
        self.expenses.iter_mut().find(|c| c.id == id)
    }

    /// Find a category by name (case-insensitive).
    pub(crate) fn category_by_name(&self, name: &str) -> Option<&ExpenseCategory> {
        let lower = name.to_lowercase();
        self.expenses
            .iter()
            .find(|c| c.name.to_lowercase() == lower)
    }
}

/// All months known to the session, keyed and ordered by month.
pub(crate) type BudgetDatabase = BTreeMap<MonthKey, MonthRecord>;
