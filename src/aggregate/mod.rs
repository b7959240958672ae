use rust_decimal::Decimal;

use crate::models::{ExpenseCategory, ExpenseItem, IncomeItem, MonthRecord};

/// Month-level sums. Balances are income minus expense. All arithmetic
/// saturates at the `Decimal` range instead of panicking on stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) proj_income: Decimal,
    pub(crate) act_income: Decimal,
    pub(crate) proj_expense: Decimal,
    pub(crate) act_expense: Decimal,
    pub(crate) proj_balance: Decimal,
    pub(crate) act_balance: Decimal,
    /// `act_balance - proj_balance`: positive means ahead of plan.
    pub(crate) balance_diff: Decimal,
}

pub(crate) fn aggregate(record: &MonthRecord) -> Totals {
    let proj_income = sum_income(&record.income.projected);
    let act_income = sum_income(&record.income.actual);
    let (proj_expense, act_expense) = record
        .expenses
        .iter()
        .flat_map(|cat| cat.items.iter())
        .fold((Decimal::ZERO, Decimal::ZERO), |(p, a), item| {
            (p.saturating_add(item.projected), a.saturating_add(item.actual))
        });

    let proj_balance = proj_income.saturating_sub(proj_expense);
    let act_balance = act_income.saturating_sub(act_expense);
    Totals {
        proj_income,
        act_income,
        proj_expense,
        act_expense,
        proj_balance,
        act_balance,
        balance_diff: act_balance.saturating_sub(proj_balance),
    }
}

fn sum_income(items: &[IncomeItem]) -> Decimal {
    saturating_sum(items.iter().map(|i| i.amount))
}

pub(crate) fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `projected - actual`: positive means under budget. Note this runs the
/// opposite way to `Totals::balance_diff`.
pub(crate) fn item_variance(item: &ExpenseItem) -> Decimal {
    item.projected.saturating_sub(item.actual)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CategoryTotals {
    pub(crate) projected: Decimal,
    pub(crate) actual: Decimal,
    /// `projected - actual`, same direction as [`item_variance`].
    pub(crate) variance: Decimal,
}

pub(crate) fn category_totals(cat: &ExpenseCategory) -> CategoryTotals {
    let projected = saturating_sum(cat.items.iter().map(|i| i.projected));
    let actual = saturating_sum(cat.items.iter().map(|i| i.actual));
    CategoryTotals {
        projected,
        actual,
        variance: projected.saturating_sub(actual),
    }
}

/// Arrow direction for a signed variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub(crate) fn of(value: Decimal) -> Self {
        if value > Decimal::ZERO {
            Self::Up
        } else if value < Decimal::ZERO {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub(crate) fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => " ",
        }
    }
}
