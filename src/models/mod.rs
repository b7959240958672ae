mod line_item;
mod month_key;
mod record;

pub(crate) use line_item::{ExpenseItem, IdGenerator, IncomeItem, ItemId};
pub(crate) use month_key::MonthKey;
pub(crate) use record::{BudgetDatabase, ExpenseCategory, IncomeKind, MonthRecord};

#[cfg(test)]
mod tests;
