use crate::aggregate::{aggregate, category_totals, item_variance, saturating_sum, Trend};
use crate::models::{IncomeKind, MonthKey, MonthRecord};
use crate::util::{format_currency, truncate};

const NAME_WIDTH: usize = 24;

pub(crate) fn dashboard(month: MonthKey, record: &MonthRecord, currency: &str) -> Vec<String> {
    let t = aggregate(record);
    let money = |v| format_currency(currency, v);
    vec![
        format!("Budget for {month}"),
        "─".repeat(48),
        format!("  {:<20} {:>12} {:>12}", "", "Projected", "Actual"),
        format!(
            "  {:<20} {:>12} {:>12}",
            "Income",
            money(t.proj_income),
            money(t.act_income)
        ),
        format!(
            "  {:<20} {:>12} {:>12}",
            "Expenses",
            money(t.proj_expense),
            money(t.act_expense)
        ),
        format!(
            "  {:<20} {:>12} {:>12}",
            "Balance",
            money(t.proj_balance),
            money(t.act_balance)
        ),
        format!(
            "  {:<20} {} {}",
            "Difference",
            Trend::of(t.balance_diff).arrow(),
            money(t.balance_diff)
        ),
    ]
}

pub(crate) fn income(record: &MonthRecord, currency: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in [IncomeKind::Projected, IncomeKind::Actual] {
        let items = record.income.list(kind);
        lines.push(format!("Income ({kind})"));
        if items.is_empty() {
            lines.push("  (none)".to_string());
        }
        for item in items {
            lines.push(format!(
                "  {:<16} {:<width$} {:>14}",
                item.id,
                truncate(&item.name, NAME_WIDTH),
                format_currency(currency, item.amount),
                width = NAME_WIDTH,
            ));
        }
        let total = saturating_sum(items.iter().map(|i| i.amount));
        lines.push(format!(
            "  {:<16} {:<width$} {:>14}",
            "",
            "Total",
            format_currency(currency, total),
            width = NAME_WIDTH,
        ));
    }
    lines
}

pub(crate) fn expenses(record: &MonthRecord, currency: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for cat in &record.expenses {
        lines.push(format!("{} [{}]", cat.name, cat.id));
        if cat.items.is_empty() {
            lines.push("  (no items)".to_string());
        }
        for item in &cat.items {
            let diff = item_variance(item);
            lines.push(format!(
                "  {:<16} {:<width$} {:>14} {:>14} {} {}",
                item.id,
                truncate(&item.name, NAME_WIDTH),
                format_currency(currency, item.projected),
                format_currency(currency, item.actual),
                Trend::of(diff).arrow(),
                format_currency(currency, diff.abs()),
                width = NAME_WIDTH,
            ));
        }
        let totals = category_totals(cat);
        lines.push(format!(
            "  {:<16} {:<width$} {:>14} {:>14}   {}",
            "",
            "Total",
            format_currency(currency, totals.projected),
            format_currency(currency, totals.actual),
            format_currency(currency, totals.variance),
            width = NAME_WIDTH,
        ));
    }
    lines
}
