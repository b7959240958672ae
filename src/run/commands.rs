use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::render;
use crate::advisor::{View, RULES};
use crate::models::{IncomeKind, ItemId, MonthKey, MonthRecord};
use crate::service::BudgetService;
use crate::util::parse_amount;

/// Shell-side state that is not budget data.
pub(crate) struct ShellState {
    pub(crate) running: bool,
    pub(crate) view: View,
    pub(crate) currency: String,
    output: Vec<String>,
}

impl ShellState {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            running: true,
            view: View::Dashboard,
            currency: currency.into(),
            output: Vec::new(),
        }
    }

    pub(crate) fn say(&mut self, msg: impl Into<String>) {
        self.output.push(msg.into());
    }

    pub(crate) fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Print the current view of the active month.
    pub(crate) fn show(&mut self, service: &BudgetService) {
        let (Some(month), Ok(record)) = (service.active_month(), service.current()) else {
            self.say("No month selected. Use :month YYYY-MM");
            return;
        };
        let lines = match self.view {
            View::Dashboard => render::dashboard(month, record, &self.currency),
            View::Income => render::income(record, &self.currency),
            View::Expenses => render::expenses(record, &self.currency),
        };
        self.output.extend(lines);
    }
}

type CommandFn = fn(&str, &mut ShellState, &mut BudgetService) -> anyhow::Result<()>;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: CommandFn,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2025-12)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2025-12)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("dashboard", "Show projected vs. actual totals", cmd_dashboard, r);
    register_command!("d", "Show projected vs. actual totals", cmd_dashboard, r);
    register_command!("income", "List income items", cmd_income, r);
    register_command!("i", "List income items", cmd_income, r);
    register_command!("expenses", "List expense categories and items", cmd_expenses, r);
    register_command!("e", "List expense categories and items", cmd_expenses, r);
    register_command!(
        "add-income",
        "Add income (e.g. :add-income actual 50000 Salary)",
        cmd_add_income,
        r
    );
    register_command!(
        "edit-income",
        "Edit income (e.g. :edit-income actual <id> 48000 Salary)",
        cmd_edit_income,
        r
    );
    register_command!(
        "delete-income",
        "Delete income (e.g. :delete-income actual <id>)",
        cmd_delete_income,
        r
    );
    register_command!(
        "add-expense",
        "Add expense item (e.g. :add-expense Food 3000 Groceries)",
        cmd_add_expense,
        r
    );
    register_command!(
        "edit-expense",
        "Edit expense item (e.g. :edit-expense Food <id> 3000 2750 Groceries; '-' keeps actual)",
        cmd_edit_expense,
        r
    );
    register_command!(
        "delete-expense",
        "Delete expense item (e.g. :delete-expense Food <id>)",
        cmd_delete_expense,
        r
    );
    register_command!(
        "add-category",
        "Add expense category (e.g. :add-category Utilities)",
        cmd_add_category,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    state: &mut ShellState,
    service: &mut BudgetService,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        if let Err(e) = (cmd.run)(args, state, service) {
            state.say(format!("Error: {e}"));
        }
    } else {
        let suggestion = find_closest(cmd_name);
        state.say(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Argument helpers ─────────────────────────────────────────

fn income_kind(raw: &str) -> anyhow::Result<IncomeKind> {
    IncomeKind::parse(raw)
        .ok_or_else(|| anyhow::anyhow!("Expected 'projected' or 'actual', got '{raw}'"))
}

fn item_id(raw: &str) -> anyhow::Result<ItemId> {
    ItemId::sanitize(raw).ok_or_else(|| anyhow::anyhow!("Invalid item id: '{raw}'"))
}

fn amount(raw: &str) -> anyhow::Result<Decimal> {
    parse_amount(raw).ok_or_else(|| anyhow::anyhow!("Invalid amount: '{raw}'"))
}

/// Resolve a category by id, or by name (case-insensitive).
fn category_id(record: &MonthRecord, raw: &str) -> anyhow::Result<String> {
    record
        .category(raw)
        .or_else(|| record.category_by_name(raw))
        .map(|c| c.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No category '{raw}'"))
}

/// Split off `n` leading words; the remainder (may contain spaces) is last.
fn split_args(args: &str, n: usize) -> Option<(Vec<&str>, &str)> {
    let mut rest = args.trim();
    let mut head = Vec::with_capacity(n);
    for _ in 0..n {
        let (word, tail) = rest.split_once(' ').unwrap_or((rest, ""));
        if word.is_empty() {
            return None;
        }
        head.push(word);
        rest = tail.trim_start();
    }
    Some((head, rest))
}

fn select(month: MonthKey, state: &mut ShellState, service: &mut BudgetService) {
    match service.select_month(month) {
        Ok(()) => {
            state.say(format!("Switched to month: {month}"));
            state.show(service);
        }
        Err(e) => state.say(format!("Error: {e}")),
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, state: &mut ShellState, _service: &mut BudgetService) -> anyhow::Result<()> {
    state.running = false;
    Ok(())
}

fn cmd_help(_args: &str, state: &mut ShellState, _service: &mut BudgetService) -> anyhow::Result<()> {
    let mut names: Vec<&&str> = COMMANDS.keys().filter(|k| k.len() > 1).collect();
    names.sort();
    state.say("Commands:");
    for name in names {
        if let Some(cmd) = COMMANDS.get(*name) {
            state.say(format!("  :{name:<16} {}", cmd.description));
        }
    }
    state.say("");
    state.say("Or just ask:");
    for rule in RULES.iter() {
        state.say(format!("  {}", rule.description));
    }
    Ok(())
}

fn cmd_month(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    if args.is_empty() {
        state.say("Usage: :month <YYYY-MM>");
        return Ok(());
    }

    // Accept "2025-12", "2025-1", "12", "1"
    let month: MonthKey = if args.len() <= 2 {
        let year = service
            .active_month()
            .map_or_else(|| MonthKey::current().year(), |m| m.year());
        format!("{year}-{args}").parse()?
    } else {
        args.parse()?
    };
    select(month, state, service);
    Ok(())
}

fn cmd_next_month(_args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let month = service.active_month().unwrap_or_else(MonthKey::current).next();
    select(month, state, service);
    Ok(())
}

fn cmd_prev_month(_args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let month = service.active_month().unwrap_or_else(MonthKey::current).prev();
    select(month, state, service);
    Ok(())
}

fn cmd_dashboard(_args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    state.view = View::Dashboard;
    state.show(service);
    Ok(())
}

fn cmd_income(_args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    state.view = View::Income;
    state.show(service);
    Ok(())
}

fn cmd_expenses(_args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    state.view = View::Expenses;
    state.show(service);
    Ok(())
}

fn cmd_add_income(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, name)) = split_args(args, 2) else {
        state.say("Usage: :add-income <projected|actual> <amount> <name>");
        return Ok(());
    };
    let kind = income_kind(head[0])?;
    let amt = amount(head[1])?;
    let id = service.add_income(kind, name, amt)?;
    state.say(format!("Added {kind} income '{}' (id {id})", name.trim()));
    Ok(())
}

fn cmd_edit_income(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, name)) = split_args(args, 3) else {
        state.say("Usage: :edit-income <projected|actual> <id> <amount> <name>");
        return Ok(());
    };
    let kind = income_kind(head[0])?;
    let id = item_id(head[1])?;
    let amt = amount(head[2])?;
    if service.edit_income(kind, id, name, amt)? {
        state.say(format!("Updated income {id}"));
    } else {
        state.say(format!("No {kind} income with id {id}"));
    }
    Ok(())
}

fn cmd_delete_income(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, _)) = split_args(args, 2) else {
        state.say("Usage: :delete-income <projected|actual> <id>");
        return Ok(());
    };
    let kind = income_kind(head[0])?;
    let id = item_id(head[1])?;
    if service.delete_income(kind, id)? {
        state.say("Item deleted");
    } else {
        state.say(format!("No {kind} income with id {id}"));
    }
    Ok(())
}

fn cmd_add_expense(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, name)) = split_args(args, 2) else {
        state.say("Usage: :add-expense <category> <projected> <name>");
        return Ok(());
    };
    let cat = category_id(service.current()?, head[0])?;
    let projected = amount(head[1])?;
    if let Some(id) = service.add_expense_item(&cat, name, projected)? {
        state.say(format!("Added expense '{}' (id {id})", name.trim()));
    }
    Ok(())
}

fn cmd_edit_expense(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, name)) = split_args(args, 4) else {
        state.say("Usage: :edit-expense <category> <id> <projected> <actual|-> <name>");
        return Ok(());
    };
    let cat = category_id(service.current()?, head[0])?;
    let id = item_id(head[1])?;
    let projected = amount(head[2])?;
    let actual = match head[3] {
        "-" => None,
        raw => Some(amount(raw)?),
    };
    if service.edit_expense_item(&cat, id, name, projected, actual)? {
        state.say(format!("Updated expense {id}"));
    } else {
        state.say(format!("No expense with id {id} in {}", head[0]));
    }
    Ok(())
}

fn cmd_delete_expense(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    let Some((head, _)) = split_args(args, 2) else {
        state.say("Usage: :delete-expense <category> <id>");
        return Ok(());
    };
    let cat = category_id(service.current()?, head[0])?;
    let id = item_id(head[1])?;
    if service.delete_expense_item(&cat, id)? {
        state.say("Expense deleted");
    } else {
        state.say(format!("No expense with id {id} in {}", head[0]));
    }
    Ok(())
}

fn cmd_add_category(args: &str, state: &mut ShellState, service: &mut BudgetService) -> anyhow::Result<()> {
    if args.is_empty() {
        state.say("Usage: :add-category <name>");
        return Ok(());
    }
    let id = service.add_category(args)?;
    state.say(format!("Added category '{args}' [{id}]"));
    Ok(())
}
