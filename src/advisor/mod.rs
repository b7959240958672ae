//! Rule-based budget assistant.
//!
//! A command is classified against the ordered rule table in [`rules`];
//! the "analyze" intent runs the advice rules over the month's totals.

mod rules;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::aggregate::{aggregate, Totals};
use crate::models::MonthRecord;
use crate::util::format_currency;

pub(crate) use rules::{classify, Intent, RULES};

pub(crate) const UNRECOGNIZED: &str = "I'm sorry, I didn't quite catch that.";
pub(crate) const PARAGRAPH_BREAK: &str = "\n\n";

/// Savings rate (percent) above which investing is considered safe.
const SAFE_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Share of the surplus suggested for investment.
const INVEST_SHARE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Screen a navigation intent asks the display layer to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Dashboard,
    Income,
    Expenses,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Income => write!(f, "Income"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub(crate) intent: Option<Intent>,
    pub(crate) view: Option<View>,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AdviceKind {
    IncomeShortfall,
    IncomeSurplus,
    Overspending,
    UnderBudget,
    CriticalDeficit,
    InvestmentOpportunity,
    EmergencyFund,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Advice {
    pub(crate) kind: AdviceKind,
    pub(crate) text: String,
}

pub(crate) struct Advisor {
    currency: String,
}

impl Advisor {
    pub(crate) fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    fn money(&self, val: Decimal) -> String {
        format_currency(&self.currency, val)
    }

    pub(crate) fn respond(&self, command: &str, record: &MonthRecord) -> Reply {
        let Some(intent) = classify(command) else {
            return Reply {
                intent: None,
                view: None,
                text: UNRECOGNIZED.to_string(),
            };
        };

        let (view, text) = match intent {
            Intent::ShowExpenses => (
                Some(View::Expenses),
                "I've opened the Expenses tab for you.".to_string(),
            ),
            Intent::ShowIncome => (
                Some(View::Income),
                "Here is your Income Manager.".to_string(),
            ),
            Intent::ShowDashboard => (
                Some(View::Dashboard),
                "Back to the Dashboard.".to_string(),
            ),
            Intent::Analyze => (None, self.render_advice(&aggregate(record))),
            Intent::Balance => {
                let totals = aggregate(record);
                (
                    None,
                    format!(
                        "Your actual balance for this month is {}.",
                        self.money(totals.act_balance)
                    ),
                )
            }
            Intent::TotalIncome => {
                let totals = aggregate(record);
                (
                    None,
                    format!(
                        "You have earned {} so far this month.",
                        self.money(totals.act_income)
                    ),
                )
            }
            Intent::Greeting => (
                None,
                "Hello! I am your financial advisor. Ask me for 'advice' to analyze your budget health."
                    .to_string(),
            ),
        };

        Reply {
            intent: Some(intent),
            view,
            text,
        }
    }

    /// Remarks in fixed order: income, expenses, investment.
    pub(crate) fn advise(&self, totals: &Totals) -> Vec<Advice> {
        let mut advice = Vec::new();

        let income_gap = totals.act_income.saturating_sub(totals.proj_income);
        if totals.act_income < totals.proj_income {
            advice.push(Advice {
                kind: AdviceKind::IncomeShortfall,
                text: format!(
                    "⚠️ **Income Alert**: You are trailing your projected income by {}. If this persists, avoid big discretionary spends.",
                    self.money(income_gap.abs())
                ),
            });
        } else if totals.act_income > totals.proj_income {
            advice.push(Advice {
                kind: AdviceKind::IncomeSurplus,
                text: format!(
                    "✅ **Income Strong**: You exceeded your income target by {}. Great job!",
                    self.money(income_gap)
                ),
            });
        }

        if totals.act_expense > totals.proj_expense {
            advice.push(Advice {
                kind: AdviceKind::Overspending,
                text: format!(
                    "🚨 **Overspending**: Expenses are {} higher than planned. Review your largest categories immediately.",
                    self.money(totals.act_expense.saturating_sub(totals.proj_expense))
                ),
            });
        } else {
            advice.push(Advice {
                kind: AdviceKind::UnderBudget,
                text: format!(
                    "👍 **Spending Control**: You are under your expense budget by {}.",
                    self.money(totals.proj_expense.saturating_sub(totals.act_expense))
                ),
            });
        }

        let balance = totals.act_balance;
        if balance <= Decimal::ZERO {
            advice.push(Advice {
                kind: AdviceKind::CriticalDeficit,
                text: format!(
                    "🛑 **Critical Deficit**: You are currently spending more than you earn ({}). Investment is NOT recommended. Focus on cutting costs to stabilize.",
                    self.money(balance)
                ),
            });
        } else {
            let rate = savings_rate(totals)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            if rate > SAFE_SAVINGS_RATE {
                advice.push(Advice {
                    kind: AdviceKind::InvestmentOpportunity,
                    text: format!(
                        "🚀 **Investment Opportunity**: You have a strong surplus of {} ({:.1}% savings rate). You are in a **Safe Position** to invest. Consider allocating 50% ({}) to a high-yield fund or business expansion.",
                        self.money(balance),
                        rate,
                        self.money(balance.saturating_mul(INVEST_SHARE))
                    ),
                });
            } else {
                advice.push(Advice {
                    kind: AdviceKind::EmergencyFund,
                    text: format!(
                        "💰 **Positive Balance**: You have a surplus of {}. Focus on building an emergency fund before aggressive investing.",
                        self.money(balance)
                    ),
                });
            }
        }

        advice
    }

    pub(crate) fn render_advice(&self, totals: &Totals) -> String {
        self.advise(totals)
            .into_iter()
            .map(|a| a.text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_BREAK)
    }
}

/// Actual balance as a percentage of actual income; zero with no income.
pub(crate) fn savings_rate(totals: &Totals) -> Decimal {
    if totals.act_income.is_zero() {
        return Decimal::ZERO;
    }
    totals
        .act_balance
        .checked_div(totals.act_income)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests;
