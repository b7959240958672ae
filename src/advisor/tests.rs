#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::models::{ExpenseItem, IncomeItem, ItemId};

fn totals(act_income: Decimal, proj_income: Decimal, act_exp: Decimal, proj_exp: Decimal) -> Totals {
    let proj_balance = proj_income - proj_exp;
    let act_balance = act_income - act_exp;
    Totals {
        proj_income,
        act_income,
        proj_expense: proj_exp,
        act_expense: act_exp,
        proj_balance,
        act_balance,
        balance_diff: act_balance - proj_balance,
    }
}

fn record(act_income: Decimal, proj_income: Decimal, act_exp: Decimal, proj_exp: Decimal) -> MonthRecord {
    let mut r = MonthRecord::default();
    r.income
        .projected
        .push(IncomeItem::new(ItemId(1), "Plan".into(), proj_income));
    r.income
        .actual
        .push(IncomeItem::new(ItemId(2), "Paid".into(), act_income));
    let mut item = ExpenseItem::new(ItemId(3), "Rent".into(), proj_exp);
    item.actual = act_exp;
    r.expenses[0].items.push(item);
    r
}

fn advisor() -> Advisor {
    Advisor::new("Ksh")
}

fn kinds(advice: &[Advice]) -> Vec<AdviceKind> {
    advice.iter().map(|a| a.kind).collect()
}

// ── Classification ────────────────────────────────────────────

#[test]
fn test_show_expense_routes_to_expenses_view() {
    assert_eq!(classify("show expenses"), Some(Intent::ShowExpenses));
    assert_eq!(
        classify("Please SHOW me my expense breakdown and balance, hello"),
        Some(Intent::ShowExpenses)
    );
}

#[test]
fn test_show_income_routes_to_income_view() {
    assert_eq!(classify("show income"), Some(Intent::ShowIncome));
}

#[test]
fn test_expense_without_show_is_not_navigation() {
    assert_eq!(classify("expense balance"), Some(Intent::Balance));
}

#[test]
fn test_dashboard_and_home() {
    assert_eq!(classify("go to dashboard"), Some(Intent::ShowDashboard));
    assert_eq!(classify("home"), Some(Intent::ShowDashboard));
}

#[test]
fn test_analysis_keywords() {
    for cmd in [
        "give me advice",
        "analyze this month",
        "How are we doing?",
        "should I invest",
        "investment ideas",
    ] {
        assert_eq!(classify(cmd), Some(Intent::Analyze), "{cmd}");
    }
}

#[test]
fn test_priority_order_analysis_before_balance() {
    assert_eq!(classify("advice on my balance"), Some(Intent::Analyze));
}

#[test]
fn test_priority_order_balance_before_total_income() {
    assert_eq!(classify("total income and balance"), Some(Intent::Balance));
}

#[test]
fn test_total_income() {
    assert_eq!(classify("what is my total income"), Some(Intent::TotalIncome));
    // "income" alone is not enough.
    assert_eq!(classify("income"), None);
}

#[test]
fn test_greeting() {
    assert_eq!(classify("Hello there"), Some(Intent::Greeting));
    assert_eq!(classify("hi"), Some(Intent::Greeting));
    assert_eq!(classify("oh, hi!"), Some(Intent::Greeting));
}

#[test]
fn test_hi_inside_other_words_is_not_a_greeting() {
    assert_eq!(classify("this thing"), None);
}

#[test]
fn test_unmatched_input() {
    assert_eq!(classify("what's the weather"), None);
    assert_eq!(classify(""), None);
    let reply = advisor().respond("what's the weather", &MonthRecord::default());
    assert_eq!(reply.intent, None);
    assert_eq!(reply.view, None);
    assert_eq!(reply.text, UNRECOGNIZED);
}

#[test]
fn test_rule_table_covers_every_intent_once() {
    let intents: Vec<Intent> = RULES.iter().map(|r| r.intent).collect();
    assert_eq!(
        intents,
        [
            Intent::ShowExpenses,
            Intent::ShowIncome,
            Intent::ShowDashboard,
            Intent::Analyze,
            Intent::Balance,
            Intent::TotalIncome,
            Intent::Greeting,
        ]
    );
    assert!(RULES.iter().all(|r| !r.description.is_empty()));
}

// ── Replies ───────────────────────────────────────────────────

#[test]
fn test_navigation_reply_carries_view() {
    let reply = advisor().respond("show expenses", &MonthRecord::default());
    assert_eq!(reply.intent, Some(Intent::ShowExpenses));
    assert_eq!(reply.view, Some(View::Expenses));
}

#[test]
fn test_balance_reply() {
    let r = record(dec!(50000), dec!(40000), dec!(20000), dec!(30000));
    let reply = advisor().respond("balance?", &r);
    assert_eq!(
        reply.text,
        "Your actual balance for this month is Ksh 30,000.00."
    );
}

#[test]
fn test_total_income_reply() {
    let r = record(dec!(1234.5), dec!(0), dec!(0), dec!(0));
    let reply = advisor().respond("total income", &r);
    assert_eq!(reply.text, "You have earned Ksh 1,234.50 so far this month.");
}

#[test]
fn test_analyze_reply_joins_paragraphs() {
    let r = record(dec!(50000), dec!(40000), dec!(20000), dec!(30000));
    let reply = advisor().respond("advice", &r);
    assert_eq!(reply.intent, Some(Intent::Analyze));
    assert_eq!(reply.text.split(PARAGRAPH_BREAK).count(), 3);
}

// ── Advice rules ──────────────────────────────────────────────

#[test]
fn test_healthy_month_recommends_investing() {
    let advice = advisor().advise(&totals(dec!(50000), dec!(40000), dec!(20000), dec!(30000)));
    assert_eq!(
        kinds(&advice),
        [
            AdviceKind::IncomeSurplus,
            AdviceKind::UnderBudget,
            AdviceKind::InvestmentOpportunity,
        ]
    );
    assert!(advice[0].text.contains("Ksh 10,000.00"));
    assert!(advice[1].text.contains("Ksh 10,000.00"));
    assert!(advice[2].text.contains("Ksh 30,000.00"));
    assert!(advice[2].text.contains("60.0% savings rate"));
    assert!(advice[2].text.contains("50% (Ksh 15,000.00)"));
}

#[test]
fn test_deficit_blocks_investing() {
    let advice = advisor().advise(&totals(dec!(10000), dec!(10000), dec!(15000), dec!(15000)));
    assert_eq!(
        kinds(&advice),
        [AdviceKind::UnderBudget, AdviceKind::CriticalDeficit]
    );
    assert!(advice[1].text.contains("Ksh -5,000.00"));
    assert!(!advice.iter().any(|a| a.text.contains("allocating")));
}

#[test]
fn test_zero_balance_is_critical() {
    let advice = advisor().advise(&totals(dec!(100), dec!(100), dec!(100), dec!(100)));
    assert_eq!(
        kinds(&advice),
        [AdviceKind::UnderBudget, AdviceKind::CriticalDeficit]
    );
}

#[test]
fn test_income_shortfall_reports_absolute_gap() {
    let advice = advisor().advise(&totals(dec!(30000), dec!(40000), dec!(0), dec!(0)));
    assert_eq!(advice[0].kind, AdviceKind::IncomeShortfall);
    assert!(advice[0].text.contains("Ksh 10,000.00"));
    assert!(!advice[0].text.contains('-'));
}

#[test]
fn test_equal_income_has_no_income_remark() {
    let advice = advisor().advise(&totals(dec!(1000), dec!(1000), dec!(500), dec!(500)));
    assert!(!advice.iter().any(|a| matches!(
        a.kind,
        AdviceKind::IncomeShortfall | AdviceKind::IncomeSurplus
    )));
}

#[test]
fn test_overspending_reports_overage() {
    let advice = advisor().advise(&totals(dec!(10000), dec!(10000), dec!(4500), dec!(4000)));
    assert_eq!(advice[0].kind, AdviceKind::Overspending);
    assert!(advice[0].text.contains("Ksh 500.00"));
}

#[test]
fn test_low_savings_rate_suggests_emergency_fund() {
    // 1000 / 10000 = 10%
    let advice = advisor().advise(&totals(dec!(10000), dec!(10000), dec!(9000), dec!(9000)));
    assert_eq!(advice.last().unwrap().kind, AdviceKind::EmergencyFund);
}

#[test]
fn test_exactly_twenty_percent_is_not_safe() {
    let advice = advisor().advise(&totals(dec!(10000), dec!(10000), dec!(8000), dec!(8000)));
    assert_eq!(advice.last().unwrap().kind, AdviceKind::EmergencyFund);
}

#[test]
fn test_savings_rate_without_income_is_zero() {
    let t = totals(dec!(0), dec!(0), dec!(0), dec!(0));
    assert_eq!(savings_rate(&t), dec!(0));
}

#[test]
fn test_savings_rate() {
    let t = totals(dec!(50000), dec!(40000), dec!(20000), dec!(30000));
    assert_eq!(savings_rate(&t), dec!(60));
}

#[test]
fn test_savings_rate_is_rounded_not_truncated() {
    // 2 / 3 = 66.666...%
    let advice = advisor().advise(&totals(dec!(3), dec!(3), dec!(1), dec!(1)));
    let invest = advice.last().unwrap();
    assert_eq!(invest.kind, AdviceKind::InvestmentOpportunity);
    assert!(invest.text.contains("(66.7% savings rate)"), "{}", invest.text);
}

#[test]
fn test_advice_carries_status_markers() {
    let advice = advisor().advise(&totals(dec!(50000), dec!(40000), dec!(20000), dec!(30000)));
    assert!(advice[0].text.starts_with("✅ **Income Strong**"));
    assert!(advice[1].text.starts_with("👍 **Spending Control**"));
    assert!(advice[2].text.starts_with("🚀 **Investment Opportunity**"));

    let advice = advisor().advise(&totals(dec!(1), dec!(2), dec!(5), dec!(3)));
    assert!(advice[0].text.starts_with("⚠️ **Income Alert**"));
    assert!(advice[1].text.starts_with("🚨 **Overspending**"));
    assert!(advice[2].text.starts_with("🛑 **Critical Deficit**"));
}

#[test]
fn test_analysis_of_huge_amounts_does_not_panic() {
    let r = record(Decimal::MAX, Decimal::MAX, Decimal::ZERO, Decimal::MAX);
    let mut r2 = r.clone();
    r2.income
        .actual
        .push(IncomeItem::new(ItemId(9), "More".into(), Decimal::MAX));
    for rec in [r, r2] {
        let reply = advisor().respond("advice", &rec);
        assert_eq!(reply.intent, Some(Intent::Analyze));
        assert!(!reply.text.is_empty());
    }
}
