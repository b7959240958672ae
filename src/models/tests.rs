#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_display_is_zero_padded() {
    let key = MonthKey::new(2025, 3).unwrap();
    assert_eq!(key.to_string(), "2025-03");
}

#[test]
fn test_month_key_parse() {
    let key: MonthKey = "2025-12".parse().unwrap();
    assert_eq!(key.year(), 2025);
    assert_eq!(key.month(), 12);

    let short: MonthKey = "2025-1".parse().unwrap();
    assert_eq!(short.to_string(), "2025-01");
}

#[test]
fn test_month_key_parse_rejects_garbage() {
    assert!("2025-13".parse::<MonthKey>().is_err());
    assert!("2025-00".parse::<MonthKey>().is_err());
    assert!("25-01".parse::<MonthKey>().is_err());
    assert!("2025/01".parse::<MonthKey>().is_err());
    assert!("".parse::<MonthKey>().is_err());
    assert!("abcd-ef".parse::<MonthKey>().is_err());
}

#[test]
fn test_month_key_ordering() {
    let a: MonthKey = "2024-12".parse().unwrap();
    let b: MonthKey = "2025-01".parse().unwrap();
    let c: MonthKey = "2025-02".parse().unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_month_key_next_prev_roll_over_years() {
    let dec_key: MonthKey = "2025-12".parse().unwrap();
    assert_eq!(dec_key.next().to_string(), "2026-01");
    assert_eq!(dec_key.next().prev(), dec_key);

    let jan: MonthKey = "2025-01".parse().unwrap();
    assert_eq!(jan.prev().to_string(), "2024-12");
}

#[test]
fn test_month_key_serializes_as_string() {
    let key: MonthKey = "2025-07".parse().unwrap();
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-07\"");
    let back: MonthKey = serde_json::from_str("\"2025-07\"").unwrap();
    assert_eq!(back, key);
}

// ── ItemId ────────────────────────────────────────────────────

#[test]
fn test_item_id_accepts_number_or_string() {
    let from_num: ItemId = serde_json::from_str("5").unwrap();
    let from_str: ItemId = serde_json::from_str("\"5\"").unwrap();
    let from_float: ItemId = serde_json::from_str("5.0").unwrap();
    assert_eq!(from_num, ItemId(5));
    assert_eq!(from_str, ItemId(5));
    assert_eq!(from_float, ItemId(5));
}

#[test]
fn test_item_id_rejects_non_integral() {
    assert!(serde_json::from_str::<ItemId>("5.5").is_err());
    assert!(serde_json::from_str::<ItemId>("\"five\"").is_err());
}

#[test]
fn test_item_id_sanitize() {
    assert_eq!(ItemId::sanitize(" 1733000000000 "), Some(ItemId(1_733_000_000_000)));
    assert_eq!(ItemId::sanitize("7.0"), Some(ItemId(7)));
    assert_eq!(ItemId::sanitize("x7"), None);
    assert_eq!(ItemId::sanitize(""), None);
}

#[test]
fn test_id_generator_is_strictly_monotonic() {
    let ids = IdGenerator::new();
    let mut last = ids.next();
    for _ in 0..1000 {
        let next = ids.next();
        assert!(next > last, "{next} should be greater than {last}");
        last = next;
    }
}

#[test]
fn test_id_generator_is_timestamp_derived() {
    let before = chrono::Utc::now().timestamp_millis();
    let id = IdGenerator::new().next();
    assert!(id.0 >= before);
}

// ── MonthRecord ───────────────────────────────────────────────

#[test]
fn test_default_record_shape() {
    let record = MonthRecord::default();
    assert!(record.income.projected.is_empty());
    assert!(record.income.actual.is_empty());
    let names: Vec<&str> = record.expenses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Housing", "Food", "Transport"]);
    assert!(record.expenses.iter().all(|c| c.items.is_empty()));
}

#[test]
fn test_expense_item_new_defaults_actual_to_zero() {
    let item = ExpenseItem::new(ItemId(1), "Rent".into(), dec!(25000));
    assert_eq!(item.actual, dec!(0));
    assert_eq!(item.projected, dec!(25000));
}

#[test]
fn test_record_json_matches_browser_shape() {
    // Blob written by the browser build: float amounts, numeric ids.
    let json = r#"{
        "income": {
            "projected": [{"id": 1733000000001, "name": "Salary", "amount": 50000}],
            "actual": [{"id": "1733000000002", "name": "Salary", "amount": 49999.5}]
        },
        "expenses": [
            {"id": "cat_housing", "name": "Housing", "items": [
                {"id": 1733000000003, "name": "Rent", "projected": 20000, "actual": 20000}
            ]}
        ]
    }"#;
    let record: MonthRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.income.projected[0].amount, dec!(50000));
    assert_eq!(record.income.actual[0].id, ItemId(1_733_000_000_002));
    assert_eq!(record.income.actual[0].amount, dec!(49999.5));
    assert_eq!(record.expenses[0].items[0].name, "Rent");
}

#[test]
fn test_amounts_serialize_as_json_numbers() {
    let income = IncomeItem::new(ItemId(1), "Salary".into(), dec!(50000));
    let value = serde_json::to_value(&income).unwrap();
    assert!(value["amount"].is_number());
    assert_eq!(value["amount"], serde_json::json!(50000));

    let mut item = ExpenseItem::new(ItemId(2), "Lunch".into(), dec!(12.50));
    item.actual = dec!(9.75);
    let value = serde_json::to_value(&item).unwrap();
    assert!(value["projected"].is_number());
    assert_eq!(value["actual"], serde_json::json!(9.75));

    let back: ExpenseItem = serde_json::from_value(value).unwrap();
    assert_eq!(back, item);
}

#[test]
fn test_string_amounts_are_still_read() {
    let item: IncomeItem =
        serde_json::from_str(r#"{"id": 1, "name": "Gift", "amount": "1234.5"}"#).unwrap();
    assert_eq!(item.amount, dec!(1234.5));
}

#[test]
fn test_record_missing_lists_default_to_empty() {
    let record: MonthRecord = serde_json::from_str("{}").unwrap();
    assert!(record.income.projected.is_empty());
    assert!(record.expenses.is_empty());
}

#[test]
fn test_category_lookup() {
    let record = MonthRecord::default();
    assert_eq!(record.category("cat_food").unwrap().name, "Food");
    assert_eq!(record.category_by_name("TRANSPORT").unwrap().id, "cat_transport");
    assert!(record.category("cat_missing").is_none());
}

#[test]
fn test_income_kind_parse() {
    assert_eq!(IncomeKind::parse("Projected"), Some(IncomeKind::Projected));
    assert_eq!(IncomeKind::parse("act"), Some(IncomeKind::Actual));
    assert_eq!(IncomeKind::parse("other"), None);
    assert_eq!(IncomeKind::Actual.to_string(), "actual");
}
