//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use tally_core::db::Database;
use tally_core::models::BillingFrequency;

use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Subscription Command Tests ==========

#[test]
fn test_cmd_subscriptions_add_and_list() {
    let db = setup_test_db();

    let result = commands::cmd_subscriptions_add(
        &db,
        "Netflix",
        649.0,
        "monthly",
        "2026-09-01",
        "entertainment",
        None,
    );
    assert!(result.is_ok());

    let subs = db.list_active_subscriptions().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].name, "Netflix");
    assert_eq!(subs[0].billing_frequency, BillingFrequency::Monthly);

    assert!(commands::cmd_subscriptions_list(&db).is_ok());
    assert!(commands::cmd_subscriptions_show(&db, &subs[0].id).is_ok());
}

#[test]
fn test_cmd_subscriptions_add_rejects_bad_date() {
    let db = setup_test_db();
    let result =
        commands::cmd_subscriptions_add(&db, "X", 1.0, "monthly", "not-a-date", "misc", None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("YYYY-MM-DD"));
}

#[test]
fn test_cmd_subscriptions_add_rejects_bad_frequency() {
    let db = setup_test_db();
    let result =
        commands::cmd_subscriptions_add(&db, "X", 1.0, "weekly", "2026-01-01", "misc", None);
    assert!(result.is_err());
}

#[test]
fn test_cmd_subscriptions_cancel_keeps_record() {
    let db = setup_test_db();
    commands::cmd_subscriptions_add(&db, "Gym", 30.0, "monthly", "2026-03-01", "health", None)
        .unwrap();
    let id = db.list_active_subscriptions().unwrap()[0].id.clone();

    commands::cmd_subscriptions_cancel(&db, &id).unwrap();

    assert!(db.list_active_subscriptions().unwrap().is_empty());
    let kept = db.get_subscription(&id).unwrap().unwrap();
    assert!(!kept.is_active);
}

// ========== Expense Command Tests ==========

#[test]
fn test_cmd_expenses_add_and_delete() {
    let db = setup_test_db();

    commands::cmd_expenses_add(
        &db,
        42.5,
        "food",
        vec!["lunch".to_string()],
        Some("team outing"),
        Some("2026-08-01"),
    )
    .unwrap();

    let expenses = db
        .list_expenses(&tally_core::ExpenseFilter::new())
        .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].tags, vec!["lunch"]);

    commands::cmd_expenses_delete(&db, &expenses[0].id).unwrap();
    assert!(db
        .list_expenses(&tally_core::ExpenseFilter::new())
        .unwrap()
        .is_empty());

    // Hard delete: deleting again fails
    assert!(commands::cmd_expenses_delete(&db, &expenses[0].id).is_err());
}

#[test]
fn test_cmd_expenses_list_runs_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_expenses_list(&db, 20, None).is_ok());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budgets_add_list_delete() {
    let db = setup_test_db();

    commands::cmd_budgets_add(&db, 15000.0, "monthly", Some("food")).unwrap();
    commands::cmd_budgets_add(&db, 100000.0, "yearly", None).unwrap();

    let budgets = db.list_budgets().unwrap();
    assert_eq!(budgets.len(), 2);
    assert!(budgets[1].category.is_none());

    assert!(commands::cmd_budgets_list(&db).is_ok());

    commands::cmd_budgets_delete(&db, &budgets[0].id).unwrap();
    assert_eq!(db.list_budgets().unwrap().len(), 1);
}

#[test]
fn test_cmd_budgets_add_rejects_bad_period() {
    let db = setup_test_db();
    assert!(commands::cmd_budgets_add(&db, 100.0, "weekly", None).is_err());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export_writes_file() {
    let db = setup_test_db();
    commands::cmd_subscriptions_add(&db, "A", 1.0, "yearly", "2026-01-01", "x", None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    commands::cmd_export(&db, Some(&path)).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["subscriptions"].as_array().unwrap().len(), 1);
    assert!(json["expenses"].as_array().unwrap().is_empty());
}
