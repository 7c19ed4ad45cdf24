//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn new_sub(name: &str, cost: f64, freq: BillingFrequency, category: &str) -> NewSubscription {
        NewSubscription {
            name: name.to_string(),
            cost,
            billing_frequency: freq,
            next_due_date: Utc::now() + Duration::days(14),
            category: category.to_string(),
            description: None,
        }
    }

    fn new_expense(amount: f64, category: &str, date: Option<DateTime<Utc>>) -> NewExpense {
        NewExpense {
            amount,
            category: category.to_string(),
            tags: vec![],
            notes: None,
            date,
        }
    }

    #[test]
    fn test_fresh_db_is_empty() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_active_subscriptions().unwrap().is_empty());
        assert!(db.list_expenses(&ExpenseFilter::new()).unwrap().is_empty());
        assert!(db.list_budgets().unwrap().is_empty());
    }

    #[test]
    fn test_subscription_create_then_get_round_trips() {
        let db = Database::in_memory().unwrap();

        let created = db
            .create_subscription(&new_sub(
                "Netflix",
                649.0,
                BillingFrequency::Monthly,
                "entertainment",
            ))
            .unwrap();
        assert!(!created.id.is_empty());
        assert!(created.is_active);

        let fetched = db.get_subscription(&created.id).unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Netflix");
        assert_eq!(fetched.cost, 649.0);
        assert_eq!(fetched.billing_frequency, BillingFrequency::Monthly);
        assert_eq!(fetched.category, "entertainment");
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[test]
    fn test_subscription_validation_rejected_before_storage() {
        let db = Database::in_memory().unwrap();

        let mut bad = new_sub("", 10.0, BillingFrequency::Monthly, "a");
        assert!(matches!(
            db.create_subscription(&bad),
            Err(crate::Error::InvalidData(_))
        ));

        bad = new_sub("ok", -1.0, BillingFrequency::Monthly, "a");
        assert!(matches!(
            db.create_subscription(&bad),
            Err(crate::Error::InvalidData(_))
        ));

        // Nothing reached the table
        assert!(db.list_active_subscriptions().unwrap().is_empty());
    }

    #[test]
    fn test_subscription_patch_merges_and_refreshes_updated_at() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_subscription(&new_sub("Gym", 30.0, BillingFrequency::Monthly, "health"))
            .unwrap();

        let patch = SubscriptionPatch {
            cost: Some(35.0),
            description: Some("price hike".to_string()),
            ..Default::default()
        };
        let updated = db.update_subscription(&created.id, &patch).unwrap();

        // Patched fields changed, the rest survived the merge
        assert_eq!(updated.cost, 35.0);
        assert_eq!(updated.description.as_deref(), Some("price hike"));
        assert_eq!(updated.name, "Gym");
        assert_eq!(updated.category, "health");
        assert!(updated.updated_at >= created.updated_at);

        let fetched = db.get_subscription(&created.id).unwrap().unwrap();
        assert_eq!(fetched.cost, 35.0);
    }

    #[test]
    fn test_update_missing_subscription_is_not_found() {
        let db = Database::in_memory().unwrap();
        let result = db.update_subscription("no-such-id", &SubscriptionPatch::default());
        assert!(matches!(result, Err(crate::Error::NotFound(_))));
    }

    #[test]
    fn test_subscription_soft_delete() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_subscription(&new_sub("Hulu", 15.0, BillingFrequency::Monthly, "entertainment"))
            .unwrap();

        db.deactivate_subscription(&created.id).unwrap();

        // Gone from the active list...
        assert!(db.list_active_subscriptions().unwrap().is_empty());

        // ...but still fetchable by id with the flag cleared
        let fetched = db.get_subscription(&created.id).unwrap().unwrap();
        assert!(!fetched.is_active);

        // And still present in the export snapshot
        let snapshot = db.export_all().unwrap();
        assert_eq!(snapshot.subscriptions.len(), 1);
    }

    #[test]
    fn test_deactivate_missing_subscription_is_not_found() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.deactivate_subscription("no-such-id"),
            Err(crate::Error::NotFound(_))
        ));
    }

    #[test]
    fn test_expense_create_defaults_date_to_now() {
        let db = Database::in_memory().unwrap();
        let before = Utc::now() - Duration::seconds(2);

        let created = db
            .create_expense(&new_expense(42.0, "food", None))
            .unwrap();
        assert!(created.date >= before);
        assert_eq!(created.date, created.created_at);
    }

    #[test]
    fn test_expense_tags_preserve_order_and_duplicates() {
        let db = Database::in_memory().unwrap();
        let mut new = new_expense(10.0, "food", None);
        new.tags = vec!["lunch".into(), "work".into(), "lunch".into()];

        let created = db.create_expense(&new).unwrap();
        let fetched = db.get_expense(&created.id).unwrap().unwrap();
        assert_eq!(fetched.tags, vec!["lunch", "work", "lunch"]);
    }

    #[test]
    fn test_expense_hard_delete() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_expense(&new_expense(20.0, "transport", None))
            .unwrap();

        db.delete_expense(&created.id).unwrap();

        // The record is gone entirely, not flagged
        assert!(db.get_expense(&created.id).unwrap().is_none());
        assert!(matches!(
            db.delete_expense(&created.id),
            Err(crate::Error::NotFound(_))
        ));
    }

    #[test]
    fn test_expense_validation() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.create_expense(&new_expense(0.0, "food", None)),
            Err(crate::Error::InvalidData(_))
        ));
        assert!(matches!(
            db.create_expense(&new_expense(5.0, "  ", None)),
            Err(crate::Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_expense_list_filters_and_orders_descending() {
        let db = Database::in_memory().unwrap();
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        for (amount, category, offset) in [
            (10.0, "food", 0),
            (20.0, "food", 5),
            (30.0, "transport", 10),
            (40.0, "food", 15),
        ] {
            db.create_expense(&new_expense(
                amount,
                category,
                Some(base + Duration::days(offset)),
            ))
            .unwrap();
        }

        let all = db.list_expenses(&ExpenseFilter::new()).unwrap();
        assert_eq!(all.len(), 4);
        // Newest occurrence first
        assert_eq!(all[0].amount, 40.0);
        assert_eq!(all[3].amount, 10.0);

        let food = db
            .list_expenses(&ExpenseFilter::new().category(Some("food".into())))
            .unwrap();
        assert_eq!(food.len(), 3);

        let windowed = db
            .list_expenses(
                &ExpenseFilter::new()
                    .since(Some(base + Duration::days(4)))
                    .until(Some(base + Duration::days(11))),
            )
            .unwrap();
        assert_eq!(windowed.len(), 2);

        let capped = db
            .list_expenses(&ExpenseFilter::new().limit(Some(2)))
            .unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].amount, 40.0);
    }

    #[test]
    fn test_expense_patch_merges() {
        let db = Database::in_memory().unwrap();
        let created = db
            .create_expense(&new_expense(50.0, "food", None))
            .unwrap();

        let patch = ExpensePatch {
            amount: Some(55.0),
            notes: Some("tip included".to_string()),
            ..Default::default()
        };
        let updated = db.update_expense(&created.id, &patch).unwrap();
        assert_eq!(updated.amount, 55.0);
        assert_eq!(updated.category, "food");
        assert_eq!(updated.notes.as_deref(), Some("tip included"));
    }

    #[test]
    fn test_budget_crud_and_duplicates_allowed() {
        let db = Database::in_memory().unwrap();

        let first = db
            .create_budget(&NewBudget {
                period: BudgetPeriod::Monthly,
                category: Some("food".to_string()),
                limit: 15000.0,
            })
            .unwrap();
        // Same scope and category again: legal, both are kept
        db.create_budget(&NewBudget {
            period: BudgetPeriod::Monthly,
            category: Some("food".to_string()),
            limit: 12000.0,
        })
        .unwrap();

        let budgets = db.list_budgets().unwrap();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].id, first.id);

        let patch = BudgetPatch {
            limit: Some(18000.0),
            ..Default::default()
        };
        let updated = db.update_budget(&first.id, &patch).unwrap();
        assert_eq!(updated.limit, 18000.0);
        assert_eq!(updated.period, BudgetPeriod::Monthly);

        db.delete_budget(&first.id).unwrap();
        assert!(db.get_budget(&first.id).unwrap().is_none());
        assert_eq!(db.list_budgets().unwrap().len(), 1);
    }

    #[test]
    fn test_budget_validation() {
        let db = Database::in_memory().unwrap();
        assert!(matches!(
            db.create_budget(&NewBudget {
                period: BudgetPeriod::Yearly,
                category: None,
                limit: 0.0,
            }),
            Err(crate::Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_dashboard_from_storage() {
        let db = Database::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        db.create_subscription(&new_sub(
            "Everything Bundle",
            649.0,
            BillingFrequency::Monthly,
            "entertainment",
        ))
        .unwrap();
        // One expense earlier in the year, one inside the current month
        db.create_expense(&new_expense(
            6000.0,
            "food",
            Some(Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap()),
        ))
        .unwrap();
        db.create_expense(&new_expense(
            4000.0,
            "transport",
            Some(Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()),
        ))
        .unwrap();

        let dash = db.dashboard(now).unwrap();
        assert_eq!(dash.current_monthly_spending, 4000.0);
        assert_eq!(dash.current_yearly_spending, 17788.0);
        assert_eq!(dash.total_yearly_projection, 7788.0);

        let breakdown_total: f64 = dash.category_breakdown.values().sum();
        assert_eq!(breakdown_total, dash.current_yearly_spending);
    }

    #[test]
    fn test_monthly_trends_from_storage() {
        let db = Database::in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        db.create_expense(&new_expense(
            100.0,
            "food",
            Some(Utc.with_ymd_and_hms(2025, 1, 3, 0, 0, 0).unwrap()),
        ))
        .unwrap();
        db.create_expense(&new_expense(
            250.0,
            "food",
            Some(Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap()),
        ))
        .unwrap();
        // Previous year: outside the window
        db.create_expense(&new_expense(
            999.0,
            "food",
            Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
        ))
        .unwrap();

        let trends = db.monthly_trends(now).unwrap();
        assert_eq!(trends.len(), 1);
        assert_eq!(trends["2025-01"], 350.0);
    }

    #[test]
    fn test_export_snapshot_covers_all_collections() {
        let db = Database::in_memory().unwrap();
        db.create_subscription(&new_sub("A", 1.0, BillingFrequency::Yearly, "x"))
            .unwrap();
        db.create_expense(&new_expense(2.0, "x", None)).unwrap();
        db.create_budget(&NewBudget {
            period: BudgetPeriod::Yearly,
            category: None,
            limit: 3.0,
        })
        .unwrap();

        let snapshot = db.export_all().unwrap();
        assert_eq!(snapshot.subscriptions.len(), 1);
        assert_eq!(snapshot.expenses.len(), 1);
        assert_eq!(snapshot.budgets.len(), 1);
    }
}
