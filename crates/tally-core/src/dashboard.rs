//! Dashboard aggregation engine
//!
//! Pure functions over already-fetched storage results. Each call merges
//! active subscriptions and date-windowed expenses into period totals, a
//! category breakdown, due-date and budget alerts, and savings suggestions.
//! No shared state: the `Database::dashboard` convenience method runs the
//! reads and delegates here.
//!
//! Two asymmetries are deliberate and load-bearing:
//! - the monthly total counts expenses only, while the yearly total adds
//!   every active subscription's annualized cost on top of expenses;
//! - subscriptions are soft-deleted but expenses are hard-deleted, so only
//!   subscriptions need the `is_active` filter.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::billing::annualize;
use crate::models::{
    Budget, BudgetAlert, BudgetPeriod, Dashboard, Expense, Subscription, UpcomingSubscription,
};

/// How far ahead a due date counts as "upcoming"
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Per-billing-period cost above which a subscription is flagged as expensive
const EXPENSIVE_SUBSCRIPTION_COST: f64 = 500.0;

/// Share of yearly spending above which a category draws a suggestion
const HIGH_CATEGORY_SHARE: f64 = 0.2;

/// First instant of `now`'s month (UTC, same reference clock as storage)
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now)
}

/// First instant of `now`'s year
pub fn year_start(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now)
}

/// Forward-looking yearly cost of the active subscriptions, independent of
/// billing history.
pub fn yearly_projection(subscriptions: &[Subscription]) -> f64 {
    subscriptions
        .iter()
        .filter(|s| s.is_active)
        .map(|s| annualize(s.cost, s.billing_frequency))
        .sum()
}

/// Category -> yearly total across expenses and active subscriptions
///
/// Expense amounts accumulate first, then each active subscription's
/// annualized cost lands in the same bucket for its category. Summing the
/// map therefore reproduces the yearly spending total exactly.
pub fn compute_category_breakdown(
    yearly_expenses: &[Expense],
    subscriptions: &[Subscription],
) -> BTreeMap<String, f64> {
    let mut breakdown: BTreeMap<String, f64> = BTreeMap::new();

    for expense in yearly_expenses {
        *breakdown.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    for sub in subscriptions.iter().filter(|s| s.is_active) {
        *breakdown.entry(sub.category.clone()).or_insert(0.0) +=
            annualize(sub.cost, sub.billing_frequency);
    }

    breakdown
}

/// Bucket current-year expenses by calendar month ("YYYY-MM" -> total)
///
/// Expenses only; subscriptions never contribute to trends.
pub fn compute_monthly_trends(yearly_expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut trends: BTreeMap<String, f64> = BTreeMap::new();

    for expense in yearly_expenses {
        let bucket = expense.date.format("%Y-%m").to_string();
        *trends.entry(bucket).or_insert(0.0) += expense.amount;
    }

    trends
}

/// Active subscriptions due on or before `now + 7 days`
///
/// `days_until_due` is the whole-day difference truncated toward zero, so an
/// already-overdue subscription carries a negative value rather than being
/// clamped or dropped.
fn upcoming_subscriptions(
    now: DateTime<Utc>,
    subscriptions: &[Subscription],
) -> Vec<UpcomingSubscription> {
    let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);

    subscriptions
        .iter()
        .filter(|s| s.is_active && s.next_due_date <= window_end)
        .map(|s| UpcomingSubscription {
            id: s.id.clone(),
            name: s.name.clone(),
            cost: s.cost,
            due_date: s.next_due_date,
            days_until_due: (s.next_due_date - now).num_days(),
        })
        .collect()
}

/// Evaluate every stored budget against the current totals
///
/// Overall monthly budgets compare against the expenses-only monthly total;
/// overall yearly budgets against the subscription-inclusive yearly total.
/// Category-scoped monthly budgets re-sum the month's expenses for that
/// category (subscriptions excluded); category-scoped yearly budgets read
/// the breakdown (0 when the category is absent). Output order follows
/// storage iteration order.
fn budget_alerts(
    budgets: &[Budget],
    monthly_expenses: &[Expense],
    monthly_spending: f64,
    yearly_spending: f64,
    breakdown: &BTreeMap<String, f64>,
) -> Vec<BudgetAlert> {
    let mut alerts = Vec::new();

    for budget in budgets {
        let current = match (budget.period, budget.category.as_deref()) {
            (BudgetPeriod::Monthly, None) => monthly_spending,
            (BudgetPeriod::Monthly, Some(category)) => monthly_expenses
                .iter()
                .filter(|e| e.category == category)
                .map(|e| e.amount)
                .sum(),
            (BudgetPeriod::Yearly, None) => yearly_spending,
            (BudgetPeriod::Yearly, Some(category)) => {
                breakdown.get(category).copied().unwrap_or(0.0)
            }
        };

        if current > budget.limit {
            alerts.push(BudgetAlert {
                period: budget.period,
                category: budget.category.clone(),
                limit: budget.limit,
                current,
                exceeded_by: current - budget.limit,
            });
        }
    }

    alerts
}

/// Heuristic savings suggestions, at most two
///
/// The thresholds are fixed, not configuration. When several categories tie
/// for the largest share, the lexicographically last one wins (map iteration
/// order plus max-by keeping the later maximum).
fn savings_suggestions(
    subscriptions: &[Subscription],
    breakdown: &BTreeMap<String, f64>,
    yearly_spending: f64,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    let expensive: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|s| s.is_active && s.cost > EXPENSIVE_SUBSCRIPTION_COST)
        .collect();
    if !expensive.is_empty() {
        let total_savings: f64 = expensive
            .iter()
            .map(|s| annualize(s.cost, s.billing_frequency))
            .sum();
        suggestions.push(format!(
            "Consider reviewing {} expensive subscriptions to save up to {:.0} annually",
            expensive.len(),
            total_savings
        ));
    }

    // The share check degenerates at zero spending; skip it entirely then
    if yearly_spending > 0.0 {
        let threshold = yearly_spending * HIGH_CATEGORY_SHARE;
        let largest = breakdown
            .iter()
            .filter(|(_, amount)| **amount > threshold)
            .max_by(|a, b| a.1.total_cmp(b.1));
        if let Some((category, amount)) = largest {
            suggestions.push(format!(
                "Consider reducing spending on {} where you've spent {:.0} this year",
                category, amount
            ));
        }
    }

    suggestions
}

/// Merge storage query results into the full dashboard view
///
/// Inputs are the results of the fixed read sequence: active subscriptions,
/// expenses since month start, expenses since year start (a superset of the
/// monthly slice; the two feed independent totals and are never summed
/// together), and all budgets.
pub fn compute_dashboard(
    now: DateTime<Utc>,
    subscriptions: &[Subscription],
    monthly_expenses: &[Expense],
    yearly_expenses: &[Expense],
    budgets: &[Budget],
) -> Dashboard {
    let total_yearly_projection = yearly_projection(subscriptions);

    let current_monthly_spending: f64 = monthly_expenses.iter().map(|e| e.amount).sum();

    // Yearly spending counts subscriptions on top of expenses; the monthly
    // figure above does not.
    let expense_yearly: f64 = yearly_expenses.iter().map(|e| e.amount).sum();
    let current_yearly_spending = expense_yearly + yearly_projection(subscriptions);

    let category_breakdown = compute_category_breakdown(yearly_expenses, subscriptions);

    let upcoming = upcoming_subscriptions(now, subscriptions);

    let alerts = budget_alerts(
        budgets,
        monthly_expenses,
        current_monthly_spending,
        current_yearly_spending,
        &category_breakdown,
    );

    let suggestions = savings_suggestions(subscriptions, &category_breakdown, current_yearly_spending);

    Dashboard {
        total_yearly_projection,
        current_monthly_spending,
        current_yearly_spending,
        category_breakdown,
        upcoming_subscriptions: upcoming,
        budget_alerts: alerts,
        savings_suggestions: suggestions,
    }
}
