//! Domain models for tally

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How often a subscription bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingFrequency {
    Monthly,
    Yearly,
}

impl BillingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BillingFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown billing frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which spending window a budget constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown budget period: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring subscription
///
/// Deletion is soft: `is_active` is cleared and the record retained, so a
/// deactivated subscription is still fetchable by id but contributes nothing
/// to projections or breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub billing_frequency: BillingFrequency,
    pub next_due_date: DateTime<Utc>,
    pub category: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new subscription before insertion (id and timestamps are generated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscription {
    pub name: String,
    pub cost: f64,
    pub billing_frequency: BillingFrequency,
    pub next_due_date: DateTime<Utc>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSubscription {
    /// Reject before any storage access
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidData("subscription name is required".into()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData(
                "subscription category is required".into(),
            ));
        }
        if self.cost < 0.0 {
            return Err(Error::InvalidData(format!(
                "subscription cost must be non-negative, got {}",
                self.cost
            )));
        }
        Ok(())
    }
}

/// Partial update for a subscription: `Some` fields overwrite the stored
/// record, `None` fields are left unchanged. Every applied patch refreshes
/// `updated_at`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub cost: Option<f64>,
    pub billing_frequency: Option<BillingFrequency>,
    pub next_due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl SubscriptionPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidData("subscription name is required".into()));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(Error::InvalidData(
                    "subscription category is required".into(),
                ));
            }
        }
        if let Some(cost) = self.cost {
            if cost < 0.0 {
                return Err(Error::InvalidData(format!(
                    "subscription cost must be non-negative, got {}",
                    cost
                )));
            }
        }
        Ok(())
    }

    /// Merge this patch over a stored record
    pub fn apply(&self, sub: &mut Subscription) {
        if let Some(name) = &self.name {
            sub.name = name.clone();
        }
        if let Some(cost) = self.cost {
            sub.cost = cost;
        }
        if let Some(freq) = self.billing_frequency {
            sub.billing_frequency = freq;
        }
        if let Some(due) = self.next_due_date {
            sub.next_due_date = due;
        }
        if let Some(category) = &self.category {
            sub.category = category.clone();
        }
        if let Some(description) = &self.description {
            sub.description = Some(description.clone());
        }
        if let Some(active) = self.is_active {
            sub.is_active = active;
        }
    }
}

/// A one-off expense
///
/// Unlike subscriptions, expenses are hard-deleted: once removed, lookup by
/// id yields NotFound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    /// Order-preserving, not deduplicated
    pub tags: Vec<String>,
    pub notes: Option<String>,
    /// When the expense occurred (defaults to creation time)
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new expense before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Occurrence date; omitted means "now"
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::InvalidData("expense category is required".into()));
        }
        if self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "expense amount must be positive, got {}",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Partial update for an expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl ExpensePatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(Error::InvalidData("expense category is required".into()));
            }
        }
        if let Some(amount) = self.amount {
            if amount <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "expense amount must be positive, got {}",
                    amount
                )));
            }
        }
        Ok(())
    }

    pub fn apply(&self, expense: &mut Expense) {
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = &self.category {
            expense.category = category.clone();
        }
        if let Some(tags) = &self.tags {
            expense.tags = tags.clone();
        }
        if let Some(notes) = &self.notes {
            expense.notes = Some(notes.clone());
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}

/// A spending limit for a period, optionally scoped to one category
///
/// No uniqueness constraint: several budgets may cover the same
/// period/category pair and each is evaluated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub period: BudgetPeriod,
    /// None = overall budget across all categories
    pub category: Option<String>,
    pub limit: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new budget before insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub period: BudgetPeriod,
    #[serde(default)]
    pub category: Option<String>,
    pub limit: f64,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.limit <= 0.0 {
            return Err(Error::InvalidData(format!(
                "budget limit must be positive, got {}",
                self.limit
            )));
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(Error::InvalidData(
                    "budget category must be non-empty when present".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Partial update for a budget
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetPatch {
    pub period: Option<BudgetPeriod>,
    pub category: Option<String>,
    pub limit: Option<f64>,
}

impl BudgetPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            if limit <= 0.0 {
                return Err(Error::InvalidData(format!(
                    "budget limit must be positive, got {}",
                    limit
                )));
            }
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(Error::InvalidData(
                    "budget category must be non-empty when present".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn apply(&self, budget: &mut Budget) {
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(category) = &self.category {
            budget.category = Some(category.clone());
        }
        if let Some(limit) = self.limit {
            budget.limit = limit;
        }
    }
}

// ========== Dashboard Models ==========

/// A subscription due within the upcoming window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingSubscription {
    pub id: String,
    pub name: String,
    pub cost: f64,
    pub due_date: DateTime<Utc>,
    /// Whole days until due, truncated toward zero; negative when overdue
    pub days_until_due: i64,
}

/// An exceeded budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub period: BudgetPeriod,
    pub category: Option<String>,
    pub limit: f64,
    pub current: f64,
    pub exceeded_by: f64,
}

/// The aggregated dashboard view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_yearly_projection: f64,
    pub current_monthly_spending: f64,
    pub current_yearly_spending: f64,
    pub category_breakdown: BTreeMap<String, f64>,
    pub upcoming_subscriptions: Vec<UpcomingSubscription>,
    pub budget_alerts: Vec<BudgetAlert>,
    pub savings_suggestions: Vec<String>,
}

/// Full-data snapshot for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    /// All subscriptions, inactive ones included
    pub subscriptions: Vec<Subscription>,
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
}
