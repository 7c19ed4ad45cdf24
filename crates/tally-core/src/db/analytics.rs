//! Dashboard, analytics, and export reads
//!
//! Each method runs a fixed sequence of independent queries and hands the
//! results to the pure aggregation functions in `crate::dashboard`. No
//! multi-query transaction is taken: a dashboard may mix data from slightly
//! different instants across its reads, and any storage failure mid-sequence
//! aborts the whole computation rather than returning a partial view.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{Database, ExpenseFilter};
use crate::dashboard::{
    compute_category_breakdown, compute_dashboard, compute_monthly_trends, month_start, year_start,
};
use crate::error::Result;
use crate::models::{Dashboard, ExportSnapshot};

impl Database {
    /// Compute the full dashboard view as of `now`
    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard> {
        let subscriptions = self.list_active_subscriptions()?;
        let monthly_expenses =
            self.list_expenses(&ExpenseFilter::new().since(Some(month_start(now))))?;
        let yearly_expenses =
            self.list_expenses(&ExpenseFilter::new().since(Some(year_start(now))))?;
        let budgets = self.list_budgets()?;

        Ok(compute_dashboard(
            now,
            &subscriptions,
            &monthly_expenses,
            &yearly_expenses,
            &budgets,
        ))
    }

    /// Standalone category breakdown for the current year
    pub fn category_breakdown(&self, now: DateTime<Utc>) -> Result<BTreeMap<String, f64>> {
        let subscriptions = self.list_active_subscriptions()?;
        let yearly_expenses =
            self.list_expenses(&ExpenseFilter::new().since(Some(year_start(now))))?;

        Ok(compute_category_breakdown(&yearly_expenses, &subscriptions))
    }

    /// Current-year spending bucketed by calendar month, expenses only
    pub fn monthly_trends(&self, now: DateTime<Utc>) -> Result<BTreeMap<String, f64>> {
        let yearly_expenses =
            self.list_expenses(&ExpenseFilter::new().since(Some(year_start(now))))?;

        Ok(compute_monthly_trends(&yearly_expenses))
    }

    /// Snapshot every collection for export, inactive subscriptions included
    pub fn export_all(&self) -> Result<ExportSnapshot> {
        let subscriptions = self.list_all_subscriptions()?;
        let expenses = self.list_expenses(&ExpenseFilter::new())?;
        let budgets = self.list_budgets()?;

        Ok(ExportSnapshot {
            subscriptions,
            expenses,
            budgets,
        })
    }
}
