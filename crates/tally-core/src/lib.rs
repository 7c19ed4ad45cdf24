//! Tally Core Library
//!
//! Shared functionality for the tally subscription and expense tracker:
//! - Database access and migrations
//! - Billing cycle date arithmetic and cost annualization
//! - Dashboard aggregation (period totals, category breakdown)
//! - Budget overage alerting
//! - Heuristic savings suggestions
//! - Full-data export snapshots

pub mod billing;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;

pub use dashboard::{compute_category_breakdown, compute_dashboard, compute_monthly_trends};
pub use db::{Database, ExpenseFilter};
pub use error::{Error, Result};
