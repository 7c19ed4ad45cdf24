//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analytics;
pub mod budgets;
pub mod expenses;
pub mod export;
pub mod health;
pub mod subscriptions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use budgets::*;
pub use expenses::*;
pub use export::*;
pub use health::*;
pub use subscriptions::*;
