//! Expense filter builder for constructing list queries
//!
//! Keeps the WHERE-clause assembly in one place so the list and dashboard
//! reads share the same query shape.

use chrono::{DateTime, Utc};

use super::format_datetime;

/// Builder for expense list queries
///
/// Results are always ordered by occurrence date descending; `limit` caps
/// the result set (the dashboard reads pass no limit and take the whole
/// window).
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    /// Occurrence date >= since
    pub since: Option<DateTime<Utc>>,
    /// Occurrence date <= until
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// SQL components produced by the builder
pub(crate) struct FilterResult {
    /// WHERE clause including the keyword (empty if unfiltered)
    pub where_clause: String,
    /// LIMIT clause including the keyword (empty if uncapped)
    pub limit_clause: String,
    pub params: Vec<Box<dyn rusqlite::ToSql>>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    pub fn until(mut self, until: Option<DateTime<Utc>>) -> Self {
        self.until = until;
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn build(&self) -> FilterResult {
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = &self.category {
            conditions.push("category = ?");
            params.push(Box::new(category.clone()));
        }
        if let Some(since) = self.since {
            conditions.push("date >= ?");
            params.push(Box::new(format_datetime(since)));
        }
        if let Some(until) = self.until {
            conditions.push("date <= ?");
            params.push(Box::new(format_datetime(until)));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match self.limit {
            Some(limit) => {
                params.push(Box::new(limit));
                "LIMIT ?".to_string()
            }
            None => String::new(),
        };

        FilterResult {
            where_clause,
            limit_clause,
            params,
        }
    }
}
