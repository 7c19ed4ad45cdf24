//! Budget operations

use rusqlite::{params, Row};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetPatch, BudgetPeriod, NewBudget};

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<Budget> {
    let period_str: String = row.get(1)?;
    let created_str: String = row.get(4)?;
    let updated_str: String = row.get(5)?;

    Ok(Budget {
        id: row.get(0)?,
        period: match period_str.as_str() {
            "yearly" => BudgetPeriod::Yearly,
            _ => BudgetPeriod::Monthly,
        },
        category: row.get(2)?,
        limit: row.get(3)?,
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

const BUDGET_COLUMNS: &str = "id, period, category, spend_limit, created_at, updated_at";

impl Database {
    /// Insert a new budget
    ///
    /// Duplicate period/category pairs are allowed; every stored budget is
    /// evaluated independently by the alerting pass.
    pub fn create_budget(&self, new: &NewBudget) -> Result<Budget> {
        new.validate()?;

        let now = chrono::Utc::now();
        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            period: new.period,
            category: new.category.clone(),
            limit: new.limit,
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO budgets (id, period, category, spend_limit, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                budget.id,
                budget.period.as_str(),
                budget.category,
                budget.limit,
                format_datetime(budget.created_at),
                format_datetime(budget.updated_at),
            ],
        )?;

        Ok(budget)
    }

    /// List all budgets in storage order
    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let query = format!("SELECT {} FROM budgets ORDER BY rowid", BUDGET_COLUMNS);
        let mut stmt = conn.prepare(&query)?;

        let budgets = stmt
            .query_map([], budget_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Get a budget by id
    pub fn get_budget(&self, id: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let query = format!("SELECT {} FROM budgets WHERE id = ?", BUDGET_COLUMNS);

        let result = conn.query_row(&query, params![id], budget_from_row);

        match result {
            Ok(budget) => Ok(Some(budget)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge a patch over a stored budget, refreshing updated_at
    pub fn update_budget(&self, id: &str, patch: &BudgetPatch) -> Result<Budget> {
        patch.validate()?;

        let mut budget = self
            .get_budget(id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {} not found", id)))?;

        patch.apply(&mut budget);
        budget.updated_at = chrono::Utc::now();

        let conn = self.conn()?;
        conn.execute(
            "UPDATE budgets SET period = ?, category = ?, spend_limit = ?, updated_at = ? WHERE id = ?",
            params![
                budget.period.as_str(),
                budget.category,
                budget.limit,
                format_datetime(budget.updated_at),
                id,
            ],
        )?;

        Ok(budget)
    }

    /// Hard-delete a budget
    pub fn delete_budget(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Budget {} not found", id)));
        }
        Ok(())
    }
}
