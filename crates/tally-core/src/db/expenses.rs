//! Expense operations
//!
//! Expenses are hard-deleted, unlike subscriptions: removal drops the row
//! and later lookups return NotFound.

use rusqlite::{params, Row};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, Database, ExpenseFilter};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpensePatch, NewExpense};

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let tags_json: String = row.get(3)?;
    let date_str: String = row.get(5)?;
    let created_str: String = row.get(6)?;
    let updated_str: String = row.get(7)?;

    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        notes: row.get(4)?,
        date: parse_datetime(&date_str),
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

const EXPENSE_COLUMNS: &str = "id, amount, category, tags, notes, date, created_at, updated_at";

impl Database {
    /// Insert a new expense; the occurrence date defaults to the creation
    /// instant when omitted
    pub fn create_expense(&self, new: &NewExpense) -> Result<Expense> {
        new.validate()?;

        let now = chrono::Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            amount: new.amount,
            category: new.category.clone(),
            tags: new.tags.clone(),
            notes: new.notes.clone(),
            date: new.date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (id, amount, category, tags, notes, date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                expense.id,
                expense.amount,
                expense.category,
                serde_json::to_string(&expense.tags)?,
                expense.notes,
                format_datetime(expense.date),
                format_datetime(expense.created_at),
                format_datetime(expense.updated_at),
            ],
        )?;

        Ok(expense)
    }

    /// List expenses matching the filter, newest occurrence first
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let built = filter.build();
        let query = format!(
            "SELECT {} FROM expenses {} ORDER BY date DESC {}",
            EXPENSE_COLUMNS, built.where_clause, built.limit_clause
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&query)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            built.params.iter().map(|p| p.as_ref()).collect();

        let expenses = stmt
            .query_map(param_refs.as_slice(), expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Get an expense by id
    pub fn get_expense(&self, id: &str) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let query = format!("SELECT {} FROM expenses WHERE id = ?", EXPENSE_COLUMNS);

        let result = conn.query_row(&query, params![id], expense_from_row);

        match result {
            Ok(expense) => Ok(Some(expense)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge a patch over a stored expense, refreshing updated_at
    pub fn update_expense(&self, id: &str, patch: &ExpensePatch) -> Result<Expense> {
        patch.validate()?;

        let mut expense = self
            .get_expense(id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {} not found", id)))?;

        patch.apply(&mut expense);
        expense.updated_at = chrono::Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, tags = ?, notes = ?, date = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                expense.amount,
                expense.category,
                serde_json::to_string(&expense.tags)?,
                expense.notes,
                format_datetime(expense.date),
                format_datetime(expense.updated_at),
                id,
            ],
        )?;

        Ok(expense)
    }

    /// Hard-delete an expense
    pub fn delete_expense(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Expense {} not found", id)));
        }
        Ok(())
    }
}
