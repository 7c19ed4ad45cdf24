//! Subscription operations

use rusqlite::{params, Row};
use uuid::Uuid;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{BillingFrequency, NewSubscription, Subscription, SubscriptionPatch};

fn subscription_from_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let freq_str: String = row.get(3)?;
    let due_str: String = row.get(4)?;
    let created_str: String = row.get(8)?;
    let updated_str: String = row.get(9)?;

    Ok(Subscription {
        id: row.get(0)?,
        name: row.get(1)?,
        cost: row.get(2)?,
        billing_frequency: match freq_str.as_str() {
            "yearly" => BillingFrequency::Yearly,
            _ => BillingFrequency::Monthly,
        },
        next_due_date: parse_datetime(&due_str),
        category: row.get(5)?,
        description: row.get(6)?,
        is_active: row.get(7)?,
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

const SUBSCRIPTION_COLUMNS: &str = "id, name, cost, billing_frequency, next_due_date, category, description, is_active, created_at, updated_at";

impl Database {
    /// Insert a new subscription, generating its id and timestamps
    pub fn create_subscription(&self, new: &NewSubscription) -> Result<Subscription> {
        new.validate()?;

        let now = chrono::Utc::now();
        let sub = Subscription {
            id: Uuid::new_v4().to_string(),
            name: new.name.clone(),
            cost: new.cost,
            billing_frequency: new.billing_frequency,
            next_due_date: new.next_due_date,
            category: new.category.clone(),
            description: new.description.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO subscriptions (id, name, cost, billing_frequency, next_due_date, category, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                sub.id,
                sub.name,
                sub.cost,
                sub.billing_frequency.as_str(),
                format_datetime(sub.next_due_date),
                sub.category,
                sub.description,
                sub.is_active,
                format_datetime(sub.created_at),
                format_datetime(sub.updated_at),
            ],
        )?;

        Ok(sub)
    }

    /// List subscriptions that have not been soft-deleted
    pub fn list_active_subscriptions(&self) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;
        let query = format!(
            "SELECT {} FROM subscriptions WHERE is_active = 1 ORDER BY next_due_date",
            SUBSCRIPTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;

        let subscriptions = stmt
            .query_map([], subscription_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(subscriptions)
    }

    /// List every subscription, soft-deleted ones included (for export)
    pub fn list_all_subscriptions(&self) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;
        let query = format!(
            "SELECT {} FROM subscriptions ORDER BY rowid",
            SUBSCRIPTION_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;

        let subscriptions = stmt
            .query_map([], subscription_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(subscriptions)
    }

    /// Get a subscription by id, soft-deleted ones included
    pub fn get_subscription(&self, id: &str) -> Result<Option<Subscription>> {
        let conn = self.conn()?;
        let query = format!(
            "SELECT {} FROM subscriptions WHERE id = ?",
            SUBSCRIPTION_COLUMNS
        );

        let result = conn.query_row(&query, params![id], subscription_from_row);

        match result {
            Ok(sub) => Ok(Some(sub)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge a patch over a stored subscription, refreshing updated_at
    pub fn update_subscription(&self, id: &str, patch: &SubscriptionPatch) -> Result<Subscription> {
        patch.validate()?;

        let mut sub = self
            .get_subscription(id)?
            .ok_or_else(|| Error::NotFound(format!("Subscription {} not found", id)))?;

        patch.apply(&mut sub);
        sub.updated_at = chrono::Utc::now();

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE subscriptions
            SET name = ?, cost = ?, billing_frequency = ?, next_due_date = ?,
                category = ?, description = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                sub.name,
                sub.cost,
                sub.billing_frequency.as_str(),
                format_datetime(sub.next_due_date),
                sub.category,
                sub.description,
                sub.is_active,
                format_datetime(sub.updated_at),
                id,
            ],
        )?;

        Ok(sub)
    }

    /// Soft-delete a subscription: clear the active flag, keep the record
    pub fn deactivate_subscription(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE subscriptions SET is_active = 0, updated_at = ? WHERE id = ?",
            params![format_datetime(chrono::Utc::now()), id],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(format!("Subscription {} not found", id)));
        }
        Ok(())
    }
}
