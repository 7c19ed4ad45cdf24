//! Subscription commands

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tally_core::db::Database;
use tally_core::models::{BillingFrequency, NewSubscription};

/// Parse a YYYY-MM-DD argument into a UTC midnight timestamp
pub(crate) fn parse_date_arg(s: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .context("Invalid date")
}

pub fn cmd_subscriptions_list(db: &Database) -> Result<()> {
    let subscriptions = db.list_active_subscriptions()?;

    if subscriptions.is_empty() {
        println!("No active subscriptions.");
        return Ok(());
    }

    println!("📋 Active subscriptions ({})", subscriptions.len());
    for sub in &subscriptions {
        println!(
            "   {}  {:<24} {:>10.2}/{}  due {}  [{}]",
            sub.id,
            sub.name,
            sub.cost,
            sub.billing_frequency,
            sub.next_due_date.format("%Y-%m-%d"),
            sub.category
        );
    }

    Ok(())
}

pub fn cmd_subscriptions_add(
    db: &Database,
    name: &str,
    cost: f64,
    frequency: &str,
    due: &str,
    category: &str,
    description: Option<&str>,
) -> Result<()> {
    let billing_frequency: BillingFrequency = frequency
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let next_due_date = parse_date_arg(due)?;

    let sub = db.create_subscription(&NewSubscription {
        name: name.to_string(),
        cost,
        billing_frequency,
        next_due_date,
        category: category.to_string(),
        description: description.map(|d| d.to_string()),
    })?;

    println!(
        "✅ Added {} ({:.2}/{}, next due {})",
        sub.name,
        sub.cost,
        sub.billing_frequency,
        sub.next_due_date.format("%Y-%m-%d")
    );
    println!("   id: {}", sub.id);

    Ok(())
}

pub fn cmd_subscriptions_show(db: &Database, id: &str) -> Result<()> {
    let sub = db
        .get_subscription(id)?
        .with_context(|| format!("Subscription {} not found", id))?;

    println!("{}", sub.name);
    println!("   id:        {}", sub.id);
    println!("   cost:      {:.2}/{}", sub.cost, sub.billing_frequency);
    println!("   next due:  {}", sub.next_due_date.format("%Y-%m-%d"));
    println!("   category:  {}", sub.category);
    if let Some(description) = &sub.description {
        println!("   notes:     {}", description);
    }
    println!("   active:    {}", if sub.is_active { "yes" } else { "no" });

    Ok(())
}

pub fn cmd_subscriptions_cancel(db: &Database, id: &str) -> Result<()> {
    db.deactivate_subscription(id)?;
    println!("✅ Subscription cancelled (kept in history; see 'tally export')");
    Ok(())
}
