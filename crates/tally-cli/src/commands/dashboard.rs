//! Dashboard command

use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use super::open_db;

pub fn cmd_dashboard(db_path: &Path) -> Result<()> {
    let db = open_db(db_path)?;
    let dash = db.dashboard(Utc::now())?;

    println!("📊 Dashboard");
    println!("   ─────────────────────────────");
    println!(
        "   Yearly projection:     {:>12.2}",
        dash.total_yearly_projection
    );
    println!(
        "   Spent this month:      {:>12.2}",
        dash.current_monthly_spending
    );
    println!(
        "   Spent this year:       {:>12.2}",
        dash.current_yearly_spending
    );

    if !dash.category_breakdown.is_empty() {
        println!();
        println!("   By category (this year):");
        for (category, total) in &dash.category_breakdown {
            println!("     {:<20} {:>12.2}", category, total);
        }
    }

    if !dash.upcoming_subscriptions.is_empty() {
        println!();
        println!("   ⏰ Due within 7 days:");
        for upcoming in &dash.upcoming_subscriptions {
            let when = match upcoming.days_until_due {
                d if d < 0 => format!("{} days overdue", -d),
                0 => "today".to_string(),
                d => format!("in {} days", d),
            };
            println!(
                "     {:<20} {:>10.2}  {}",
                upcoming.name, upcoming.cost, when
            );
        }
    }

    if !dash.budget_alerts.is_empty() {
        println!();
        println!("   ⚠️  Budget alerts:");
        for alert in &dash.budget_alerts {
            let scope = alert.category.as_deref().unwrap_or("overall");
            println!(
                "     {} {} over by {:.2} ({:.2} of {:.2})",
                alert.period, scope, alert.exceeded_by, alert.current, alert.limit
            );
        }
    }

    if !dash.savings_suggestions.is_empty() {
        println!();
        println!("   💡 Suggestions:");
        for suggestion in &dash.savings_suggestions {
            println!("     - {}", suggestion);
        }
    }

    Ok(())
}
