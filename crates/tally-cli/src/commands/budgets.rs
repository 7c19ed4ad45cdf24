//! Budget commands

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::{BudgetPeriod, NewBudget};

pub fn cmd_budgets_list(db: &Database) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }

    println!("🎯 Budgets ({})", budgets.len());
    for budget in &budgets {
        let scope = budget.category.as_deref().unwrap_or("overall");
        println!(
            "   {}  {:<8} {:<16} limit {:.2}",
            budget.id, budget.period, scope, budget.limit
        );
    }

    Ok(())
}

pub fn cmd_budgets_add(
    db: &Database,
    limit: f64,
    period: &str,
    category: Option<&str>,
) -> Result<()> {
    let period: BudgetPeriod = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let budget = db.create_budget(&NewBudget {
        period,
        category: category.map(|c| c.to_string()),
        limit,
    })?;

    let scope = budget.category.as_deref().unwrap_or("overall");
    println!("✅ Budget set: {} {} limit {:.2}", budget.period, scope, budget.limit);
    println!("   id: {}", budget.id);

    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: &str) -> Result<()> {
    db.delete_budget(id)?;
    println!("✅ Budget deleted");
    Ok(())
}
