//! Expense commands

use anyhow::Result;
use tally_core::db::Database;
use tally_core::models::NewExpense;
use tally_core::ExpenseFilter;

use super::subscriptions::parse_date_arg;

pub fn cmd_expenses_list(db: &Database, limit: i64, category: Option<&str>) -> Result<()> {
    let filter = ExpenseFilter::new()
        .category(category.map(|c| c.to_string()))
        .limit(Some(limit));
    let expenses = db.list_expenses(&filter)?;

    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!("🧾 Expenses (showing {})", expenses.len());
    for expense in &expenses {
        let tags = if expense.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", expense.tags.join(" #"))
        };
        println!(
            "   {}  {}  {:>10.2}  [{}]{}",
            expense.id,
            expense.date.format("%Y-%m-%d"),
            expense.amount,
            expense.category,
            tags
        );
    }

    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    amount: f64,
    category: &str,
    tags: Vec<String>,
    notes: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let date = date.map(parse_date_arg).transpose()?;

    let expense = db.create_expense(&NewExpense {
        amount,
        category: category.to_string(),
        tags,
        notes: notes.map(|n| n.to_string()),
        date,
    })?;

    println!(
        "✅ Recorded {:.2} on {} [{}]",
        expense.amount,
        expense.date.format("%Y-%m-%d"),
        expense.category
    );
    println!("   id: {}", expense.id);

    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: &str) -> Result<()> {
    db.delete_expense(id)?;
    println!("✅ Expense deleted");
    Ok(())
}
