//! Tally CLI - Subscription and expense tracker
//!
//! Usage:
//!   tally init                     Initialize database
//!   tally subscriptions add ...    Track a subscription
//!   tally expenses add 42 ...      Record an expense
//!   tally dashboard                Show totals, alerts, and suggestions
//!   tally serve --port 8001        Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = commands::resolve_db_path(cli.db.as_deref())?;

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&db_path, &host, port, static_dir.as_deref()).await,
        Commands::Dashboard => commands::cmd_dashboard(&db_path),
        Commands::Subscriptions { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None | Some(SubscriptionsAction::List) => commands::cmd_subscriptions_list(&db),
                Some(SubscriptionsAction::Add {
                    name,
                    cost,
                    frequency,
                    due,
                    category,
                    description,
                }) => commands::cmd_subscriptions_add(
                    &db,
                    &name,
                    cost,
                    &frequency,
                    &due,
                    &category,
                    description.as_deref(),
                ),
                Some(SubscriptionsAction::Show { id }) => commands::cmd_subscriptions_show(&db, &id),
                Some(SubscriptionsAction::Cancel { id }) => {
                    commands::cmd_subscriptions_cancel(&db, &id)
                }
            }
        }
        Commands::Expenses { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_expenses_list(&db, 20, None),
                Some(ExpensesAction::List { limit, category }) => {
                    commands::cmd_expenses_list(&db, limit, category.as_deref())
                }
                Some(ExpensesAction::Add {
                    amount,
                    category,
                    tag,
                    notes,
                    date,
                }) => commands::cmd_expenses_add(
                    &db,
                    amount,
                    &category,
                    tag,
                    notes.as_deref(),
                    date.as_deref(),
                ),
                Some(ExpensesAction::Delete { id }) => commands::cmd_expenses_delete(&db, &id),
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db),
                Some(BudgetsAction::Add {
                    limit,
                    period,
                    category,
                }) => commands::cmd_budgets_add(&db, limit, &period, category.as_deref()),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, &id),
            }
        }
        Commands::Export { output } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_export(&db, output.as_deref())
        }
    }
}
