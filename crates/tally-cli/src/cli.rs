//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track subscriptions, expenses, and budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted subscription and expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8001")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g. ui/build)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show the aggregated dashboard
    Dashboard,

    /// Manage subscriptions
    Subscriptions {
        #[command(subcommand)]
        action: Option<SubscriptionsAction>,
    },

    /// Manage expenses
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Manage budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Export all data as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SubscriptionsAction {
    /// List active subscriptions
    List,

    /// Add a subscription
    Add {
        /// Subscription name
        name: String,

        /// Cost per billing period
        #[arg(short, long)]
        cost: f64,

        /// Billing frequency: monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: String,

        /// Next due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,

        /// Spending category
        #[arg(long)]
        category: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show one subscription, inactive included
    Show {
        /// Subscription id
        id: String,
    },

    /// Cancel a subscription (soft delete: the record is kept)
    Cancel {
        /// Subscription id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List recent expenses
    List {
        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Add an expense
    Add {
        /// Amount spent
        amount: f64,

        /// Spending category
        #[arg(long)]
        category: String,

        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Optional notes
        #[arg(long)]
        notes: Option<String>,

        /// Occurrence date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense (hard delete: the record is removed)
    Delete {
        /// Expense id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List,

    /// Add a budget
    Add {
        /// Spending limit
        limit: f64,

        /// Budget period: monthly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,

        /// Category to constrain (overall budget if omitted)
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget id
        id: String,
    },
}
