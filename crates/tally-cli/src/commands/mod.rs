//! Command implementations
//!
//! This module contains:
//! - `resolve_db_path` / `open_db` - Shared database utilities
//! - `cmd_init`, `cmd_export` - Core commands
//! - Per-domain submodules for the rest

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tally_core::db::Database;

mod budgets;
mod dashboard;
mod expenses;
mod serve;
mod subscriptions;

pub use budgets::*;
pub use dashboard::*;
pub use expenses::*;
pub use serve::*;
pub use subscriptions::*;

/// Resolve the database location: an explicit --db wins, otherwise the
/// platform data directory (~/.local/share/tally on Linux), falling back to
/// the working directory.
pub fn resolve_db_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let path = dirs::data_dir()
        .map(|dir| dir.join("tally").join("tally.db"))
        .unwrap_or_else(|| PathBuf::from("tally.db"));
    Ok(path)
}

/// Open the database, creating the parent directory if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tracing::debug!("Opening database at {}", path_str);
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Track a subscription: tally subscriptions add Netflix --cost 649 --due 2026-09-01 --category entertainment");
    println!("  2. Record an expense: tally expenses add 120 --category food");
    println!("  3. See the dashboard: tally dashboard");

    Ok(())
}

pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    let snapshot = db.export_all()?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} subscriptions, {} expenses, {} budgets to {}",
                snapshot.subscriptions.len(),
                snapshot.expenses.len(),
                snapshot.budgets.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
