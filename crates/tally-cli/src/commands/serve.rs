//! Serve command

use std::path::Path;

use anyhow::Result;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path)?;

    let static_dir = static_dir.and_then(|p| p.to_str());
    tally_server::serve(db, host, port, static_dir).await
}
