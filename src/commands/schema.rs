//! `schema` — schema dumper
//!
//! Lists every table of the configured database with one line per column.
//! Uses the same `ColumnDef` reading as the repair routine, so the two
//! always agree on what a table looks like.

use log::info;

use crate::config::ConnectionConfig;
use crate::db;
use crate::error::{Result, TableroError};

pub async fn run(config: &ConnectionConfig) -> Result<()> {
    info!(
        "connecting to {}:{} as {} to inspect DB '{}'",
        config.host, config.port, config.user, config.database
    );
    let mut conn = db::connect(config).await?;

    let tables = db::list_tables(&mut conn).await?;
    if tables.is_empty() {
        info!("no tables found in database {}", config.database);
    }

    for table in &tables {
        info!("");
        info!("TABLE: {table}");
        for column in db::list_columns(&mut conn, table).await? {
            info!("  - {}", column.describe());
        }
    }

    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(())
}

/// Exit codes: 0 clean, 2 configuration, 3 any failure
#[must_use]
pub fn exit_code(err: &TableroError) -> i32 {
    match err {
        TableroError::Config(_) => 2,
        _ => 3,
    }
}
