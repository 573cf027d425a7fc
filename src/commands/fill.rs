//! `fill` — seed filler
//!
//! Inserts `count` synthetic rows into the demo table. When the key column
//! auto-increments the ids are left to the database; otherwise a contiguous
//! block of ids above the current maximum is assigned explicitly.

use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::ConnectionConfig;
use crate::db::{self, ID_COLUMN, TABLE};
use crate::error::{Result, TableroError};
use crate::seed;

pub async fn run(config: &ConnectionConfig, count: usize) -> Result<()> {
    info!(
        "connecting to {}:{} as {} to DB '{}'",
        config.host, config.port, config.user, config.database
    );
    let mut conn = db::connect(config).await?;

    if !db::table_exists(&mut conn, TABLE).await? {
        return Err(TableroError::TableMissing(TABLE.to_string()));
    }

    let before = db::row_count(&mut conn, TABLE).await?;
    info!("rows before: {before}");

    let auto_inc = db::column_def(&mut conn, TABLE, ID_COLUMN)
        .await?
        .is_some_and(|col| col.is_auto_increment());

    let start_id = if auto_inc {
        None
    } else {
        Some(seed::next_id(db::max_id(&mut conn, TABLE, ID_COLUMN).await?))
    };

    let mut rng = StdRng::from_entropy();
    let rows = seed::generate_rows(&mut rng, count, start_id);

    info!("inserting {count} rows into {TABLE} (batch), auto_increment={auto_inc}");
    db::insert_seed_rows(&mut conn, TABLE, &rows).await?;

    let after = db::row_count(&mut conn, TABLE).await?;
    info!("rows after: {after} (added: {})", after.saturating_sub(before));

    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(())
}

/// Exit codes: 0 clean, 2 configuration, 4 table missing, 5 insert failed,
/// 3 anything else
#[must_use]
pub fn exit_code(err: &TableroError) -> i32 {
    match err {
        TableroError::Config(_) => 2,
        TableroError::TableMissing(_) => 4,
        TableroError::InsertFailed(_) => 5,
        _ => 3,
    }
}
