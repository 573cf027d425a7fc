//! `fix-autoinc` — auto-increment repair
//!
//! Brings the demo table's key column to NOT NULL + AUTO_INCREMENT + PRIMARY
//! KEY with at most two ALTER statements, refusing to touch anything when a
//! different primary key already exists. The "before" definition is logged so
//! the old state can be reconstructed by hand if needed.

use log::{info, warn};
use mysql_async::prelude::Queryable;
use mysql_async::TxOpts;

use crate::config::ConnectionConfig;
use crate::db::{self, ID_COLUMN, TABLE};
use crate::error::{Result, TableroError};
use crate::repair::{self, RepairPlan};

pub async fn run(config: &ConnectionConfig) -> Result<()> {
    info!(
        "connecting to {}:{} as {} to DB '{}'",
        config.host, config.port, config.user, config.database
    );
    let mut conn = db::connect(config).await?;

    if !db::table_exists(&mut conn, TABLE).await? {
        return Err(TableroError::TableMissing(TABLE.to_string()));
    }

    let column = db::column_def(&mut conn, TABLE, ID_COLUMN)
        .await?
        .ok_or_else(|| TableroError::ColumnMissing {
            table: TABLE.to_string(),
            column: ID_COLUMN.to_string(),
        })?;
    info!("column found: {}", column.describe());

    let plan = if column.is_auto_increment() {
        info!("column is already AUTO_INCREMENT; no changes made");
        RepairPlan::Noop
    } else {
        let primary_key = db::primary_key_columns(&mut conn, TABLE).await?;
        if !column.is_primary_key() && primary_key.is_empty() {
            info!("column is not PRIMARY KEY; a PRIMARY KEY on {ID_COLUMN} will be added");
        }
        let plan = repair::plan_repair(&column, &primary_key)?;
        if let RepairPlan::Alter { column_type, .. } = &plan {
            if !repair::is_integer_family(&column.col_type) {
                warn!(
                    "unexpected column type '{}'; narrowing to {column_type} for AUTO_INCREMENT",
                    column.col_type
                );
            }
        }
        plan
    };

    let statements = plan.statements(TABLE, ID_COLUMN);
    if !statements.is_empty() {
        apply_statements(&mut conn, &statements).await?;
        info!("ALTER completed successfully");

        if let Some(after) = db::column_def(&mut conn, TABLE, ID_COLUMN).await? {
            info!("after: {}", after.describe());
        }
    }

    info!("dumping all rows of {TABLE}:");
    let dump = db::dump_table(&mut conn, TABLE, ID_COLUMN).await?;
    info!("{}", dump.columns.join(" | "));
    for row in &dump.rows {
        info!("{}", row.join(" | "));
    }

    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(())
}

/// Execute the ALTER statements as a unit.
///
/// MySQL implicitly commits each DDL statement, so the rollback only undoes
/// work when the failure happens before the first ALTER takes effect; it is
/// still issued so the connection ends in a clean state.
async fn apply_statements(conn: &mut mysql_async::Conn, statements: &[String]) -> Result<()> {
    let mut tx = conn
        .start_transaction(TxOpts::default())
        .await
        .map_err(|e| TableroError::MigrationFailed(e.to_string()))?;

    for stmt in statements {
        info!("executing: {stmt}");
        if let Err(e) = tx.query_drop(stmt).await {
            let _ = tx.rollback().await;
            return Err(TableroError::MigrationFailed(e.to_string()));
        }
    }

    tx.commit()
        .await
        .map_err(|e| TableroError::MigrationFailed(format!("commit failed: {e}")))
}

/// Exit codes: 0 clean, 2 configuration, 4 table missing, 5 column missing,
/// 6 primary-key conflict, 7 migration failed, 3 anything else
#[must_use]
pub fn exit_code(err: &TableroError) -> i32 {
    match err {
        TableroError::Config(_) => 2,
        TableroError::TableMissing(_) => 4,
        TableroError::ColumnMissing { .. } => 5,
        TableroError::SchemaConflict(_) => 6,
        TableroError::MigrationFailed(_) => 7,
        _ => 3,
    }
}
