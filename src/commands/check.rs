//! `check` — connectivity check
//!
//! Connects to the server without selecting a database, lists the databases,
//! and if the configured one exists, reconnects with it selected and lists
//! its tables. A missing database is a reported finding, not a failure.

use log::{info, warn};

use crate::config::ConnectionConfig;
use crate::db;
use crate::error::{Result, TableroError};

pub async fn run(config: &ConnectionConfig) -> Result<()> {
    info!(
        "attempting connection to {}:{} as {}",
        config.host, config.port, config.user
    );

    let mut conn = db::connect_server(config).await?;
    info!("connected to MySQL server OK");
    info!("server: {}", db::server_info(&mut conn).await?);

    let databases = db::list_databases(&mut conn).await?;
    info!("databases on server: {}", databases.join(", "));

    if databases.iter().any(|d| d == &config.database) {
        info!("database '{}' exists", config.database);
        inspect_database(config).await?;
    } else {
        warn!("database '{}' NOT found on server", config.database);
    }

    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(())
}

async fn inspect_database(config: &ConnectionConfig) -> Result<()> {
    let mut conn = db::connect(config).await?;
    info!("successfully connected to database '{}'", config.database);

    let tables = db::list_tables(&mut conn).await?;
    if tables.is_empty() {
        info!("tables in {}: <<no tables>>", config.database);
    } else {
        info!("tables in {}: {}", config.database, tables.join(", "));
    }

    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(())
}

/// Exit codes: 0 clean, 2 configuration, 3 any connection/query failure
#[must_use]
pub fn exit_code(err: &TableroError) -> i32 {
    match err {
        TableroError::Config(_) => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&TableroError::config("no password")), 2);
        assert_eq!(exit_code(&TableroError::connection_failed("refused")), 3);
        assert_eq!(exit_code(&TableroError::AccessDenied("1045".into())), 3);
    }
}
