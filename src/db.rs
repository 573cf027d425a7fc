//! Shared MySQL helpers
//!
//! Thin wrappers over `mysql_async` used by every database-touching
//! subcommand. Connections are opened, used, and closed within each
//! command run; nothing here holds state across calls.
//!
//! # Implementation Notes
//! - Column metadata comes from `SHOW COLUMNS` (the `Field | Type | Null |
//!   Key | Default | Extra` shape), primary-key lookups from
//!   `information_schema.key_column_usage`
//! - Cell values in row dumps are stringified: NULL as `NULL`, binary data
//!   Base64-encoded, temporal values formatted as ISO-ish text

use mysql_async::{prelude::*, Conn, OptsBuilder, Row, TxOpts, Value};

use crate::config::ConnectionConfig;
use crate::error::{Result, TableroError};
use crate::seed::SeedRow;

/// The demo table every subcommand works against
pub const TABLE: &str = "tbl001";

/// The key column of the demo table; assumed to exist, never created here
pub const ID_COLUMN: &str = "id_registro";

/// MySQL server error: access denied for user
const ER_ACCESS_DENIED: u16 = 1045;
/// MySQL server error: unknown database
const ER_BAD_DB: u16 = 1049;

/// One column as reported by `SHOW COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub field: String,
    pub col_type: String,
    pub nullable: bool,
    pub key: String,
    pub default: Option<String>,
    pub extra: String,
}

impl ColumnDef {
    /// True when the `Extra` attributes mark the column auto-incrementing
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_ascii_lowercase().contains("auto_increment")
    }

    /// True when the column participates in the primary key
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.key == "PRI"
    }

    /// One-line rendering used by the schema dump and the repair log
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} | {} | Null={} | Key={} | Default={} | Extra={}",
            self.field,
            self.col_type,
            if self.nullable { "YES" } else { "NO" },
            self.key,
            self.default.as_deref().unwrap_or("NULL"),
            self.extra,
        )
    }
}

/// Full-table snapshot with stringified cells
#[derive(Debug, Clone)]
pub struct TableDump {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Connect with the configured database selected
pub async fn connect(config: &ConnectionConfig) -> Result<Conn> {
    Conn::new(build_opts(config, true)).await.map_err(classify_connect_error)
}

/// Connect to the server only, no database selected (connectivity check)
pub async fn connect_server(config: &ConnectionConfig) -> Result<Conn> {
    Conn::new(build_opts(config, false)).await.map_err(classify_connect_error)
}

fn build_opts(config: &ConnectionConfig, with_database: bool) -> OptsBuilder {
    let opts = OptsBuilder::default()
        .ip_or_hostname(config.host.as_str())
        .tcp_port(config.port)
        .user(Some(config.user.as_str()))
        .pass(Some(config.password.as_str()));

    if with_database {
        opts.db_name(Some(config.database.as_str()))
    } else {
        opts
    }
}

fn classify_connect_error(err: mysql_async::Error) -> TableroError {
    match err {
        mysql_async::Error::Server(ref server) if server.code == ER_ACCESS_DENIED => {
            TableroError::AccessDenied(err.to_string())
        }
        mysql_async::Error::Server(ref server) if server.code == ER_BAD_DB => {
            TableroError::connection_failed(format!("database does not exist: {err}"))
        }
        other => TableroError::connection_failed(other.to_string()),
    }
}

/// Server version with MySQL/MariaDB detection, e.g. "MySQL 8.0.35"
pub async fn server_info(conn: &mut Conn) -> Result<String> {
    let row: Row = conn
        .query_first("SELECT VERSION()")
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to query version: {e}")))?
        .ok_or_else(|| TableroError::query_failed("no version returned"))?;

    let version: String = row
        .get(0)
        .ok_or_else(|| TableroError::query_failed("failed to extract version string"))?;

    Ok(parse_server_version(&version))
}

/// Parse a raw VERSION() string to detect MySQL vs MariaDB
fn parse_server_version(version_string: &str) -> String {
    // MySQL: "8.0.35"; MariaDB: "10.11.2-MariaDB"
    if version_string.to_uppercase().contains("MARIADB") {
        let version = version_string.split('-').next().unwrap_or("unknown");
        format!("MariaDB {version}")
    } else {
        let version = version_string.split_whitespace().next().unwrap_or(version_string);
        format!("MySQL {version}")
    }
}

/// Names of all databases visible on the server
pub async fn list_databases(conn: &mut Conn) -> Result<Vec<String>> {
    let rows: Vec<Row> = conn
        .query("SHOW DATABASES")
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to list databases: {e}")))?;

    Ok(rows.into_iter().filter_map(|row| row.get(0)).collect())
}

/// Names of all base tables in the selected database
pub async fn list_tables(conn: &mut Conn) -> Result<Vec<String>> {
    let rows: Vec<Row> = conn
        .query("SHOW TABLES")
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to list tables: {e}")))?;

    Ok(rows.into_iter().filter_map(|row| row.get(0)).collect())
}

/// Whether `table` exists as a base table in the selected database
pub async fn table_exists(conn: &mut Conn, table: &str) -> Result<bool> {
    let query = "SELECT table_name
                 FROM information_schema.tables
                 WHERE table_schema = DATABASE()
                 AND table_name = ?
                 AND table_type = 'BASE TABLE'";

    let row: Option<Row> = conn.exec_first(query, (table,)).await.map_err(|e| {
        TableroError::query_failed(format!("failed to check table {table}: {e}"))
    })?;

    Ok(row.is_some())
}

/// Definition of a single column, or `None` when the column does not exist
pub async fn column_def(conn: &mut Conn, table: &str, column: &str) -> Result<Option<ColumnDef>> {
    // table and column are fixed identifiers, not user input
    let query = format!("SHOW COLUMNS FROM `{table}` LIKE '{column}'");
    let row: Option<Row> = conn.query_first(query).await.map_err(|e| {
        TableroError::query_failed(format!("failed to read column {table}.{column}: {e}"))
    })?;

    row.map(|r| parse_show_column(&r)).transpose()
}

/// All columns of `table`, in ordinal order
pub async fn list_columns(conn: &mut Conn, table: &str) -> Result<Vec<ColumnDef>> {
    let rows: Vec<Row> = conn
        .query(format!("SHOW COLUMNS FROM `{table}`"))
        .await
        .map_err(|e| {
            TableroError::query_failed(format!("failed to read columns of {table}: {e}"))
        })?;

    rows.iter().map(parse_show_column).collect()
}

fn parse_show_column(row: &Row) -> Result<ColumnDef> {
    // SHOW COLUMNS: Field, Type, Null, Key, Default, Extra
    let field: String = row
        .get(0)
        .ok_or_else(|| TableroError::query_failed("failed to extract column name"))?;
    let col_type: String = row
        .get(1)
        .ok_or_else(|| TableroError::query_failed("failed to extract column type"))?;
    let nullable: String = row
        .get(2)
        .ok_or_else(|| TableroError::query_failed("failed to extract nullable flag"))?;
    let key: String = row
        .get(3)
        .ok_or_else(|| TableroError::query_failed("failed to extract key role"))?;
    let default: Option<String> = row.get::<Option<String>, _>(4).flatten();
    let extra: String = row
        .get(5)
        .ok_or_else(|| TableroError::query_failed("failed to extract extra attributes"))?;

    Ok(ColumnDef { field, col_type, nullable: nullable == "YES", key, default, extra })
}

/// Column names of the table's primary key, empty when there is none
pub async fn primary_key_columns(conn: &mut Conn, table: &str) -> Result<Vec<String>> {
    let query = "SELECT column_name
                 FROM information_schema.key_column_usage
                 WHERE table_schema = DATABASE()
                 AND table_name = ?
                 AND constraint_name = 'PRIMARY'
                 ORDER BY ordinal_position";

    let rows: Vec<Row> = conn.exec(query, (table,)).await.map_err(|e| {
        TableroError::query_failed(format!("failed to query primary key of {table}: {e}"))
    })?;

    Ok(rows.into_iter().filter_map(|row| row.get(0)).collect())
}

/// Current row count of `table`
pub async fn row_count(conn: &mut Conn, table: &str) -> Result<u64> {
    let row: Row = conn
        .query_first(format!("SELECT COUNT(*) FROM `{table}`"))
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to count rows: {e}")))?
        .ok_or_else(|| TableroError::query_failed("COUNT(*) returned no row"))?;

    let count: i64 = row
        .get(0)
        .ok_or_else(|| TableroError::query_failed("failed to extract row count"))?;

    Ok(count.max(0) as u64)
}

/// Current maximum of the key column, `None` for an empty table
pub async fn max_id(conn: &mut Conn, table: &str, column: &str) -> Result<Option<u64>> {
    let row: Row = conn
        .query_first(format!("SELECT MAX(`{column}`) FROM `{table}`"))
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to read max id: {e}")))?
        .ok_or_else(|| TableroError::query_failed("MAX() returned no row"))?;

    let max: Option<i64> = row.get::<Option<i64>, _>(0).flatten();
    Ok(max.map(|m| m.max(0) as u64))
}

/// Batch-insert seed rows inside one transaction; rolled back on failure.
///
/// Rows either all carry explicit ids or none do; the insert statement is
/// chosen from the first row.
pub async fn insert_seed_rows(conn: &mut Conn, table: &str, rows: &[SeedRow]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let with_ids = rows[0].id.is_some();

    let mut tx = conn
        .start_transaction(TxOpts::default())
        .await
        .map_err(|e| TableroError::InsertFailed(e.to_string()))?;

    let insert = if with_ids {
        tx.exec_batch(
            format!(
                "INSERT INTO `{table}` (id_registro, registro_01, registro_02, registro_03)
                 VALUES (?, ?, ?, ?)"
            ),
            rows.iter().map(|r| {
                (r.id.unwrap_or_default(), r.name.as_str(), r.profession.as_str(), r.value)
            }),
        )
        .await
    } else {
        tx.exec_batch(
            format!(
                "INSERT INTO `{table}` (registro_01, registro_02, registro_03)
                 VALUES (?, ?, ?)"
            ),
            rows.iter().map(|r| (r.name.as_str(), r.profession.as_str(), r.value)),
        )
        .await
    };

    match insert {
        Ok(()) => tx
            .commit()
            .await
            .map_err(|e| TableroError::InsertFailed(format!("commit failed: {e}"))),
        Err(e) => {
            let _ = tx.rollback().await;
            Err(TableroError::InsertFailed(e.to_string()))
        }
    }
}

/// Read the whole table ordered by `order_by`, stringifying every cell
pub async fn dump_table(conn: &mut Conn, table: &str, order_by: &str) -> Result<TableDump> {
    let columns: Vec<String> =
        list_columns(conn, table).await?.into_iter().map(|c| c.field).collect();

    let rows: Vec<Row> = conn
        .query(format!("SELECT * FROM `{table}` ORDER BY `{order_by}`"))
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to read {table}: {e}")))?;

    let mut dumped = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut cells = Vec::with_capacity(row.len());
        for idx in 0..row.len() {
            let value = row.as_ref(idx).ok_or_else(|| {
                TableroError::query_failed(format!("failed to get value at index {idx}"))
            })?;
            cells.push(value_to_display(value));
        }
        dumped.push(cells);
    }

    Ok(TableDump { columns, rows: dumped })
}

/// Connect, snapshot the demo table, disconnect. Used by the countdown's
/// background worker.
pub async fn fetch_table(config: &ConnectionConfig, table: &str, order_by: &str) -> Result<TableDump> {
    let mut conn = connect(config).await?;
    let dump = dump_table(&mut conn, table, order_by).await?;
    conn.disconnect()
        .await
        .map_err(|e| TableroError::query_failed(format!("failed to disconnect: {e}")))?;
    Ok(dump)
}

/// Render a driver value as display text
fn value_to_display(value: &Value) -> String {
    match value {
        Value::NULL => "NULL".to_string(),

        Value::Bytes(bytes) => {
            if let Ok(s) = std::str::from_utf8(bytes) {
                s.to_string()
            } else {
                // Binary data, encode as Base64
                use base64::Engine;
                base64::engine::general_purpose::STANDARD.encode(bytes)
            }
        }

        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(d) => d.to_string(),

        Value::Date(year, month, day, hour, minute, second, micro) => format!(
            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micro:06}"
        ),

        Value::Time(is_negative, days, hours, minutes, seconds, micros) => {
            let sign = if *is_negative { "-" } else { "" };
            let total_hours = days * 24 + u32::from(*hours);
            format!("{sign}{total_hours}:{minutes:02}:{seconds:02}.{micros:06}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_version() {
        assert_eq!(parse_server_version("8.0.35"), "MySQL 8.0.35");
        assert_eq!(parse_server_version("10.11.2-MariaDB"), "MariaDB 10.11.2");
    }

    #[test]
    fn test_column_def_flags() {
        let col = ColumnDef {
            field: "id_registro".to_string(),
            col_type: "int(11)".to_string(),
            nullable: false,
            key: "PRI".to_string(),
            default: None,
            extra: "auto_increment".to_string(),
        };
        assert!(col.is_auto_increment());
        assert!(col.is_primary_key());

        let plain = ColumnDef {
            field: "registro_01".to_string(),
            col_type: "varchar(100)".to_string(),
            nullable: true,
            key: String::new(),
            default: None,
            extra: String::new(),
        };
        assert!(!plain.is_auto_increment());
        assert!(!plain.is_primary_key());
    }

    #[test]
    fn test_column_def_describe() {
        let col = ColumnDef {
            field: "id_registro".to_string(),
            col_type: "int".to_string(),
            nullable: false,
            key: "PRI".to_string(),
            default: None,
            extra: "auto_increment".to_string(),
        };
        assert_eq!(
            col.describe(),
            "id_registro | int | Null=NO | Key=PRI | Default=NULL | Extra=auto_increment"
        );
    }

    #[test]
    fn test_value_to_display_scalars() {
        assert_eq!(value_to_display(&Value::NULL), "NULL");
        assert_eq!(value_to_display(&Value::Int(-7)), "-7");
        assert_eq!(value_to_display(&Value::UInt(42)), "42");
        assert_eq!(value_to_display(&Value::Double(1234.56)), "1234.56");
        assert_eq!(value_to_display(&Value::Bytes(b"Luis Garc\xc3\xada".to_vec())), "Luis García");
    }

    #[test]
    fn test_value_to_display_binary_is_base64() {
        let rendered = value_to_display(&Value::Bytes(vec![0xff, 0x00, 0xfe]));
        assert_eq!(rendered, "/wD+");
    }

    #[test]
    fn test_value_to_display_temporal() {
        let date = Value::Date(2024, 3, 9, 14, 30, 5, 0);
        assert_eq!(value_to_display(&date), "2024-03-09 14:30:05.000000");

        let time = Value::Time(false, 1, 2, 15, 30, 0);
        assert_eq!(value_to_display(&time), "26:15:30.000000");
    }
}
