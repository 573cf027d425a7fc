//! Error Handling Infrastructure
//!
//! All failures across the subcommands are expressed as [`TableroError`] variants.
//! Each variant carries a stable `error_code()` string for log output, and each
//! subcommand maps the variants it can produce to its own process exit codes
//! (the mappings are deliberately per-command, not unified).

use thiserror::Error;

/// Main error type for tablero operations
#[derive(Error, Debug)]
pub enum TableroError {
    /// Configuration error (missing password, malformed profile file, bad port)
    #[error("configuration error: {0}")]
    Config(String),

    /// Could not reach or handshake with the server
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Server rejected the credentials
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Expected table does not exist
    #[error("table '{0}' not found")]
    TableMissing(String),

    /// Expected column does not exist
    #[error("column '{column}' not found in table '{table}'")]
    ColumnMissing { table: String, column: String },

    /// An existing constraint would be clobbered by the requested change
    #[error("schema conflict: {0}")]
    SchemaConflict(String),

    /// A query raised a driver-level error
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// The seed-row batch insert failed (rolled back)
    #[error("insert failed: {0}")]
    InsertFailed(String),

    /// A schema-altering statement failed (rollback attempted)
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Icon rasterization or encoding failed
    #[error("icon generation failed: {0}")]
    Icon(String),

    /// The countdown window could not be created or crashed
    #[error("window error: {0}")]
    Gui(String),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableroError {
    /// Convert error to a stable code string for log output
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::AccessDenied(_) => "ACCESS_DENIED",
            Self::TableMissing(_) => "TABLE_MISSING",
            Self::ColumnMissing { .. } => "COLUMN_MISSING",
            Self::SchemaConflict(_) => "SCHEMA_CONFLICT",
            Self::QueryFailed(_) => "QUERY_FAILED",
            Self::InsertFailed(_) => "INSERT_FAILED",
            Self::MigrationFailed(_) => "MIGRATION_FAILED",
            Self::Icon(_) => "ICON_ERROR",
            Self::Gui(_) => "GUI_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a query failed error
    pub fn query_failed(message: impl Into<String>) -> Self {
        Self::QueryFailed(message.into())
    }

    /// Create a schema conflict error
    pub fn schema_conflict(message: impl Into<String>) -> Self {
        Self::SchemaConflict(message.into())
    }
}

/// Result type alias for tablero operations
pub type Result<T> = std::result::Result<T, TableroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TableroError::config("test").error_code(), "CONFIG_ERROR");
        assert_eq!(TableroError::connection_failed("test").error_code(), "CONNECTION_FAILED");
        assert_eq!(TableroError::query_failed("test").error_code(), "QUERY_FAILED");
        assert_eq!(TableroError::schema_conflict("test").error_code(), "SCHEMA_CONFLICT");
        assert_eq!(TableroError::TableMissing("tbl001".into()).error_code(), "TABLE_MISSING");
        assert_eq!(
            TableroError::ColumnMissing { table: "tbl001".into(), column: "id_registro".into() }
                .error_code(),
            "COLUMN_MISSING"
        );
        assert_eq!(TableroError::InsertFailed("dup key".into()).error_code(), "INSERT_FAILED");
        assert_eq!(TableroError::MigrationFailed("alter".into()).error_code(), "MIGRATION_FAILED");
    }

    #[test]
    fn test_error_messages() {
        let err = TableroError::TableMissing("tbl001".to_string());
        assert!(err.to_string().contains("tbl001"));

        let err = TableroError::ColumnMissing {
            table: "tbl001".to_string(),
            column: "id_registro".to_string(),
        };
        assert!(err.to_string().contains("id_registro"));
        assert!(err.to_string().contains("tbl001"));

        let err = TableroError::schema_conflict("another primary key exists");
        assert!(err.to_string().contains("another primary key exists"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(TableroError::config("x"), TableroError::Config(_)));
        assert!(matches!(TableroError::connection_failed("x"), TableroError::ConnectionFailed(_)));
        assert!(matches!(TableroError::query_failed("x"), TableroError::QueryFailed(_)));
        assert!(matches!(TableroError::schema_conflict("x"), TableroError::SchemaConflict(_)));
    }
}
