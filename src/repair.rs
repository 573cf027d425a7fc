//! Auto-increment repair planning
//!
//! Decides how to bring the demo table's key column into the desired end
//! state (NOT NULL, auto-incrementing, primary key) with the minimum number
//! of schema-altering statements, without ever clobbering an existing,
//! unrelated primary key.
//!
//! Planning is pure: it looks only at the column definition and the table's
//! current primary-key columns. Execution (transaction, rollback, re-read)
//! lives in the `fix-autoinc` command.

use crate::db::ColumnDef;
use crate::error::{Result, TableroError};

/// What the repair has to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairPlan {
    /// Column already auto-increments; nothing to execute
    Noop,

    /// Modify the column, optionally adding a primary key on it
    Alter {
        /// Type to use in the MODIFY statement. The declared type when it is
        /// integer-family, plain `INT` otherwise (type narrowing is
        /// intentional).
        column_type: String,
        add_primary_key: bool,
    },
}

impl RepairPlan {
    /// The ALTER statements this plan executes, in order
    #[must_use]
    pub fn statements(&self, table: &str, column: &str) -> Vec<String> {
        match self {
            Self::Noop => Vec::new(),
            Self::Alter { column_type, add_primary_key } => {
                let mut stmts = vec![format!(
                    "ALTER TABLE `{table}` MODIFY COLUMN `{column}` {column_type} NOT NULL AUTO_INCREMENT"
                )];
                if *add_primary_key {
                    stmts.push(format!("ALTER TABLE `{table}` ADD PRIMARY KEY (`{column}`)"));
                }
                stmts
            }
        }
    }
}

/// Whether a declared type belongs to the integer family
/// (int, tinyint, smallint, mediumint, bigint, with or without display width)
#[must_use]
pub fn is_integer_family(col_type: &str) -> bool {
    col_type.to_ascii_lowercase().contains("int")
}

/// Decide what to do with `column`, given the table's current primary-key
/// column names.
///
/// Fails with a schema conflict when the column is not part of the primary
/// key but the table already has one; adding a second primary key would
/// require dropping the existing one, which this routine never does.
pub fn plan_repair(column: &ColumnDef, primary_key: &[String]) -> Result<RepairPlan> {
    if column.is_auto_increment() {
        return Ok(RepairPlan::Noop);
    }

    let column_type = if is_integer_family(&column.col_type) {
        column.col_type.clone()
    } else {
        "INT".to_string()
    };

    let add_primary_key = if column.is_primary_key() {
        false
    } else if primary_key.is_empty() {
        true
    } else {
        return Err(TableroError::schema_conflict(format!(
            "table already has a primary key on ({}); cannot add one on {}",
            primary_key.join(", "),
            column.field,
        )));
    };

    Ok(RepairPlan::Alter { column_type, add_primary_key })
}
