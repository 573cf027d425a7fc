//! tablero - Single-Binary MySQL Workbench Utilities
//!
//! A small toolbox for one developer's local MySQL workflow. Each subcommand
//! is an independent straight-line tool: it opens one connection (or touches
//! one file), performs a fixed sequence of operations, logs to its own
//! per-run log file, and exits with a per-command status code.
//!
//! # Subcommands
//! - `check` - verify server connectivity, list databases and tables
//! - `fill` - insert synthetic rows into the demo table
//! - `fix-autoinc` - make the demo table's key column auto-incrementing
//! - `schema` - dump tables and columns of the configured database
//! - `icon` - rasterize the multi-resolution clock icon
//! - `timer` - on-screen countdown with a background table query
//!
//! # Module Organization
//! - [`error`] - Error types with stable codes
//! - [`config`] - Environment/profile configuration (no default password)
//! - [`db`] - Shared MySQL helpers (introspection, dumps, seed inserts)
//! - [`repair`] - Auto-increment repair planning (pure, unit-tested)
//! - [`seed`] - Synthetic row generation
//! - [`timer`] - Countdown state machine and hand-off types
//! - [`icon`] - Clock rasterization and ICO assembly
//! - [`logging`] - Per-command log file setup
//! - [`commands`] - One module per subcommand

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod icon;
pub mod logging;
pub mod repair;
pub mod seed;
pub mod timer;

// Re-export commonly used types for convenience
pub use config::{ConnectionConfig, Profile};
pub use db::{ColumnDef, TableDump, ID_COLUMN, TABLE};
pub use error::{Result, TableroError};
pub use repair::{plan_repair, RepairPlan};
pub use seed::SeedRow;
pub use timer::{Countdown, FetchOutcome, Phase};
