//! Subcommand implementations
//!
//! Each submodule is one self-contained tool: it runs a straight-line
//! sequence against one connection (or one file) and exposes its own
//! error-to-exit-code mapping. The mappings are intentionally per-command.

pub mod autoinc;
pub mod check;
pub mod fill;
pub mod icon;
pub mod schema;
pub mod timer;
