//! Configuration Management
//!
//! Connection parameters come from environment variables, with an optional
//! JSON profile file (`tablero.json` in the working directory) underneath:
//!
//! 1. `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`, `DB_NAME` (highest priority)
//! 2. `tablero.json` profile values
//! 3. Built-in defaults (`127.0.0.1:3306`, user `root`, database `pruebas02`)
//!
//! There is no default password. `DB_PASS` must be set, or the profile must
//! name a `password_env` variable to read it from; anything else is a
//! configuration error. The profile file never stores the password itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TableroError};

/// Profile file name, looked up in the working directory
pub const PROFILE_FILE: &str = "tablero.json";

/// Default row count for the seed filler
const DEFAULT_FILL_COUNT: usize = 200;

/// Resolved connection parameters for the MySQL server
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Never logged, never written back to disk
    pub password: String,
    pub database: String,
}

/// On-disk connection profile
///
/// All fields are optional; environment variables override them. The password
/// is only ever referenced indirectly through `password_env`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Environment variable name to read the password from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

/// Load the connection configuration from the environment and the optional
/// profile file in the working directory.
pub fn from_env() -> Result<ConnectionConfig> {
    let profile = load_profile(Path::new(PROFILE_FILE))?;
    resolve_with(profile, |name| std::env::var(name).ok())
}

/// Parse the profile file if it exists; `None` when absent
pub fn load_profile(path: &Path) -> Result<Option<Profile>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| TableroError::config(format!("could not read {}: {e}", path.display())))?;
    let profile: Profile = serde_json::from_str(&raw)
        .map_err(|e| TableroError::config(format!("invalid profile {}: {e}", path.display())))?;
    Ok(Some(profile))
}

/// Resolve a configuration from a profile and an environment lookup.
///
/// The lookup is injected so resolution is testable without touching process
/// globals; [`from_env`] passes `std::env::var`.
pub fn resolve_with(
    profile: Option<Profile>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ConnectionConfig> {
    let profile = profile.unwrap_or_default();

    let host = env("DB_HOST")
        .or(profile.host)
        .unwrap_or_else(|| "127.0.0.1".to_string());

    let port = match env("DB_PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| TableroError::config(format!("DB_PORT is not a valid port: '{raw}'")))?,
        None => profile.port.unwrap_or(3306),
    };

    let user = env("DB_USER")
        .or(profile.user)
        .unwrap_or_else(|| "root".to_string());

    let database = env("DB_NAME")
        .or(profile.database)
        .unwrap_or_else(|| "pruebas02".to_string());

    // No plaintext fallback: the password must come from the environment,
    // either directly or through the profile's password_env indirection.
    let password = match env("DB_PASS") {
        Some(p) => p,
        None => match &profile.password_env {
            Some(var) => env(var).ok_or_else(|| {
                TableroError::config(format!(
                    "environment variable {var} (named by password_env) is not set"
                ))
            })?,
            None => {
                return Err(TableroError::config(
                    "DB_PASS is not set and no password_env is configured",
                ))
            }
        },
    };

    Ok(ConnectionConfig { host, port, user, password, database })
}

/// Row count for the seed filler: `DB_FILL_COUNT`, default 200
pub fn fill_count_from_env() -> Result<usize> {
    match std::env::var("DB_FILL_COUNT") {
        Ok(raw) => raw
            .parse::<usize>()
            .map_err(|_| TableroError::config(format!("DB_FILL_COUNT is not a number: '{raw}'"))),
        Err(_) => Ok(DEFAULT_FILL_COUNT),
    }
}
