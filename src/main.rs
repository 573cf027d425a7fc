//! tablero CLI entry point
//!
//! Thin wrapper over the library: parse the subcommand, start its log file,
//! resolve the connection configuration where needed, run, and exit with the
//! subcommand's own status code. Every failure is logged with its stable
//! error code before the process terminates.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tablero::error::TableroError;
use tablero::{commands, config, logging};

/// Single-binary MySQL workbench utilities
#[derive(Parser)]
#[command(name = "tablero")]
#[command(about = "MySQL workbench utilities: connectivity check, seeding, auto-increment repair, schema dump, icon, countdown")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify server connectivity and list databases/tables
    Check,

    /// Insert synthetic rows into the demo table
    Fill {
        /// Number of rows to insert (default: DB_FILL_COUNT or 200)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Make the demo table's key column NOT NULL AUTO_INCREMENT
    /// (adding a PRIMARY KEY only when that is safe)
    FixAutoinc,

    /// List tables and columns of the configured database
    Schema,

    /// Generate the multi-resolution clock icon
    Icon {
        /// Output path for the ICO file
        #[arg(long, default_value = "clock.ico")]
        out: PathBuf,
    },

    /// On-screen countdown with a background table query
    Timer {
        /// Total countdown time in seconds
        #[arg(long, default_value_t = 120)]
        seconds: u64,
    },
}

impl Commands {
    /// Fixed log file basename, one per subcommand
    const fn log_basename(&self) -> &'static str {
        match self {
            Self::Check => "db_check",
            Self::Fill { .. } => "db_fill",
            Self::FixAutoinc => "db_fix_autoinc",
            Self::Schema => "db_schema",
            Self::Icon { .. } => "make_icon",
            Self::Timer { .. } => "timer",
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let logger = match logging::init(cli.command.log_basename()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to initialize logging: {e}");
            return 1;
        }
    };

    let code = dispatch(cli.command).await;
    logger.flush();
    code
}

async fn dispatch(command: Commands) -> i32 {
    match command {
        Commands::Check => match connection() {
            Ok(cfg) => finish(commands::check::run(&cfg).await, commands::check::exit_code),
            Err(e) => finish(Err(e), commands::check::exit_code),
        },

        Commands::Fill { count } => {
            let result = match (connection(), fill_count(count)) {
                (Ok(cfg), Ok(n)) => commands::fill::run(&cfg, n).await,
                (Err(e), _) | (_, Err(e)) => Err(e),
            };
            finish(result, commands::fill::exit_code)
        }

        Commands::FixAutoinc => match connection() {
            Ok(cfg) => finish(commands::autoinc::run(&cfg).await, commands::autoinc::exit_code),
            Err(e) => finish(Err(e), commands::autoinc::exit_code),
        },

        Commands::Schema => match connection() {
            Ok(cfg) => finish(commands::schema::run(&cfg).await, commands::schema::exit_code),
            Err(e) => finish(Err(e), commands::schema::exit_code),
        },

        Commands::Icon { out } => finish(commands::icon::run(&out), commands::icon::exit_code),

        Commands::Timer { seconds } => match connection() {
            Ok(cfg) => {
                finish(commands::timer::run(&cfg, seconds).await, commands::timer::exit_code)
            }
            Err(e) => finish(Err(e), commands::timer::exit_code),
        },
    }
}

fn connection() -> tablero::Result<config::ConnectionConfig> {
    config::from_env()
}

fn fill_count(cli_count: Option<usize>) -> tablero::Result<usize> {
    match cli_count {
        Some(n) => Ok(n),
        None => config::fill_count_from_env(),
    }
}

fn finish(result: tablero::Result<()>, exit_code: fn(&TableroError) -> i32) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e} [{}]", e.error_code());
            exit_code(&e)
        }
    }
}
