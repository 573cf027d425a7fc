//! Per-command log files
//!
//! Every subcommand writes a fixed-basename log file in the working
//! directory (e.g. `db_check.log`), truncated on each run and duplicated to
//! stdout, matching the one-file-per-script behavior of the original tools.

use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};

/// Start logging to `<basename>.log` in the working directory.
///
/// The returned handle must stay alive for the duration of the run; dropping
/// it flushes and shuts the logger down.
pub fn init(basename: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory(".")
                .basename(basename)
                .suppress_timestamp(),
        )
        .duplicate_to_stdout(Duplicate::All)
        .format(|w, _now, record| {
            write!(
                w,
                "[{}] {} {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .start()?;
    Ok(handle)
}
