use crate::{CliError, CliResult};

use std::path::Path;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use lm_config::LogLevel;
use log::{LevelFilter, debug};

/// Route `log` records to stderr, or to `log_file` when one is configured.
///
/// Stdout is left to command output. Colors only apply to stderr.
pub fn initialize(level: LogLevel, log_file: Option<&Path>, colored: bool) -> CliResult<()> {
    dispatch(level, log_file, colored)?
        .apply()
        .map_err(|e| CliError::logger(format!("Failed to initialize logger: {e}")))?;

    debug!(
        "Logging at {} to {}",
        level.0,
        log_file.map_or_else(|| "stderr".into(), |path| path.display().to_string())
    );
    Ok(())
}

pub(crate) fn dispatch(
    level: LogLevel,
    log_file: Option<&Path>,
    colored: bool,
) -> CliResult<Dispatch> {
    let colors = (colored && log_file.is_none()).then(|| {
        ColoredLevelConfig::new()
            .debug(Color::Blue)
            .info(Color::Green)
            .trace(Color::Magenta)
    });

    let base = Dispatch::new()
        .level(level.0)
        // reqwest internals stay quiet below warn
        .level_for("reqwest", LevelFilter::Warn.min(level.0))
        .format(move |out, message, record| {
            let level = match &colors {
                Some(colors) => colors.color(record.level()).to_string(),
                None => record.level().to_string(),
            };
            out.finish(format_args!(
                "[{} {}] {} ({})",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                level,
                message,
                record.target(),
            ))
        });

    match log_file {
        Some(path) => {
            let file = fern::log_file(path).map_err(|e| {
                CliError::logger(format!("Cannot open log file {}: {}", path.display(), e))
            })?;
            Ok(base.chain(file))
        }
        None => Ok(base.chain(std::io::stderr())),
    }
}
