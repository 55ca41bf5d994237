use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Where tracing output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Interactive terminal UI: only a file is safe to write to.
    File(&'a Path),
    Stderr,
    Disabled,
}

/// Picks the log target. The TUI owns stdout/stderr, so without a file it
/// logs nothing.
pub fn resolve_target<'a>(config: &'a LoggingConfig, headless: bool) -> LogTarget<'a> {
    match (&config.file, headless) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Disabled,
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// configured level.
pub fn init(config: &LoggingConfig, target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| eyre!("invalid log level `{}`: {e}", config.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => {
            if config.json {
                builder.json().with_writer(std::io::stderr).try_init()
            } else {
                builder.with_writer(std::io::stderr).try_init()
            }
        }
        LogTarget::File(path) => {
            ensure_parent_dir(path)?;
            let file = Mutex::new(File::create(path)?);
            if config.json {
                builder.json().with_ansi(false).with_writer(file).try_init()
            } else {
                builder.with_ansi(false).with_writer(file).try_init()
            }
        }
    };

    installed.map_err(|e| eyre!("failed to set tracing subscriber: {e}"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn tui_without_file_disables_logging() {
        let config = LoggingConfig::default();
        assert_eq!(resolve_target(&config, false), LogTarget::Disabled);
        assert_eq!(resolve_target(&config, true), LogTarget::Stderr);
    }

    #[test]
    fn configured_file_wins_in_both_modes() {
        let config = LoggingConfig {
            file: Some(PathBuf::from("/tmp/pcmonitor.log")),
            ..LoggingConfig::default()
        };
        let expected = LogTarget::File(Path::new("/tmp/pcmonitor.log"));
        assert_eq!(resolve_target(&config, false), expected);
        assert_eq!(resolve_target(&config, true), expected);
    }

    #[test]
    fn disabled_target_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(init(&config, LogTarget::Disabled).is_ok());
    }
}
