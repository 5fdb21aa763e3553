use std::path::PathBuf;

use simplelog::{
    ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

use crate::config::LoggingConfig;

/// Install the global logger described by `config`.
///
/// `level_override` (from `--log-level`) wins over the configured level.
/// Records go to stderr unless a log file is configured, in which case they
/// are appended to it. A level of `off` installs nothing.
pub fn init(config: &LoggingConfig, level_override: Option<&str>) -> Result<(), String> {
    let level = parse_level(level_override.unwrap_or(&config.level))?;
    if level == LevelFilter::Off {
        return Ok(());
    }

    let Some(path) = log_path(&config.file) else {
        let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
        return TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto)
            .map_err(|e| format!("failed to install logger: {e}"));
    };

    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .map_err(|e| format!("failed to install logger: {e}"))
}

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
pub fn parse_level(name: &str) -> Result<LevelFilter, String> {
    name.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{name}'"))
}

/// Resolve the configured log file, expanding a leading `~`.
pub fn log_path(file: &str) -> Option<PathBuf> {
    let file = file.trim();
    if file.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(file).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("warn"), Ok(LevelFilter::Warn));
        assert_eq!(parse_level("TRACE"), Ok(LevelFilter::Trace));
        assert_eq!(parse_level("off"), Ok(LevelFilter::Off));
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn empty_file_means_stderr() {
        assert_eq!(log_path(""), None);
        assert_eq!(log_path("   "), None);
    }

    #[test]
    fn absolute_path_is_kept() {
        assert_eq!(
            log_path("/var/log/shsplit.log"),
            Some(PathBuf::from("/var/log/shsplit.log"))
        );
    }

    #[test]
    fn tilde_is_expanded() {
        let path = log_path("~/shsplit.log").unwrap();
        assert!(path.ends_with("shsplit.log"));
        if std::env::var_os("HOME").is_some() {
            assert!(!path.starts_with("~"));
        }
    }

    #[test]
    fn off_installs_nothing() {
        let config = LoggingConfig {
            level: "off".into(),
            file: String::new(),
        };
        assert_eq!(init(&config, None), Ok(()));
    }

    #[test]
    fn bad_override_is_rejected() {
        let config = LoggingConfig::default();
        assert!(init(&config, Some("chatty")).is_err());
    }
}
