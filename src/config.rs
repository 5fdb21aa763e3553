use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How the binary prints the tokens it splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line.
    #[default]
    Lines,
    /// A JSON array of strings.
    Json,
    /// POSIX-quoted tokens joined by spaces.
    Shell,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Lines => "lines",
            OutputFormat::Json => "json",
            OutputFormat::Shell => "shell",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lines" => Ok(OutputFormat::Lines),
            "json" => Ok(OutputFormat::Json),
            "shell" => Ok(OutputFormat::Shell),
            other => Err(format!(
                "unknown output format '{other}' (expected lines, json or shell)"
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level filter name understood by `log::LevelFilter`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file path; empty means stderr.
    #[serde(default)]
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: String::new(),
        }
    }
}

fn default_level() -> String {
    "warn".into()
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    output: OutputOverlay,
    #[serde(default)]
    logging: LoggingOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct OutputOverlay {
    format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, Default)]
struct LoggingOverlay {
    level: Option<String>,
    file: Option<String>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/shsplit/config.toml (if exists)
    ///
    /// Only keys present in the overlay replace their defaults.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/shsplit/config.toml.
    // Runs before the logger exists, so problems go straight to stderr.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/shsplit/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("shsplit: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (scalar overrides).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(v) = overlay.output.format {
            self.output.format = v;
        }
        if let Some(v) = overlay.logging.level {
            self.logging.level = v;
        }
        if let Some(v) = overlay.logging.file {
            self.logging.file = v;
        }
    }

    /// Render the merged configuration as TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("failed to serialize config: {e}"))
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.output.format, OutputFormat::Lines);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.file.is_empty());
    }

    #[test]
    fn overlay_overrides_format() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [output]
            format = "json"
            "#,
        );
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn overlay_leaves_unset_keys_alone() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [logging]
            file = "~/.local/state/shsplit.log"
            "#,
        );
        assert_eq!(config.logging.file, "~/.local/state/shsplit.log");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.output.format, OutputFormat::Lines);
    }

    #[test]
    fn empty_overlay_is_noop() {
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.output.format, OutputFormat::Lines);
    }

    #[test]
    fn overlay_rejects_unknown_format() {
        let result: Result<ConfigOverlay, _> = toml::from_str(
            r#"
            [output]
            format = "yaml"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("shell".parse::<OutputFormat>(), Ok(OutputFormat::Shell));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn dump_round_trips() {
        let config = Config::default_config();
        let text = config.to_toml().unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.output.format, config.output.format);
        assert_eq!(back.logging.level, config.logging.level);
    }
}
