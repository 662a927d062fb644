//! Configuration loading and typed config structures for the simclock host.
//!
//! The canonical configuration lives in `simclock-config.yaml` at the
//! project root. Every field has a default, so an empty or missing file
//! yields a working configuration. The calendar engine itself reads no
//! configuration; only the tick feed and its rendering do.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv {
        /// The environment variable name.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `simclock-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimclockConfig {
    /// How snapshots are rendered.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Polling cadence of the tick feed.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimclockConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SIMCLOCK_POLL_INTERVAL_MS` overrides `feed.poll_interval_ms`
    /// - `SIMCLOCK_ANCHOR_TICK` overrides `display.anchor_tick`
    /// - `SIMCLOCK_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document carries no mapping at all.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a set variable does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a set variable does not parse.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_POLL_INTERVAL_MS) {
            self.feed.poll_interval_ms = parse_env(ENV_POLL_INTERVAL_MS, val)?;
        }
        if let Some(val) = lookup(ENV_ANCHOR_TICK) {
            self.display.anchor_tick = Some(parse_env(ENV_ANCHOR_TICK, val)?);
        }
        if let Some(val) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = val;
        }
        Ok(())
    }
}

const ENV_POLL_INTERVAL_MS: &str = "SIMCLOCK_POLL_INTERVAL_MS";
const ENV_ANCHOR_TICK: &str = "SIMCLOCK_ANCHOR_TICK";
const ENV_LOG_LEVEL: &str = "SIMCLOCK_LOG_LEVEL";

fn parse_env(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_err| ConfigError::InvalidEnv { name, value })
}

/// Wall-clock style used in verbose output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStyle {
    /// `"08:15"`.
    #[default]
    TwentyFourHour,
    /// `"08:15 AM"`.
    TwelveHour,
}

/// Which relative-time renderer to append to each snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeMode {
    /// No relative time.
    Off,
    /// Rounded days/weeks/years.
    #[default]
    Rounded,
    /// Hours and minutes below one day, truncated days above.
    Precise,
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Append the wall clock to the date.
    #[serde(default = "default_true")]
    pub verbose: bool,

    /// Wall-clock style when `verbose` is set.
    #[serde(default)]
    pub clock: ClockStyle,

    /// Relative-time renderer.
    #[serde(default)]
    pub relative: RelativeMode,

    /// Reference tick for the relative time (e.g. a hire date). No relative
    /// time is rendered when unset.
    #[serde(default)]
    pub anchor_tick: Option<u64>,

    /// Append the game speed label when the source reports one.
    #[serde(default = "default_true")]
    pub show_speed: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            clock: ClockStyle::default(),
            relative: RelativeMode::default(),
            anchor_tick: None,
            show_speed: true,
        }
    }
}

/// Tick feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// Real-time milliseconds between polls. 0 polls back to back.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Stop after this many polls. Runs until the source is exhausted when
    /// unset.
    #[serde(default)]
    pub max_polls: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_poll_interval_ms() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_in(vars: &BTreeMap<&str, &str>) -> impl Fn(&str) -> Option<String> {
        move |name| vars.get(name).map(|v| (*v).to_owned())
    }

    #[test]
    fn default_config_is_valid() {
        let config = SimclockConfig::default();
        assert_eq!(config.feed.poll_interval_ms, 50);
        assert_eq!(config.feed.max_polls, None);
        assert!(config.display.verbose);
        assert_eq!(config.display.relative, RelativeMode::Rounded);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
display:
  verbose: false
  clock: twelve_hour
  relative: precise
  anchor_tick: 3456
  show_speed: false

feed:
  poll_interval_ms: 250
  max_polls: 10

logging:
  level: debug
";
        let config = SimclockConfig::parse_yaml(yaml).unwrap();
        assert!(!config.display.verbose);
        assert_eq!(config.display.clock, ClockStyle::TwelveHour);
        assert_eq!(config.display.relative, RelativeMode::Precise);
        assert_eq!(config.display.anchor_tick, Some(3456));
        assert!(!config.display.show_speed);
        assert_eq!(config.feed.poll_interval_ms, 250);
        assert_eq!(config.feed.max_polls, Some(10));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimclockConfig::parse_yaml("feed:\n  poll_interval_ms: 0\n").unwrap();
        assert_eq!(config.feed.poll_interval_ms, 0);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(
            SimclockConfig::parse_yaml("").unwrap(),
            SimclockConfig::default()
        );
    }

    #[test]
    fn unknown_enum_value_is_an_error() {
        let result = SimclockConfig::parse_yaml("display:\n  relative: sideways\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let vars = BTreeMap::from([
            ("SIMCLOCK_POLL_INTERVAL_MS", "5"),
            ("SIMCLOCK_ANCHOR_TICK", " 960 "),
            ("SIMCLOCK_LOG_LEVEL", "trace"),
        ]);
        let mut config = SimclockConfig::default();
        config.apply_overrides_from(lookup_in(&vars)).unwrap();
        assert_eq!(config.feed.poll_interval_ms, 5);
        assert_eq!(config.display.anchor_tick, Some(960));
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn bad_env_override_is_reported() {
        let vars = BTreeMap::from([("SIMCLOCK_ANCHOR_TICK", "-3")]);
        let mut config = SimclockConfig::default();
        let err = config.apply_overrides_from(lookup_in(&vars)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: "SIMCLOCK_ANCHOR_TICK",
                ..
            }
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("simclock-config.yaml");
        if path.exists() {
            let contents = std::fs::read_to_string(&path).unwrap();
            let config = SimclockConfig::parse_yaml(&contents);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
