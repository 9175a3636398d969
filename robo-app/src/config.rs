//! Simple configuration for Robo
//!
//! Read once at startup from a `key=value` file. Missing file, unknown keys,
//! and unparsable values all fall back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use robo_engine::SimulatorConfig;
use robo_input::terminal::DEFAULT_RELEASE_TIMEOUT;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// UI frame interval in milliseconds
    pub tick_ms: u64,
    /// Key silence that counts as a release on terminals without key-up events
    pub release_timeout_ms: u64,
    /// Board halts below this battery voltage
    pub min_voltage: f64,
    /// Simulated battery voltage at startup
    pub battery_voltage: f64,
    /// How often the board reports its voltage
    pub telemetry_interval_ms: u64,
    pub theme: String,
    /// Log destination, defaults to the user data dir
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 30,
            release_timeout_ms: DEFAULT_RELEASE_TIMEOUT.as_millis() as u64,
            min_voltage: 5.5,
            battery_voltage: 12.0,
            telemetry_interval_ms: 5000,
            theme: "green".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be read.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("robo")
            .join("config.txt")
    }

    /// Where the log goes
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("robo")
                .join("robo.log")
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn release_timeout(&self) -> Duration {
        Duration::from_millis(self.release_timeout_ms)
    }

    /// Settings for the simulated board
    pub fn simulator(&self) -> SimulatorConfig {
        SimulatorConfig {
            battery_voltage: self.battery_voltage,
            min_voltage: self.min_voltage,
            telemetry_interval: Duration::from_millis(self.telemetry_interval_ms),
            ..SimulatorConfig::default()
        }
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "tick_ms" => set_parsed(&mut config.tick_ms, value),
                "release_timeout_ms" => set_parsed(&mut config.release_timeout_ms, value),
                "min_voltage" => set_parsed(&mut config.min_voltage, value),
                "battery_voltage" => set_parsed(&mut config.battery_voltage, value),
                "telemetry_interval_ms" => set_parsed(&mut config.telemetry_interval_ms, value),
                "theme" => {
                    if !value.is_empty() {
                        config.theme = value.to_string();
                    }
                }
                "log_file" => {
                    if !value.is_empty() {
                        config.log_file = Some(PathBuf::from(value));
                    }
                }
                _ => {} // Ignore unknown keys
            }
        }

        config
    }
}

/// Overwrite `slot` only when `value` parses
fn set_parsed<T: FromStr>(slot: &mut T, value: &str) {
    if let Ok(parsed) = value.parse() {
        *slot = parsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse(""), Config::default());
    }

    #[test]
    fn test_parse_values() {
        let content = "\
# Robo configuration
tick_ms=50
release_timeout_ms = 450
min_voltage=6.0
battery_voltage=9.6
theme=amber
log_file=/tmp/robo.log";
        let config = Config::parse(content);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.release_timeout(), Duration::from_millis(450));
        assert_eq!(config.min_voltage, 6.0);
        assert_eq!(config.battery_voltage, 9.6);
        assert_eq!(config.theme, "amber");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/robo.log"));
    }

    #[test]
    fn test_default_release_timeout() {
        assert_eq!(Config::default().release_timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = Config::parse("tick_ms=fast\nmin_voltage=\nnonsense\ncolour=red");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let config = Config::parse("tick_ms=0");
        assert_eq!(config.tick(), Duration::from_millis(1));
    }

    #[test]
    fn test_simulator_settings() {
        let config = Config::parse("min_voltage=7\ntelemetry_interval_ms=250");
        let sim = config.simulator();
        assert_eq!(sim.min_voltage, 7.0);
        assert_eq!(sim.telemetry_interval, Duration::from_millis(250));
        assert_eq!(sim.battery_voltage, 12.0);
    }
}
