use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::processing::buffer::DEFAULT_CAPACITY;
use crate::processing::parameters::ParameterSnapshot;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub parameters: ParameterSnapshot,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub tick_period_ms: u64,
    pub buffer_capacity: usize,
    pub logging: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            buffer_capacity: DEFAULT_CAPACITY,
            logging: false,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,
    #[error("buffer capacity must be at least 1 sample")]
    ZeroCapacity,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, String> {
    let config_str =
        fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;

    let config: Config = serde_yaml::from_str(&config_str)
        .map_err(|e| format!("Failed to parse config file: {}", e))?;
    config
        .parameters
        .validate()
        .map_err(|e| format!("Invalid parameters in config file: {}", e))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), String> {
    let yaml =
        serde_yaml::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))?;

    fs::write(path, yaml).map_err(|e| format!("Failed to write config file: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_dashboard() {
        let config = Config::default();
        assert_eq!(config.monitor.tick_period_ms, 100);
        assert_eq!(config.monitor.buffer_capacity, 100);
        assert!(!config.monitor.logging);
        assert_eq!(config.seed, None);
        assert!(config.monitor.validate().is_ok());
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "monitor:\n  tick_period_ms: 50\nseed: 42\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.monitor.tick_period_ms, 50);
        assert_eq!(config.monitor.buffer_capacity, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.parameters, ParameterSnapshot::default());
    }

    #[test]
    fn round_trips_through_file() {
        let path = std::env::temp_dir().join(format!(
            "conveyor-monitor-config-{}.yaml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.seed = Some(9);
        config.parameters.load_cell.weight = 250.0;

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_reports_a_message() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(err.starts_with("Failed to read config file"));
    }

    #[test]
    fn non_finite_parameter_is_rejected_on_load() {
        let path = std::env::temp_dir().join("conveyor_monitor_nan_config.yaml");
        fs::write(&path, "parameters:\n  temperature:\n    temperature: .nan\n").unwrap();
        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(err.starts_with("Invalid parameters in config file"));
        assert!(err.contains("must be finite"));
    }

    #[test]
    fn out_of_range_location_is_rejected_on_load() {
        let path = std::env::temp_dir().join("conveyor_monitor_rfid_config.yaml");
        fs::write(&path, "parameters:\n  rfid:\n    selected: 7\n").unwrap();
        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(err.contains("index 7 out of range"));
    }

    #[test]
    fn zero_period_is_rejected() {
        let config = MonitorConfig {
            tick_period_ms: 0,
            ..MonitorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));
    }
}
