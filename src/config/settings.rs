use crate::error::{Result, TronError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Read-only process configuration, resolved from the environment on first use.
pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

/// Network prefix byte of mainnet addresses.
pub const DEFAULT_ADDRESS_PREFIX: u8 = 0x41;
const DEFAULT_PRIMALITY_CONFIDENCE: f64 = 0.5;

const ADDRESS_PREFIX_KEY: &str = "TRON_ADDRESS_PREFIX";
const PRIMALITY_CONFIDENCE_KEY: &str = "TRON_PRIMALITY_CONFIDENCE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    address_prefix: u8,
    primality_confidence: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address_prefix: DEFAULT_ADDRESS_PREFIX,
            primality_confidence: DEFAULT_PRIMALITY_CONFIDENCE,
        }
    }
}

impl Config {
    /// Defaults overridden by `TRON_ADDRESS_PREFIX` (hex byte, e.g. `41` or `0xa0`)
    /// and `TRON_PRIMALITY_CONFIDENCE`. Unparseable values are logged and ignored.
    pub fn from_env() -> Config {
        let mut config = Config::default();

        if let Ok(prefix) = env::var(ADDRESS_PREFIX_KEY) {
            match parse_prefix(&prefix) {
                Ok(byte) => config.address_prefix = byte,
                Err(e) => log::warn!("Ignoring {ADDRESS_PREFIX_KEY}: {e}"),
            }
        }

        if let Ok(confidence) = env::var(PRIMALITY_CONFIDENCE_KEY) {
            match confidence.trim().parse::<f64>() {
                Ok(value) if (0.0..=1.0).contains(&value) => config.primality_confidence = value,
                _ => log::warn!("Ignoring {PRIMALITY_CONFIDENCE_KEY}: '{confidence}' is not in [0, 1]"),
            }
        }

        config
    }

    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| TronError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.primality_confidence) {
            return Err(TronError::Config(format!(
                "primality_confidence must be in [0, 1], got {}",
                self.primality_confidence
            )));
        }
        Ok(())
    }

    pub fn get_address_prefix(&self) -> u8 {
        self.address_prefix
    }

    pub fn get_primality_confidence(&self) -> f64 {
        self.primality_confidence
    }

    pub fn with_address_prefix(mut self, prefix: u8) -> Config {
        self.address_prefix = prefix;
        self
    }
}

fn parse_prefix(value: &str) -> Result<u8> {
    let digits = value.trim();
    let digits = digits.strip_prefix("0x").unwrap_or(digits);
    u8::from_str_radix(digits, 16)
        .map_err(|e| TronError::Config(format!("invalid address prefix '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.get_address_prefix(), 0x41);
        assert_eq!(config.get_primality_confidence(), 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("41").unwrap(), 0x41);
        assert_eq!(parse_prefix("0xa0").unwrap(), 0xa0);
        assert!(parse_prefix("4g").is_err());
        assert!(parse_prefix("141").is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml_str("address_prefix = 160").unwrap();
        assert_eq!(config.get_address_prefix(), 0xa0);
        assert_eq!(config.get_primality_confidence(), 0.5);
    }

    #[test]
    fn test_from_toml_rejects_bad_confidence() {
        let err = Config::from_toml_str("primality_confidence = 3.0").unwrap_err();
        assert!(matches!(err, TronError::Config(_)));
        assert!(Config::from_toml_str("address_prefix = \"x\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tron.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "address_prefix = 65").unwrap();
        writeln!(file, "primality_confidence = 1.0").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.get_address_prefix(), 0x41);
        assert_eq!(config.get_primality_confidence(), 1.0);

        let round_trip = Config::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, TronError::Io(_)));
    }
}
