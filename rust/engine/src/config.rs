use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the configured shuffle seed.
pub const SEED_ENV: &str = "TABLESIM_SEED";

/// Stakes and buy-in limit of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub max_buy_in: u32,
    /// Shuffle seed; `None` seeds from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read table config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse table config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid table config: {0}")]
    Invalid(String),
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 1,
            big_blind: 2,
            max_buy_in: 200,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn new(small_blind: u32, big_blind: u32, max_buy_in: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            max_buy_in,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates a TOML table config.
    ///
    /// ```
    /// use tablesim_engine::config::TableConfig;
    ///
    /// let cfg = TableConfig::from_toml_str(
    ///     "small_blind = 1\nbig_blind = 2\nmax_buy_in = 200\nseed = 7\n",
    /// )
    /// .unwrap();
    /// assert_eq!(cfg, TableConfig::new(1, 2, 200).with_seed(7));
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Resolves a config from an optional file (defaults otherwise), then
    /// applies the `TABLESIM_SEED` override.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::default(),
        };
        if let Ok(seed) = std::env::var(SEED_ENV) {
            if !seed.is_empty() {
                cfg.seed = Some(
                    seed.parse()
                        .map_err(|_| ConfigError::Invalid(format!("invalid seed {:?}", seed)))?,
                );
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be > 0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        if self.max_buy_in < self.big_blind {
            return Err(ConfigError::Invalid(
                "max_buy_in must be at least big_blind".into(),
            ));
        }
        Ok(())
    }
}
