//! Book configuration.
//!
//! Picks the side index strategy and the registry pre-allocation for a
//! deployment. Small, dense books (few distinct prices) favour
//! [`IndexStrategy::Array`]; wide books favour [`IndexStrategy::Tree`].
//!
//! ## Environment
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `RESTING_BOOK_STRATEGY` | `tree`, `array` | `tree` |
//! | `RESTING_BOOK_CAPACITY` | non-negative integer | `1024` |

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable selecting the strategy
pub const STRATEGY_ENV: &str = "RESTING_BOOK_STRATEGY";

/// Environment variable selecting the registry capacity
pub const CAPACITY_ENV: &str = "RESTING_BOOK_CAPACITY";

/// Default number of pre-allocated registry slots
pub const DEFAULT_ORDER_CAPACITY: usize = 1024;

/// Configuration parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown index strategy {0:?} (expected \"tree\" or \"array\")")]
    UnknownStrategy(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which side index implementation backs the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStrategy {
    /// Ordered map of levels, O(log L) level lookup
    #[default]
    Tree,
    /// Sorted vector of levels, binary search plus O(L) shifts
    Array,
}

impl FromStr for IndexStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" | "map" => Ok(IndexStrategy::Tree),
            "array" | "vector" | "vec" => Ok(IndexStrategy::Array),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for IndexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexStrategy::Tree => f.write_str("tree"),
            IndexStrategy::Array => f.write_str("array"),
        }
    }
}

/// Settings for building a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Side index implementation
    pub strategy: IndexStrategy,

    /// Registry slots to pre-allocate
    pub order_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            strategy: IndexStrategy::default(),
            order_capacity: DEFAULT_ORDER_CAPACITY,
        }
    }
}

impl BookConfig {
    /// Build a config from `RESTING_BOOK_*` environment variables, falling back
    /// to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(STRATEGY_ENV) {
            config.strategy = raw.parse()?;
        }

        if let Some(raw) = lookup(CAPACITY_ENV) {
            config.order_capacity =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: CAPACITY_ENV,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: IndexStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }
}
