//! Search configuration
//!
//! Runtime switches for the exhaustive search, loadable from TOML:
//!
//! ```toml
//! enable_caching = true
//! enable_metrics = true
//! min_cacheable_height = 3
//! prune_on_win = false
//! ```
//!
//! Missing keys take their default.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Smallest remaining height for which a subtree is cached
pub const CACHEABLE_SUBTREE_MIN_HEIGHT: u8 = 3;

/// Errors raised while reading a search configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse search config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("min_cacheable_height must be at least 1")]
    InvalidMinHeight,
}

/// Exhaustive search options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Memoize fully explored subtrees
    pub enable_caching: bool,
    /// Collect per-depth statistics
    pub enable_metrics: bool,
    /// Remaining plies a node needs before it is looked up or stored
    pub min_cacheable_height: u8,
    /// Do not descend below a node once one of its moves wins
    pub prune_on_win: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enable_caching: true,
            enable_metrics: true,
            min_cacheable_height: CACHEABLE_SUBTREE_MIN_HEIGHT,
            prune_on_win: false,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid search config: {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_cacheable_height == 0 {
            return Err(ConfigError::InvalidMinHeight);
        }
        Ok(())
    }

    /// `min_cacheable_height` clamped to at least one ply
    #[inline]
    pub fn effective_min_height(&self) -> u8 {
        self.min_cacheable_height.max(1)
    }
}
