//! Map parameters readable from a config file
//!
//! Programs that keep secrets of a fixed shape (tokens, tags, key ids) can describe the shape
//! in TOML instead of hard coding it:
//!
//! ```toml
//! key_size = 32
//! val_size = 16
//! capacity = 1024
//! ```

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// Parameters for [crate::CtMap::from_config]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapConfig {
    /// Size of every key in bytes
    pub key_size: usize,

    /// Size of every value in bytes; zero for a set
    pub val_size: usize,

    /// Number of entries to preallocate
    ///
    /// When omitted storage grows on demand, and an insertion that reallocates can be told
    /// apart from one that does not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl MapConfig {
    /// Configuration without preallocation
    pub fn new(key_size: usize, val_size: usize) -> Self {
        Self {
            key_size,
            val_size,
            capacity: None,
        }
    }

    /// Preallocate room for `capacity` entries
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Parse a configuration from TOML
    ///
    /// ```
    /// use ctmap::MapConfig;
    ///
    /// let config = MapConfig::from_toml_str("key_size = 16\nval_size = 0\n").unwrap();
    /// assert_eq!(config, MapConfig::new(16, 0));
    /// ```
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("invalid map configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("could not read map configuration {path:?}"))?;
        Self::from_toml_str(&s).with_context(|| format!("in map configuration {path:?}"))
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Check that a map with these parameters can actually be allocated
    pub fn validate(&self) -> anyhow::Result<()> {
        let entry_size = self.key_size.checked_add(self.val_size);
        ensure!(entry_size.is_some(), "entry size overflows");
        if let (Some(entry_size), Some(capacity)) = (entry_size, self.capacity) {
            ensure!(
                entry_size
                    .checked_mul(capacity)
                    .is_some_and(|bytes| bytes <= isize::MAX as usize),
                "capacity of {capacity} entries of {entry_size} bytes overflows"
            );
        }
        Ok(())
    }
}
