//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity used when none (or zero) is given
pub const DEFAULT_CAPACITY: usize = 10;

/// Construction parameters for an [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries held before the least recently used is evicted
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Parse and validate a JSON config document
    ///
    /// Missing fields take their defaults, so `{}` is a valid document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero capacity
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        assert_eq!(CacheConfig::default().capacity, DEFAULT_CAPACITY);
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config = CacheConfig::from_json(r#"{"capacity": 256}"#).unwrap();
        assert_eq!(config, CacheConfig::with_capacity(256));

        let config = CacheConfig::from_json("{}").unwrap();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_config_rejects_zero() {
        let err = CacheConfig::from_json(r#"{"capacity": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidCapacity(0)));
    }

    #[test]
    fn test_config_rejects_non_numeric() {
        let err = CacheConfig::from_json(r#"{"capacity": "lots"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = CacheConfig::from_json(r#"{"capacity": -3}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
