//! Background expiration sweep configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MIN_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Seconds between sweeps; `0` disables the background task.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

impl SweepConfig {
    /// Interval between runs, or `None` when disabled.
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs != 0 && self.interval_secs < MIN_INTERVAL_SECS {
            return Err(ValidationError::SweepIntervalTooShort);
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

fn default_interval() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_by_default() {
        let config = SweepConfig::default();
        assert_eq!(config.interval(), Some(Duration::from_secs(3600)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_disables() {
        let config = SweepConfig { interval_secs: 0 };
        assert_eq!(config.interval(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tight_loops() {
        let config = SweepConfig { interval_secs: 5 };
        assert_eq!(config.validate(), Err(ValidationError::SweepIntervalTooShort));
    }
}
