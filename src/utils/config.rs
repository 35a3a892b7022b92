use super::{LifeError, Result, Topology};
use std::time::Duration;

/// Settings supplied by the host application.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub toroidal: bool,
    /// Minimum delay between two scheduled steps.
    pub step_interval: Duration,
    /// Seed for randomized initialization; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_SIDE,
            cols: Self::DEFAULT_SIDE,
            toroidal: false,
            step_interval: Self::DEFAULT_STEP_INTERVAL,
            seed: None,
        }
    }
}

impl Config {
    pub const DEFAULT_SIDE: usize = 10;
    pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(10);

    pub fn topology(&self) -> Topology {
        Topology::from_toroidal(self.toroidal)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.rows, config.cols), (10, 10));
        assert_eq!(config.topology(), Topology::Bounded);
        assert_eq!(config.step_interval, Duration::from_millis(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_side_rejected() {
        let config = Config {
            cols: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(LifeError::InvalidDimension { rows: 10, cols: 0 })
        );
    }
}
