//! Simulation and application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default number of Monte-Carlo trials per simulation.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Which cards the hand simulator samples from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSource {
    /// The untouched 18-card composition, regardless of what has been drawn.
    #[default]
    FullComposition,
    /// Only the cards still in the draw pile.
    DrawPile,
}

/// Hand simulator parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of hands sampled.
    pub trials: usize,

    /// Pool the hands are drawn from.
    pub sample_source: SampleSource,

    /// Seed for the sampler. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Spread trials across the rayon pool.
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            sample_source: SampleSource::FullComposition,
            seed: None,
            parallel: false,
        }
    }
}

impl SimConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_source(mut self, source: SampleSource) -> Self {
        self.sample_source = source;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Settings read by the command line tool from `--config`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Optional face catalog overriding the built-in dice.
    pub catalog: Option<PathBuf>,
    pub sim: SimConfig,
}

impl AppConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.sample_source, SampleSource::FullComposition);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::default()
            .with_trials(500)
            .with_seed(7)
            .with_sample_source(SampleSource::DrawPile)
            .with_parallel(true);

        assert_eq!(config.trials, 500);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.sample_source, SampleSource::DrawPile);
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_app_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{"sim": {"trials": 250, "sample_source": "draw_pile"}}"#).unwrap();
        assert_eq!(config.catalog, None);
        assert_eq!(config.sim.trials, 250);
        assert_eq!(config.sim.sample_source, SampleSource::DrawPile);
        assert_eq!(config.sim.seed, None);
    }
}
