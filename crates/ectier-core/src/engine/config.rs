use std::collections::BTreeSet;
use thiserror::Error;

pub const DEFAULT_MIN_SEED_COUNT: usize = 2;
pub const DEFAULT_MIN_SEED_FRACTION: f64 = 0.10;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Target EC set must contain at least one EC number")]
    EmptyTargetSet,
    #[error("Minimum seed fraction must lie within [0, 1], got {0}")]
    FractionOutOfRange(f64),
}

/// Thresholds a family id must meet, for one EC, to become an expected family.
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningThresholds {
    pub min_seed_count: usize,
    pub min_seed_fraction: f64,
}

impl Default for LearningThresholds {
    fn default() -> Self {
        Self {
            min_seed_count: DEFAULT_MIN_SEED_COUNT,
            min_seed_fraction: DEFAULT_MIN_SEED_FRACTION,
        }
    }
}

impl LearningThresholds {
    pub fn admits(&self, count: usize, total: usize) -> bool {
        total > 0
            && count >= self.min_seed_count
            && (count as f64 / total as f64) >= self.min_seed_fraction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TieringConfig {
    /// EC numbers of interest, compared as exact strings.
    pub target_ecs: BTreeSet<String>,
    pub learning: LearningThresholds,
    /// Accept hydrolase proxy domains when no ESTHER cross-reference is present.
    pub use_hydrolase_proxy: bool,
}

#[derive(Default)]
pub struct TieringConfigBuilder {
    target_ecs: Option<BTreeSet<String>>,
    min_seed_count: Option<usize>,
    min_seed_fraction: Option<f64>,
    use_hydrolase_proxy: Option<bool>,
}

impl TieringConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_ecs<I, S>(mut self, ecs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_ecs = Some(
            ecs.into_iter()
                .map(Into::into)
                .map(|ec: String| ec.trim().to_string())
                .filter(|ec| !ec.is_empty())
                .collect(),
        );
        self
    }
    pub fn min_seed_count(mut self, count: usize) -> Self {
        self.min_seed_count = Some(count);
        self
    }
    pub fn min_seed_fraction(mut self, fraction: f64) -> Self {
        self.min_seed_fraction = Some(fraction);
        self
    }
    pub fn use_hydrolase_proxy(mut self, enabled: bool) -> Self {
        self.use_hydrolase_proxy = Some(enabled);
        self
    }

    pub fn build(self) -> Result<TieringConfig, ConfigError> {
        let target_ecs = self
            .target_ecs
            .ok_or(ConfigError::MissingParameter("target_ecs"))?;
        if target_ecs.is_empty() {
            return Err(ConfigError::EmptyTargetSet);
        }

        let min_seed_fraction = self
            .min_seed_fraction
            .ok_or(ConfigError::MissingParameter("min_seed_fraction"))?;
        if !(0.0..=1.0).contains(&min_seed_fraction) {
            return Err(ConfigError::FractionOutOfRange(min_seed_fraction));
        }

        Ok(TieringConfig {
            target_ecs,
            learning: LearningThresholds {
                min_seed_count: self
                    .min_seed_count
                    .ok_or(ConfigError::MissingParameter("min_seed_count"))?,
                min_seed_fraction,
            },
            use_hydrolase_proxy: self
                .use_hydrolase_proxy
                .ok_or(ConfigError::MissingParameter("use_hydrolase_proxy"))?,
        })
    }
}
