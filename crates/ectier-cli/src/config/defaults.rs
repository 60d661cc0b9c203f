use ectier::core::evidence::uniprot::DEFAULT_SPECIFIC_CODE;
use ectier::engine::config::{DEFAULT_MIN_SEED_COUNT, DEFAULT_MIN_SEED_FRACTION};

pub struct DefaultsConfig {
    pub min_seed_count: usize,
    pub min_seed_fraction: f64,
    pub hydrolase_proxy: bool,
    pub specific_code: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            min_seed_count: DEFAULT_MIN_SEED_COUNT,
            min_seed_fraction: DEFAULT_MIN_SEED_FRACTION,
            hydrolase_proxy: true,
            specific_code: DEFAULT_SPECIFIC_CODE.to_string(),
        }
    }
}
