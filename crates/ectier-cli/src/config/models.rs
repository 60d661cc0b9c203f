use ectier::core::evidence::uniprot::UniProtScanner;
use ectier::engine::config::TieringConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub core_config: TieringConfig,
    pub specific_code: String,
}

impl AppConfig {
    pub fn scanner(&self) -> UniProtScanner {
        UniProtScanner::with_specific_code(self.specific_code.clone())
    }
}
