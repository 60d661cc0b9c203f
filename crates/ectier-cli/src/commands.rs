pub mod learn;
pub mod score;

use crate::error::{CliError, Result};
use ectier::core::io::tsv::RecordTable;
use std::path::Path;
use tracing::{info, warn};

/// Loads the input table; structural problems abort with the offending path.
pub(crate) fn load_table(path: &Path) -> Result<RecordTable> {
    info!("Loading record table from {:?}", path);
    let table = RecordTable::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if table.is_empty() {
        warn!("Input table {:?} contains no records.", path);
    }
    Ok(table)
}
