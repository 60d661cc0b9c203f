use crate::cli::LearnArgs;
use crate::commands::load_table;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use ectier::engine::progress::ProgressReporter;
use ectier::workflows;
use std::io::{self, Write};
use tracing::info;

pub async fn run(args: LearnArgs, quiet: bool) -> Result<()> {
    let app = build_config(&args.tiering)?;
    let table = load_table(&app.input_path)?;
    let scanner = app.scanner();

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the family learning workflow...");
    let expected = tokio::task::block_in_place(|| {
        workflows::score::learn(table.records(), &scanner, &app.core_config, &reporter)
    })?;

    let mut stdout = io::stdout().lock();
    workflows::report::write_learned_families(&expected, args.show_counts, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
