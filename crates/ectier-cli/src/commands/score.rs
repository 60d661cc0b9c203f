use crate::cli::ScoreArgs;
use crate::commands::load_table;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use csv::{QuoteStyle, WriterBuilder};
use ectier::core::evidence::EvidenceScanner;
use ectier::core::io::header::Column;
use ectier::core::io::tsv::RecordTable;
use ectier::engine::progress::ProgressReporter;
use ectier::workflows::{self, score::ScoreOutcome};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

const COMPACT_HEADER: [&str; 8] = [
    "acc",
    "organism",
    "len",
    "ECs",
    "Pfam",
    "PDB?",
    "Secreted",
    "Tier",
];
const SECRETED_COLUMN: usize = 6;

/// Secretion column label carrying the evidence code's number, `Secreted(269)?`
/// for the default `ECO:0000269`.
fn secreted_label(specific_code: &str) -> String {
    let number = specific_code
        .strip_prefix("ECO:")
        .unwrap_or(specific_code)
        .trim_start_matches('0');
    format!("Secreted({})?", if number.is_empty() { "0" } else { number })
}

fn compact_header(specific_code: &str) -> Vec<String> {
    let mut header: Vec<String> = COMPACT_HEADER.iter().map(|name| name.to_string()).collect();
    header[SECRETED_COLUMN] = secreted_label(specific_code);
    header
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Writes one row per tiered record; skipped records are left out.
pub(crate) fn write_compact_table(
    table: &RecordTable,
    outcome: &ScoreOutcome,
    scanner: &dyn EvidenceScanner,
    writer: impl Write,
) -> std::result::Result<usize, csv::Error> {
    let mut out = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);
    out.write_record(compact_header(scanner.specific_code()))?;

    let mut written = 0;
    for (index, tier) in outcome.tiered() {
        let record = &table.records()[index];
        let families = record
            .family_ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        out.write_record([
            record.accession.as_str(),
            record.organism.as_str(),
            record.length.as_str(),
            table.cell(index, Column::EcNumbers).trim(),
            families.as_str(),
            yes_no(record.has_structure()),
            yes_no(scanner.secreted_with_evidence(&record.subcellular_location)),
            tier.as_str(),
        ])?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

fn write_output(
    path: Option<&Path>,
    table: &RecordTable,
    outcome: &ScoreOutcome,
    scanner: &dyn EvidenceScanner,
) -> Result<usize> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_compact_table(table, outcome, scanner, BufWriter::new(file)).map_err(|e| {
                CliError::Output {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            })
        }
        None => write_compact_table(table, outcome, scanner, io::stdout().lock())
            .map_err(|e| CliError::Other(e.into())),
    }
}

pub async fn run(args: ScoreArgs, quiet: bool) -> Result<()> {
    let app = build_config(&args.tiering)?;
    let table = load_table(&app.input_path)?;
    let scanner = app.scanner();

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core scoring workflow...");
    let outcome = tokio::task::block_in_place(|| {
        workflows::score::run(table.records(), &scanner, &app.core_config, &reporter)
    })?;

    workflows::report::write_learned_families(&outcome.expected, args.show_counts, io::stderr().lock())?;

    let written = write_output(args.output.as_deref(), &table, &outcome, &scanner)?;
    if written == 0 {
        warn!("No record in the input names any of the target ECs.");
    }
    if let Some(path) = &args.output {
        info!("Wrote {} tiered record(s) to {:?}", written, path);
    }

    if let Some(path) = &args.write_full {
        let selection = outcome.tiered().map(|(index, tier)| (index, tier.as_str()));
        let full_rows = table
            .write_with_extra_column_to_path("Tier", selection, path)
            .map_err(|e| CliError::Output {
                path: path.clone(),
                source: e.into(),
            })?;
        info!("Wrote {} full row(s) to {:?}", full_rows, path);
    }

    Ok(())
}
