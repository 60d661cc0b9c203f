use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "ectier contributors",
    version,
    about = "ectier - assigns gold, silver or bronze confidence tiers to EC-annotated protein records, using family expectations learned from the dataset's own high-confidence entries.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel classification.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Learn expected families, then tier every record naming a target EC.
    Score(ScoreArgs),
    /// Learn expected families only and print the learned-family report.
    Learn(LearnArgs),
}

/// Input and tiering options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct TieringArgs {
    /// Path to the tab-separated record table (UniProt export or enriched table).
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Target EC number; repeat the flag or separate values with commas.
    #[arg(short = 'e', long = "target-ec", value_name = "EC", value_delimiter = ',')]
    pub target_ecs: Vec<String>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum number of seed records a family must appear in to be expected.
    #[arg(long = "min-abs", alias = "min-seed-count", value_name = "INT")]
    pub min_seed_count: Option<usize>,

    /// Minimum fraction of an EC's seed family contributions a family must reach.
    #[arg(long = "min-frac", alias = "min-seed-fraction", value_name = "FLOAT")]
    pub min_seed_fraction: Option<f64>,

    /// Do not accept hydrolase proxy domains (IPR029058, PF01083, PF12740) as a family signal.
    #[arg(long)]
    pub no_esther_proxy: bool,

    /// Evidence code treated as experimental evidence (default ECO:0000269).
    #[arg(long, value_name = "ECO")]
    pub specific_code: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S learning.min-seed-count=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub tiering: TieringArgs,

    /// Write the compact tier table here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write every tiered input row, all columns kept, with a `Tier` column appended.
    #[arg(long, value_name = "PATH")]
    pub write_full: Option<PathBuf>,

    /// Include per-family seed counts and fractions in the learned-family report.
    #[arg(long)]
    pub show_counts: bool,
}

/// Arguments for the `learn` subcommand.
#[derive(Args, Debug)]
pub struct LearnArgs {
    #[command(flatten)]
    pub tiering: TieringArgs,

    /// Include per-family seed counts and fractions in the report.
    #[arg(long)]
    pub show_counts: bool,
}
