use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "budeff - Score molecular structures with the BUDE empirical free-energy force field.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the internal or interaction energy of a set of atoms.
    Score(ScoreArgs),
}

/// Which atom pairs contribute to the score.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMode {
    /// Every pair of atoms, ignoring the group column.
    #[default]
    Intra,
    /// Only pairs whose atoms belong to different groups.
    Inter,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    // --- Inputs ---
    /// Atom list in CSV format with columns group,element,residue,atom,x,y,z.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub atoms: PathBuf,

    /// Force field JSON file, or a directory of them.
    /// Overrides `forcefield.path` from the config file.
    #[arg(short, long, value_name = "PATH")]
    pub forcefield: Option<PathBuf>,

    /// Force field identifier (file stem) when --forcefield is a directory.
    #[arg(long = "ff-id", value_name = "NAME")]
    pub forcefield_id: Option<String>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Scoring Overrides ---
    /// Pairs to score.
    #[arg(short, long, value_enum, default_value_t = ScoreMode::Intra)]
    pub mode: ScoreMode,

    /// Override the force field's distance cutoff (Angstroms).
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the dielectric constant of the charge term.
    #[arg(long, value_name = "FLOAT")]
    pub dielectric: Option<f64>,

    /// Consider every atom pair instead of using the spatial grid.
    #[arg(long)]
    pub exhaustive: bool,

    /// Abort when two distinct atoms share a position instead of skipping the pair.
    #[arg(long)]
    pub fail_on_degenerate: bool,

    // --- Output ---
    /// Also print every interacting pair with its energy terms.
    #[arg(long)]
    pub pairs: bool,

    /// Print the full result, including every pair, as JSON.
    #[arg(long, conflicts_with = "pairs")]
    pub json: bool,
}
