/// Command line interface for `petkin` executable
#[derive(clap::Parser, Debug, Clone)]
#[clap(
    name = "petkin",
    about = "Predict PET time-activity curves from kinetic parameters",
    version,
)]
pub (super) struct Cli {
    /// Verbosity of diagnostics written to stderr
    #[clap(long, global = true, default_value = "info")]
    pub log_level: tracing::Level,

    #[clap(subcommand)]
    pub (super) command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub (super) enum Command {

    /// List the available models
    Models,

    /// Show the parameters of the configured model
    Layout {
        /// TOML model configuration
        config: PathBuf,
    },

    /// Predict one PET curve per parameter vector
    Evaluate {
        /// TOML model configuration
        config: PathBuf,

        /// Text file with one parameter vector per line
        params: PathBuf,

        #[clap(flatten)]
        run: Run,
    },

    /// Compute a derived metric per parameter vector
    Metrics {
        /// TOML model configuration
        config: PathBuf,

        /// Text file with one parameter vector per line
        params: PathBuf,

        /// Name of the metric, e.g. CBF, rates or CMRglc
        #[clap(short, long)]
        key: String,

        #[clap(flatten)]
        run: Run,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub (super) struct Run {
    /// Output file; stdout if absent
    #[clap(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum number of rayon threads
    #[clap(short = 'j', long, default_value = "4")]
    pub threads: usize,
}

// ----- Imports -----------------------------------------------------------------------------------------
use std::path::PathBuf;
