use base::{cli::CommonArgs, StepRangeExcl};
use std::path::PathBuf;

/// Metalfit command line interface arguments.
#[derive(clap::Parser, Debug)]
#[clap(
    author,
    version,
    about = "Fits the IOR of the metallic Fresnel model to measured metals."
)]
pub struct CliArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Path to the user config file. If not specified, `metalfit.toml` in the
    /// working directory is used when it exists.
    #[clap(short, long, help = "Path to the user config file")]
    pub config: Option<PathBuf>,

    /// Command to execute.
    #[clap(subcommand)]
    pub command: SubCommand,
}

/// Metalfit command.
#[derive(clap::Subcommand, Debug)]
pub enum SubCommand {
    /// Fits the IOR of built-in or configured presets.
    Fit(FitOptions),

    /// Fits the IOR of a metal given on the command line.
    Eval(EvalOptions),

    /// Prints the known presets.
    List,
}

/// Overrides of the search parameters.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SearchOptions {
    #[clap(
        long,
        help = "IOR candidates as 'start .. stop / step', stop excluded\n[default: 1.001 .. 10 / \
                0.001]"
    )]
    pub ior_range: Option<StepRangeExcl<f32>>,

    #[clap(long, help = "Angular subdivisions used by the fit [default: 200]")]
    pub angle_samples: Option<u32>,

    #[clap(
        long,
        help = "Angular subdivisions used for the RMS errors and the plots\n[default: 1600]"
    )]
    pub display_samples: Option<u32>,
}

/// Where the results go.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputOptions {
    #[clap(
        short,
        long,
        help = "Write the report as CSV to this file instead of printing\na table"
    )]
    pub output: Option<PathBuf>,

    #[clap(long, help = "Write one PNG graph per metal into this directory")]
    pub plot_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
#[clap(about = "Fit the IOR of presets.")]
pub struct FitOptions {
    #[clap(
        short,
        long,
        num_args = 1..,
        help = "Names of the presets to fit (case-insensitive). If not\nspecified, all presets \
                are fitted."
    )]
    pub presets: Vec<String>,

    #[command(flatten)]
    pub search: SearchOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(clap::Args, Debug)]
#[clap(about = "Fit the IOR of a custom metal.")]
pub struct EvalOptions {
    #[clap(long, default_value = "Custom", help = "Name of the metal in the report")]
    pub name: String,

    #[clap(
        long,
        num_args = 3,
        required = true,
        value_names = ["R", "G", "B"],
        help = "Real part n of the refractive index at 650, 550 and 450 nm"
    )]
    pub eta: Vec<f32>,

    #[clap(
        short,
        long,
        num_args = 3,
        required = true,
        value_names = ["R", "G", "B"],
        help = "Extinction coefficient k at 650, 550 and 450 nm"
    )]
    pub k: Vec<f32>,

    #[command(flatten)]
    pub search: SearchOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}
