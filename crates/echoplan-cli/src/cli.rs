use clap::{Args, Parser, Subcommand, ValueEnum};
use echoplan::core::models::well::PlateFormat;
use echoplan::engine::config::RoundingMode;
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
    about = "echoplan - Plans acoustic liquid handler pick lists for pooling DNA parts into Golden Gate assemblies.",
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
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan the pick list that assembles every destination well of an assembly matrix.
    Plan(PlanArgs),
    /// Subtract an executed pick list from the library stock volumes.
    UpdateLibrary(UpdateLibraryArgs),
    /// Plan a pick list that spots a fixed volume over rectangular plate regions.
    Spot(SpotArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingArg {
    /// Ties round away from zero.
    HalfUp,
    /// Ties round to the even step.
    HalfEven,
}

impl From<RoundingArg> for RoundingMode {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::HalfUp => RoundingMode::HalfUp,
            RoundingArg::HalfEven => RoundingMode::HalfEven,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateFormatArg {
    #[value(name = "96")]
    Wells96,
    #[value(name = "384")]
    Wells384,
    #[value(name = "1536")]
    Wells1536,
}

impl From<PlateFormatArg> for PlateFormat {
    fn from(arg: PlateFormatArg) -> Self {
        match arg {
            PlateFormatArg::Wells96 => PlateFormat::Wells96,
            PlateFormatArg::Wells384 => PlateFormat::Wells384,
            PlateFormatArg::Wells1536 => PlateFormat::Wells1536,
        }
    }
}

/// Arguments for the `plan` subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    // --- Core Arguments ---
    /// Path to the part library CSV (well, part, conc (nM), Vol (uL) in plate).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub library: PathBuf,

    /// Path to the assembly matrix CSV (targwell plus one column per part role).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub assembly: PathBuf,

    /// Path for the pick list CSV to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Target Overrides ---
    /// Override the final concentration of every part, in nM.
    #[arg(long, value_name = "FLOAT")]
    pub target_concentration: Option<f64>,

    /// Override the final volume of every destination well, in nL.
    #[arg(long, value_name = "NL")]
    pub total_volume: Option<u32>,

    /// Override the part name of the diluent reservoir.
    #[arg(long, value_name = "NAME")]
    pub diluent: Option<String>,

    /// Override how volumes exactly halfway between two steps are rounded.
    #[arg(long, value_enum, value_name = "MODE")]
    pub rounding: Option<RoundingArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S device.safety-buffer-ul=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `update-library` subcommand.
#[derive(Args, Debug)]
pub struct UpdateLibraryArgs {
    /// Path to the part library CSV the pick list drew from.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub library: PathBuf,

    /// Path to the executed pick list CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pick_list: PathBuf,

    /// Write the updated library here instead of overwriting the input library.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `spot` subcommand.
#[derive(Args, Debug)]
pub struct SpotArgs {
    /// Path for the pick list CSV to write.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Destination region as TOP_LEFT:BOTTOM_RIGHT (e.g. 'A1:C5').
    /// Can be used multiple times; regions are spotted in the given order.
    #[arg(short, long = "region", value_name = "TL:BR")]
    pub regions: Vec<String>,

    /// Source well shot into every region given on the command line.
    #[arg(short, long, value_name = "WELL")]
    pub source_well: Option<String>,

    /// Volume per spot, in nL.
    #[arg(long, value_name = "NL")]
    pub volume: Option<u32>,

    /// Empty wells left between neighbouring spots.
    #[arg(long, value_name = "INT", default_value_t = 0)]
    pub spacing: u32,

    /// Override the destination plate layout.
    #[arg(long, value_enum, value_name = "WELLS")]
    pub plate_format: Option<PlateFormatArg>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S device.granularity-nl=25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
