use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use halfsplit_cli::{ApiResponse, PhotoSession};
use halfsplit_core::border::{DEFAULT_BLACK_THRESHOLD, DEFAULT_BORDER_FRACTION};
use halfsplit_core::{BorderThresholds, EditParams, ExportEntry, ImageEdits, InvalidRotation, Rotation};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "halfsplit", version)]
#[command(about = "Split half-frame photographs into separate left and right images")]
struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Luminance below which a pixel counts as black (0-255)
    #[arg(long, value_name = "LUMA", global = true, default_value_t = DEFAULT_BLACK_THRESHOLD)]
    black_threshold: u8,

    /// Fraction of black pixels above which a row or column is border
    #[arg(long, value_name = "FRACTION", global = true, default_value_t = DEFAULT_BORDER_FRACTION)]
    border_fraction: f32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print preview data URLs and detected crops for each photograph
    Preview {
        /// Directory the previous selection came from
        #[arg(long, value_name = "DIR")]
        last_dir: Option<PathBuf>,

        /// Photographs to preview (jpg, jpeg, png)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Split photographs and write both halves to a directory
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// Existing directory the halves are written to
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// JSON array of {path, left, right} edits; overrides the flags for those paths
    #[arg(long, value_name = "FILE")]
    edits: Option<PathBuf>,

    /// Clockwise rotation of the left half in degrees
    #[arg(long, value_name = "DEG", default_value_t = 0, allow_negative_numbers = true)]
    rotate_left: i32,

    /// Clockwise rotation of the right half in degrees
    #[arg(long, value_name = "DEG", default_value_t = 0, allow_negative_numbers = true)]
    rotate_right: i32,

    /// Keep dark frame borders instead of cropping them away
    #[arg(long)]
    keep_border: bool,

    /// Do not write the left half
    #[arg(long)]
    skip_left: bool,

    /// Do not write the right half
    #[arg(long)]
    skip_right: bool,

    /// Photographs to split
    #[arg(value_name = "FILE", required_unless_present = "edits")]
    files: Vec<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("border fraction must be between 0 and 1, got {0}")]
    InvalidBorderFraction(f32),

    #[error(transparent)]
    InvalidRotation(#[from] InvalidRotation),

    #[error("failed to read {path}: {source}")]
    ReadEdits { path: PathBuf, source: io::Error },

    #[error("invalid edits in {path}: {source}")]
    ParseEdits {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn configure_logs(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    let mut cfg = ConfigBuilder::new();
    cfg.add_filter_allow_str("halfsplit");

    if let Err(err) = TermLogger::init(level, cfg.build(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("halfsplit: logging unavailable: {}", err);
    }
}

fn thresholds(cli: &Cli) -> Result<BorderThresholds, CliError> {
    if !(0.0..=1.0).contains(&cli.border_fraction) {
        return Err(CliError::InvalidBorderFraction(cli.border_fraction));
    }
    Ok(BorderThresholds {
        black_threshold: cli.black_threshold,
        border_fraction: cli.border_fraction,
    })
}

/// Edits shared by every file named on the command line.
fn flag_edits(args: &ExportArgs) -> Result<ImageEdits, CliError> {
    let half = |skip: bool, degrees: i32| -> Result<EditParams, CliError> {
        Ok(EditParams {
            export: !skip,
            rotation: Rotation::try_from(degrees)?,
            remove_border: !args.keep_border,
            crop: None,
        })
    };
    Ok(ImageEdits {
        left: half(args.skip_left, args.rotate_left)?,
        right: half(args.skip_right, args.rotate_right)?,
    })
}

/// Entries for the command-line files, with `--edits` entries replacing or
/// extending them.
fn export_entries(args: &ExportArgs) -> Result<Vec<ExportEntry>, CliError> {
    let defaults = flag_edits(args)?;
    let mut entries: Vec<ExportEntry> = args
        .files
        .iter()
        .map(|path| ExportEntry::new(path.clone(), defaults))
        .collect();

    if let Some(path) = &args.edits {
        let text = fs::read_to_string(path).map_err(|source| CliError::ReadEdits {
            path: path.clone(),
            source,
        })?;
        let overrides: Vec<ExportEntry> =
            serde_json::from_str(&text).map_err(|source| CliError::ParseEdits {
                path: path.clone(),
                source,
            })?;

        for entry in overrides {
            match entries.iter_mut().find(|existing| existing.path == entry.path) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }
    }
    Ok(entries)
}

fn print_response(response: &impl ApiResponse) -> Result<bool, CliError> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(response.is_success())
}

fn run(cli: Cli) -> Result<bool, CliError> {
    let mut session = PhotoSession::new(thresholds(&cli)?);

    match cli.command {
        Command::Preview { last_dir, files } => {
            print_response(&session.select_photos(&files, last_dir.as_deref()))
        }
        Command::Export(args) => {
            let entries = export_entries(&args)?;
            let selected = session.select_output_directory(Some(args.output));
            if !selected.success {
                return print_response(&selected);
            }
            print_response(&session.export_all(&entries))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    configure_logs(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("halfsplit: {}", err);
            ExitCode::from(2)
        }
    }
}
