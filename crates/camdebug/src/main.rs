use std::path::PathBuf;
use std::process::ExitCode;

use camdebug::{AxisDirection, Options, VectorLayout};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// `u` is a position, `v` a direction drawn from it
    PositionDirection,
    /// Both vectors drawn from the origin
    FromOrigin,
}

impl From<LayoutArg> for VectorLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::PositionDirection => VectorLayout::PositionDirection,
            LayoutArg::FromOrigin => VectorLayout::FromOrigin,
        }
    }
}

/// Live 3D view of camera vectors read from the last line of a log file
#[derive(Parser, Debug)]
#[command(name = "camdebug", version)]
struct Cli {
    /// Camera log to poll [default: camera_out.txt]
    path: Option<PathBuf>,

    /// JSON options file; command-line flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Milliseconds between polls
    #[arg(short, long, value_name = "MS")]
    interval: Option<u64>,

    /// How u and v are laid out
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// World axis shown as up, e.g. +y, -z
    #[arg(long, value_parser = parse_axis, allow_hyphen_values = true)]
    up: Option<AxisDirection>,

    /// Render the latest sample to an image and exit
    #[arg(long, value_name = "FILE", conflicts_with = "print")]
    snapshot: Option<PathBuf>,

    /// Snapshot width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Snapshot height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Print the latest sample and exit
    #[arg(long)]
    print: bool,
}

fn parse_axis(value: &str) -> Result<AxisDirection, String> {
    AxisDirection::from_name(value)
        .ok_or_else(|| format!("'{value}' is not an axis (expected one of +x, -x, +y, -y, +z, -z)"))
}

impl Cli {
    /// Loads the config file, if any, and applies the flags on top.
    fn options(&self) -> camdebug::Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        if let Some(path) = &self.path {
            options.data_path.clone_from(path);
        }
        if let Some(interval) = self.interval {
            options.poll_interval_ms = interval;
        }
        if let Some(layout) = self.layout {
            options.vector_layout = layout.into();
        }
        if let Some(up) = self.up {
            options.up_direction = up;
        }
        options.validate()?;
        Ok(options)
    }
}

fn run(cli: &Cli) -> camdebug::Result<()> {
    let options = cli.options()?;

    if cli.print {
        match camdebug::read_last_sample(&options.data_path)? {
            Some(sample) => println!("{sample}"),
            None => println!("{}: no samples yet", options.data_path.display()),
        }
        return Ok(());
    }

    if let Some(path) = &cli.snapshot {
        let sample = camdebug::read_last_sample(&options.data_path)?;
        if sample.is_none() {
            log::warn!("{} holds no samples; drawing axes only", options.data_path.display());
        }
        return camdebug::render_to_file(path, &options, sample.as_ref(), cli.width, cli.height);
    }

    camdebug::run(options)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
