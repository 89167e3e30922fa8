use crate::config::load_config;
use crate::layout::lay_out_instructions;
use crate::layout_dump::{print_layout_dump, write_layout_dump};
use crate::parser::parse_instructions;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sigbr",
    version,
    about = "Lay out significance brackets over a grouped box plot"
)]
pub struct Args {
    /// Instruction file (JSON/JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file (bracket sizing and mean-marker options)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Lowest bracket tier; overrides the instruction file and the axis top
    #[arg(long = "base-y")]
    pub base_y: Option<f32>,

    /// Log each placement decision to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    let instructions = parse_instructions(&input)?;

    let (layout, markers) = lay_out_instructions(&instructions, &config, args.base_y)?;
    info!(
        brackets = layout.brackets.len(),
        markers = markers.len(),
        y_limit = layout.y_limit,
        "layout complete"
    );

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, &markers)?,
        None => print_layout_dump(&layout, &markers)?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
