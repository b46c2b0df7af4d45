use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use firshell::cli::FilterArgs;
use firshell::config::PluginConfig;
use firshell::design;
use firshell::output::{FilterReport, OutputFormat, create_formatter};

#[derive(Parser, Debug)]
#[command(name = "design_filter")]
#[command(about = "Design FIR coefficients and print them with diagnostics", long_about = None)]
struct Args {
    #[command(flatten)]
    filter: FilterArgs,

    /// Sample rate in Hz (defaults to audio.sample_rate)
    #[arg(short = 's', long)]
    sample_rate: Option<f64>,

    /// TOML config with [audio] and [filter] tables
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: text, json, csv
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Frequencies in Hz at which to report the magnitude response
    #[arg(short = 'p', long, value_delimiter = ',')]
    probe: Vec<f64>,

    /// Increase output verbosity
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PluginConfig::load(path).context("Failed to load config")?,
        None => PluginConfig::default(),
    };
    args.filter
        .apply(&mut config.filter)
        .context("Invalid filter option")?;

    let sample_rate = args
        .sample_rate
        .unwrap_or(f64::from(config.audio.sample_rate));
    let spec = config.filter.to_spec(sample_rate);
    let coefficients = design::design(&spec).context("Filter design rejected")?;

    let report = FilterReport::new(spec, &coefficients, &args.probe);
    let formatter = create_formatter(args.format, args.verbose);
    print!("{}", formatter.format(&report));

    Ok(())
}
