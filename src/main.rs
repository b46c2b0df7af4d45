use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use firshell::cli::FilterArgs;
use firshell::config::PluginConfig;
use firshell::plugin::FirPlugin;
use firshell::wav::{self, WavAudio};

#[derive(Parser, Debug)]
#[command(name = "firshell")]
#[command(about = "Filter a WAV file through a linear-phase FIR filter", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// TOML config with [audio] and [filter] tables
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    filter: FilterArgs,

    /// Frames per processing block (defaults to audio.max_block_size)
    #[arg(short = 'b', long)]
    block_size: Option<usize>,

    /// Shift the output back by the filter's group delay
    #[arg(long)]
    compensate_latency: bool,
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

    let input = wav::read_wav(&args.input).context("Failed to read input")?;
    if input.channels == 0 {
        anyhow::bail!("{} has no audio channels", args.input.display());
    }
    let channels = usize::from(input.channels);
    let block_size = args.block_size.unwrap_or(config.audio.max_block_size);

    let mut plugin = FirPlugin::new();
    plugin
        .prepare(f64::from(input.sample_rate), block_size, channels)
        .context("Failed to prepare filter")?;
    plugin
        .set_parameters(config.filter)
        .context("Filter design rejected")?;

    // An empty block adopts the new filter so its latency is known up front
    plugin.process_interleaved(&mut []);
    let latency = plugin.latency_samples();

    println!("=== firshell ===");
    println!(
        "Input: {} ({} Hz, {} channel(s), {} frames)",
        args.input.display(),
        input.sample_rate,
        input.channels,
        input.num_frames()
    );
    match &plugin.active_filter().spec {
        Some(spec) => println!(
            "Filter: {:?} {:?}, {} taps, group delay {} samples",
            spec.method,
            spec.filter_type,
            plugin.active_filter().coefficients.len(),
            latency
        ),
        None => println!("Filter: bypass"),
    }

    let pad = if args.compensate_latency { latency * channels } else { 0 };
    let mut samples = input.samples;
    samples.resize(samples.len() + pad, 0.0);

    for block in samples.chunks_mut(block_size * channels) {
        plugin.process_interleaved(block);
    }
    samples.drain(..pad);

    let output = WavAudio {
        samples,
        sample_rate: input.sample_rate,
        channels: input.channels,
    };
    wav::write_wav(&args.output, &output).context("Failed to write output")?;
    println!("Wrote {} frames to {}", output.num_frames(), args.output.display());

    Ok(())
}
