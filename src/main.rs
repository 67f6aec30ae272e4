use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use glorot_init::{convert_to_hex, generate_init_file, load_config, GlorotConfig, InitError};

/// Glorot-normal fixed-point initialization data generator for RTL pipelines
#[derive(Parser, Debug)]
#[command(name = "glorot-init", version, author, long_about = None)]
struct Cli {
    /// Path to configuration TOML (searched in cwd and parents if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate binary and decimal record files for configured layers
    Generate {
        /// Generate only this layer index (all layers if omitted)
        #[arg(long)]
        layer: Option<usize>,

        /// Seed for deterministic sampling (entropy-seeded if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Convert previously generated binary record files to hex
    Convert {
        /// Convert only this layer index (all layers if omitted)
        #[arg(long)]
        layer: Option<usize>,
    },
    /// Generate all layers, then convert each to hex
    Run {
        /// Seed for deterministic sampling (entropy-seeded if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!(
        "Loaded configuration: {} layers, numentries={}, width={}",
        config.layer_count(),
        config.generation.numentries,
        config.format().width()
    );

    match cli.command {
        Command::Generate { layer, seed } => {
            let mut rng = make_rng(seed);
            for layer in select_layers(&config, layer)? {
                generate_layer(&config, layer, &mut rng)?;
            }
        }
        Command::Convert { layer } => {
            for layer in select_layers(&config, layer)? {
                convert_layer(&config, layer)?;
            }
        }
        Command::Run { seed } => {
            let mut rng = make_rng(seed);
            for layer in 0..config.layer_count() {
                generate_layer(&config, layer, &mut rng)?;
            }
            for layer in 0..config.layer_count() {
                convert_layer(&config, layer)?;
            }
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn select_layers(config: &GlorotConfig, layer: Option<usize>) -> anyhow::Result<Vec<usize>> {
    match layer {
        Some(index) if index >= config.layer_count() => Err(InitError::Config(format!(
            "layer index {} out of range (configuration has {} layers)",
            index,
            config.layer_count()
        ))
        .into()),
        Some(index) => Ok(vec![index]),
        None => Ok((0..config.layer_count()).collect()),
    }
}

fn generate_layer(config: &GlorotConfig, layer: usize, rng: &mut StdRng) -> anyhow::Result<()> {
    let fanin = config.generation.fan_in[layer];
    let fanout = config.generation.fan_out[layer];
    let summary = generate_init_file(
        rng,
        fanin,
        fanout,
        config.format(),
        config.generation.numentries,
        &config.binary_path(layer),
        &config.decimal_path(layer),
    )
    .with_context(|| format!("Failed to generate layer {} ({})", layer, config.layer_name(layer)))?;

    info!(
        "Layer {} ({}): {} samples, sigma={:.4}",
        layer,
        config.layer_name(layer),
        summary.written,
        summary.sigma
    );
    Ok(())
}

fn convert_layer(config: &GlorotConfig, layer: usize) -> anyhow::Result<()> {
    let records = convert_to_hex(&config.binary_path(layer), &config.hex_path(layer))
        .with_context(|| format!("Failed to convert layer {} ({})", layer, config.layer_name(layer)))?;

    info!(
        "Layer {} ({}): {} records -> {}",
        layer,
        config.layer_name(layer),
        records,
        config.hex_path(layer).display()
    );
    Ok(())
}
