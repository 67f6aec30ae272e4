// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration loading and validation
//!
//! All generation parameters live in `glorot_init.toml` and map onto the
//! structs below. Every section and field has a default, so a partial file
//! (or none at all, via `GlorotConfig::default()`) is valid input.

use crate::error::{InitError, InitResult};
use crate::fixed_point::FixedPointFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, searched in the working directory and parents
pub const CONFIG_FILE_NAME: &str = "glorot_init.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GlorotConfig {
    pub quantization: QuantizationConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

/// Fixed-point format shared across all layer configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuantizationConfig {
    /// Integer bits, excluding the sign bit
    pub int_bits: u32,
    /// Fractional bits
    pub frac_bits: u32,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            int_bits: 2,
            frac_bits: 7,
        }
    }
}

/// Per-layer fan counts and sample count
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Samples per generated file
    pub numentries: usize,
    /// Fan-in per layer, parallel to `fan_out`
    pub fan_in: Vec<u32>,
    /// Fan-out per layer, parallel to `fan_in`
    pub fan_out: Vec<u32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            numentries: 2000,
            fan_in: vec![128, 32],
            fan_out: vec![8, 8],
        }
    }
}

/// Output directory roots, resolved once at load time
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for binary and hex record files (RTL use)
    pub binary_dir: PathBuf,
    /// Directory for decimal record files (hlsims use)
    pub decimal_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            binary_dir: PathBuf::from("gaussian_list"),
            decimal_dir: PathBuf::from("dnn-hlsims/network_models/wtbias_initdata"),
        }
    }
}

impl GlorotConfig {
    /// Number of configured layers
    pub fn layer_count(&self) -> usize {
        self.generation.fan_in.len()
    }

    /// The shared fixed-point format
    pub fn format(&self) -> FixedPointFormat {
        FixedPointFormat::new(self.quantization.int_bits, self.quantization.frac_bits)
    }

    /// Base file name for a layer, embedding fan sum and bit widths
    /// (e.g. `s136_frc7_int2` for fi=128, fo=8, frac_bits=7, int_bits=2)
    pub fn layer_name(&self, layer: usize) -> String {
        let fanin = self.generation.fan_in[layer];
        let fanout = self.generation.fan_out[layer];
        format!(
            "s{}_frc{}_int{}",
            fanin + fanout,
            self.quantization.frac_bits,
            self.quantization.int_bits
        )
    }

    /// Path of the binary record file for a layer
    pub fn binary_path(&self, layer: usize) -> PathBuf {
        self.output
            .binary_dir
            .join(format!("{}.dat", self.layer_name(layer)))
    }

    /// Path of the decimal record file for a layer
    pub fn decimal_path(&self, layer: usize) -> PathBuf {
        self.output
            .decimal_dir
            .join(format!("{}_DEC.dat", self.layer_name(layer)))
    }

    /// Path of the hex record file for a layer
    pub fn hex_path(&self, layer: usize) -> PathBuf {
        self.output
            .binary_dir
            .join(format!("{}_HEX.dat", self.layer_name(layer)))
    }

    /// Validate the complete configuration, rejecting it before any I/O
    ///
    /// Checks for:
    /// - parallel `fan_in`/`fan_out` sequences, non-empty, all strictly positive
    /// - non-zero sample count
    /// - total fixed-point width of at most 64 bits
    ///
    /// # Errors
    ///
    /// Returns `InitError::Config` listing every failed check
    pub fn validate(&self) -> InitResult<()> {
        let mut errors = Vec::new();

        if self.generation.fan_in.len() != self.generation.fan_out.len() {
            errors.push(format!(
                "generation.fan_in has {} entries but generation.fan_out has {}",
                self.generation.fan_in.len(),
                self.generation.fan_out.len()
            ));
        }
        if self.generation.fan_in.is_empty() {
            errors.push("generation.fan_in must list at least one layer".to_string());
        }
        for (layer, (fanin, fanout)) in self
            .generation
            .fan_in
            .iter()
            .zip(self.generation.fan_out.iter())
            .enumerate()
        {
            if *fanin == 0 || *fanout == 0 {
                errors.push(format!(
                    "layer {}: fan_in and fan_out must be strictly positive (got fi={}, fo={})",
                    layer, fanin, fanout
                ));
            }
        }
        if self.generation.numentries == 0 {
            errors.push("generation.numentries must be positive".to_string());
        }
        // Width bound keeps the encoding within a u64 bit mask
        let width = self.quantization.int_bits as u64 + self.quantization.frac_bits as u64 + 1;
        if width > 64 {
            errors.push(format!(
                "quantization width {} exceeds 64 bits (int_bits={}, frac_bits={}, plus sign)",
                width,
                self.quantization.int_bits,
                self.quantization.frac_bits
            ));
        }

        if !errors.is_empty() {
            let messages = errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(InitError::Config(format!(
                "Configuration validation failed:\n{}",
                messages
            )));
        }

        Ok(())
    }
}

/// Find the configuration file
///
/// Search order:
/// 1. `GLOROT_INIT_CONFIG` environment variable
/// 2. Current working directory: `./glorot_init.toml`
/// 3. Up to 3 parent directories
///
/// # Errors
///
/// Returns `InitError::Config` if no config file is found in any location
pub fn find_config_file() -> InitResult<PathBuf> {
    if let Ok(env_path) = env::var("GLOROT_INIT_CONFIG") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(InitError::Config(format!(
            "Config file specified by GLOROT_INIT_CONFIG not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.clone();
        for _ in 0..3 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    Err(InitError::Config(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet GLOROT_INIT_CONFIG to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load and validate configuration from a TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, searches for one.
///
/// # Errors
///
/// Returns an error if the config file is not found, contains invalid TOML,
/// or fails validation
pub fn load_config(config_path: Option<&Path>) -> InitResult<GlorotConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file).map_err(|e| InitError::io(&config_file, e))?;
    let config: GlorotConfig = toml::from_str(&content)
        .map_err(|e| InitError::Config(format!("Invalid TOML in {}: {}", config_file.display(), e)))?;
    config.validate()?;

    Ok(config)
}
