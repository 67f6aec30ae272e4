// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # glorot-init
//!
//! Generates fixed-point quantized weight/bias initialization data from a
//! Glorot (Xavier) normal distribution for RTL simulation pipelines, and
//! re-encodes the binary record files into hexadecimal text for hardware
//! tooling.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use glorot_init::{load_config, generate_init_file};
//! use rand::SeedableRng;
//!
//! let config = load_config(None).expect("Failed to load config");
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let summary = generate_init_file(
//!     &mut rng,
//!     128,
//!     8,
//!     config.format(),
//!     config.generation.numentries,
//!     &config.binary_path(0),
//!     &config.decimal_path(0),
//! ).expect("generation failed");
//! println!("Wrote {} records (sigma = {:.4})", summary.written, summary.sigma);
//! ```
//!
//! Output files per layer:
//! - `<binary_dir>/<name>.dat` — two's-complement bit strings, one per line (RTL use)
//! - `<decimal_dir>/<name>_DEC.dat` — clamped decimal values, one per line (hlsims use)
//! - `<binary_dir>/<name>_HEX.dat` — single comma-separated line of hex groups

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod fixed_point;
pub mod generator;
pub mod hex;

pub use config::{find_config_file, load_config, GenerationConfig, GlorotConfig, OutputConfig, QuantizationConfig};
pub use error::{InitError, InitResult};
pub use fixed_point::FixedPointFormat;
pub use generator::{generate_init_file, GenerateSummary};
pub use hex::convert_to_hex;
