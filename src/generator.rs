// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Glorot-normal sample generation and fixed-point record writing
//!
//! Draws i.i.d. samples from a zero-mean Gaussian with standard deviation
//! `sqrt(2/(fi+fo))` (Glorot/Xavier normal), saturates each sample to the
//! fixed-point range, and writes two parallel record files: two's-complement
//! bit strings for RTL consumption and the clamped decimal values for
//! high-level simulation.

use crate::error::{InitError, InitResult};
use crate::fixed_point::FixedPointFormat;
use log::{debug, info};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Outcome of one generation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateSummary {
    /// Standard deviation of the sampling distribution: `sqrt(2/(fi+fo))`
    pub sigma: f64,
    /// Number of records written to each of the two files
    pub written: usize,
}

/// Generate `numentries` Glorot-normal samples for a layer with fan-in `fanin`
/// and fan-out `fanout`, and write the parallel binary and decimal record
/// files.
///
/// Each sample is clamped to the format's range before being written: the
/// decimal file receives the clamped (pre-quantization) value, the binary
/// file its two's-complement encoding. Both files are created fresh; missing
/// parent directories are created first.
///
/// # Errors
///
/// Rejects `fanin + fanout == 0` and `numentries == 0` before touching any
/// file. I/O failures surface with the offending path; a partially written
/// file is left as-is.
pub fn generate_init_file<R: Rng>(
    rng: &mut R,
    fanin: u32,
    fanout: u32,
    format: FixedPointFormat,
    numentries: usize,
    binary_path: &Path,
    decimal_path: &Path,
) -> InitResult<GenerateSummary> {
    if fanin + fanout == 0 {
        return Err(InitError::Config(
            "fan_in + fan_out must be positive".to_string(),
        ));
    }
    if numentries == 0 {
        return Err(InitError::Config("numentries must be positive".to_string()));
    }

    let sigma = (2.0 / (fanin + fanout) as f64).sqrt();
    let normal = Normal::new(0.0, sigma)
        .map_err(|e| InitError::Config(format!("invalid sampling distribution: {}", e)))?;

    debug!(
        "Sampling {} entries: fi={}, fo={}, sigma={:.6}, width={}",
        numentries,
        fanin,
        fanout,
        sigma,
        format.width()
    );

    let mut binary = BufWriter::new(create_file(binary_path)?);
    let mut decimal = BufWriter::new(create_file(decimal_path)?);

    for _ in 0..numentries {
        let sample = format.clamp(normal.sample(rng));
        writeln!(binary, "{}", format.encode(sample))
            .map_err(|e| InitError::io(binary_path, e))?;
        writeln!(decimal, "{}", sample).map_err(|e| InitError::io(decimal_path, e))?;
    }

    binary.flush().map_err(|e| InitError::io(binary_path, e))?;
    decimal.flush().map_err(|e| InitError::io(decimal_path, e))?;

    info!(
        "Wrote {} records to {} and {}",
        numentries,
        binary_path.display(),
        decimal_path.display()
    );

    Ok(GenerateSummary {
        sigma,
        written: numentries,
    })
}

fn create_file(path: &Path) -> InitResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| InitError::io(parent, e))?;
        }
    }
    File::create(path).map_err(|e| InitError::io(path, e))
}
