// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for generation and conversion

use std::path::{Path, PathBuf};

/// Errors raised by configuration loading, sample generation, and hex conversion
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid binary record on line {line}: found {found:?}, expected only '0'/'1'")]
    InvalidRecord { line: usize, found: char },
}

impl InitError {
    /// Attach a path to an underlying I/O error
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InitError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for generation and conversion operations
pub type InitResult<T> = Result<T, InitError>;
