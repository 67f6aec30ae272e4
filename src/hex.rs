// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Binary-record to hexadecimal-record conversion
//!
//! Repacks each line of a binary record file into 4-bit nibbles (left-padding
//! with `0` so the length is a multiple of 4) and emits one uppercase hex
//! group per record, comma-terminated, on a single output line. A 10-bit
//! record therefore becomes three hex digits, not a byte-aligned two.

use crate::error::{InitError, InitResult};
use log::info;
use std::fs;
use std::path::Path;

/// Convert a binary record file to a hex record file.
///
/// Reads every line of `binary_path` (trailing newline stripped), encodes it
/// as an uppercase hex group, and writes all groups to `hex_path` as a single
/// comma-terminated stream (trailing comma after the last group, no
/// newlines). An empty input line yields an empty group followed by its
/// comma. Returns the number of records converted.
///
/// # Errors
///
/// Fails if the source file is missing or unreadable, or if any line
/// contains a character other than `0`/`1` (`InitError::InvalidRecord` with
/// the 1-based line number).
pub fn convert_to_hex(binary_path: &Path, hex_path: &Path) -> InitResult<usize> {
    let content = fs::read_to_string(binary_path).map_err(|e| InitError::io(binary_path, e))?;

    let mut output = String::new();
    let mut records = 0usize;
    for (index, line) in content.lines().enumerate() {
        encode_group(line, index + 1, &mut output)?;
        output.push(',');
        records += 1;
    }

    if let Some(parent) = hex_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| InitError::io(parent, e))?;
        }
    }
    fs::write(hex_path, &output).map_err(|e| InitError::io(hex_path, e))?;

    info!(
        "Converted {} records from {} to {}",
        records,
        binary_path.display(),
        hex_path.display()
    );

    Ok(records)
}

/// Encode one bit-string record as an uppercase hex group, appended to `out`
fn encode_group(bits: &str, line: usize, out: &mut String) -> InitResult<()> {
    if let Some(found) = bits.chars().find(|c| *c != '0' && *c != '1') {
        return Err(InitError::InvalidRecord { line, found });
    }

    // Left-pad to a nibble multiple; a zero-length record stays empty
    let padding = (4 - bits.len() % 4) % 4;
    let padded = format!("{}{}", "0".repeat(padding), bits);

    for nibble in padded.as_bytes().chunks(4) {
        // Chunks are guaranteed pure ASCII '0'/'1' by the check above
        let nibble = std::str::from_utf8(nibble).expect("binary record is ASCII");
        let value = u8::from_str_radix(nibble, 2).expect("binary record is 0/1");
        out.push_str(&format!("{:X}", value));
    }

    Ok(())
}
