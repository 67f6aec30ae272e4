// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Signed fixed-point format and two's-complement encoding
//!
//! A format with `int_bits` integer bits and `frac_bits` fractional bits
//! spans `[-2^int_bits, 2^int_bits - 2^-frac_bits]` over a total width of
//! `int_bits + frac_bits + 1` (one sign bit). The range is asymmetric: the
//! positive limit excludes the topmost quantum while the negative limit does
//! not, matching the two's-complement integer range.

/// A signed fixed-point format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPointFormat {
    /// Integer bits, excluding the sign bit
    pub int_bits: u32,
    /// Fractional bits
    pub frac_bits: u32,
}

impl FixedPointFormat {
    /// Create a format. Total width must not exceed 64 bits; configuration
    /// validation enforces that before a format reaches any encoder.
    pub fn new(int_bits: u32, frac_bits: u32) -> Self {
        Self {
            int_bits,
            frac_bits,
        }
    }

    /// Total bit width, including the sign bit
    pub fn width(&self) -> u32 {
        self.int_bits + self.frac_bits + 1
    }

    /// Value of one fractional unit: `2^-frac_bits`
    pub fn quantum(&self) -> f64 {
        2f64.powi(-(self.frac_bits as i32))
    }

    /// Scale factor from real values to integer counts: `2^frac_bits`
    pub fn scale(&self) -> f64 {
        2f64.powi(self.frac_bits as i32)
    }

    /// Largest representable value: `2^int_bits - 2^-frac_bits`
    pub fn max_value(&self) -> f64 {
        2f64.powi(self.int_bits as i32) - self.quantum()
    }

    /// Smallest representable value: `-2^int_bits`
    pub fn min_value(&self) -> f64 {
        -(2f64.powi(self.int_bits as i32))
    }

    /// Saturate a value to the representable range
    pub fn clamp(&self, x: f64) -> f64 {
        if x > self.max_value() {
            self.max_value()
        } else if x < self.min_value() {
            self.min_value()
        } else {
            x
        }
    }

    /// Encode a value (assumed clamped) as a two's-complement bit string of
    /// exactly `width()` characters.
    ///
    /// The value is scaled by `2^frac_bits` and rounded toward zero; the low
    /// `width()` bits of the resulting integer are the record.
    pub fn encode(&self, x: f64) -> String {
        let quantized = (x * self.scale()).trunc() as i64;
        let width = self.width();
        let mask = if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        let bits = (quantized as u64) & mask;
        format!("{:0width$b}", bits, width = width as usize)
    }

    /// Decode a `width()`-character two's-complement bit string back to the
    /// quantized real value. Returns `None` for a wrong length or characters
    /// other than `0`/`1`.
    pub fn decode(&self, bits: &str) -> Option<f64> {
        if bits.len() != self.width() as usize {
            return None;
        }
        let raw = u64::from_str_radix(bits, 2).ok()?;
        // Sign-extend the width-bit value through the full 64-bit register
        let shift = 64 - self.width();
        let signed = ((raw << shift) as i64) >> shift;
        Some(signed as f64 / self.scale())
    }
}
