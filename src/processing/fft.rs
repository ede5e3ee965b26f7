//! Radix-2 Cooley-Tukey transform and the one-sided magnitude spectrum built on it.
//!
//! Samples are copied into an owned complex work array, zero-padded to the next
//! power of two, transformed in place, and reduced to `(frequency, magnitude)`
//! pairs for the non-negative half of the spectrum.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    /// Scaled by 1/N so that forward then inverse is the identity.
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    pub frequency: f64,
    pub magnitude: f64,
}

/// Samples per second for a timer firing every `tick_period_ms`.
pub fn sampling_rate(tick_period_ms: u64) -> f64 {
    1000.0 / tick_period_ms as f64
}

/// In-place transform. `buffer.len()` must be a power of two.
pub fn fft_in_place(buffer: &mut [Complex64], direction: Direction) {
    let n = buffer.len();
    assert!(
        n.is_power_of_two(),
        "fft length must be a power of two, got {}",
        n
    );
    let bits = n.trailing_zeros();

    // Bit-reversal permutation
    for i in 0..n {
        let j = reverse_bits(i, bits);
        if j > i {
            buffer.swap(i, j);
        }
    }

    // Butterflies
    let sign = match direction {
        Direction::Forward => -1.0,
        Direction::Inverse => 1.0,
    };
    let mut len = 2;
    while len <= n {
        let angle = sign * 2.0 * PI / len as f64;
        let w_len = Complex64::new(angle.cos(), angle.sin());
        let half = len / 2;
        for start in (0..n).step_by(len) {
            let mut w = Complex64::new(1.0, 0.0);
            for k in 0..half {
                let u = buffer[start + k];
                let v = buffer[start + k + half] * w;
                buffer[start + k] = u + v;
                buffer[start + k + half] = u - v;
                w *= w_len;
            }
        }
        len <<= 1;
    }

    if direction == Direction::Inverse {
        let scale = 1.0 / n as f64;
        for value in buffer.iter_mut() {
            *value *= scale;
        }
    }
}

fn reverse_bits(mut index: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (index & 1);
        index >>= 1;
    }
    reversed
}

/// Real samples zero-padded to the next power of two.
pub fn zero_padded(samples: &[f64]) -> Vec<Complex64> {
    let n = samples.len().next_power_of_two();
    let mut padded: Vec<Complex64> = samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
    padded.resize(n, Complex64::new(0.0, 0.0));
    padded
}

// SPECTRAL ANALYZER -----------------------------------------------------------

/// One-sided magnitude spectrum of `samples`.
///
/// Fewer than two samples yields an empty spectrum. Otherwise the output has
/// `N / 2` points spaced `sampling_rate / N` apart, where `N` is the padded length.
pub fn magnitude_spectrum(samples: &[f64], sampling_rate: f64) -> Vec<SpectrumPoint> {
    if samples.len() < 2 {
        return Vec::new();
    }

    let mut work = zero_padded(samples);
    fft_in_place(&mut work, Direction::Forward);

    let n = work.len();
    let df = sampling_rate / n as f64;
    work.iter()
        .take(n / 2)
        .enumerate()
        .map(|(k, value)| SpectrumPoint {
            frequency: k as f64 * df,
            magnitude: value.norm(),
        })
        .collect()
}

/// Highest-magnitude bin, ignoring DC.
pub fn dominant_frequency(spectrum: &[SpectrumPoint]) -> Option<SpectrumPoint> {
    spectrum
        .iter()
        .skip(1)
        .copied()
        .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
}
