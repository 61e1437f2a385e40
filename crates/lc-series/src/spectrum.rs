//! Power spectral density of the photon counts
//!
//! One-sided periodogram of `raw_phot` at unit sampling frequency (one sample
//! per interval): mean removed, boxcar window, density scaling
//! `|X_k|^2 / n`, with every bin except DC and Nyquist doubled.

use crate::series::{PhotonSeries, CHANDRA_BIN};
use rustfft::{num_complex::Complex, FftPlanner};
use tracing::debug;

/// Frequencies (cycles per interval) and their spectral density
#[derive(Debug, Clone, PartialEq)]
pub struct Periodogram {
    frequencies: Vec<f64>,
    power: Vec<f64>,
}

impl Periodogram {
    /// Periodogram of a series' exposed-interval counts
    pub fn of(series: &PhotonSeries) -> Self {
        Self::from_samples(&series.raw_phot_f64())
    }

    /// Periodogram of an arbitrary evenly spaced signal
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                frequencies: vec![],
                power: vec![],
            };
        }

        let mean = samples.iter().sum::<f64>() / n as f64;
        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .map(|&x| Complex::new(x - mean, 0.0))
            .collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let n_freq = n / 2 + 1;
        let nyquist = if n % 2 == 0 { Some(n / 2) } else { None };
        let scale = 1.0 / n as f64;

        let power: Vec<f64> = buffer[..n_freq]
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let density = c.norm_sqr() * scale;
                if k == 0 || Some(k) == nyquist {
                    density
                } else {
                    2.0 * density
                }
            })
            .collect();
        let frequencies = (0..n_freq).map(|k| k as f64 / n as f64).collect();

        Self { frequencies, power }
    }

    /// Frequencies in cycles per interval
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Spectral density at each frequency
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Frequency with the largest power, excluding DC
    pub fn dominant_frequency(&self) -> Option<f64> {
        let (idx, &peak) = self
            .power
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;

        if peak > 0.0 {
            Some(self.frequencies[idx])
        } else {
            None
        }
    }

    /// Period of the dominant frequency in seconds
    ///
    /// `None` for fewer than two samples or a flat signal.
    pub fn dominant_period_seconds(&self) -> Option<f64> {
        let period = self.dominant_frequency().map(|f| CHANDRA_BIN / f);
        debug!(?period, "dominant period");
        period
    }
}
