//! Flare detection
//!
//! A flare shows up as a cluster of bins whose cumulative-count slope sits
//! well above the typical slope of the observation. The screen:
//!
//! 1. Skips sources whose cumulative counts are almost perfectly linear in
//!    time (`r^2 > linearity_limit`); nothing can stand out of those. Flat
//!    cumulative counts leave `r` undefined and are skipped as well.
//! 2. Fits a regression slope to every bin of cumulative counts over time.
//! 3. Flags bins whose slope is at least `sigma` standard deviations above
//!    the mean slope.
//! 4. Keeps windows of `binsize` flagged markers whose flagged fraction
//!    reaches `threshold`, rejecting isolated spikes.

use crate::kernel::{bin_start_seconds, DensityClusterKernel, SlopeKernel};
use crate::traits::{ConfigurableDetector, TransientDetector, TransientDetectorProperties};
use crate::types::{FlareReport, Screening};
use lc_core::stats::{correlation_in, SigmaScorer};
use lc_core::{
    scalar_sequential, Error, ExecutionEngine, Result, ScalarBackend, SequentialEngine,
    StatisticalKernel,
};
use lc_series::PhotonSeries;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Flare screen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareParameters {
    /// Intervals per slope bin, also the window length of the density filter
    pub binsize: usize,
    /// Standard deviations above the mean slope that flag a bin
    pub sigma: f64,
    /// Minimum flagged fraction of a density window
    pub threshold: f64,
    /// Squared correlation of cumulative counts with time above which the
    /// source is treated as quiescent
    pub linearity_limit: f64,
}

impl Default for FlareParameters {
    fn default() -> Self {
        Self {
            binsize: 5,
            sigma: 3.0,
            threshold: 0.3,
            linearity_limit: 0.998,
        }
    }
}

impl FlareParameters {
    pub fn validate(&self) -> Result<()> {
        if self.binsize < 2 {
            return Err(Error::InvalidParameter(format!(
                "flare binsize {} must be at least 2",
                self.binsize
            )));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sigma {} must be finite and non-negative",
                self.sigma
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::invalid_fraction("cluster threshold", self.threshold));
        }
        if !(0.0..=1.0).contains(&self.linearity_limit) {
            return Err(Error::invalid_fraction("linearity limit", self.linearity_limit));
        }
        Ok(())
    }
}

/// Flare detector over a photon series
#[derive(Clone, Debug)]
pub struct FlareDetector<E: ExecutionEngine = SequentialEngine<ScalarBackend>> {
    kernel: SlopeKernel<E>,
    clusters: DensityClusterKernel,
    params: FlareParameters,
}

impl FlareDetector {
    /// Sequential detector with default parameters
    pub fn with_defaults() -> Self {
        let params = FlareParameters::default();
        Self {
            kernel: SlopeKernel::new(scalar_sequential(), params.binsize),
            clusters: DensityClusterKernel {
                binsize: params.binsize,
                threshold: params.threshold,
            },
            params,
        }
    }
}

impl Default for FlareDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E: ExecutionEngine> FlareDetector<E> {
    /// Create a detector running its per-bin work on `engine`
    pub fn new(engine: E, params: FlareParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: SlopeKernel::new(engine, params.binsize),
            clusters: DensityClusterKernel::new(params.binsize, params.threshold)?,
            params,
        })
    }
}

impl<E: ExecutionEngine> TransientDetectorProperties for FlareDetector<E> {
    fn algorithm_name(&self) -> &'static str {
        "Flare"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.binsize
    }
}

impl<E: ExecutionEngine> TransientDetector for FlareDetector<E> {
    type Report = FlareReport;

    #[instrument(skip(self, series), fields(points = series.len(), binsize = self.params.binsize))]
    fn analyze(&self, series: &PhotonSeries) -> Result<FlareReport> {
        let binsize = self.params.binsize;
        if series.len() < self.minimum_sample_size() {
            debug!("Series shorter than one bin, skipping flare screen");
            return Ok(FlareReport::screened(Screening::TooShort {
                points: series.len(),
                binsize,
            }));
        }

        let prims = self.kernel.primitives();
        let time = series.time_array();
        let cumulative = series.cumulative_counts_f64();

        let r = correlation_in(prims, time, &cumulative)?;
        if !r.is_finite() {
            debug!("Cumulative counts are flat, skipping flare screen");
            return Ok(FlareReport::screened(Screening::Flat {
                total_count: series.total_count(),
            }));
        }
        let r_squared = r * r;
        if r_squared > self.params.linearity_limit {
            debug!("Quiescent source: r^2 = {:.5}", r_squared);
            return Ok(FlareReport::screened(Screening::Quiescent {
                r_squared,
                limit: self.params.linearity_limit,
            }));
        }

        let slopes = self.kernel.slopes(time, &cumulative)?;
        let scorer = SigmaScorer::new_in(prims, &slopes, self.params.sigma);
        let candidates: Vec<f64> = slopes
            .iter()
            .enumerate()
            .map(|(i, &slope)| {
                if scorer.is_anomalous(slope) {
                    bin_start_seconds(i, binsize)
                } else {
                    0.0
                }
            })
            .collect();
        let clusters = self.clusters.clusters(&candidates);

        debug!(
            "Flare screen: {} bins, slope bound {:.3}, {} clusters kept",
            slopes.len(),
            scorer.bound(),
            clusters.len()
        );
        Ok(FlareReport::new(slopes, scorer.bound(), candidates, clusters))
    }

    fn detect(&self, series: &PhotonSeries) -> Result<bool> {
        Ok(self.analyze(series)?.is_flare())
    }
}

impl<E: ExecutionEngine> ConfigurableDetector for FlareDetector<E> {
    type Parameters = FlareParameters;

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()> {
        params.validate()?;
        self.kernel = SlopeKernel::new(self.kernel.engine().clone(), params.binsize);
        self.clusters = DensityClusterKernel::new(params.binsize, params.threshold)?;
        self.params = params;
        Ok(())
    }
}

/// Screen `series` for a flare on the sequential engine
pub fn detect_flare(
    series: &PhotonSeries,
    binsize: usize,
    sigma: f64,
    threshold: f64,
) -> Result<bool> {
    let params = FlareParameters {
        binsize,
        sigma,
        threshold,
        ..FlareParameters::default()
    };
    FlareDetector::new(scalar_sequential(), params)?.detect(series)
}
