//! Eclipse detection
//!
//! An eclipse flattens the cumulative count curve: while the source is
//! occulted, bins collect (almost) no photons and their slope drops to around
//! zero. The screen looks for runs of at least two adjacent bins whose slope
//! falls at or below a cutoff.

use crate::kernel::{RunMergeKernel, SlopeKernel};
use crate::traits::{ConfigurableDetector, TransientDetector, TransientDetectorProperties};
use crate::types::{EclipseReport, Screening};
use lc_core::{
    scalar_sequential, ComputePrimitives, Error, ExecutionEngine, Result, ScalarBackend,
    SequentialEngine, StatisticalKernel,
};
use lc_series::PhotonSeries;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Rule deciding which bin slopes count as eclipsed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EclipseCutoff {
    /// `slope <= max_slope`
    Fixed { max_slope: f64 },
    /// `slope <= (mean(slopes) - floor(rate_ks / 5)) * std(slopes)`
    Adaptive,
}

impl Default for EclipseCutoff {
    fn default() -> Self {
        EclipseCutoff::Fixed { max_slope: 1.0 }
    }
}

impl EclipseCutoff {
    /// Slope at or below which a bin is eclipsed
    pub fn resolve<P: ComputePrimitives>(&self, prims: &P, slopes: &[f64], rate_ks: f64) -> f64 {
        match *self {
            EclipseCutoff::Fixed { max_slope } => max_slope,
            EclipseCutoff::Adaptive => {
                (prims.mean(slopes) - (rate_ks / 5.0).floor()) * prims.std_dev(slopes)
            }
        }
    }
}

/// Eclipse screen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EclipseParameters {
    /// Intervals per slope bin
    pub binsize: usize,
    /// Minimum count rate in counts per kilosecond
    pub rate_threshold: f64,
    /// Minimum exposed time in kiloseconds
    pub time_threshold: f64,
    pub cutoff: EclipseCutoff,
}

impl Default for EclipseParameters {
    fn default() -> Self {
        Self {
            binsize: 300,
            rate_threshold: 3.5,
            time_threshold: 10.0,
            cutoff: EclipseCutoff::default(),
        }
    }
}

impl EclipseParameters {
    pub fn validate(&self) -> Result<()> {
        if self.binsize < 2 {
            return Err(Error::InvalidParameter(format!(
                "eclipse binsize {} must be at least 2",
                self.binsize
            )));
        }
        if !(self.rate_threshold.is_finite() && self.time_threshold.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "eclipse thresholds must be finite (rate {}, time {})",
                self.rate_threshold, self.time_threshold
            )));
        }
        if let EclipseCutoff::Fixed { max_slope } = self.cutoff {
            if max_slope.is_nan() {
                return Err(Error::InvalidParameter("eclipse max_slope is NaN".to_string()));
            }
        }
        Ok(())
    }
}

/// Eclipse detector over a photon series
#[derive(Clone, Debug)]
pub struct EclipseDetector<E: ExecutionEngine = SequentialEngine<ScalarBackend>> {
    kernel: SlopeKernel<E>,
    runs: RunMergeKernel,
    params: EclipseParameters,
}

impl EclipseDetector {
    /// Sequential detector with default parameters
    pub fn with_defaults() -> Self {
        let params = EclipseParameters::default();
        Self {
            kernel: SlopeKernel::new(scalar_sequential(), params.binsize),
            runs: RunMergeKernel::new(params.binsize),
            params,
        }
    }
}

impl Default for EclipseDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E: ExecutionEngine> EclipseDetector<E> {
    /// Create a detector running its per-bin work on `engine`
    pub fn new(engine: E, params: EclipseParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            kernel: SlopeKernel::new(engine, params.binsize),
            runs: RunMergeKernel::new(params.binsize),
            params,
        })
    }

    /// Eclipse runs without the rate and exposure screening
    pub fn clusters(&self, series: &PhotonSeries) -> Result<Vec<Vec<f64>>> {
        Ok(self.scan(series)?.into_runs())
    }

    fn scan(&self, series: &PhotonSeries) -> Result<EclipseReport> {
        let cumulative = series.cumulative_counts_f64();
        let slopes = self.kernel.slopes(series.time_array(), &cumulative)?;
        let cutoff = self
            .params
            .cutoff
            .resolve(self.kernel.primitives(), &slopes, series.rate_ks());
        let runs = self.runs.runs(&slopes, |slope| slope <= cutoff);

        debug!(
            kernel = self.kernel.name(),
            "Eclipse scan: {} bins, cutoff {:.3}, {} runs",
            slopes.len(),
            cutoff,
            runs.len()
        );
        Ok(EclipseReport::new(slopes, cutoff, runs))
    }
}

impl<E: ExecutionEngine> TransientDetectorProperties for EclipseDetector<E> {
    fn algorithm_name(&self) -> &'static str {
        "Eclipse"
    }

    fn minimum_sample_size(&self) -> usize {
        // One closed run needs two bins
        2 * self.params.binsize
    }
}

impl<E: ExecutionEngine> TransientDetector for EclipseDetector<E> {
    type Report = EclipseReport;

    #[instrument(skip(self, series), fields(points = series.len(), binsize = self.params.binsize))]
    fn analyze(&self, series: &PhotonSeries) -> Result<EclipseReport> {
        let rate_ks = series.rate_ks();
        if rate_ks < self.params.rate_threshold {
            debug!("Rate {:.3} ct/ks too low for eclipse screen", rate_ks);
            return Ok(EclipseReport::screened(Screening::LowRate {
                rate_ks,
                required: self.params.rate_threshold,
            }));
        }
        let total_time = series.total_time();
        if total_time < self.params.time_threshold {
            debug!("Exposure {:.3} ks too short for eclipse screen", total_time);
            return Ok(EclipseReport::screened(Screening::ShortExposure {
                total_time,
                required: self.params.time_threshold,
            }));
        }

        self.scan(series)
    }

    fn detect(&self, series: &PhotonSeries) -> Result<bool> {
        Ok(self.analyze(series)?.is_eclipse())
    }
}

impl<E: ExecutionEngine> ConfigurableDetector for EclipseDetector<E> {
    type Parameters = EclipseParameters;

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()> {
        params.validate()?;
        self.kernel = SlopeKernel::new(self.kernel.engine().clone(), params.binsize);
        self.runs = RunMergeKernel::new(params.binsize);
        self.params = params;
        Ok(())
    }
}

/// Screen `series` for an eclipse with the fixed cutoff
pub fn detect_eclipse(
    series: &PhotonSeries,
    binsize: usize,
    rate_threshold: f64,
    time_threshold: f64,
) -> Result<bool> {
    let params = EclipseParameters {
        binsize,
        rate_threshold,
        time_threshold,
        ..EclipseParameters::default()
    };
    EclipseDetector::new(scalar_sequential(), params)?.detect(series)
}

/// Eclipse runs of `series` with the fixed cutoff and no screening
pub fn eclipse_clusters(series: &PhotonSeries, binsize: usize) -> Result<Vec<Vec<f64>>> {
    let params = EclipseParameters {
        binsize,
        ..EclipseParameters::default()
    };
    EclipseDetector::new(scalar_sequential(), params)?.clusters(series)
}
