//! Transient detection kernels
//!
//! The building blocks the detectors compose:
//! - `SlopeKernel`: per-bin regression slopes of cumulative counts over time
//! - `DensityClusterKernel`: keeps dense windows of flagged bins
//! - `RunMergeKernel`: groups adjacent bins that satisfy a slope predicate

use lc_core::stats::{sanitize_slope, Regression};
use lc_core::{bin_count, bin_windows, Error, ExecutionEngine, Result, StatisticalKernel};
use lc_series::CHANDRA_BIN;

/// Start time in seconds of bin `bin` for bins of `binsize` intervals
#[inline]
pub fn bin_start_seconds(bin: usize, binsize: usize) -> f64 {
    (bin * binsize) as f64 * CHANDRA_BIN
}

/// Kernel computing one regression slope per bin
///
/// Bins are independent, so they are fitted through the engine's
/// `execute_batch` and come back in bin order. Non-finite slopes (from bins
/// with no spread in time or counts) are replaced by `0.0` here and nowhere
/// else.
#[derive(Clone, Debug)]
pub struct SlopeKernel<E: ExecutionEngine> {
    engine: E,
    binsize: usize,
}

impl<E: ExecutionEngine> SlopeKernel<E> {
    pub fn new(engine: E, binsize: usize) -> Self {
        Self { engine, binsize }
    }

    pub fn binsize(&self) -> usize {
        self.binsize
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of full bins over `len` points
    pub fn bin_count(&self, len: usize) -> usize {
        bin_count(len, self.binsize)
    }

    /// Sanitized slope of `y` over `x` for every full bin
    pub fn slopes(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        if x.len() != y.len() {
            return Err(Error::shape("binned slopes", x.len(), y.len()));
        }

        let x_bins = bin_windows(x, self.binsize)?;
        let y_bins = bin_windows(y, self.binsize)?;
        let prims = self.engine.primitives();

        self.engine
            .execute_batch(x_bins.len(), |i| {
                Regression::fit_in(prims, x_bins[i], y_bins[i]).map(|fit| sanitize_slope(fit.slope))
            })
            .into_iter()
            .collect()
    }
}

impl<E: ExecutionEngine> StatisticalKernel for SlopeKernel<E> {
    type Primitives = E::Primitives;

    fn primitives(&self) -> &Self::Primitives {
        self.engine.primitives()
    }
}

/// Kernel keeping windows of candidate markers that are dense enough
///
/// Candidates hold `0.0` for unflagged bins and a positive timestamp for
/// flagged ones. A lone flagged bin among unflagged neighbours is treated as
/// noise; a window whose flagged fraction reaches the threshold is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityClusterKernel {
    pub(crate) binsize: usize,
    pub(crate) threshold: f64,
}

impl DensityClusterKernel {
    pub fn new(binsize: usize, threshold: f64) -> Result<Self> {
        if binsize == 0 {
            return Err(Error::zero_binsize("density clustering"));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::invalid_fraction("cluster threshold", threshold));
        }
        Ok(Self { binsize, threshold })
    }

    /// First entry of every window whose non-zero fraction is `>= threshold`
    ///
    /// The emitted value is the window's first candidate as-is, which is the
    /// `0.0` marker when that particular bin was not flagged.
    pub fn clusters(&self, candidates: &[f64]) -> Vec<f64> {
        candidates
            .chunks_exact(self.binsize)
            .filter(|window| {
                let flagged = window.iter().filter(|&&c| c > 0.0).count();
                flagged as f64 / self.binsize as f64 >= self.threshold
            })
            .map(|window| window[0])
            .collect()
    }
}

/// One-shot form of [`DensityClusterKernel::clusters`]
pub fn density_clusters(candidates: &[f64], binsize: usize, threshold: f64) -> Result<Vec<f64>> {
    Ok(DensityClusterKernel::new(binsize, threshold)?.clusters(candidates))
}

/// State of the run-merge scan
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// The previous bin did not satisfy the predicate
    NotInRun,
    /// Timestamps of the open run, the previous bin included
    InRun(Vec<f64>),
}

impl RunState {
    /// Advance by one bin; a closed run is returned when the bin ends it
    pub fn step(self, matches: bool, timestamp: f64) -> (Self, Option<Vec<f64>>) {
        match (self, matches) {
            (RunState::NotInRun, true) => (RunState::InRun(vec![timestamp]), None),
            (RunState::InRun(mut run), true) => {
                run.push(timestamp);
                (RunState::InRun(run), None)
            }
            (RunState::InRun(run), false) => (RunState::NotInRun, Some(run)),
            (RunState::NotInRun, false) => (RunState::NotInRun, None),
        }
    }

    /// Close whatever run is still open at the end of the scan
    pub fn finish(self) -> Option<Vec<f64>> {
        match self {
            RunState::InRun(run) => Some(run),
            RunState::NotInRun => None,
        }
    }
}

/// Kernel grouping adjacent bins whose slope satisfies a predicate
///
/// Runs of a single bin are dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunMergeKernel {
    binsize: usize,
}

impl RunMergeKernel {
    pub fn new(binsize: usize) -> Self {
        Self { binsize }
    }

    /// Runs of bin timestamps where `predicate(slope)` holds, each longer than one bin
    pub fn runs<F>(&self, slopes: &[f64], predicate: F) -> Vec<Vec<f64>>
    where
        F: Fn(f64) -> bool,
    {
        let (state, mut runs) = slopes.iter().enumerate().fold(
            (RunState::NotInRun, Vec::new()),
            |(state, mut runs), (i, &slope)| {
                let (next, closed) =
                    state.step(predicate(slope), bin_start_seconds(i, self.binsize));
                runs.extend(closed);
                (next, runs)
            },
        );
        runs.extend(state.finish());

        runs.retain(|run: &Vec<f64>| run.len() > 1);
        runs
    }
}
