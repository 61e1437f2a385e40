//! Binned count-rate curve
//!
//! Groups exposed intervals into bins of a fixed duration and reports the
//! photon sum and mean rate of each group. This is the data behind a binned
//! lightcurve plot; rendering it is left to the caller.

use crate::series::{PhotonSeries, CHANDRA_BIN};
use lc_core::{bin_sum, Error, Result};

/// Default group duration in seconds
pub const DEFAULT_BINNING_SECONDS: f64 = 500.0;

/// Photon sums and rates over groups of whole intervals
#[derive(Debug, Clone, PartialEq)]
pub struct RateCurve {
    group_size: usize,
    sums: Vec<u64>,
    rates: Vec<f64>,
    start_times: Vec<f64>,
}

impl RateCurve {
    /// Group `series` into bins of `binning` seconds
    ///
    /// The group holds `floor(binning / CHANDRA_BIN)` intervals; a binning
    /// shorter than one interval is rejected.
    pub fn from_series(series: &PhotonSeries, binning: f64) -> Result<Self> {
        if !(binning.is_finite() && binning >= CHANDRA_BIN) {
            return Err(Error::InvalidParameter(format!(
                "binning {binning}s is shorter than one {CHANDRA_BIN}s interval"
            )));
        }
        let group_size = (binning / CHANDRA_BIN) as usize;

        let sums = bin_sum(series.raw_phot(), group_size)?;
        let span = CHANDRA_BIN * group_size as f64;
        let rates = sums.iter().map(|&s| s as f64 / span).collect();
        let start_times = (0..sums.len())
            .map(|j| (j * group_size) as f64 * CHANDRA_BIN / 1000.0)
            .collect();

        Ok(Self {
            group_size,
            sums,
            rates,
            start_times,
        })
    }

    /// Intervals per group
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Net photons per group
    pub fn sums(&self) -> &[u64] {
        &self.sums
    }

    /// Counts per second for each group
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Group start times in kiloseconds
    pub fn start_times(&self) -> &[f64] {
        &self.start_times
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Rate of each group repeated once per interval it covers
    ///
    /// Aligns with the first `len() * group_size()` entries of the series'
    /// time array, giving a step curve.
    pub fn step_rates(&self) -> Vec<f64> {
        self.rates
            .iter()
            .flat_map(|&r| std::iter::repeat(r).take(self.group_size))
            .collect()
    }
}
