//! Photon-count series of one observation
//!
//! A `PhotonSeries` is built once from the per-interval `COUNTS` and
//! `EXPOSURE` columns of a lightcurve and caches everything the detectors
//! read. Intervals without exposure are dropped, not zero-filled, so index
//! `i` of the derived arrays is the `i`-th *exposed* interval.

use lc_core::{bin_sum, bin_windows, Error, Result};
use tracing::debug;

/// Native time resolution of one raw interval, in seconds
pub const CHANDRA_BIN: f64 = 3.241039999999654;

/// Total time reported for a series with no exposed intervals, in kiloseconds
///
/// Keeps `rate_ks` finite. Anything this small means "no data".
pub const EMPTY_TOTAL_TIME: f64 = 1e-7;

/// Immutable lightcurve with cached derived arrays
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonSeries {
    raw_phot: Vec<u64>,
    cumulative_counts: Vec<u64>,
    time_array: Vec<f64>,
    total_count: u64,
    total_time: f64,
    rate_ks: f64,
}

impl PhotonSeries {
    /// Build a series from parallel count and exposure columns
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lc_series::PhotonSeries;
    ///
    /// let series = PhotonSeries::new(vec![3, 9, 4], vec![1.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(series.raw_phot(), &[3, 4]);
    /// assert_eq!(series.cumulative_counts(), &[3, 7]);
    /// ```
    pub fn new(counts: Vec<u64>, exposure: Vec<f64>) -> Result<Self> {
        if counts.len() != exposure.len() {
            return Err(Error::shape("photon series", counts.len(), exposure.len()));
        }

        let raw_phot: Vec<u64> = counts
            .into_iter()
            .zip(exposure)
            .filter(|&(_, exp)| exp > 0.0)
            .map(|(count, _)| count)
            .collect();

        Ok(Self::from_counts(raw_phot))
    }

    /// Series in which every interval was exposed
    pub fn from_counts(raw_phot: Vec<u64>) -> Self {
        let cumulative_counts: Vec<u64> = raw_phot
            .iter()
            .scan(0u64, |total, &count| {
                *total += count;
                Some(*total)
            })
            .collect();

        let time_array: Vec<f64> = (1..=raw_phot.len())
            .map(|i| i as f64 * CHANDRA_BIN / 1000.0)
            .collect();

        let total_count = cumulative_counts.last().copied().unwrap_or(0);
        let total_time = time_array.last().copied().unwrap_or(EMPTY_TOTAL_TIME);
        let rate_ks = total_count as f64 / total_time;

        debug!(
            intervals = raw_phot.len(),
            total_count, total_time, rate_ks, "built photon series"
        );

        Self {
            raw_phot,
            cumulative_counts,
            time_array,
            total_count,
            total_time,
            rate_ks,
        }
    }

    /// Counts of the exposed intervals
    pub fn raw_phot(&self) -> &[u64] {
        &self.raw_phot
    }

    /// Running photon total, one entry per exposed interval
    pub fn cumulative_counts(&self) -> &[u64] {
        &self.cumulative_counts
    }

    /// Interval end times in kiloseconds
    pub fn time_array(&self) -> &[f64] {
        &self.time_array
    }

    /// `raw_phot` as floats
    pub fn raw_phot_f64(&self) -> Vec<f64> {
        self.raw_phot.iter().map(|&c| c as f64).collect()
    }

    /// `cumulative_counts` as floats
    pub fn cumulative_counts_f64(&self) -> Vec<f64> {
        self.cumulative_counts.iter().map(|&c| c as f64).collect()
    }

    /// Number of exposed intervals
    pub fn len(&self) -> usize {
        self.raw_phot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_phot.is_empty()
    }

    /// Net photon count
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Observation length in kiloseconds
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Count rate per kilosecond
    pub fn rate_ks(&self) -> f64 {
        self.rate_ks
    }

    /// Count rate per second
    pub fn rate_s(&self) -> f64 {
        self.rate_ks / 1000.0
    }

    /// Photon sums over full windows of `binsize` exposed intervals
    pub fn bin_counts(&self, binsize: usize) -> Result<Vec<u64>> {
        bin_sum(&self.raw_phot, binsize)
    }

    /// Full windows of `binsize` exposed intervals
    pub fn bin_windows(&self, binsize: usize) -> Result<Vec<&[u64]>> {
        bin_windows(&self.raw_phot, binsize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_arrays() {
        let series = PhotonSeries::new(vec![2, 0, 5, 1], vec![1.0, 1.0, 1.0, 1.0]).unwrap();

        assert_eq!(series.raw_phot(), &[2, 0, 5, 1]);
        assert_eq!(series.cumulative_counts(), &[2, 2, 7, 8]);
        assert_eq!(series.len(), 4);
        assert_eq!(series.total_count(), 8);

        let expected: Vec<f64> = (1..=4).map(|i| i as f64 * CHANDRA_BIN / 1000.0).collect();
        assert_eq!(series.time_array(), &expected[..]);
        assert_eq!(series.total_time(), expected[3]);
        assert_relative_eq!(series.rate_ks(), 8.0 / expected[3]);
        assert_relative_eq!(series.rate_s(), 8.0 / expected[3] / 1000.0);
    }

    #[test]
    fn test_unexposed_intervals_are_dropped() {
        let series = PhotonSeries::new(
            vec![4, 100, 100, 6],
            vec![0.5, 0.0, -1.0, 2.0],
        )
        .unwrap();

        assert_eq!(series.raw_phot(), &[4, 6]);
        assert_eq!(series.cumulative_counts(), &[4, 10]);
        // Time is re-indexed over exposed intervals only
        assert_relative_eq!(series.total_time(), 2.0 * CHANDRA_BIN / 1000.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = PhotonSeries::new(vec![1, 2, 3], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::Shape { left: 3, right: 2, .. }));
    }

    #[test]
    fn test_empty_series_uses_sentinel_time() {
        let series = PhotonSeries::new(vec![5, 5], vec![0.0, 0.0]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.total_time(), EMPTY_TOTAL_TIME);
        assert_eq!(series.rate_ks(), 0.0);
        assert!(series.rate_ks().is_finite());
    }

    #[test]
    fn test_bin_counts() {
        let series = PhotonSeries::from_counts(vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(series.bin_counts(3).unwrap(), vec![6, 15]);
        assert_eq!(series.bin_windows(2).unwrap().len(), 3);
        assert!(series.bin_counts(0).is_err());
    }
}
