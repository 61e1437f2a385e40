//! Core traits for transient detection
//!
//! Detectors are layered the same way throughout the workspace:
//! - Detectors (this crate) screen a whole `PhotonSeries`
//! - Kernels (`crate::kernel`) do the per-bin work
//! - Primitives and engines come from `lc-core`

use lc_core::Result;
use lc_series::PhotonSeries;

/// Properties of a detector that don't depend on the input
pub trait TransientDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum number of exposed intervals that yields a bin
    fn minimum_sample_size(&self) -> usize;
}

/// Screen a photon series for one kind of transient
pub trait TransientDetector: TransientDetectorProperties {
    /// Detailed result of one screen
    type Report;

    /// Run the full screen and keep every intermediate product
    fn analyze(&self, series: &PhotonSeries) -> Result<Self::Report>;

    /// Whether the series shows the transient
    fn detect(&self, series: &PhotonSeries) -> Result<bool>;

    /// Screen several series with the same detector
    ///
    /// Default implementation processes sequentially
    fn detect_batch(&self, series: &[&PhotonSeries]) -> Result<Vec<bool>> {
        series.iter().map(|s| self.detect(s)).collect()
    }
}

/// Parameter access for detectors
///
/// Parameters are validated on every change, so an invalid set never reaches
/// a detector.
pub trait ConfigurableDetector {
    type Parameters;

    fn parameters(&self) -> &Self::Parameters;
    fn set_parameters(&mut self, params: Self::Parameters) -> Result<()>;
}
