//! Flare and eclipse detection for X-ray lightcurves
//!
//! Both detectors work on the slope of the cumulative photon count over time,
//! fitted per bin of `binsize` exposed intervals:
//!
//! - **Flare**: bins whose slope is at least `sigma` standard deviations above
//!   the mean slope, kept only where they cluster densely
//! - **Eclipse**: runs of two or more adjacent bins whose slope drops to a
//!   cutoff (flat cumulative counts)
//!
//! Per-bin fits go through an `lc_core::ExecutionEngine`, so the same detector
//! runs sequentially or on rayon (feature `parallel`) with identical results.
//!
//! ## Usage
//!
//! ```rust
//! use lc_series::PhotonSeries;
//! use lc_transient::{detect_flare, eclipse_clusters};
//!
//! let mut counts = vec![1u64; 2000];
//! for c in &mut counts[1000..1100] {
//!     *c = 50;
//! }
//! let series = PhotonSeries::new(counts, vec![1.0; 2000]).unwrap();
//!
//! assert!(detect_flare(&series, 5, 3.0, 0.3).unwrap());
//! assert!(eclipse_clusters(&series, 5).unwrap().is_empty());
//! ```

pub mod eclipse;
pub mod flare;
pub mod kernel;
pub mod traits;
pub mod types;

pub use eclipse::{
    detect_eclipse, eclipse_clusters, EclipseCutoff, EclipseDetector, EclipseParameters,
};
pub use flare::{detect_flare, FlareDetector, FlareParameters};

pub use traits::{ConfigurableDetector, TransientDetector, TransientDetectorProperties};

// Kernels for per-bin operations
pub use kernel::{
    bin_start_seconds, density_clusters, DensityClusterKernel, RunMergeKernel, RunState,
    SlopeKernel,
};

pub use types::{EclipseReport, FlareReport, Screening};
