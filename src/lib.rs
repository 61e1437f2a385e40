//! Lightcurve transient screening
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`lc_core`]: binning, statistics and execution engines
//! - [`lc_series`]: the photon series model, rate curves and periodograms
//! - [`lc_transient`]: flare and eclipse detectors
//!
//! ```rust
//! use lightcurve_stats::lc_series::PhotonSeries;
//! use lightcurve_stats::{detect_eclipse, detect_flare};
//!
//! let series = PhotonSeries::new(vec![3; 600], vec![1.0; 600]).unwrap();
//! assert!(!detect_flare(&series, 5, 3.0, 0.3).unwrap());
//! assert!(!detect_eclipse(&series, 300, 3.5, 10.0).unwrap());
//! ```

pub use lc_core;
pub use lc_series;
pub use lc_transient;

pub use lc_core::{Error, Result};
pub use lc_series::PhotonSeries;
pub use lc_transient::{
    detect_eclipse, detect_flare, eclipse_clusters, EclipseDetector, FlareDetector,
    TransientDetector,
};
