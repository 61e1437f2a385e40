//! Photon-count series model for X-ray lightcurves
//!
//! `PhotonSeries` is the single input to every detector. It is built once from
//! the count and exposure columns of an observation and caches the exposed
//! counts, their running total and the interval time stamps.
//!
//! Besides the series itself this crate carries the derived data products that
//! do not need a detector:
//!
//! - **RateCurve**: photon sums and count rates over fixed-duration groups
//! - **Periodogram**: one-sided power spectral density and dominant period
//! - **Poisson model**: count probabilities under a constant rate
//!
//! # Example
//!
//! ```rust
//! use lc_series::{PhotonSeries, RateCurve, CHANDRA_BIN};
//!
//! let counts = vec![4u64; 1000];
//! let exposure = vec![1.0; 1000];
//! let series = PhotonSeries::new(counts, exposure).unwrap();
//!
//! assert_eq!(series.total_count(), 4000);
//! assert!((series.rate_s() - 4.0 / CHANDRA_BIN).abs() < 1e-9);
//!
//! let curve = RateCurve::from_series(&series, 500.0).unwrap();
//! assert_eq!(curve.len(), 6);
//! ```

pub mod poisson;
pub mod rate;
pub mod series;
pub mod spectrum;

pub use poisson::poisson_pmf;
pub use rate::{RateCurve, DEFAULT_BINNING_SECONDS};
pub use series::{PhotonSeries, CHANDRA_BIN, EMPTY_TOTAL_TIME};
pub use spectrum::Periodogram;
