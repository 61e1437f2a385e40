//! Core types and statistics for lightcurve analysis
//!
//! This crate provides the building blocks shared by the series model and the
//! transient detectors:
//!
//! 1. **Primitives** - reductions (sum, mean, population variance) behind the
//!    `ComputePrimitives` trait
//! 2. **Execution Engines** - sequential or rayon-parallel mapping over
//!    independent bins
//! 3. **Binning** - fixed-size windows with the trailing remainder dropped
//! 4. **Statistics** - standardization, correlation, per-bin regression and
//!    sigma scoring
//!
//! # Example
//!
//! ```rust
//! use lc_core::binning::bin_windows;
//! use lc_core::stats::{regression, sanitize_slope};
//!
//! let time = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
//! let counts = [1.0, 2.0, 3.0, 3.0, 3.0, 3.0];
//!
//! let slopes: Vec<f64> = bin_windows(&time, 3)
//!     .unwrap()
//!     .into_iter()
//!     .zip(bin_windows(&counts, 3).unwrap())
//!     .map(|(x, y)| sanitize_slope(regression(x, y).unwrap().slope))
//!     .collect();
//!
//! assert!((slopes[0] - 10.0).abs() < 1e-9);
//! assert_eq!(slopes[1], 0.0);
//! ```

pub mod binning;
pub mod error;
pub mod execution;
pub mod kernels;
pub mod primitives;
pub mod stats;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{scalar_sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{scalar_parallel, ParallelEngine};

pub use kernels::StatisticalKernel;
pub use primitives::{scalar_backend, ComputePrimitives, ScalarBackend};

pub use binning::{bin_count, bin_sum, bin_windows};
pub use stats::{
    correlation, is_anomalous, regression, regression_line, rmse, sanitize_slope, standardize,
    Regression, SigmaScorer,
};
