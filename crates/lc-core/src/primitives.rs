//! Computational primitives
//!
//! Low-level reductions shared by every statistic in the workspace. The
//! `ComputePrimitives` trait carries default scalar implementations so a
//! backend only overrides what it can do faster.

/// Reductions over `f64` slices
///
/// Variance here is the population variance (denominator `N`), which is the
/// convention every lightcurve statistic relies on.
pub trait ComputePrimitives: Clone + Send + Sync {
    /// Get the name of this backend
    fn backend_name(&self) -> &'static str;

    /// Sum all elements in a slice
    fn sum(&self, data: &[f64]) -> f64 {
        data.iter().sum()
    }

    /// Compute dot product of two vectors
    fn dot_product(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len(), "dot product of unequal lengths");
        a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
    }

    /// Compute mean of a slice
    ///
    /// Empty input yields NaN, like a 0/0 reduction would.
    fn mean(&self, data: &[f64]) -> f64 {
        self.sum(data) / data.len() as f64
    }

    /// Population variance of a slice
    fn variance(&self, data: &[f64]) -> f64 {
        let mean = self.mean(data);
        let sum_sq_diff: f64 = data
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum();
        sum_sq_diff / data.len() as f64
    }

    /// Population standard deviation of a slice
    fn std_dev(&self, data: &[f64]) -> f64 {
        self.variance(data).sqrt()
    }
}

/// Plain scalar backend (always available)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScalarBackend;

impl ScalarBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ComputePrimitives for ScalarBackend {
    fn backend_name(&self) -> &'static str {
        "scalar"
    }
}

/// Create a scalar backend
pub fn scalar_backend() -> ScalarBackend {
    ScalarBackend::new()
}
