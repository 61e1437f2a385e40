//! Constant-rate Poisson model for interval counts

use crate::series::PhotonSeries;
use lc_core::{Error, Result};
use statrs::distribution::{Discrete, Poisson};

/// Probability of exactly `k` photons when `mu` are expected
pub fn poisson_pmf(mu: f64, k: u64) -> Result<f64> {
    let dist = Poisson::new(mu)
        .map_err(|e| Error::InvalidParameter(format!("Poisson mean {mu}: {e}")))?;
    Ok(dist.pmf(k))
}

impl PhotonSeries {
    /// Mean photons per exposed interval
    pub fn mean_counts(&self) -> f64 {
        self.total_count() as f64 / self.len() as f64
    }

    /// Probability of an interval recording `k` photons under a constant rate
    ///
    /// The rate is the series' own mean counts per interval, so this fails for
    /// an empty or photon-free series.
    pub fn count_probability(&self, k: u64) -> Result<f64> {
        poisson_pmf(self.mean_counts(), k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pmf_values() {
        assert_relative_eq!(poisson_pmf(1.0, 0).unwrap(), (-1.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(poisson_pmf(2.0, 2).unwrap(), 2.0 * (-2.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_pmf_rejects_non_positive_mean() {
        assert!(poisson_pmf(0.0, 1).is_err());
        assert!(poisson_pmf(-1.0, 1).is_err());
        assert!(poisson_pmf(f64::NAN, 1).is_err());
    }

    #[test]
    fn test_series_count_probability() {
        let series = PhotonSeries::from_counts(vec![3, 3, 3, 3]);
        assert_eq!(series.mean_counts(), 3.0);
        let p = series.count_probability(3).unwrap();
        assert_relative_eq!(p, 27.0 / 6.0 * (-3.0f64).exp(), epsilon = 1e-12);

        let empty = PhotonSeries::from_counts(vec![]);
        assert!(empty.count_probability(0).is_err());
    }
}
