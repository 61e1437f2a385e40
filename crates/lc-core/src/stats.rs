//! Standardization, correlation, least-squares slope and sigma scoring
//!
//! All spreads are population standard deviations. Zero-variance input is not
//! special-cased: standardizing a constant array yields NaN (or ±∞) and that
//! propagates into correlations and slopes. Callers that compare slopes must
//! pass them through [`sanitize_slope`] first.

use crate::primitives::{ComputePrimitives, ScalarBackend};
use crate::{Error, Result};

/// Mean of a slice (NaN when empty)
pub fn mean(data: &[f64]) -> f64 {
    ScalarBackend.mean(data)
}

/// Population standard deviation of a slice
///
/// # Examples
///
/// ```rust
/// use lc_core::stats::std_dev;
///
/// let sd = std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((sd - std::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
pub fn std_dev(data: &[f64]) -> f64 {
    ScalarBackend.std_dev(data)
}

/// Convert to zero-mean, unit-variance form: `(a[i] - mean) / std`
pub fn standardize(data: &[f64]) -> Vec<f64> {
    standardize_in(&ScalarBackend, data)
}

/// [`standardize`] on the given primitives
pub fn standardize_in<P: ComputePrimitives>(prims: &P, data: &[f64]) -> Vec<f64> {
    let mean = prims.mean(data);
    let std = prims.std_dev(data);
    data.iter().map(|&x| (x - mean) / std).collect()
}

/// Correlation coefficient as the mean of the standardized products
pub fn correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    correlation_in(&ScalarBackend, x, y)
}

/// [`correlation`] on the given primitives
pub fn correlation_in<P: ComputePrimitives>(prims: &P, x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::shape("correlation", x.len(), y.len()));
    }
    let zx = standardize_in(prims, x);
    let zy = standardize_in(prims, y);
    Ok(prims.dot_product(&zx, &zy) / x.len() as f64)
}

/// Best-fit line of y over x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    /// Fit `y` over `x`
    ///
    /// The slope is `r * std(y) / std(x)` and the line passes through
    /// `(mean(x), mean(y))`. A zero spread in either coordinate gives a NaN
    /// slope and intercept.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::fit_in(&ScalarBackend, x, y)
    }

    /// [`Regression::fit`] on the given primitives
    pub fn fit_in<P: ComputePrimitives>(prims: &P, x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::shape("regression", x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: x.len(),
            });
        }

        let r = correlation_in(prims, x, y)?;
        let slope = r * prims.std_dev(y) / prims.std_dev(x);
        let intercept = prims.mean(y) - slope * prims.mean(x);

        Ok(Self { slope, intercept })
    }

    /// Evaluate the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Shorthand for [`Regression::fit`]
pub fn regression(x: &[f64], y: &[f64]) -> Result<Regression> {
    Regression::fit(x, y)
}

/// Fitted values of the regression line: `standardize(x)[i] * r * std(y) + mean(y)`
pub fn regression_line(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    let r = correlation(x, y)?;
    let scale = r * std_dev(y);
    let offset = mean(y);
    Ok(standardize(x).into_iter().map(|z| z * scale + offset).collect())
}

/// Root mean square error between observed and predicted values
///
/// `sqrt(mean((actual - predicted)^2))`. This is not the magnitude of the
/// mean residual, `|mean(actual - predicted)|`, which lets positive and
/// negative residuals cancel.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(Error::shape("rmse", actual.len(), predicted.len()));
    }
    let residuals: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| a - p)
        .collect();
    Ok((ScalarBackend.dot_product(&residuals, &residuals) / residuals.len() as f64).sqrt())
}

/// Replace a non-finite slope with `0.0`
#[inline]
pub fn sanitize_slope(slope: f64) -> f64 {
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// Flags values at least `sigma` standard deviations above a reference mean
///
/// The bound `mean + sigma * std` is computed once from the reference values
/// so scoring every element of the reference itself stays linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaScorer {
    bound: f64,
}

impl SigmaScorer {
    pub fn new(reference: &[f64], sigma: f64) -> Self {
        Self::new_in(&ScalarBackend, reference, sigma)
    }

    pub fn new_in<P: ComputePrimitives>(prims: &P, reference: &[f64], sigma: f64) -> Self {
        Self {
            bound: prims.mean(reference) + sigma * prims.std_dev(reference),
        }
    }

    /// Inclusive test `value >= mean + sigma * std`
    #[inline]
    pub fn is_anomalous(&self, value: f64) -> bool {
        value >= self.bound
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }
}

/// One-shot form of [`SigmaScorer`]
pub fn is_anomalous(reference: &[f64], value: f64, sigma: f64) -> bool {
    SigmaScorer::new(reference, sigma).is_anomalous(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Slope and intercept read off two points of the standardized line
    fn two_point(x: &[f64], y: &[f64]) -> (f64, f64) {
        let fitted = regression_line(x, y).unwrap();
        let m = (fitted[1] - fitted[0]) / (x[1] - x[0]);
        (m, fitted[0] - m * x[0])
    }

    #[test]
    fn test_standardize_unit_variance() {
        let z = standardize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(mean(&z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&z), 1.0, epsilon = 1e-12);
        assert_relative_eq!(z[0], -1.5);
    }

    #[test]
    fn test_standardize_constant_propagates_nan() {
        let z = standardize(&[3.0, 3.0, 3.0]);
        assert!(z.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_correlation_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(correlation(&x, &up).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(correlation(&x, &down).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_shape_mismatch() {
        assert!(matches!(
            correlation(&[1.0, 2.0], &[1.0]),
            Err(Error::Shape { left: 2, right: 1, .. })
        ));
    }

    #[test]
    fn test_exact_linear_slope() {
        let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 5.0).collect();
        let fit = regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept, 5.0, epsilon = 1e-9);
        assert_relative_eq!(fit.predict(10.0), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closed_form_matches_two_point() {
        let cases: Vec<(Vec<f64>, Vec<f64>)> = vec![
            (vec![0.003241, 0.006482], vec![10.0, 20.0]),
            (vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 3.0, 2.0, 5.0, 4.0]),
            (
                (1..=300).map(|i| i as f64 * 0.00324104).collect(),
                (1..=300).map(|i| ((i * 7) % 13) as f64 + i as f64).collect(),
            ),
        ];

        for (x, y) in cases {
            let fit = regression(&x, &y).unwrap();
            let (m, c) = two_point(&x, &y);
            assert_relative_eq!(fit.slope, m, max_relative = 1e-9);
            assert_relative_eq!(fit.intercept, c, epsilon = 1e-6, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_constant_bin_sanitizes_to_zero() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [7.0, 7.0, 7.0, 7.0];
        let fit = regression(&x, &y).unwrap();
        assert!(fit.slope.is_nan());
        assert_eq!(sanitize_slope(fit.slope), 0.0);
    }

    #[test]
    fn test_constant_x_is_nan() {
        let fit = regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!(fit.slope.is_nan());
    }

    #[test]
    fn test_regression_contract() {
        assert!(matches!(
            regression(&[1.0], &[1.0]),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
        assert!(matches!(
            regression(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn test_rmse() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 1.0, 4.0, 3.0];
        assert_relative_eq!(rmse(&actual, &predicted).unwrap(), 1.0);
        assert_eq!(rmse(&actual, &actual).unwrap(), 0.0);
        assert!(rmse(&actual, &predicted[..3]).is_err());
    }

    #[test]
    fn test_sanitize_slope() {
        assert_eq!(sanitize_slope(f64::NAN), 0.0);
        assert_eq!(sanitize_slope(f64::INFINITY), 0.0);
        assert_eq!(sanitize_slope(f64::NEG_INFINITY), 0.0);
        assert_eq!(sanitize_slope(-3.5), -3.5);
    }

    #[test]
    fn test_sigma_boundary_is_inclusive() {
        let reference = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sigma = 1.0;
        let bound = mean(&reference) + sigma * std_dev(&reference);

        assert!(is_anomalous(&reference, bound, sigma));
        let below = f64::from_bits(bound.to_bits() - 1);
        assert!(below < bound);
        assert!(!is_anomalous(&reference, below, sigma));
    }

    #[test]
    fn test_sigma_constant_reference_degenerates_to_mean() {
        let scorer = SigmaScorer::new(&[4.0; 6], 3.0);
        assert_eq!(scorer.bound(), 4.0);
        assert!(scorer.is_anomalous(4.0));
        assert!(!scorer.is_anomalous(3.999));
    }
}
