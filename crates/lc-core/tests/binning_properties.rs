//! Property-based tests for binning and per-bin statistics

use lc_core::stats::{mean, std_dev};
use lc_core::{bin_sum, bin_windows, is_anomalous, regression, sanitize_slope};
use proptest::prelude::*;

proptest! {
    // Property: binning keeps exactly floor(L/B) full windows, in order
    #[test]
    fn prop_binning_loses_only_the_remainder(
        data in prop::collection::vec(-1e6f64..1e6, 0..500),
        binsize in 1usize..64
    ) {
        let windows = bin_windows(&data, binsize).unwrap();
        let n_bins = data.len() / binsize;

        prop_assert_eq!(windows.len(), n_bins);
        prop_assert!(windows.iter().all(|w| w.len() == binsize));

        let flattened: Vec<f64> = windows.concat();
        prop_assert_eq!(&flattened[..], &data[..binsize * n_bins]);
    }

    // Property: window sums agree with summing the window contents
    #[test]
    fn prop_bin_sum_matches_windows(
        counts in prop::collection::vec(0u64..1000, 0..400),
        binsize in 1usize..50
    ) {
        let sums = bin_sum(&counts, binsize).unwrap();
        let windows = bin_windows(&counts, binsize).unwrap();

        prop_assert_eq!(sums.len(), windows.len());
        for (sum, window) in sums.iter().zip(windows) {
            prop_assert_eq!(*sum, window.iter().sum::<u64>());
        }
    }

    // Property: a sanitized slope is always finite
    #[test]
    fn prop_sanitized_slopes_are_finite(
        y in prop::collection::vec(0.0f64..100.0, 2..20),
        constant in any::<bool>()
    ) {
        let x: Vec<f64> = (1..=y.len()).map(|i| i as f64 * 0.003241).collect();
        let y = if constant { vec![y[0]; y.len()] } else { y };
        let slope = sanitize_slope(regression(&x, &y).unwrap().slope);
        prop_assert!(slope.is_finite());
    }

    // Property: raising sigma can only un-flag a value, never flag it
    #[test]
    fn prop_sigma_is_monotone(
        values in prop::collection::vec(-100.0f64..100.0, 1..50),
        low in 0.0f64..3.0,
        extra in 0.0f64..3.0
    ) {
        for &v in &values {
            if is_anomalous(&values, v, low + extra) {
                prop_assert!(is_anomalous(&values, v, low));
            }
        }
        // Zero sigma reduces to a comparison with the mean
        let bound = mean(&values) + 0.0 * std_dev(&values);
        for &v in &values {
            prop_assert_eq!(is_anomalous(&values, v, 0.0), v >= bound);
        }
    }
}
