//! Properties of the cluster and run filters

use lc_series::CHANDRA_BIN;
use lc_transient::{density_clusters, RunMergeKernel};
use proptest::prelude::*;

fn candidate() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 1.0f64..1e5]
}

proptest! {
    // Property: every kept value is the first entry of some full window
    #[test]
    fn prop_density_emits_window_heads(
        candidates in prop::collection::vec(candidate(), 0..200),
        binsize in 1usize..20,
        threshold in 0.0f64..=1.0
    ) {
        let kept = density_clusters(&candidates, binsize, threshold).unwrap();
        let heads: Vec<f64> = candidates.chunks_exact(binsize).map(|w| w[0]).collect();

        prop_assert!(kept.len() <= heads.len());
        prop_assert!(kept.iter().all(|k| heads.contains(k)));
    }

    // Property: a zero threshold keeps every full window
    #[test]
    fn prop_zero_threshold_keeps_all(
        candidates in prop::collection::vec(candidate(), 0..200),
        binsize in 1usize..20
    ) {
        let kept = density_clusters(&candidates, binsize, 0.0).unwrap();
        prop_assert_eq!(kept.len(), candidates.len() / binsize);
    }

    // Property: runs are disjoint, contiguous and longer than one bin
    #[test]
    fn prop_runs_are_contiguous(
        slopes in prop::collection::vec(prop_oneof![Just(0.0), 0.0f64..10.0], 0..200),
        binsize in 2usize..50
    ) {
        let runs = RunMergeKernel::new(binsize).runs(&slopes, |s| s <= 1.0);
        let step = binsize as f64 * CHANDRA_BIN;
        let matching = slopes.iter().filter(|&&s| s <= 1.0).count();

        prop_assert!(runs.iter().map(Vec::len).sum::<usize>() <= matching);
        for run in &runs {
            prop_assert!(run.len() > 1);
            for pair in run.windows(2) {
                prop_assert!((pair[1] - pair[0] - step).abs() < 1e-6 * pair[1].max(1.0));
            }
        }
        for pair in runs.windows(2) {
            // At least one non-matching bin separates consecutive runs
            let gap = pair[1][0] - pair[0][pair[0].len() - 1];
            prop_assert!(gap > 1.5 * step);
        }
    }
}
