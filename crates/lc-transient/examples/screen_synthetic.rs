//! Screen a synthetic observation for flares and eclipses
//!
//! Run with `RUST_LOG=debug` to see the per-stage tracing output.

use lc_core::scalar_sequential;
use lc_series::{Periodogram, PhotonSeries, RateCurve, DEFAULT_BINNING_SECONDS};
use lc_transient::{
    EclipseCutoff, EclipseDetector, EclipseParameters, FlareDetector, TransientDetector,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

fn synthetic_observation() -> anyhow::Result<PhotonSeries> {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let len = 6000;

    let mut counts: Vec<u64> = (0..len).map(|_| rng.gen_range(2..=6)).collect();
    let mut exposure = vec![1.0; len];

    // Flare
    for c in &mut counts[1800..1900] {
        *c += rng.gen_range(30..=40);
    }
    // Eclipse
    for c in &mut counts[3600..4500] {
        *c = 0;
    }
    // Telemetry gap
    for e in &mut exposure[5000..5100] {
        *e = 0.0;
    }

    Ok(PhotonSeries::new(counts, exposure)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Lightcurve Transient Screen ===\n");

    let series = synthetic_observation()?;
    println!("Exposed intervals: {}", series.len());
    println!("Net counts:        {}", series.total_count());
    println!("Exposure:          {:.3} ks", series.total_time());
    println!("Rate:              {:.3} ct/s\n", series.rate_s());

    let flare = FlareDetector::with_defaults().analyze(&series)?;
    println!("{flare}");

    let eclipse = EclipseDetector::with_defaults().analyze(&series)?;
    println!("{eclipse}");

    let adaptive = EclipseDetector::new(
        scalar_sequential(),
        EclipseParameters {
            cutoff: EclipseCutoff::Adaptive,
            ..EclipseParameters::default()
        },
    )?;
    println!(
        "Adaptive cutoff runs: {}\n",
        adaptive.clusters(&series)?.len()
    );

    let curve = RateCurve::from_series(&series, DEFAULT_BINNING_SECONDS)?;
    println!("Rate curve ({} intervals per group):", curve.group_size());
    for (t, rate) in curve.start_times().iter().zip(curve.rates()) {
        println!("  {t:>7.3} ks  {rate:.3} ct/s");
    }

    if let Some(period) = Periodogram::of(&series).dominant_period_seconds() {
        println!("\nDominant period: {period:.1} s");
    }
    println!(
        "P(0 photons in an interval): {:.3e}",
        series.count_probability(0)?
    );

    Ok(())
}
