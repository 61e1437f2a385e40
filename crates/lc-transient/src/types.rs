//! Types returned by the transient detectors

use std::fmt;

/// Why a detector stopped before running its pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Screening {
    /// Fewer points than one bin
    TooShort { points: usize, binsize: usize },
    /// Cumulative counts never change, so their correlation with time is undefined
    Flat { total_count: u64 },
    /// Cumulative counts track time too closely for any flare
    Quiescent { r_squared: f64, limit: f64 },
    /// Count rate below the eclipse screening threshold
    LowRate { rate_ks: f64, required: f64 },
    /// Observation shorter than the eclipse screening threshold
    ShortExposure { total_time: f64, required: f64 },
}

impl fmt::Display for Screening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screening::TooShort { points, binsize } => {
                write!(f, "{points} points do not fill a bin of {binsize}")
            }
            Screening::Flat { total_count } => {
                write!(f, "flat cumulative counts ({total_count} photons)")
            }
            Screening::Quiescent { r_squared, limit } => {
                write!(f, "quiescent source (r^2 = {r_squared:.5} > {limit})")
            }
            Screening::LowRate { rate_ks, required } => {
                write!(f, "rate {rate_ks:.3} ct/ks below {required}")
            }
            Screening::ShortExposure {
                total_time,
                required,
            } => write!(f, "exposure {total_time:.3} ks below {required}"),
        }
    }
}

/// Full output of a flare screen
#[derive(Debug, Clone, PartialEq)]
pub struct FlareReport {
    slopes: Vec<f64>,
    bound: f64,
    candidates: Vec<f64>,
    clusters: Vec<f64>,
    screened_out: Option<Screening>,
}

impl FlareReport {
    pub fn new(slopes: Vec<f64>, bound: f64, candidates: Vec<f64>, clusters: Vec<f64>) -> Self {
        Self {
            slopes,
            bound,
            candidates,
            clusters,
            screened_out: None,
        }
    }

    /// Report for a series that never reached the slope pipeline
    pub fn screened(reason: Screening) -> Self {
        Self {
            slopes: vec![],
            bound: f64::NAN,
            candidates: vec![],
            clusters: vec![],
            screened_out: Some(reason),
        }
    }

    /// Sanitized slope of every bin
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Slope at or above which a bin counts as anomalous
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Bin start time for anomalous bins, `0.0` for the rest
    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }

    /// First candidate of every window dense enough to keep
    pub fn clusters(&self) -> &[f64] {
        &self.clusters
    }

    pub fn screened_out(&self) -> Option<&Screening> {
        self.screened_out.as_ref()
    }

    pub fn anomalous_bins(&self) -> usize {
        self.candidates.iter().filter(|&&c| c > 0.0).count()
    }

    pub fn is_flare(&self) -> bool {
        !self.clusters.is_empty()
    }
}

impl fmt::Display for FlareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flare Screen:")?;
        if let Some(reason) = &self.screened_out {
            return writeln!(f, "  Skipped: {reason}");
        }
        writeln!(f, "  Bins: {}", self.slopes.len())?;
        writeln!(f, "  Slope bound: {:.3}", self.bound)?;
        writeln!(f, "  Anomalous bins: {}", self.anomalous_bins())?;
        writeln!(f, "  Clusters kept: {}", self.clusters.len())?;
        for t in &self.clusters {
            writeln!(f, "    t = {t:.1} s")?;
        }
        Ok(())
    }
}

/// Full output of an eclipse screen
#[derive(Debug, Clone, PartialEq)]
pub struct EclipseReport {
    slopes: Vec<f64>,
    cutoff: f64,
    runs: Vec<Vec<f64>>,
    screened_out: Option<Screening>,
}

impl EclipseReport {
    pub fn new(slopes: Vec<f64>, cutoff: f64, runs: Vec<Vec<f64>>) -> Self {
        Self {
            slopes,
            cutoff,
            runs,
            screened_out: None,
        }
    }

    pub fn screened(reason: Screening) -> Self {
        Self {
            slopes: vec![],
            cutoff: f64::NAN,
            runs: vec![],
            screened_out: Some(reason),
        }
    }

    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Resolved slope cutoff; bins at or below it are eclipse candidates
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Runs of adjacent low-slope bins, each as bin start times in seconds
    pub fn runs(&self) -> &[Vec<f64>] {
        &self.runs
    }

    pub fn screened_out(&self) -> Option<&Screening> {
        self.screened_out.as_ref()
    }

    /// Run spanning the most bins
    pub fn longest_run(&self) -> Option<&[f64]> {
        self.runs
            .iter()
            .max_by_key(|run| run.len())
            .map(Vec::as_slice)
    }

    pub fn is_eclipse(&self) -> bool {
        !self.runs.is_empty()
    }

    pub fn into_runs(self) -> Vec<Vec<f64>> {
        self.runs
    }
}

impl fmt::Display for EclipseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Eclipse Screen:")?;
        if let Some(reason) = &self.screened_out {
            return writeln!(f, "  Skipped: {reason}");
        }
        writeln!(f, "  Bins: {}", self.slopes.len())?;
        writeln!(f, "  Slope cutoff: {:.3}", self.cutoff)?;
        writeln!(f, "  Runs: {}", self.runs.len())?;
        for run in &self.runs {
            if let (Some(start), Some(end)) = (run.first(), run.last()) {
                writeln!(f, "    {start:.1} s .. {end:.1} s ({} bins)", run.len())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flare_report_counts() {
        let report = FlareReport::new(
            vec![1.0, 9.0, 9.0, 1.0],
            8.0,
            vec![0.0, 16.2, 32.4, 0.0],
            vec![0.0],
        );
        assert_eq!(report.anomalous_bins(), 2);
        assert!(report.is_flare());
        assert!(report.to_string().contains("Clusters kept: 1"));
    }

    #[test]
    fn test_screened_reports() {
        let report = FlareReport::screened(Screening::Quiescent {
            r_squared: 0.9995,
            limit: 0.998,
        });
        assert!(!report.is_flare());
        assert!(report.to_string().contains("quiescent"));

        let report = FlareReport::screened(Screening::Flat { total_count: 0 });
        assert!(report.to_string().contains("flat cumulative counts"));

        let report = EclipseReport::screened(Screening::LowRate {
            rate_ks: 1.0,
            required: 3.5,
        });
        assert!(!report.is_eclipse());
        assert!(report.longest_run().is_none());
    }

    #[test]
    fn test_longest_run() {
        let report = EclipseReport::new(
            vec![],
            1.0,
            vec![vec![0.0, 1.0], vec![5.0, 6.0, 7.0], vec![9.0, 10.0]],
        );
        assert_eq!(report.longest_run(), Some(&[5.0, 6.0, 7.0][..]));
        assert!(report.to_string().contains("Runs: 3"));
    }
}
