//! Anomaly Scorer
//!
//! Feature-based alternative to the window rules: a traffic sample
//! (traffic, failed logins, cpu) is scored against a Gaussian profile of
//! "normal" behavior. Outliers are then bucketed into an attack kind with
//! simple feature thresholds.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::logic::events::source::make_rng;
use crate::logic::threat::{AttackKind, RiskLevel};

pub const FEATURE_COUNT: usize = 3;

/// Training profile: N(mean, std) per feature
pub const PROFILE_MEAN: f64 = 50.0;
pub const PROFILE_STD: f64 = 10.0;
pub const PROFILE_SAMPLES: usize = 300;
pub const PROFILE_SEED: u64 = 42;

/// Expected share of outliers in the training data
pub const DEFAULT_CONTAMINATION: f64 = 0.1;

/// Outlier traffic above this = DDoS
pub const DDOS_TRAFFIC: f64 = 80.0;

/// Outlier failed logins above this = brute force
pub const BRUTE_FORCE_FAILED_LOGINS: f64 = 6.0;

const MIN_STD: f64 = 1e-9;

// ============================================================================
// SAMPLE & VERDICT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub traffic: f64,
    pub failed_logins: f64,
    pub cpu: f64,
}

impl TrafficSample {
    pub fn new(traffic: f64, failed_logins: f64, cpu: f64) -> Self {
        Self { traffic, failed_logins, cpu }
    }

    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [self.traffic, self.failed_logins, self.cpu]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyVerdict {
    pub kind: AttackKind,
    pub risk: RiskLevel,
    /// Largest per-feature |z|
    pub score: f64,
    pub is_outlier: bool,
}

/// Pluggable scorer so a real model can replace the Gaussian profile
pub trait AnomalyScorer {
    fn score(&self, sample: &TrafficSample) -> AnomalyVerdict;
}

// ============================================================================
// GAUSSIAN OUTLIER SCORER
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianOutlierScorer {
    mean: [f64; FEATURE_COUNT],
    std: [f64; FEATURE_COUNT],
    threshold: f64,
}

impl GaussianOutlierScorer {
    /// Fit on `samples`; the threshold keeps `contamination` of them outside
    pub fn fit(samples: &[TrafficSample], contamination: f64) -> Self {
        let n = samples.len().max(1) as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        let mut stdev = [0.0; FEATURE_COUNT];

        for sample in samples {
            for (m, v) in mean.iter_mut().zip(sample.as_array()) {
                *m += v / n;
            }
        }
        for sample in samples {
            for ((s, m), v) in stdev.iter_mut().zip(mean).zip(sample.as_array()) {
                *s += (v - m).powi(2) / n;
            }
        }
        for s in stdev.iter_mut() {
            *s = s.sqrt().max(MIN_STD);
        }

        let mut scorer = Self { mean, std: stdev, threshold: f64::INFINITY };

        let mut scores: Vec<f64> = samples.iter().map(|s| scorer.raw_score(s)).collect();
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        if !scores.is_empty() {
            let keep = (1.0 - contamination.clamp(0.0, 1.0)) * (scores.len() - 1) as f64;
            scorer.threshold = scores[keep.round() as usize];
        }

        scorer
    }

    /// Trained once on synthetic normal traffic with a fixed seed
    pub fn pretrained() -> Self {
        let mut rng = make_rng(Some(PROFILE_SEED));
        let samples: Vec<TrafficSample> = (0..PROFILE_SAMPLES)
            .map(|_| {
                TrafficSample::new(
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                )
            })
            .collect();
        Self::fit(&samples, DEFAULT_CONTAMINATION)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mean(&self) -> [f64; FEATURE_COUNT] {
        self.mean
    }

    fn raw_score(&self, sample: &TrafficSample) -> f64 {
        sample
            .as_array()
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(v, (m, s))| ((v - m) / s).abs())
            .fold(0.0, f64::max)
    }
}

impl Default for GaussianOutlierScorer {
    fn default() -> Self {
        Self::pretrained()
    }
}

impl AnomalyScorer for GaussianOutlierScorer {
    fn score(&self, sample: &TrafficSample) -> AnomalyVerdict {
        let score = self.raw_score(sample);
        let is_outlier = score > self.threshold;

        let (kind, risk) = if !is_outlier {
            (AttackKind::Normal, RiskLevel::Low)
        } else if sample.traffic > DDOS_TRAFFIC {
            (AttackKind::DDoS, RiskLevel::High)
        } else if sample.failed_logins > BRUTE_FORCE_FAILED_LOGINS {
            (AttackKind::BruteForce, RiskLevel::High)
        } else {
            (AttackKind::MalwareActivity, RiskLevel::Medium)
        };

        AnomalyVerdict { kind, risk, score, is_outlier }
    }
}

/// Box-Muller
fn gaussian(rng: &mut ChaCha8Rng, mean: f64, sd: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + sd * z
}

// ============================================================================
// TRAFFIC SIMULATOR
// ============================================================================

/// Random traffic readings in the demo's ranges
pub struct TrafficSimulator {
    rng: ChaCha8Rng,
}

impl TrafficSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { rng: make_rng(seed) }
    }

    pub fn next_sample(&mut self) -> TrafficSample {
        TrafficSample::new(
            self.rng.gen_range(30..100) as f64,
            self.rng.gen_range(0..10) as f64,
            self.rng.gen_range(20..90) as f64,
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretrained_profile_is_near_training_distribution() {
        let scorer = GaussianOutlierScorer::pretrained();
        for m in scorer.mean() {
            assert!((m - PROFILE_MEAN).abs() < 3.0, "mean {} too far", m);
        }
        assert!(scorer.threshold() > 1.0 && scorer.threshold() < 4.0);
    }

    #[test]
    fn test_pretrained_is_deterministic() {
        let a = GaussianOutlierScorer::pretrained();
        let b = GaussianOutlierScorer::pretrained();
        assert_eq!(a.threshold(), b.threshold());
    }

    #[test]
    fn test_typical_sample_is_normal() {
        let scorer = GaussianOutlierScorer::pretrained();
        let verdict = scorer.score(&TrafficSample::new(50.0, 50.0, 50.0));
        assert!(!verdict.is_outlier);
        assert_eq!(verdict.kind, AttackKind::Normal);
        assert_eq!(verdict.risk, RiskLevel::Low);
    }

    #[test]
    fn test_outlier_buckets() {
        let scorer = GaussianOutlierScorer::pretrained();

        let ddos = scorer.score(&TrafficSample::new(95.0, 2.0, 50.0));
        assert_eq!((ddos.kind, ddos.risk), (AttackKind::DDoS, RiskLevel::High));

        let brute = scorer.score(&TrafficSample::new(50.0, 8.0, 50.0));
        assert_eq!((brute.kind, brute.risk), (AttackKind::BruteForce, RiskLevel::High));

        let malware = scorer.score(&TrafficSample::new(50.0, 3.0, 50.0));
        assert_eq!((malware.kind, malware.risk), (AttackKind::MalwareActivity, RiskLevel::Medium));
    }

    #[test]
    fn test_fit_contamination_share() {
        let scorer = GaussianOutlierScorer::pretrained();
        let mut rng = make_rng(Some(PROFILE_SEED));
        let outliers = (0..PROFILE_SAMPLES)
            .map(|_| {
                TrafficSample::new(
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                    gaussian(&mut rng, PROFILE_MEAN, PROFILE_STD),
                )
            })
            .filter(|s| scorer.score(s).is_outlier)
            .count();
        // training set replayed: roughly 10% above the threshold
        assert!(outliers > 15 && outliers < 45, "{} outliers", outliers);
    }

    #[test]
    fn test_fit_empty_never_flags() {
        let scorer = GaussianOutlierScorer::fit(&[], 0.1);
        assert!(!scorer.score(&TrafficSample::new(1e6, 1e6, 1e6)).is_outlier);
    }

    #[test]
    fn test_simulator_ranges() {
        let mut sim = TrafficSimulator::new(Some(3));
        for _ in 0..200 {
            let s = sim.next_sample();
            assert!((30.0..100.0).contains(&s.traffic));
            assert!((0.0..10.0).contains(&s.failed_logins));
            assert!((20.0..90.0).contains(&s.cpu));
        }
    }
}
