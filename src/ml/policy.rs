// ============================================================
// Layer 5 — Metric Evolution Policy
// ============================================================
// Simulated learning. Metrics start in a "fresh model" range
// and decay exponentially toward their bounds each epoch:
//
//   loss     ← loss     - loss * r1              r1 ∈ [0.10, 0.25)
//   accuracy ← accuracy + (1 - accuracy) * r2    r2 ∈ [0.10, 0.25)
//
// Initial loss ∈ [0.7, 0.9), initial accuracy ∈ [0.5, 0.7).
//
// Both steps keep loss > 0 and accuracy < 1 on paper. In f64
// they would reach 0.0 / 1.0 after a few hundred epochs, so
// results are clamped to the nearest representable value
// inside the bounds.

use std::ops::Range;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::training::Metrics;
use crate::domain::traits::MetricPolicy;

pub const INITIAL_LOSS: Range<f64> = 0.7..0.9;
pub const INITIAL_ACCURACY: Range<f64> = 0.5..0.7;
pub const STEP_RATE: Range<f64> = 0.10..0.25;

/// Largest f64 strictly below 1.0
const MAX_ACCURACY: f64 = 1.0 - f64::EPSILON / 2.0;

pub struct RandomDecayPolicy {
    rng: StdRng,
}

impl RandomDecayPolicy {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomDecayPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricPolicy for RandomDecayPolicy {
    fn initial(&mut self) -> Metrics {
        Metrics::new(
            self.rng.gen_range(INITIAL_LOSS),
            self.rng.gen_range(INITIAL_ACCURACY),
        )
    }

    fn next_metrics(&mut self, prev: Metrics) -> Metrics {
        let r1 = self.rng.gen_range(STEP_RATE);
        let r2 = self.rng.gen_range(STEP_RATE);

        let loss     = (prev.loss - prev.loss * r1).max(f64::MIN_POSITIVE);
        let accuracy = (prev.accuracy + (1.0 - prev.accuracy) * r2).min(MAX_ACCURACY);

        Metrics::new(loss, accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_ranges() {
        let mut policy = RandomDecayPolicy::new();
        for _ in 0..200 {
            let m = policy.initial();
            assert!(INITIAL_LOSS.contains(&m.loss));
            assert!(INITIAL_ACCURACY.contains(&m.accuracy));
        }
    }

    #[test]
    fn test_single_step_bounds() {
        let mut policy = RandomDecayPolicy::with_seed(11);
        let prev = Metrics::new(0.8, 0.6);
        let tol  = 1e-12;
        for _ in 0..200 {
            let next = policy.next_metrics(prev);
            // loss shrinks by 10%..25%, accuracy closes 10%..25% of its gap
            assert!(next.loss <= 0.72 + tol && next.loss >= 0.60 - tol);
            assert!(next.accuracy >= 0.64 - tol && next.accuracy <= 0.70 + tol);
        }
    }

    #[test]
    fn test_trend_is_monotonic() {
        let mut policy = RandomDecayPolicy::with_seed(5);
        let mut m = policy.initial();
        for _ in 0..50 {
            let next = policy.next_metrics(m);
            assert!(next.loss < m.loss);
            assert!(next.accuracy > m.accuracy);
            m = next;
        }
    }

    #[test]
    fn test_bounded_after_many_epochs() {
        let mut policy = RandomDecayPolicy::with_seed(99);
        let mut m = policy.initial();
        for _ in 0..5_000 {
            m = policy.next_metrics(m);
            assert!(m.is_bounded(), "left bounds: {m:?}");
        }
    }

    #[test]
    fn test_seeded_policies_agree() {
        let mut a = RandomDecayPolicy::with_seed(42);
        let mut b = RandomDecayPolicy::with_seed(42);
        assert_eq!(a.initial(), b.initial());
        let start = Metrics::new(0.8, 0.6);
        assert_eq!(a.next_metrics(start), b.next_metrics(start));
    }
}
