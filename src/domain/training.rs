// ============================================================
// Layer 3 — Training Metrics and History
// ============================================================

use serde::{Deserialize, Serialize};

/// Loss/accuracy pair at one point of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub loss:     f64,
    pub accuracy: f64,
}

impl Metrics {
    pub fn new(loss: f64, accuracy: f64) -> Self {
        Self { loss, accuracy }
    }

    /// loss > 0 and 0 < accuracy < 1
    pub fn is_bounded(&self) -> bool {
        self.loss > 0.0 && self.accuracy > 0.0 && self.accuracy < 1.0
    }
}

/// One row of the trajectory, recorded after an epoch finishes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch:    usize,
    pub loss:     f64,
    pub accuracy: f64,
    /// Full batches processed; a trailing partial batch is not counted
    pub batches:  usize,
    /// Wall-clock time of the epoch
    pub seconds:  f64,
}

/// Outcome of one complete training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs_completed: usize,
    pub final_loss:       f64,
    pub final_accuracy:   f64,
    /// Metrics drawn before the first epoch
    pub initial:          Metrics,
    pub trajectory:       Vec<EpochMetrics>,
}

impl TrainingHistory {
    /// Total batches processed across every epoch
    pub fn total_batches(&self) -> usize {
        self.trajectory.iter().map(|e| e.batches).sum()
    }
}
