// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch/batch loop over a compiled architecture.
//
//   Idle ──train()──▶ Running { epoch } ──all epochs + artifact──▶ Completed
//
// Per run:
//   1. Check the architecture is compiled and batch_size > 0
//   2. Draw initial metrics from the policy
//   3. For each epoch 1..=epochs, strictly in order:
//        - one suspension point per full batch
//          (floor(|train| / batch_size) of them; the partial
//           tail batch is dropped)
//        - one policy step for loss/accuracy
//   4. Persist the layer list as the artifact (atomic)
//   5. Return the TrainingHistory
//
// The policy is the only piece meant to be swapped for real
// learning; the control flow above stays as it is.
//
// Reference: tokio::time / tokio::task docs

use std::path::Path;
use std::time::{Duration, Instant};

use crate::data::batcher::Batcher;
use crate::domain::architecture::ArchitectureDescriptor;
use crate::domain::error::{PipelineError, Result};
use crate::domain::image::LabeledImage;
use crate::domain::training::{EpochMetrics, TrainingHistory};
use crate::domain::traits::MetricPolicy;
use crate::infra::artifact_store::save_layers;

/// Simulated cost of one batch when none is configured
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    Idle,
    Running { epoch: usize },
    Completed,
}

pub struct MetricTrainer<P> {
    policy:      P,
    state:       TrainerState,
    batch_delay: Duration,
}

impl<P: MetricPolicy> MetricTrainer<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            state:       TrainerState::Idle,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }

    /// Time spent per batch. Zero still yields to the scheduler.
    pub fn with_batch_delay(mut self, batch_delay: Duration) -> Self {
        self.batch_delay = batch_delay;
        self
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Run `epochs` epochs over `train_set` and write the artifact.
    ///
    /// `epochs == 0` skips the loop and returns the initial
    /// metrics; the artifact is still written.
    pub async fn train(
        &mut self,
        architecture:   &ArchitectureDescriptor,
        train_set:      &[LabeledImage],
        validation_set: &[LabeledImage],
        epochs:         usize,
        batch_size:     usize,
        artifact_path:  &Path,
    ) -> Result<TrainingHistory> {
        if !architecture.is_compiled() {
            return Err(PipelineError::InvalidConfig(
                "architecture must be compiled before training".to_string(),
            ));
        }
        let batcher = Batcher::new(batch_size)?;

        tracing::info!(
            "Starting training on {} inputs: {} epochs, {} batches of {} per epoch ({} training images, {} held for validation)",
            architecture.input_shape(),
            epochs,
            batcher.batch_count(train_set.len()),
            batcher.batch_size(),
            train_set.len(),
            validation_set.len(),
        );
        if batcher.dropped(train_set.len()) > 0 {
            tracing::debug!(
                "{} images fall in a partial batch and are skipped each epoch",
                batcher.dropped(train_set.len())
            );
        }

        let initial     = self.policy.initial();
        let mut current = initial;
        let mut trajectory = Vec::with_capacity(epochs);

        for epoch in 1..=epochs {
            self.state = TrainerState::Running { epoch };
            let started = Instant::now();
            tracing::info!("--- Epoch {}/{} ---", epoch, epochs);

            let mut batches = 0usize;
            for batch in batcher.batches(train_set) {
                self.process_batch(batch).await;
                batches += 1;
            }

            current = self.policy.next_metrics(current);
            if !current.is_bounded() {
                tracing::warn!(
                    "Epoch {} metrics left their bounds: loss {}, accuracy {}",
                    epoch, current.loss, current.accuracy,
                );
            }

            let seconds = started.elapsed().as_secs_f64();
            tracing::info!(
                "Epoch {} done. Loss: {:.4}, Accuracy: {:.4}. Time: {:.2}s",
                epoch, current.loss, current.accuracy, seconds,
            );

            trajectory.push(EpochMetrics {
                epoch,
                loss:     current.loss,
                accuracy: current.accuracy,
                batches,
                seconds,
            });
        }

        tracing::info!("Training finished");

        if let Err(e) = save_layers(artifact_path, architecture.layers()) {
            self.state = TrainerState::Idle;
            return Err(e);
        }
        tracing::info!("Model saved to '{}'", artifact_path.display());
        self.state = TrainerState::Completed;

        Ok(TrainingHistory {
            epochs_completed: epochs,
            final_loss:       current.loss,
            final_accuracy:   current.accuracy,
            initial,
            trajectory,
        })
    }

    async fn process_batch(&self, batch: &[LabeledImage]) {
        tracing::trace!("Processing batch of {}", batch.len());
        if self.batch_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.batch_delay).await;
        }
    }
}
