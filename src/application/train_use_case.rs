// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate the config               (Layer 2)
//   Step 2: Load and split the corpus         (Layer 4 - data)
//   Step 3: Build and compile the model       (Layer 5 - ml)
//   Step 4: Run the training loop             (Layer 5 - ml)
//   Step 5: Append metrics to the CSV log     (Layer 6 - infra)
//   Step 6: Log the run summary               (Layer 2)
//   Step 7: Optional sample prediction        (Layer 5 - ml)

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{CorpusLoader, DEFAULT_VAL_SPLIT};
use crate::domain::architecture::InputShape;
use crate::domain::error::PipelineError;
use crate::domain::training::TrainingHistory;
use crate::infra::{artifact_store::ArtifactStore, metrics::MetricsLogger};
use crate::ml::{
    builder::build_model,
    policy::RandomDecayPolicy,
    predictor::Predictor,
    trainer::MetricTrainer,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters of a training run. Serialisable so a run can
// be described in logs or reproduced from a saved file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub concept_dir:    String,
    pub no_concept_dir: String,
    pub name:           String,
    pub models_dir:     String,
    /// Overrides `<models_dir>/<name>.json` when set
    pub model_path:     Option<String>,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub val_split:      f64,
    pub input_shape:    Vec<i64>,
    pub batch_delay_ms: u64,
    pub predict_image:  Option<String>,
    /// Fixes the metric policy RNG; entropy-seeded when absent
    pub seed:           Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let shape = InputShape::default();
        Self {
            concept_dir:    "data/concept".to_string(),
            no_concept_dir: "data/no-concept".to_string(),
            name:           "simulated_model".to_string(),
            models_dir:     "models".to_string(),
            model_path:     None,
            epochs:         10,
            batch_size:     32,
            val_split:      DEFAULT_VAL_SPLIT,
            input_shape:    vec![shape.height as i64, shape.width as i64, shape.channels as i64],
            batch_delay_ms: 5,
            predict_image:  None,
            seed:           None,
        }
    }
}

impl TrainConfig {
    /// Reject parameters that would fail mid-run
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig("batch size must be at least 1".into()));
        }
        if !(self.val_split > 0.0 && self.val_split < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "validation split must be in (0, 1), got {}",
                self.val_split
            )));
        }
        if self.name.trim().is_empty() {
            return Err(PipelineError::InvalidConfig("model name must not be empty".into()));
        }
        InputShape::try_from(self.input_shape.as_slice())?;
        Ok(())
    }

    pub fn artifact_path(&self) -> PathBuf {
        match &self.model_path {
            Some(path) => PathBuf::from(path),
            None => ArtifactStore::new(&self.models_dir).artifact_path(&self.name),
        }
    }

    pub fn metrics_path(&self) -> PathBuf {
        ArtifactStore::new(&self.models_dir).metrics_path(&self.name)
    }
}

/// What a finished run produced
#[derive(Debug)]
pub struct TrainReport {
    pub history:       TrainingHistory,
    pub artifact_path: PathBuf,
    pub elapsed:       Duration,
    pub prediction:    Option<u8>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub async fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Validate before touching anything ─────────────────────────
        cfg.validate()?;
        let artifact_path = cfg.artifact_path();

        // ── Step 2: Corpus ────────────────────────────────────────────────────
        let loader = CorpusLoader::new(&cfg.concept_dir, &cfg.no_concept_dir);
        let split  = loader.load(cfg.val_split)?;
        let (train_pos, val_pos) = split.concept_counts();
        tracing::debug!(
            "Concept images: {} of {} in training, {} of {} in validation",
            train_pos,
            split.train.len(),
            val_pos,
            split.validation.len()
        );

        // ── Step 3: Model ─────────────────────────────────────────────────────
        let model = build_model(&cfg.input_shape)?;

        // ── Step 4: Training loop ─────────────────────────────────────────────
        let policy = match cfg.seed {
            Some(seed) => RandomDecayPolicy::with_seed(seed),
            None => RandomDecayPolicy::new(),
        };
        let mut trainer = MetricTrainer::new(policy)
            .with_batch_delay(Duration::from_millis(cfg.batch_delay_ms));

        let started = Instant::now();
        let history = trainer
            .train(
                &model,
                &split.train,
                &split.validation,
                cfg.epochs,
                cfg.batch_size,
                &artifact_path,
            )
            .await?;
        let elapsed = started.elapsed();

        // ── Step 5: Metrics CSV ───────────────────────────────────────────────
        let metrics_log = MetricsLogger::new(cfg.metrics_path())?;
        metrics_log.log_all(&history.trajectory)?;
        tracing::debug!("Metrics appended to '{}'", metrics_log.csv_path().display());

        // ── Step 6: Summary ───────────────────────────────────────────────────
        tracing::info!("--- Run summary ---");
        tracing::info!("Epochs completed: {}", history.epochs_completed);
        tracing::info!("Batches processed: {}", history.total_batches());
        tracing::info!("Final loss: {:.4}", history.final_loss);
        tracing::info!("Final accuracy: {:.4}", history.final_accuracy);
        tracing::info!("Total time: {:.2} seconds", elapsed.as_secs_f64());
        tracing::info!("Model saved to: {}", artifact_path.display());
        tracing::info!("-------------------");

        // ── Step 7: Sample prediction ─────────────────────────────────────────
        let prediction = match &cfg.predict_image {
            Some(image) => {
                tracing::info!("Running sample inference");
                let predictor = Predictor::load(&artifact_path)
                    .await
                    .with_context(|| format!("Cannot reload '{}'", artifact_path.display()))?;
                let label = predictor.predict(image).await;
                tracing::info!("Prediction for '{}': {}", image, label);
                Some(label.as_u8())
            }
            None => None,
        };

        Ok(TrainReport { history, artifact_path, elapsed, prediction })
    }
}
