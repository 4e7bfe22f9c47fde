// ============================================================
// Layer 5 — Predictor
// ============================================================
// Loads an artifact and labels images with it.
//
// The artifact carries no weights, so the default scorer is a
// fair coin. Scoring is pluggable through ImageScorer; whatever
// replaces the coin must return exactly 0 or 1 and write
// nothing.
//
// The loaded layers are never mutated after load(), so one
// Predictor can serve many concurrent predict() calls.

use std::path::Path;
use std::time::Duration;

use rand::Rng;

use crate::domain::architecture::LayerSpec;
use crate::domain::error::Result;
use crate::domain::image::Label;
use crate::domain::traits::ImageScorer;
use crate::infra::artifact_store::load_layers;

/// Simulated preprocessing + inference time per image
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(50);

/// Uniform coin flip, independent of the image.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinFlipScorer;

impl ImageScorer for CoinFlipScorer {
    async fn score(&self, _layers: &[LayerSpec], _image: &str) -> Label {
        Label::from(rand::thread_rng().gen_bool(0.5))
    }
}

pub struct Predictor<S = CoinFlipScorer> {
    layers:  Vec<LayerSpec>,
    scorer:  S,
    latency: Duration,
}

impl Predictor<CoinFlipScorer> {
    /// Load the artifact at `artifact_path` with the coin-flip scorer.
    ///
    /// Fails with ArtifactNotFound when the file is missing and
    /// ArtifactParse when it is not a non-empty layer list.
    pub async fn load(artifact_path: &Path) -> Result<Self> {
        Self::load_with(artifact_path, CoinFlipScorer).await
    }
}

impl<S: ImageScorer> Predictor<S> {
    /// Load the artifact at `artifact_path`, scoring with `scorer`.
    pub async fn load_with(artifact_path: &Path, scorer: S) -> Result<Self> {
        tracing::info!("Loading model from '{}'", artifact_path.display());
        let layers = load_layers(artifact_path).await?;
        tracing::info!("Model architecture loaded ({} layers)", layers.len());

        Ok(Self {
            layers,
            scorer,
            latency: DEFAULT_LATENCY,
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Label one image (a local path or a URL).
    pub async fn predict(&self, image: &str) -> Label {
        tracing::debug!("Predicting '{}'", image);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let label = self.scorer.score(&self.layers, image).await;

        tracing::debug!("Prediction for '{}': {}", image, label);
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::infra::artifact_store::save_layers;
    use crate::ml::builder::cnn_layers;
    use std::sync::Arc;

    async fn loaded(dir: &Path) -> Predictor {
        let path = dir.join("model.json");
        save_layers(&path, &cnn_layers()).unwrap();
        Predictor::load(&path).await.unwrap().with_latency(Duration::ZERO)
    }

    /// Positive when the file name mentions "cat"
    struct NameScorer;

    impl ImageScorer for NameScorer {
        async fn score(&self, _layers: &[LayerSpec], image: &str) -> Label {
            Label::from(image.contains("cat"))
        }
    }

    /// Reads the image from disk before deciding, so scoring suspends
    struct FileScorer;

    impl ImageScorer for FileScorer {
        async fn score(&self, _layers: &[LayerSpec], image: &str) -> Label {
            let bytes = tokio::fs::read(image).await.unwrap_or_default();
            Label::from(bytes.starts_with(b"CAT"))
        }
    }

    #[tokio::test]
    async fn test_load_round_trips_layers() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = loaded(dir.path()).await;
        assert_eq!(predictor.layers(), cnn_layers().as_slice());
    }

    #[tokio::test]
    async fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Predictor::load(&dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(PipelineError::ArtifactNotFound(_))));

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "not json").unwrap();
        assert!(matches!(
            Predictor::load(&corrupt).await,
            Err(PipelineError::ArtifactParse { .. })
        ));
    }

    #[tokio::test]
    async fn test_hundred_predictions_are_binary() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = loaded(dir.path()).await;

        let mut seen = [0usize; 2];
        for i in 0..100 {
            let label = predictor.predict(&format!("images/{i}.jpg")).await;
            seen[label.as_u8() as usize] += 1;
        }
        assert_eq!(seen[0] + seen[1], 100);
        // A fair coin landing the same way 100 times is ~1e-30
        assert!(seen[0] > 0 && seen[1] > 0);
    }

    #[tokio::test]
    async fn test_concurrent_predictions_map_back_to_their_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        save_layers(&path, &cnn_layers()).unwrap();
        let predictor = Arc::new(
            Predictor::load_with(&path, NameScorer)
                .await
                .unwrap()
                .with_latency(Duration::from_millis(1)),
        );

        let names: Vec<String> = (0..20)
            .map(|i| if i % 3 == 0 { format!("cat_{i}.png") } else { format!("dog_{i}.png") })
            .collect();

        let mut tasks = tokio::task::JoinSet::new();
        for (idx, name) in names.iter().cloned().enumerate() {
            let predictor = Arc::clone(&predictor);
            tasks.spawn(async move { (idx, predictor.predict(&name).await) });
        }

        let mut results = vec![None; names.len()];
        while let Some(joined) = tasks.join_next().await {
            let (idx, label) = joined.unwrap();
            results[idx] = Some(label);
        }

        for (name, label) in names.iter().zip(results) {
            assert_eq!(label, Some(Label::from(name.starts_with("cat"))));
        }
        assert_eq!(predictor.layers(), cnn_layers().as_slice());
    }

    #[tokio::test]
    async fn test_scorer_can_await_image_reads() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.json");
        save_layers(&model, &cnn_layers()).unwrap();

        let cat = dir.path().join("a.png");
        let dog = dir.path().join("b.png");
        std::fs::write(&cat, b"CAT-bytes").unwrap();
        std::fs::write(&dog, b"DOG-bytes").unwrap();

        let predictor = Predictor::load_with(&model, FileScorer)
            .await
            .unwrap()
            .with_latency(Duration::ZERO);

        assert_eq!(predictor.predict(cat.to_str().unwrap()).await, Label::Concept);
        assert_eq!(predictor.predict(dog.to_str().unwrap()).await, Label::NoConcept);
        assert_eq!(
            predictor.predict(dir.path().join("missing.png").to_str().unwrap()).await,
            Label::NoConcept
        );
    }
}
