// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams of the pipeline. Each one has a single production
// implementation today and a test double in the test modules:
//
//   ImageSource   — CorpusLoader          (data/loader.rs)
//   MetricPolicy  — RandomDecayPolicy     (ml/policy.rs)
//   ImageScorer   — CoinFlipScorer        (ml/predictor.rs)
//   PageFetcher   — HttpFetcher           (infra/http.rs)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::future::Future;

use url::Url;

use crate::domain::architecture::LayerSpec;
use crate::domain::error::Result;
use crate::domain::image::{Label, LabeledImage};
use crate::domain::training::Metrics;

// ─── ImageSource ──────────────────────────────────────────────────────────────
/// Anything that can enumerate a labeled corpus.
pub trait ImageSource {
    /// Every labeled image available, in discovery order.
    fn load_all(&self) -> Result<Vec<LabeledImage>>;
}

// ─── MetricPolicy ─────────────────────────────────────────────────────────────
/// Produces the loss/accuracy trajectory of a run.
///
/// The trainer owns the epoch/batch control flow and asks the
/// policy for one new value per finished epoch. A real learning
/// engine replaces this trait's implementation, not the trainer.
pub trait MetricPolicy {
    /// Metrics before the first epoch
    fn initial(&mut self) -> Metrics;

    /// Metrics after one more epoch, given the previous ones.
    /// Must keep `loss > 0` and `0 < accuracy < 1`.
    fn next_metrics(&mut self, prev: Metrics) -> Metrics;
}

// ─── ImageScorer ──────────────────────────────────────────────────────────────
/// Maps an image to a label using a loaded layer stack.
///
/// Implementations must not write anywhere and must be safe to
/// call from many tasks at once. Scoring may suspend, e.g. to
/// read or decode the image.
pub trait ImageScorer: Send + Sync {
    fn score(&self, layers: &[LayerSpec], image: &str) -> impl Future<Output = Label> + Send;
}

// ─── PageFetcher ──────────────────────────────────────────────────────────────
/// Network access used by the crawler.
pub trait PageFetcher {
    fn fetch_text(&self, url: &Url) -> impl Future<Output = anyhow::Result<String>>;

    fn fetch_bytes(&self, url: &Url) -> impl Future<Output = anyhow::Result<Vec<u8>>>;
}

