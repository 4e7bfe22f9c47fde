// ============================================================
// Layer 4 — Batcher
// ============================================================
// Slices a training set into fixed-size batches for the
// epoch loop.
//
//   Input:  N labeled images, batch_size B
//   Output: floor(N / B) slices of exactly B images
//
// A trailing partial batch (N % B images) is dropped. It is
// not processed short and it is not an error.

use crate::domain::error::{PipelineError, Result};
use crate::domain::image::LabeledImage;

#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    /// Fails with InvalidConfig for a zero batch size
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of full batches `items` yields
    pub fn batch_count(&self, items: usize) -> usize {
        items / self.batch_size
    }

    /// Iterate over full batches only
    pub fn batches<'a>(
        &self,
        items: &'a [LabeledImage],
    ) -> impl Iterator<Item = &'a [LabeledImage]> + 'a {
        items.chunks_exact(self.batch_size)
    }

    /// Images left out of every epoch by the partial-batch rule
    pub fn dropped(&self, items: usize) -> usize {
        items % self.batch_size
    }
}
