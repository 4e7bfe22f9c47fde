// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Discovers labeled images on disk and splits them into
// training and validation sets.
//
// Corpus layout:
//   concept_dir/**/*.{jpg,jpeg,png}      → Label::Concept   (1)
//   no_concept_dir/**/*.{jpg,jpeg,png}   → Label::NoConcept (0)
//
// Extensions are matched case-insensitively. Directories are
// walked recursively with walkdir, in file-name order, so the
// pre-shuffle order is stable for a given tree.
//
// Nothing on disk is modified.
//
// Reference: walkdir crate documentation
//            Rust Book §9 (Error Handling)

use std::path::{Path, PathBuf};

use rand::Rng;
use walkdir::WalkDir;

use crate::data::splitter::split_train_val;
use crate::domain::error::{PipelineError, Result};
use crate::domain::image::{Label, LabeledImage, Split};
use crate::domain::traits::ImageSource;

/// File extensions treated as images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Fraction of the corpus held out for validation by default
pub const DEFAULT_VAL_SPLIT: f64 = 0.2;

/// Loads the two class directories of a binary corpus.
pub struct CorpusLoader {
    concept_dir:    PathBuf,
    no_concept_dir: PathBuf,
}

impl CorpusLoader {
    pub fn new(concept_dir: impl Into<PathBuf>, no_concept_dir: impl Into<PathBuf>) -> Self {
        Self {
            concept_dir:    concept_dir.into(),
            no_concept_dir: no_concept_dir.into(),
        }
    }

    /// Discover, shuffle and split the corpus using the thread RNG.
    pub fn load(&self, val_split: f64) -> Result<Split> {
        self.load_with_rng(val_split, &mut rand::thread_rng())
    }

    /// Same as `load`, with the shuffle drawn from `rng`.
    pub fn load_with_rng<R: Rng + ?Sized>(&self, val_split: f64, rng: &mut R) -> Result<Split> {
        if !(val_split > 0.0 && val_split < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "validation split must be in (0, 1), got {val_split}"
            )));
        }

        tracing::debug!("Loading images with extensions: {}", IMAGE_EXTENSIONS.join(", "));
        let labeled = self.load_all()?;

        if labeled.is_empty() {
            return Err(PipelineError::EmptyCorpus {
                concept_dir:    self.concept_dir.clone(),
                no_concept_dir: self.no_concept_dir.clone(),
            });
        }

        let (train, validation) = split_train_val(labeled, val_split, rng);
        tracing::debug!("Corpus shuffled");
        let split = Split { train, validation };
        tracing::info!(
            "Data split: {} for training, {} for validation ({} total)",
            split.train.len(),
            split.validation.len(),
            split.total()
        );

        Ok(split)
    }
}

impl ImageSource for CorpusLoader {
    fn load_all(&self) -> Result<Vec<LabeledImage>> {
        let concept    = list_images(&self.concept_dir)?;
        let no_concept = list_images(&self.no_concept_dir)?;

        tracing::info!("Found {} images in the concept directory", concept.len());
        tracing::info!("Found {} images in the no-concept directory", no_concept.len());

        let labeled = concept
            .into_iter()
            .map(|p| LabeledImage::new(p, Label::Concept))
            .chain(no_concept.into_iter().map(|p| LabeledImage::new(p, Label::NoConcept)))
            .collect();

        Ok(labeled)
    }
}

/// Recursively list image files under `dir`.
/// A missing directory yields an empty list.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!("Directory '{}' does not exist, no images taken from it", dir.display());
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| PipelineError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() && is_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
