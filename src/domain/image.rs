// ============================================================
// Layer 3 — Labeled Image Domain Types
// ============================================================
// A LabeledImage is a file path plus the class implied by the
// directory it was discovered in. Fields are private so an
// image cannot be relabelled after discovery.

use std::fmt;
use std::path::{Path, PathBuf};

/// Binary class of an image. `Concept` is the positive class (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    NoConcept,
    Concept,
}

impl Label {
    /// Numeric form used in logs and predictions: 0 or 1
    pub fn as_u8(self) -> u8 {
        match self {
            Label::NoConcept => 0,
            Label::Concept   => 1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Label::Concept
    }
}

impl From<bool> for Label {
    fn from(positive: bool) -> Self {
        if positive { Label::Concept } else { Label::NoConcept }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledImage {
    path:  PathBuf,
    label: Label,
}

impl LabeledImage {
    pub fn new(path: impl Into<PathBuf>, label: Label) -> Self {
        Self { path: path.into(), label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn label(&self) -> Label {
        self.label
    }
}

/// Disjoint training and validation partitions of one corpus.
#[derive(Debug, Clone)]
pub struct Split {
    pub train:      Vec<LabeledImage>,
    pub validation: Vec<LabeledImage>,
}

impl Split {
    /// Total number of images across both partitions
    pub fn total(&self) -> usize {
        self.train.len() + self.validation.len()
    }

    /// Number of positive images in each partition, (train, validation)
    pub fn concept_counts(&self) -> (usize, usize) {
        let count = |items: &[LabeledImage]| {
            items.iter().filter(|i| i.label().is_positive()).count()
        };
        (count(&self.train), count(&self.validation))
    }
}
