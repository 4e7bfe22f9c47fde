// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the image directories on disk and the
// batches the trainer iterates over:
//
//   concept/ + no-concept/
//       │
//       ▼
//   CorpusLoader   → walks both directories, labels each image
//       │
//       ▼
//   splitter       → shuffles the combined corpus, cuts train/validation
//       │
//       ▼
//   Batcher        → full-size batch slices for each epoch
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Discovers labeled images in the two class directories
pub mod loader;

/// Shuffles and splits data into train/validation sets
pub mod splitter;

/// Slices a training set into fixed-size batches
pub mod batcher;
