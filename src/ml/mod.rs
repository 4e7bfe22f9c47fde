// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// Everything that describes, trains or runs a model:
//
//   builder.rs    — The fixed CNN layer stack
//                   Two conv+pool stages, flatten, a hidden
//                   dense layer and a single sigmoid unit.
//                   Returned already compiled.
//
//   policy.rs     — Metric evolution
//                   How loss and accuracy move from one epoch
//                   to the next. Behind the MetricPolicy trait.
//
//   trainer.rs    — The training loop
//                   Epochs, batches, the Idle/Running/Completed
//                   state machine and the artifact write.
//
//   predictor.rs  — Inference
//                   Loads an artifact and labels images 0 or 1.

/// CNN architecture construction and compilation
pub mod builder;

/// Loss/accuracy update rule
pub mod policy;

/// Epoch/batch training loop with artifact persistence
pub mod trainer;

/// Artifact loading and per-image prediction
pub mod predictor;
