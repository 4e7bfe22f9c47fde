// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that name the core
// concepts of the pipeline:
//
//   image.rs         — LabeledImage, Label, Split
//   architecture.rs  — LayerSpec, InputShape, ArchitectureDescriptor
//   training.rs      — Metrics, EpochMetrics, TrainingHistory
//   trigger.rs       — a positive crawl match
//   traits.rs        — the seams other layers implement
//   error.rs         — the core error taxonomy
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO tracing subscriber setup
//   - Only plain data, invariants, and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// Labeled corpus entries and the train/validation split
pub mod image;

// Declarative layer stack with a one-way compile flag
pub mod architecture;

// Loss/accuracy values and the history of a run
pub mod training;

// Crawl match record
pub mod trigger;

// Core abstractions (traits) that other layers implement
pub mod traits;

// PipelineError and the crate Result alias
pub mod error;
