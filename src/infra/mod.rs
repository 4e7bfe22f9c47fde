// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the outside world:
//
//   artifact_store.rs — Writing and reading the model artifact
//                       (JSON layer list, atomic temp-file +
//                       rename writes).
//
//   metrics.rs        — Per-epoch metrics appended to a CSV.
//
//   logging.rs        — tracing subscriber setup: stdout plus
//                       a log file, level from LogConfig.
//
//   http.rs           — reqwest client used by the crawler.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod artifact_store;

/// Training metrics CSV logger
pub mod metrics;

/// Subscriber installation and log levels
pub mod logging;

/// HTTP page and image fetching
pub mod http;
