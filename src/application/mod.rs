// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer strings the other layers together for one goal
// (training a model, or crawling a page with it).
//
// Rules for this layer:
//   - No model or metric logic here (that's Layer 5)
//   - No argument parsing (that's Layer 1)
//   - Only workflow coordination and error context
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The page crawling workflow
pub mod crawl_use_case;
