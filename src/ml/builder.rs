// ============================================================
// Layer 5 — Architecture Builder
// ============================================================
// Builds the fixed CNN layer stack for binary classification:
//
//   Conv2D(32, 3x3, relu) → MaxPooling2D(2x2)
//   Conv2D(64, 3x3, relu) → MaxPooling2D(2x2)
//   Flatten
//   Dense(128, relu)
//   Dense(1, sigmoid)          ← single-unit binary head
//
// The topology does not depend on the data; only the input
// shape is supplied by the caller.

use crate::domain::architecture::{Activation, ArchitectureDescriptor, InputShape, LayerSpec};
use crate::domain::error::Result;

pub const OPTIMIZER: &str = "adam";
pub const LOSS: &str = "binary_crossentropy";

/// The layer stack every model uses
pub fn cnn_layers() -> Vec<LayerSpec> {
    vec![
        LayerSpec::Conv2d { filters: 32, kernel_size: [3, 3], activation: Activation::Relu },
        LayerSpec::MaxPooling2d { pool_size: [2, 2] },
        LayerSpec::Conv2d { filters: 64, kernel_size: [3, 3], activation: Activation::Relu },
        LayerSpec::MaxPooling2d { pool_size: [2, 2] },
        LayerSpec::Flatten,
        LayerSpec::Dense { units: 128, activation: Activation::Relu },
        LayerSpec::Dense { units: 1, activation: Activation::Sigmoid },
    ]
}

/// Build and compile the model for images of `input_shape`.
///
/// Fails with InvalidShape unless the shape is exactly three
/// positive dimensions (height, width, channels).
pub fn build_model(input_shape: &[i64]) -> Result<ArchitectureDescriptor> {
    let shape = InputShape::try_from(input_shape)?;
    tracing::debug!("Building CNN for input {}", shape);

    let model = ArchitectureDescriptor::new(cnn_layers(), shape).compile();
    tracing::info!("Model compiled with '{}' and '{}'", OPTIMIZER, LOSS);

    tracing::info!("--- Model summary ---");
    for line in model.summary() {
        tracing::info!("{}", line);
    }
    tracing::info!("---------------------");

    Ok(model)
}
