// ============================================================
// Layer 3 — Architecture Descriptor
// ============================================================
// A model is described as data: an ordered list of LayerSpec
// values plus the input shape. There is no behaviour per layer
// type; each variant is a record the serde tag tells apart.
//
// On disk (the artifact) only the layer list is written:
//
//   [
//     { "type": "Conv2D", "filters": 32, "kernelSize": [3, 3], "activation": "relu" },
//     { "type": "MaxPooling2D", "poolSize": [2, 2] },
//     { "type": "Flatten" },
//     { "type": "Dense", "units": 1, "activation": "sigmoid" }
//   ]
//
// Lifecycle: uncompiled → compiled. compile() consumes the
// descriptor and hands back the compiled one, so there is no
// way to flip it back or to mutate a compiled descriptor.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::Relu    => write!(f, "relu"),
            Activation::Sigmoid => write!(f, "sigmoid"),
        }
    }
}

/// One stage of the layer stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerSpec {
    #[serde(rename = "Conv2D", rename_all = "camelCase")]
    Conv2d {
        filters:     u32,
        kernel_size: [u32; 2],
        activation:  Activation,
    },

    #[serde(rename = "MaxPooling2D", rename_all = "camelCase")]
    MaxPooling2d {
        pool_size: [u32; 2],
    },

    Flatten,

    Dense {
        units:      u32,
        activation: Activation,
    },
}

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerSpec::Conv2d { filters, kernel_size: [kh, kw], activation } => {
                write!(f, "Conv2D(filters={filters}, kernel={kh}x{kw}, activation={activation})")
            }
            LayerSpec::MaxPooling2d { pool_size: [ph, pw] } => {
                write!(f, "MaxPooling2D(pool={ph}x{pw})")
            }
            LayerSpec::Flatten => write!(f, "Flatten"),
            LayerSpec::Dense { units, activation } => {
                write!(f, "Dense(units={units}, activation={activation})")
            }
        }
    }
}

/// (height, width, channels) of the images the model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputShape {
    pub height:   u32,
    pub width:    u32,
    pub channels: u32,
}

impl Default for InputShape {
    fn default() -> Self {
        Self { height: 224, width: 224, channels: 3 }
    }
}

impl TryFrom<&[i64]> for InputShape {
    type Error = PipelineError;

    fn try_from(dims: &[i64]) -> Result<Self> {
        let invalid = || PipelineError::InvalidShape(dims.to_vec());

        let [h, w, c] = dims else { return Err(invalid()) };
        let positive = |d: i64| u32::try_from(d).ok().filter(|&d| d > 0);

        Ok(Self {
            height:   positive(*h).ok_or_else(invalid)?,
            width:    positive(*w).ok_or_else(invalid)?,
            channels: positive(*c).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchitectureDescriptor {
    layers:      Vec<LayerSpec>,
    input_shape: InputShape,
    compiled:    bool,
}

impl ArchitectureDescriptor {
    /// New, uncompiled descriptor
    pub fn new(layers: Vec<LayerSpec>, input_shape: InputShape) -> Self {
        Self { layers, input_shape, compiled: false }
    }

    /// Mark the descriptor ready for training. Compiling twice is a no-op.
    pub fn compile(self) -> Self {
        Self { compiled: true, ..self }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn input_shape(&self) -> InputShape {
        self.input_shape
    }

    /// Human-readable listing, one line per layer
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("Input: {}", self.input_shape)];
        lines.extend(
            self.layers
                .iter()
                .enumerate()
                .map(|(i, layer)| format!("  {:>2}. {}", i + 1, layer)),
        );
        lines
    }
}
