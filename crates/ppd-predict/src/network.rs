//! Dense feed-forward network exported as JSON.
//!
//! ```json
//! {
//!   "layers": [
//!     { "weights": [[...], ...], "bias": [...], "activation": "relu" },
//!     { "weights": [[...], ...], "bias": [...], "activation": "softmax" }
//!   ]
//! }
//! ```
//!
//! `weights` is indexed `[input][unit]`, the layout Keras uses for `Dense`
//! kernels. The first layer takes the eight survey columns; the last has one
//! unit (a scalar score) or two (a class-probability pair).

use std::path::Path;

use ppd_model::{FEATURE_COUNT, Feature, FeatureMatrix};
use serde::Deserialize;

use crate::error::{PredictError, Result};
use crate::file::read_model_text;
use crate::predictor::Predictor;
use crate::scores::RawScores;
use crate::slot::ModelKind;

const KIND: ModelKind = ModelKind::NeuralNetwork;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Softmax,
    Tanh,
    #[default]
    Linear,
}

impl Activation {
    fn apply(self, values: &mut [f64]) {
        match self {
            Self::Relu => values.iter_mut().for_each(|v| *v = v.max(0.0)),
            Self::Sigmoid => values
                .iter_mut()
                .for_each(|v| *v = 1.0 / (1.0 + (-*v).exp())),
            Self::Tanh => values.iter_mut().for_each(|v| *v = v.tanh()),
            Self::Linear => {}
            Self::Softmax => {
                let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                values.iter_mut().for_each(|v| *v = (*v - max).exp());
                let total: f64 = values.iter().sum();
                if total > 0.0 {
                    values.iter_mut().for_each(|v| *v /= total);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenseLayer {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
    #[serde(default)]
    activation: Activation,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.len()
    }

    fn units(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = self.bias.clone();
        for (value, row) in input.iter().zip(&self.weights) {
            for (out, weight) in output.iter_mut().zip(row) {
                *out += value * weight;
            }
        }
        self.activation.apply(&mut output);
        output
    }
}

#[derive(Debug, Deserialize)]
struct NetworkFile {
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    layers: Vec<DenseLayer>,
}

/// A loaded network.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Load a model file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = read_model_text(path)?;
        let network = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), layers = network.layers.len(), "network model parsed");
        Ok(network)
    }

    /// Parse and shape-check a network definition.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: NetworkFile =
            serde_json::from_str(text).map_err(|source| PredictError::Json { kind: KIND, source })?;
        if let Some(names) = file.feature_names {
            let expected = Feature::column_names();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(PredictError::FeatureNames {
                    kind: KIND,
                    expected: expected.iter().map(ToString::to_string).collect(),
                    found: names,
                });
            }
        }
        Self::new(file.layers)
    }

    /// Build from layers, checking that each layer's shape feeds the next.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(PredictError::invalid(KIND, "network has no layers"));
        }
        let mut width = FEATURE_COUNT;
        for (index, layer) in layers.iter().enumerate() {
            if layer.inputs() != width {
                return Err(PredictError::invalid(
                    KIND,
                    format!("layer {index} takes {} inputs, expected {width}", layer.inputs()),
                ));
            }
            if layer.units() == 0 {
                return Err(PredictError::invalid(KIND, format!("layer {index} has no units")));
            }
            if let Some(row) = layer.weights.iter().position(|row| row.len() != layer.units()) {
                return Err(PredictError::invalid(
                    KIND,
                    format!(
                        "layer {index} weight row {row} has {} values, bias has {}",
                        layer.weights[row].len(),
                        layer.units()
                    ),
                ));
            }
            width = layer.units();
        }
        if !matches!(width, 1 | 2) {
            return Err(PredictError::invalid(
                KIND,
                format!("output layer has {width} units, expected 1 or 2"),
            ));
        }
        Ok(Self { layers })
    }

    /// Width of the output layer.
    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::units)
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.layers
            .iter()
            .fold(input.to_vec(), |values, layer| layer.forward(&values))
    }
}

impl Predictor for DenseNetwork {
    fn describe(&self) -> String {
        format!(
            "dense network, {} layers, {} outputs",
            self.layers.len(),
            self.output_width()
        )
    }

    fn predict(&self, rows: &FeatureMatrix) -> Result<RawScores> {
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|row| self.forward(row.as_slice()))
            .collect();
        Ok(match self.output_width() {
            1 => RawScores::Column(values),
            n_cols => RawScores::Matrix { values, n_cols },
        })
    }
}
