//! Gradient-boosted tree ensemble in LightGBM's text model format.
//!
//! Only numerical splits are supported. Each tree is walked from its root:
//! a value goes left when it is `<=` the threshold, and a missing value
//! follows the node's default direction. Tree outputs are summed (or
//! averaged for random-forest models) and a binary objective maps the sum
//! through a sigmoid.

mod parse;

use std::path::Path;

use ppd_model::{FeatureMatrix, FeatureRow};

use crate::error::Result;
use crate::file::read_model_text;
use crate::predictor::Predictor;
use crate::scores::RawScores;

/// Values this close to zero count as zero for zero-as-missing splits.
const ZERO_THRESHOLD: f64 = 1e-35;

/// How a raw tree sum becomes a score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Objective {
    /// `1 / (1 + exp(-scale * sum))`.
    Sigmoid { scale: f64 },
    /// Raw sum.
    Identity,
}

impl Objective {
    fn transform(self, raw: f64) -> f64 {
        match self {
            Self::Sigmoid { scale } => 1.0 / (1.0 + (-scale * raw).exp()),
            Self::Identity => raw,
        }
    }
}

/// Which values a split treats as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MissingType {
    None,
    Zero,
    NaN,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    Node(usize),
    Leaf(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct Split {
    feature: usize,
    threshold: f64,
    default_left: bool,
    missing: MissingType,
    left: Child,
    right: Child,
}

impl Split {
    fn next(&self, row: &FeatureRow) -> Child {
        let mut value = row.as_slice()[self.feature];
        if value.is_nan() && self.missing != MissingType::NaN {
            value = 0.0;
        }
        let is_missing = match self.missing {
            MissingType::None => false,
            MissingType::Zero => value.abs() <= ZERO_THRESHOLD,
            MissingType::NaN => value.is_nan(),
        };
        let go_left = if is_missing {
            self.default_left
        } else {
            value <= self.threshold
        };
        if go_left { self.left } else { self.right }
    }
}

/// One decision tree. A tree without splits is a single leaf.
#[derive(Debug, Clone, PartialEq)]
struct Tree {
    splits: Vec<Split>,
    leaf_values: Vec<f64>,
}

impl Tree {
    /// Child node indices always exceed their parent's, so the walk ends.
    fn score(&self, row: &FeatureRow) -> f64 {
        if self.splits.is_empty() {
            return self.leaf_values[0];
        }
        let mut node = 0;
        loop {
            match self.splits[node].next(row) {
                Child::Node(next) => node = next,
                Child::Leaf(leaf) => return self.leaf_values[leaf],
            }
        }
    }
}

/// A loaded LightGBM model.
#[derive(Debug, Clone, PartialEq)]
pub struct LightGbmModel {
    objective: Objective,
    trees: Vec<Tree>,
    average_output: bool,
}

impl LightGbmModel {
    /// Load a model file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = read_model_text(path)?;
        let model = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), trees = model.trees.len(), "tree model parsed");
        Ok(model)
    }

    /// Parse model text.
    ///
    /// # Errors
    ///
    /// `InvalidModel` for malformed or unsupported content, `FeatureNames`
    /// when the model was trained on other columns.
    pub fn parse(text: &str) -> Result<Self> {
        parse::parse_model(text)
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Score one row.
    pub fn score_row(&self, row: &FeatureRow) -> f64 {
        let mut sum: f64 = self.trees.iter().map(|tree| tree.score(row)).sum();
        if self.average_output && !self.trees.is_empty() {
            sum /= self.trees.len() as f64;
        }
        self.objective.transform(sum)
    }
}

impl Predictor for LightGbmModel {
    fn describe(&self) -> String {
        format!("LightGBM, {} trees", self.trees.len())
    }

    fn predict(&self, rows: &FeatureMatrix) -> Result<RawScores> {
        Ok(RawScores::Column(
            rows.iter().map(|row| self.score_row(row)).collect(),
        ))
    }
}
