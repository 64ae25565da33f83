//! Risk labels derived from classifier scores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores strictly above this value are labelled high risk.
pub const RISK_THRESHOLD: f64 = 0.5;

/// Binary postpartum depression risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    HighRisk,
    LowRisk,
}

impl RiskLabel {
    /// Threshold a score. A score of exactly 0.5 is low risk.
    pub fn from_score(score: f64) -> Self {
        if score > RISK_THRESHOLD {
            Self::HighRisk
        } else {
            Self::LowRisk
        }
    }

    /// Text written to the `Prediction` column of batch output.
    pub const fn description(self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk of Postpartum Depression",
            Self::LowRisk => "Low Risk of Postpartum Depression",
        }
    }

    /// Short label used in summaries.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::HighRisk => "High Risk",
            Self::LowRisk => "Low Risk",
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::HighRisk)
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A score and the label derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub score: f64,
    pub label: RiskLabel,
}

impl Prediction {
    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            label: RiskLabel::from_score(score),
        }
    }
}

/// Counts shown after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub low_risk: usize,
    pub high_risk: usize,
}

impl BatchSummary {
    pub fn from_predictions(predictions: &[Prediction]) -> Self {
        let high_risk = predictions.iter().filter(|p| p.label.is_high()).count();
        Self {
            total: predictions.len(),
            low_risk: predictions.len() - high_risk,
            high_risk,
        }
    }
}
