//! Prediction service data types

use serde::{Deserialize, Serialize};

/// Which endpoint of the prediction service to ask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    #[default]
    Predict,
    Explain,
}

impl PredictionMode {
    pub fn path(&self) -> &'static str {
        match self {
            PredictionMode::Predict => "predict-magnus-style",
            PredictionMode::Explain => "explain-move",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest<'a> {
    pub board: &'a str,
}

/// Response of the predict endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub predicted_move: String,
    #[serde(default)]
    pub confidence: f32,
}

/// Response of the explain endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainResponse {
    #[serde(rename = "move")]
    pub mv: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionDetail {
    /// Model confidence in `0.0..=1.0`.
    Confidence(f32),
    Explanation(String),
}

/// A predicted move in coordinate notation plus whatever the mode returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub uci: String,
    pub detail: PredictionDetail,
}

impl From<PredictResponse> for Prediction {
    fn from(r: PredictResponse) -> Self {
        Self {
            uci: r.predicted_move.trim().to_string(),
            detail: PredictionDetail::Confidence(r.confidence.clamp(0.0, 1.0)),
        }
    }
}

impl From<ExplainResponse> for Prediction {
    fn from(r: ExplainResponse) -> Self {
        Self {
            uci: r.mv.trim().to_string(),
            detail: PredictionDetail::Explanation(r.explanation.replace('"', "")),
        }
    }
}

impl Prediction {
    pub fn confidence(&self) -> Option<f32> {
        match self.detail {
            PredictionDetail::Confidence(c) => Some(c),
            PredictionDetail::Explanation(_) => None,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match &self.detail {
            PredictionDetail::Explanation(text) => Some(text),
            PredictionDetail::Confidence(_) => None,
        }
    }
}
