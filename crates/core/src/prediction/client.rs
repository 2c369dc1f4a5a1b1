//! HTTP client for the move prediction service

use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use super::types::*;
use crate::error::{Error, Result};

pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, mode: PredictionMode) -> String {
        format!("{}/{}", self.base_url, mode.path())
    }

    /// Ask the service for a move in the position given by `fen`.
    pub async fn predict(&self, fen: &str, mode: PredictionMode) -> Result<Prediction> {
        let response = self
            .client
            .post(self.endpoint(mode))
            .json(&PredictRequest { board: fen })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Prediction(format!(
                "API error: {} - {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let prediction = match mode {
            PredictionMode::Predict => response.json::<PredictResponse>().await?.into(),
            PredictionMode::Explain => response.json::<ExplainResponse>().await?.into(),
        };

        Ok(prediction)
    }

    /// Like [`predict`](Self::predict), but a failure only means there is
    /// nothing to show.
    pub async fn predict_or_none(&self, fen: &str, mode: PredictionMode) -> Option<Prediction> {
        match self.predict(fen, mode).await {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!(error = %e, ?mode, "prediction unavailable");
                None
            }
        }
    }
}
