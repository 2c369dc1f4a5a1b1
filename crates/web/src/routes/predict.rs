use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_replay_core::{overlay_for, position_from_fen, MoveOverlay, Prediction, PredictionMode};

use crate::error::AppError;
use crate::AppState;

#[derive(Deserialize)]
pub struct PredictBody {
    pub board: String,
    #[serde(default)]
    pub mode: PredictionMode,
}

#[derive(Serialize, Default)]
pub struct PredictView {
    /// Set when a newer request superseded this one.
    pub stale: bool,
    pub prediction: Option<Prediction>,
    pub overlay: Option<MoveOverlay>,
}

pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PredictBody>,
) -> Result<Json<PredictView>, AppError> {
    position_from_fen(&body.board)?;

    let ticket = state.gate.issue();
    let prediction = state.predictor.predict_or_none(&body.board, body.mode).await;

    let Some(prediction) = state.gate.accept(ticket, prediction) else {
        tracing::debug!("Discarding superseded prediction");
        return Ok(Json(PredictView {
            stale: true,
            ..PredictView::default()
        }));
    };

    let overlay = prediction.as_ref().and_then(|p| match overlay_for(&body.board, &p.uci) {
        Ok(overlay) => Some(overlay),
        Err(e) => {
            tracing::warn!("Predicted move {} not playable: {}", p.uci, e);
            None
        }
    });

    Ok(Json(PredictView {
        stale: false,
        prediction,
        overlay,
    }))
}
