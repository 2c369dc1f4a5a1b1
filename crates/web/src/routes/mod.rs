use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_replay_core::scrape::ScrapePayload;
use chess_replay_core::{build, Orientation, PgnTags, RejectedMove};

use crate::error::AppError;
use crate::{AppState, CurrentGame};

pub mod predict;

#[derive(Serialize)]
pub struct GameView {
    pub url: Option<String>,
    pub orientation: Orientation,
    pub valid_moves: Vec<String>,
    pub rejected_moves: Vec<RejectedMove>,
    pub diagnostic: Option<String>,
    pub final_fen: String,
    pub pgn: String,
    pub result: Option<String>,
    pub last_ply: i64,
}

impl From<&CurrentGame> for GameView {
    fn from(current: &CurrentGame) -> Self {
        let game = &current.game;
        Self {
            url: current.url.clone(),
            orientation: current.orientation,
            valid_moves: game.valid_moves.clone(),
            rejected_moves: game.rejected_moves.clone(),
            diagnostic: game.diagnostic(),
            final_fen: game.final_fen.clone(),
            pgn: game.pgn.clone(),
            result: game.result.clone(),
            last_ply: game.last_ply(),
        }
    }
}

#[derive(Deserialize)]
pub struct PlyQuery {
    pub ply: Option<i64>,
}

#[derive(Serialize)]
pub struct PositionView {
    pub ply: i64,
    pub fen: String,
    pub label: String,
}

fn no_game() -> AppError {
    AppError::NotFound("No game loaded".to_string())
}

pub async fn load_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ScrapePayload>,
) -> Result<Json<GameView>, AppError> {
    let scraped = payload.into_result();
    let game = build(&scraped.tokens);

    tracing::info!(
        moves = game.move_count(),
        rejected = game.rejected_moves.len(),
        "Game rebuilt from scrape"
    );

    let current = CurrentGame {
        game,
        url: scraped.url,
        orientation: scraped.orientation,
    };
    let view = GameView::from(&current);
    *state.current()? = Some(current);

    Ok(Json(view))
}

pub async fn current_game(State(state): State<Arc<AppState>>) -> Result<Json<GameView>, AppError> {
    let guard = state.current()?;
    let current = guard.as_ref().ok_or_else(no_game)?;
    Ok(Json(GameView::from(current)))
}

/// Position at a ply; defaults to the final one.
pub async fn position(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlyQuery>,
) -> Result<Json<PositionView>, AppError> {
    let guard = state.current()?;
    let game = &guard.as_ref().ok_or_else(no_game)?.game;

    let ply = query
        .ply
        .unwrap_or_else(|| game.last_ply())
        .max(-1)
        .min(game.last_ply());

    Ok(Json(PositionView {
        ply,
        fen: game.position_at_ply(ply),
        label: game.ply_label(ply),
    }))
}

pub async fn export_pgn(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let guard = state.current()?;
    let current = guard.as_ref().ok_or_else(no_game)?;

    let tags = PgnTags {
        site: current.url.clone(),
        date: Some(chrono::Local::now().format("%Y.%m.%d").to_string()),
        ..PgnTags::default()
    };

    Ok((
        [(header::CONTENT_TYPE, "application/x-chess-pgn")],
        current.game.to_pgn(&tags),
    ))
}

pub async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use chess_replay_core::{PredictionClient, STARTING_FEN};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    pub(crate) fn test_app() -> Router {
        let predictor =
            PredictionClient::with_timeout("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        crate::app(Arc::new(AppState::new(predictor)))
    }

    pub(crate) async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub(crate) fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    const PAYLOAD: &str = r#"{
        "url": "https://example.com/game/99",
        "moves": [
            {"move": "e4", "piece": "", "player": "white"},
            {"move": "e5", "piece": "", "player": "black"},
            {"move": "f3", "piece": "N", "player": "white"},
            {"move": "q9", "piece": "", "player": "black"}
        ],
        "orientation": "black"
    }"#;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&test_app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_no_game_loaded() {
        let app = test_app();
        let (status, body) = send(&app, get("/api/game")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("No game loaded"));

        let (status, _) = send(&app, get("/api/game/position?ply=0")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_load_game_and_navigate() {
        let app = test_app();

        let (status, body) = send(&app, post_json("/api/game", PAYLOAD)).await;
        assert_eq!(status, StatusCode::OK);
        let view: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(view["valid_moves"], serde_json::json!(["e4", "e5", "Nf3"]));
        assert_eq!(view["orientation"], "black");
        assert_eq!(view["last_ply"], 2);
        assert_eq!(view["diagnostic"], "Invalid moves: q9 (move 4)");
        assert_eq!(view["rejected_moves"][0]["reason"]["kind"], "no_legal_interpretation");

        let (_, body) = send(&app, get("/api/game/position?ply=-1")).await;
        let start: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(start["fen"], STARTING_FEN);
        assert_eq!(start["label"], "Start");

        let (_, body) = send(&app, get("/api/game/position?ply=-5")).await;
        let before_start: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(before_start["ply"], -1);
        assert_eq!(before_start["fen"], STARTING_FEN);
        assert_eq!(before_start["label"], "Start");

        let (_, body) = send(&app, get("/api/game/position?ply=40")).await;
        let past_end: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(past_end["ply"], 2);

        let (_, body) = send(&app, get("/api/game/position")).await;
        let last: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(last["ply"], 2);
        assert_eq!(last["fen"], view["final_fen"]);
        assert_eq!(last["label"], "3/3 - Nf3");

        let (status, pgn) = send(&app, get("/api/game/pgn")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(pgn.contains("[Site \"https://example.com/game/99\"]"));
        assert!(pgn.ends_with("1. e4 e5 2. Nf3 *\n"));
    }
}
